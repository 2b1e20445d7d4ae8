use std::sync::Arc;

use tokio::sync::Mutex;

use boutique_relay::relay::Relay;

/// Shared application state, injected into route handlers via Axum state.
///
/// The relay sits behind a single mutex: each wire event locks, runs to
/// completion, and unlocks. That serialization is what gives per-session
/// transcripts their append-order guarantee.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Mutex<Relay>>,
}
