//! boutique-relay
//!
//! The support-chat mediator: a connection registry, a single admin slot,
//! and the in-memory transcript store. Every inbound wire event is handled
//! to completion before the next (the server serializes access behind one
//! mutex), so transcripts need no internal locking and per-session append
//! order equals arrival order.

pub mod relay;
pub mod store;
