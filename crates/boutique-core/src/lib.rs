//! boutique-core
//!
//! Pure domain types and the chat wire protocol. No I/O, no runtime —
//! this is the shared vocabulary of the Boutique support-chat system.

pub mod error;
pub mod models;
pub mod wire;
