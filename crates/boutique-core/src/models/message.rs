use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Sender {
    User,
    Admin,
}

/// Admin-facing delivery hint. A UI affordance, not a delivery guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DeliveryStatus {
    Sent,
    Delivered,
}

/// A single chat message in a session transcript.
///
/// Once appended to a transcript, a message is never mutated or removed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Message {
    /// Timestamp-derived identifier. Unique enough for UI deduplication,
    /// not globally unique.
    pub id: i64,
    pub sender: Sender,
    pub content: String,
    /// Assigned by the relay at receipt time, serialized as ISO-8601.
    pub timestamp: jiff::Timestamp,
    pub status: DeliveryStatus,
}
