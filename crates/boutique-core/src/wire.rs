//! Wire protocol between the relay and its WebSocket peers.
//!
//! Both directions are closed tagged unions, matched exhaustively in the
//! relay: adding an event kind is a compile-time-checked change. Frames are
//! JSON text with a `type` discriminator, e.g.
//!
//! ```json
//! {"type": "register_shopper", "session_id": "user_1", "user_name": "An", "user_email": "an@example.com"}
//! ```
//!
//! Unknown fields in inbound frames are ignored (the browser clients send a
//! few presentation-only fields alongside the ones the relay cares about).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::{ChatSession, Message, UserInfo};

/// Events a connected peer may send to the relay.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum ClientEvent {
    /// Shopper announces its session identity, first thing after connect.
    RegisterShopper {
        session_id: String,
        user_name: String,
        user_email: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        registered_user_id: Option<String>,
    },
    /// Shopper submits a chat message.
    SubmitMessage {
        /// Client-assigned, timestamp-derived. Echoed back in the ack so
        /// the UI can flip its optimistic entry to "delivered".
        id: i64,
        content: String,
        /// Fallback identity when the connection never registered.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        session_id: Option<String>,
        /// The client's optimistic timestamp. The relay assigns its own at
        /// receipt; this one is accepted on the wire and discarded.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        timestamp: Option<jiff::Timestamp>,
        user_info: UserInfo,
    },
    /// Connection asks to become the sole admin operator.
    RegisterAdmin { token: String },
    /// Admin replies to a shopper session.
    SubmitReply { session_id: String, content: String },
}

/// Events the relay may send to a connected peer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum ServerEvent {
    /// Full stored transcript, sent to a shopper whose session pre-existed.
    HistoryReplay {
        user_info: UserInfo,
        messages: Vec<Message>,
    },
    /// Receipt confirmation to the submitting shopper only.
    AckSubmitted { message_id: i64 },
    /// An admin reply, forwarded to the target shopper connection.
    DeliverAdminMessage { message: Message },
    /// The entire transcript store, sent to a freshly registered admin.
    FullDump {
        sessions: HashMap<String, ChatSession>,
    },
    /// A shopper message, forwarded to the admin slot.
    DeliverShopperMessage {
        session_id: String,
        user_info: UserInfo,
        message: Message,
    },
    /// Confirms the admin's own send in the admin UI.
    EchoSent { session_id: String, message: Message },
    /// Request-level failure, currently only admin-registration rejection.
    Error { message: String },
}

impl ClientEvent {
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl ServerEvent {
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }
}
