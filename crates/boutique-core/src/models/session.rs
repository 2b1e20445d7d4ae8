use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::message::Message;

/// Display identity a shopper supplies when connecting.
///
/// Independent of authenticated-account identity: a shopper may chat
/// anonymously, with `registered_user_id` present only when logged in.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserInfo {
    pub user_name: String,
    pub user_email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub registered_user_id: Option<String>,
}

/// One shopper's chat identity and transcript.
///
/// Keyed in the store by a client-chosen session id that is stable across
/// reconnects for the same browser. `user_info` is refreshed whenever the
/// shopper reconnects; `messages` is append-only, insertion order =
/// chronological order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatSession {
    pub user_info: UserInfo,
    pub messages: Vec<Message>,
}

impl ChatSession {
    pub fn new(user_info: UserInfo) -> Self {
        Self {
            user_info,
            messages: Vec::new(),
        }
    }
}
