use std::collections::HashMap;

use boutique_core::models::{ChatSession, Message, UserInfo};

/// Process-lifetime store of per-session transcripts.
///
/// Owned exclusively by the relay and never persisted: transcripts survive
/// shopper disconnects but vanish on process restart. There is no expiry or
/// size bound — sessions accumulate for as long as the process runs.
#[derive(Debug, Default)]
pub struct TranscriptStore {
    sessions: HashMap<String, ChatSession>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, session_id: &str) -> Option<&ChatSession> {
        self.sessions.get(session_id)
    }

    /// Create the session if unseen, otherwise refresh its user info.
    /// Returns whether the session already existed.
    pub fn register(&mut self, session_id: &str, user_info: UserInfo) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(session) => {
                session.user_info = user_info;
                true
            }
            None => {
                self.sessions
                    .insert(session_id.to_string(), ChatSession::new(user_info));
                false
            }
        }
    }

    /// Append to a session, creating it with `user_info` when unseen.
    /// A message may arrive without a prior registration.
    pub fn append(
        &mut self,
        session_id: &str,
        user_info: UserInfo,
        message: Message,
    ) -> &ChatSession {
        let session = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| ChatSession::new(user_info));
        session.messages.push(message);
        session
    }

    /// Append only when the session already exists. Returns whether the
    /// message was stored; admin sends never create sessions.
    pub fn append_existing(&mut self, session_id: &str, message: Message) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(session) => {
                session.messages.push(message);
                true
            }
            None => false,
        }
    }

    /// Snapshot of every session, for the admin full dump.
    pub fn dump(&self) -> HashMap<String, ChatSession> {
        self.sessions.clone()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
