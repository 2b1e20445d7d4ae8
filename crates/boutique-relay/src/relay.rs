//! The relay state machine: role registration, message routing, and the
//! single admin slot.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use boutique_core::models::{DeliveryStatus, Message, Sender, UserInfo};
use boutique_core::wire::{ClientEvent, ServerEvent};

use crate::store::TranscriptStore;

/// Sender half of a connection's outbound event channel. Pushes are
/// fire-and-forget: there is no backpressure and a closed receiver just
/// means the socket is going away.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

struct Connection {
    sender: EventSender,
    /// Shopper session this connection speaks for, once known. Used for
    /// targeted delivery of admin replies.
    session_id: Option<String>,
}

/// The chat relay. Roles are not declared at connect time: a connection
/// becomes a shopper or the admin through the first registration event it
/// sends. At most one admin exists at a time; a later registration evicts
/// the earlier one.
///
/// All mutation happens in [`Relay::handle`], [`Relay::connect`], and
/// [`Relay::disconnect`]; the caller serializes access (the server holds
/// the relay behind one async mutex), so each event runs to completion
/// before the next and no further locking is needed here.
pub struct Relay {
    store: TranscriptStore,
    connections: HashMap<Uuid, Connection>,
    admin: Option<Uuid>,
    admin_token: String,
}

impl Relay {
    pub fn new(admin_token: impl Into<String>) -> Self {
        Self {
            store: TranscriptStore::new(),
            connections: HashMap::new(),
            admin: None,
            admin_token: admin_token.into(),
        }
    }

    /// Register a freshly accepted connection and return its id.
    pub fn connect(&mut self, sender: EventSender) -> Uuid {
        let conn_id = Uuid::new_v4();
        self.connections.insert(
            conn_id,
            Connection {
                sender,
                session_id: None,
            },
        );
        debug!(%conn_id, "connection opened");
        conn_id
    }

    /// Release a connection. Clears the admin slot when the admin leaves;
    /// transcripts are untouched.
    pub fn disconnect(&mut self, conn_id: Uuid) {
        if self.admin == Some(conn_id) {
            info!(%conn_id, "admin disconnected, slot cleared");
            self.admin = None;
        }
        self.connections.remove(&conn_id);
        debug!(%conn_id, "connection closed");
    }

    /// Handle one inbound wire event to completion.
    pub fn handle(&mut self, conn_id: Uuid, event: ClientEvent) {
        match event {
            ClientEvent::RegisterShopper {
                session_id,
                user_name,
                user_email,
                registered_user_id,
            } => self.register_shopper(
                conn_id,
                session_id,
                UserInfo {
                    user_name,
                    user_email,
                    registered_user_id,
                },
            ),
            ClientEvent::SubmitMessage {
                id,
                content,
                session_id,
                timestamp: _,
                user_info,
            } => self.submit_message(conn_id, id, content, session_id, user_info),
            ClientEvent::RegisterAdmin { token } => self.register_admin(conn_id, &token),
            ClientEvent::SubmitReply {
                session_id,
                content,
            } => self.submit_reply(session_id, content),
        }
    }

    /// Read-only view of a session's transcript.
    pub fn transcript(&self, session_id: &str) -> Option<&[Message]> {
        self.store.get(session_id).map(|s| s.messages.as_slice())
    }

    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    // ── Event handlers ───────────────────────────────────────────────────

    fn register_shopper(&mut self, conn_id: Uuid, session_id: String, user_info: UserInfo) {
        let existed = self.store.register(&session_id, user_info);
        if existed {
            // Replay goes to this connection only; other connections on the
            // same session are left alone.
            if let Some(session) = self.store.get(&session_id) {
                self.send_to(
                    conn_id,
                    ServerEvent::HistoryReplay {
                        user_info: session.user_info.clone(),
                        messages: session.messages.clone(),
                    },
                );
            }
        }
        if let Some(conn) = self.connections.get_mut(&conn_id) {
            conn.session_id = Some(session_id.clone());
        }
        info!(%conn_id, session_id, existed, "shopper registered");
    }

    fn submit_message(
        &mut self,
        conn_id: Uuid,
        id: i64,
        content: String,
        session_id: Option<String>,
        user_info: UserInfo,
    ) {
        // Prefer the association made at registration; a message may arrive
        // without one, in which case the payload's session id or the
        // connection id itself stands in.
        let session_id = self
            .connections
            .get(&conn_id)
            .and_then(|c| c.session_id.clone())
            .or(session_id)
            .unwrap_or_else(|| conn_id.to_string());
        if let Some(conn) = self.connections.get_mut(&conn_id) {
            conn.session_id.get_or_insert_with(|| session_id.clone());
        }

        let message = Message {
            id,
            sender: Sender::User,
            content,
            timestamp: jiff::Timestamp::now(),
            status: DeliveryStatus::Sent,
        };
        let session = self.store.append(&session_id, user_info, message.clone());
        let user_info = session.user_info.clone();
        debug!(session_id, message_id = id, "shopper message appended");

        match self.admin {
            Some(admin_id) => self.send_to(
                admin_id,
                ServerEvent::DeliverShopperMessage {
                    session_id: session_id.clone(),
                    user_info,
                    message,
                },
            ),
            None => debug!(session_id, "no admin online, message retained for next full dump"),
        }

        self.send_to(conn_id, ServerEvent::AckSubmitted { message_id: id });
    }

    fn register_admin(&mut self, conn_id: Uuid, token: &str) {
        if token != self.admin_token {
            warn!(%conn_id, "admin registration rejected: bad token");
            self.send_to(
                conn_id,
                ServerEvent::Error {
                    message: "admin registration rejected".to_string(),
                },
            );
            return;
        }

        if let Some(previous) = self.admin.replace(conn_id) {
            if previous != conn_id {
                info!(%previous, %conn_id, "admin slot taken over");
            }
        }
        self.send_to(
            conn_id,
            ServerEvent::FullDump {
                sessions: self.store.dump(),
            },
        );
        info!(%conn_id, sessions = self.store.len(), "admin registered");
    }

    fn submit_reply(&mut self, session_id: String, content: String) {
        let now = jiff::Timestamp::now();
        let message = Message {
            id: now.as_millisecond(),
            sender: Sender::Admin,
            content,
            timestamp: now,
            status: DeliveryStatus::Sent,
        };

        // Admin sends never create sessions: no session, no reply.
        if !self.store.append_existing(&session_id, message.clone()) {
            warn!(session_id, "admin reply dropped: unknown session");
            return;
        }

        let target = self
            .connections
            .iter()
            .find(|(_, conn)| conn.session_id.as_deref() == Some(session_id.as_str()))
            .map(|(id, _)| *id);
        match target {
            Some(shopper_id) => self.send_to(
                shopper_id,
                ServerEvent::DeliverAdminMessage {
                    message: message.clone(),
                },
            ),
            None => debug!(session_id, "shopper offline, reply retained in transcript"),
        }

        if let Some(admin_id) = self.admin {
            self.send_to(
                admin_id,
                ServerEvent::EchoSent {
                    session_id,
                    message,
                },
            );
        }
    }

    /// Fire-and-forget push onto a connection's outbound channel.
    fn send_to(&self, conn_id: Uuid, event: ServerEvent) {
        if let Some(conn) = self.connections.get(&conn_id) {
            if conn.sender.send(event).is_err() {
                debug!(%conn_id, "outbound channel closed, event dropped");
            }
        }
    }
}
