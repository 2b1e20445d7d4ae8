//! Wire-contract tests: the JSON the browser clients actually send must
//! parse, and outbound frames must carry the tags the clients match on.

use boutique_core::models::{ChatSession, DeliveryStatus, Message, Sender, UserInfo};
use boutique_core::wire::{ClientEvent, ServerEvent};

#[test]
fn register_shopper_parses_with_and_without_account_id() {
    let anonymous = r#"{
        "type": "register_shopper",
        "session_id": "user_1",
        "user_name": "An",
        "user_email": "an@example.com"
    }"#;
    match ClientEvent::from_json(anonymous).unwrap() {
        ClientEvent::RegisterShopper {
            session_id,
            registered_user_id,
            ..
        } => {
            assert_eq!(session_id, "user_1");
            assert!(registered_user_id.is_none());
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let logged_in = r#"{
        "type": "register_shopper",
        "session_id": "user_1",
        "user_name": "An",
        "user_email": "an@example.com",
        "registered_user_id": "64f1c0ffee"
    }"#;
    match ClientEvent::from_json(logged_in).unwrap() {
        ClientEvent::RegisterShopper {
            registered_user_id, ..
        } => assert_eq!(registered_user_id.as_deref(), Some("64f1c0ffee")),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn submit_message_ignores_presentation_only_fields() {
    // The storefront sends its optimistic sender/status fields along; the
    // relay only cares about id, content, and user_info.
    let raw = r#"{
        "type": "submit_message",
        "id": 1735000000000,
        "sender": "user",
        "content": "Hi",
        "status": "sent",
        "timestamp": "2026-08-30T10:00:00Z",
        "user_info": {"user_name": "An", "user_email": "an@example.com"}
    }"#;
    match ClientEvent::from_json(raw).unwrap() {
        ClientEvent::SubmitMessage {
            id,
            content,
            session_id,
            user_info,
            ..
        } => {
            assert_eq!(id, 1735000000000);
            assert_eq!(content, "Hi");
            assert!(session_id.is_none());
            assert_eq!(user_info.user_name, "An");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn unknown_event_type_is_an_error() {
    assert!(ClientEvent::from_json(r#"{"type": "co_tin_nhan", "content": "x"}"#).is_err());
    assert!(ClientEvent::from_json("not json at all").is_err());
}

fn sample_message() -> Message {
    Message {
        id: 1735000000000,
        sender: Sender::Admin,
        content: "Hello!".to_string(),
        timestamp: "2026-08-30T10:00:00Z".parse().unwrap(),
        status: DeliveryStatus::Sent,
    }
}

#[test]
fn server_events_carry_snake_case_tags() {
    let json = ServerEvent::AckSubmitted {
        message_id: 42,
    }
    .to_json()
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "ack_submitted");
    assert_eq!(value["message_id"], 42);

    let json = ServerEvent::DeliverAdminMessage {
        message: sample_message(),
    }
    .to_json()
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "deliver_admin_message");
    assert_eq!(value["message"]["sender"], "admin");
    assert_eq!(value["message"]["timestamp"], "2026-08-30T10:00:00Z");
}

#[test]
fn full_dump_is_keyed_by_session_id() {
    let mut sessions = std::collections::HashMap::new();
    let mut session = ChatSession::new(UserInfo {
        user_name: "An".to_string(),
        user_email: "an@example.com".to_string(),
        registered_user_id: None,
    });
    session.messages.push(sample_message());
    sessions.insert("user_1".to_string(), session);

    let json = ServerEvent::FullDump { sessions }.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "full_dump");
    assert_eq!(value["sessions"]["user_1"]["messages"][0]["content"], "Hello!");
    assert_eq!(value["sessions"]["user_1"]["user_info"]["user_name"], "An");
    // Absent account id is omitted, not serialized as null.
    assert!(
        value["sessions"]["user_1"]["user_info"]
            .get("registered_user_id")
            .is_none()
    );
}
