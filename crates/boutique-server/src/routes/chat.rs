use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::warn;

use boutique_core::wire::{ClientEvent, ServerEvent};

use crate::state::AppState;

pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one WebSocket connection: register it with the relay, drain the
/// relay's outbound channel into the socket, and feed inbound frames back
/// into the relay until the peer goes away.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    let conn_id = state.relay.lock().await.connect(tx);

    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match event.to_json() {
                Ok(json) => json,
                Err(e) => {
                    warn!(%conn_id, error = %e, "dropping unserializable event");
                    continue;
                }
            };
            if sink.send(WsMessage::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Malformed frames are logged and skipped; the relay does no payload
    // validation beyond the tagged-union shape.
    while let Some(frame) = stream.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(_) => break,
        };
        match frame {
            WsMessage::Text(text) => match ClientEvent::from_json(text.as_str()) {
                Ok(event) => state.relay.lock().await.handle(conn_id, event),
                Err(e) => warn!(%conn_id, error = %e, "ignoring malformed frame"),
            },
            WsMessage::Close(_) => break,
            _ => {}
        }
    }

    state.relay.lock().await.disconnect(conn_id);
    send_task.abort();
}
