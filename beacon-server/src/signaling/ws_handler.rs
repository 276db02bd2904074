use crate::app::AppState;
use crate::room::SignalingHandler;
use crate::signaling::{SignalingOutput, dispatch_text};
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use beacon_core::{ConnectionId, ServerMessage};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::new();
    info!("New WebSocket connection: {}", connection_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.add_peer(connection_id, tx);
    state.router.on_connect(connection_id).await;

    let welcome = ServerMessage::Welcome {
        connection_id,
        ice_servers: state.signaling.ice_servers(),
    };
    state.signaling.send_to(connection_id, welcome).await;

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let state = state.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        if let Err(e) = dispatch_text(&state.router, connection_id, text.as_str()).await {
                            warn!("Invalid signal from {}: {}", connection_id, e);
                        }
                    }
                    Message::Close(_) => break,
                    _ => debug!("Ignoring non-text frame from {}", connection_id),
                }
            }
        }
    });

    // A dispatch still in flight must finish before its memberships are torn down.
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
            let _ = recv_task.await;
        }
        _ = (&mut recv_task) => send_task.abort(),
    };

    state.router.on_disconnect(connection_id).await;
    state.signaling.remove_peer(&connection_id);
    info!("WebSocket disconnected: {}", connection_id);
    debug!("{} sockets still attached", state.signaling.peer_count());
}
