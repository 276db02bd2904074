use crate::room::SignalingHandler;
use beacon_core::{ClientMessage, ConnectionId, ProtocolError};

/// Decodes one text frame and hands it to the matching handler method.
pub async fn dispatch_text(
    handler: &dyn SignalingHandler,
    connection_id: ConnectionId,
    text: &str,
) -> Result<(), ProtocolError> {
    match ClientMessage::decode(text)? {
        ClientMessage::JoinRoom { room, identity } => {
            handler.on_join_room(connection_id, room, identity).await;
        }
        ClientMessage::LeaveRoom { room } => {
            handler.on_leave_room(connection_id, room).await;
        }
        relay => {
            if let Some(request) = relay.into_relay() {
                handler.on_relay(connection_id, request).await;
            }
        }
    }

    Ok(())
}
