use async_trait::async_trait;
use beacon_core::{ConnectionId, ServerMessage};

/// Outbound side of the router. Implemented by whatever owns the sockets.
///
/// Both methods are fire-and-forget: an unknown or already closed connection
/// is skipped without reporting back to the router.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn send_to(&self, connection_id: ConnectionId, message: ServerMessage);

    async fn broadcast(&self, recipients: &[ConnectionId], message: ServerMessage) {
        for connection_id in recipients {
            self.send_to(*connection_id, message.clone()).await;
        }
    }
}
