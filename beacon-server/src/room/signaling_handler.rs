use beacon_core::{ConnectionId, PeerIdentity, RelayRequest, RoomId};
use async_trait::async_trait;

/// Inbound events delivered by the connection manager, one call per event.
#[async_trait]
pub trait SignalingHandler: Send + Sync + 'static {
    async fn on_connect(&self, connection_id: ConnectionId);

    /// Leaves every room the connection had joined. Terminal for the id.
    async fn on_disconnect(&self, connection_id: ConnectionId);

    async fn on_join_room(&self, connection_id: ConnectionId, room: RoomId, identity: PeerIdentity);

    async fn on_leave_room(&self, connection_id: ConnectionId, room: RoomId);

    async fn on_relay(&self, connection_id: ConnectionId, request: RelayRequest);
}
