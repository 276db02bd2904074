use crate::room::room_registry::{RegistryStats, RoomRegistry};
use crate::room::signaling_handler::SignalingHandler;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use beacon_core::{ConnectionId, PeerIdentity, RelayKind, RelayRequest, RoomId, ServerMessage};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Routes presence and negotiation messages between connections.
///
/// Holds no transport: membership lives in the injected [`RoomRegistry`] and
/// every outbound event goes through the [`SignalingOutput`] sink.
#[derive(Clone)]
pub struct RoomRouter {
    registry: Arc<RoomRegistry>,
    signaling: Arc<dyn SignalingOutput>,
}

impl RoomRouter {
    pub fn new(registry: Arc<RoomRegistry>, signaling: Arc<dyn SignalingOutput>) -> Self {
        Self {
            registry,
            signaling,
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn stats(&self) -> RegistryStats {
        self.registry.stats()
    }

    /// Adds the connection to the room and announces it to the other members.
    ///
    /// Membership is a set, so repeating a join does not grow the room, but
    /// the announcement is sent again on every call.
    pub async fn join(&self, connection_id: ConnectionId, room: RoomId, identity: PeerIdentity) {
        let Some(others) = self
            .registry
            .add_member(connection_id, &room, identity.clone())
        else {
            warn!(
                "Ignoring join of room '{}' from unknown connection {}",
                room, connection_id
            );
            return;
        };

        info!("Peer '{}' ({}) joined room '{}'", identity, connection_id, room);

        if others.is_empty() {
            return;
        }

        let msg = ServerMessage::PeerJoined {
            room,
            identity,
            connection_id,
        };
        self.signaling.broadcast(&others, msg).await;
    }

    /// Removes the connection from the room and tells the remaining members.
    pub async fn leave(&self, connection_id: ConnectionId, room: RoomId, identity: PeerIdentity) {
        let Some(remaining) = self.registry.remove_member(&connection_id, &room) else {
            debug!("{} is not a member of room '{}', nothing to leave", connection_id, room);
            return;
        };

        info!("Peer '{}' ({}) left room '{}'", identity, connection_id, room);

        if remaining.is_empty() {
            debug!("Room '{}' is empty, dropped", room);
            return;
        }

        let msg = ServerMessage::PeerLeft {
            room,
            identity,
            connection_id,
        };
        self.signaling.broadcast(&remaining, msg).await;
    }

    /// Forwards a negotiation payload to `target`. Returns whether it was handed
    /// to the sink; absent targets and self-addressed messages are dropped.
    pub async fn relay(
        &self,
        from: ConnectionId,
        kind: RelayKind,
        target: ConnectionId,
        sender: PeerIdentity,
        payload: Value,
    ) -> bool {
        if target == from {
            debug!("Dropping {} from {} addressed to itself", kind, from);
            return false;
        }

        if !self.registry.is_connected(&target) {
            debug!("Dropping {} from {}: target {} is not connected", kind, from, target);
            return false;
        }

        debug!("Relaying {} from '{}' ({}) to {}", kind, sender, from, target);

        let msg = ServerMessage::relay(kind, payload, sender, from);
        self.signaling.send_to(target, msg).await;
        true
    }

    fn sender_identity(&self, connection_id: &ConnectionId, claimed: Option<PeerIdentity>) -> PeerIdentity {
        claimed
            .or_else(|| self.registry.identity_of(connection_id))
            .unwrap_or_else(|| PeerIdentity::from(connection_id.to_string()))
    }
}

#[async_trait]
impl SignalingHandler for RoomRouter {
    async fn on_connect(&self, connection_id: ConnectionId) {
        if self.registry.register(connection_id) {
            info!("Connection {} registered", connection_id);
        } else {
            warn!("Connection {} was already registered", connection_id);
        }
    }

    async fn on_disconnect(&self, connection_id: ConnectionId) {
        let Some(rooms) = self.registry.unregister(&connection_id) else {
            debug!("Disconnect for unknown connection {}", connection_id);
            return;
        };

        info!(
            "Connection {} disconnected, leaving {} room(s)",
            connection_id,
            rooms.len()
        );

        for (room, identity) in rooms {
            self.leave(connection_id, room, identity).await;
        }
    }

    async fn on_join_room(&self, connection_id: ConnectionId, room: RoomId, identity: PeerIdentity) {
        self.join(connection_id, room, identity).await;
    }

    async fn on_leave_room(&self, connection_id: ConnectionId, room: RoomId) {
        let Some(identity) = self.registry.identity_in(&connection_id, &room) else {
            debug!("{} asked to leave room '{}' it never joined", connection_id, room);
            return;
        };
        self.leave(connection_id, room, identity).await;
    }

    async fn on_relay(&self, connection_id: ConnectionId, request: RelayRequest) {
        let RelayRequest {
            kind,
            target,
            payload,
            sender,
        } = request;

        let sender = self.sender_identity(&connection_id, sender);
        self.relay(connection_id, kind, target, sender, payload).await;
    }
}
