use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use beacon_core::{ConnectionId, IceServerConfig, ServerMessage};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

struct SignalingInner {
    peers: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
    ice_servers: Vec<IceServerConfig>,
}

/// Owns the outbound queue of every live websocket.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
                ice_servers,
            }),
        }
    }

    pub fn ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.clone()
    }

    pub fn add_peer(&self, connection_id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(connection_id, tx);
    }

    pub fn remove_peer(&self, connection_id: &ConnectionId) {
        self.inner.peers.remove(connection_id);
    }

    pub fn peer_count(&self) -> usize {
        self.inner.peers.len()
    }

    fn encode(msg: &ServerMessage) -> Option<Message> {
        match serde_json::to_string(msg) {
            Ok(json) => Some(Message::Text(json.into())),
            Err(e) => {
                error!("Failed to serialize signal message: {}", e);
                None
            }
        }
    }

    fn send_frame(&self, connection_id: &ConnectionId, frame: Message) {
        let Some(peer) = self.inner.peers.get(connection_id) else {
            debug!("Skipping send to detached connection {}", connection_id);
            return;
        };

        if let Err(e) = peer.send(frame) {
            error!("Failed to queue WS message for {}: {:?}", connection_id, e);
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_to(&self, connection_id: ConnectionId, message: ServerMessage) {
        if let Some(frame) = Self::encode(&message) {
            self.send_frame(&connection_id, frame);
        }
    }

    async fn broadcast(&self, recipients: &[ConnectionId], message: ServerMessage) {
        let Some(frame) = Self::encode(&message) else {
            return;
        };

        for connection_id in recipients {
            self.send_frame(connection_id, frame.clone());
        }
    }
}
