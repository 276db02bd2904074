use crate::error::ProtocolError;
use crate::model::connection::ConnectionId;
use crate::model::peer::PeerIdentity;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RelayKind {
    Offer,
    Answer,
    Candidate,
}

impl fmt::Display for RelayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Offer => "offer",
            Self::Answer => "answer",
            Self::Candidate => "candidate",
        };
        f.write_str(name)
    }
}

/// A negotiation payload addressed to a single connection.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayRequest {
    pub kind: RelayKind,
    pub target: ConnectionId,
    pub payload: Value,
    pub sender: Option<PeerIdentity>,
}

/// Frames sent by clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ClientMessage {
    JoinRoom {
        room: RoomId,
        identity: PeerIdentity,
    },
    LeaveRoom {
        room: RoomId,
    },
    Offer {
        target: ConnectionId,
        sdp: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sender: Option<PeerIdentity>,
    },
    Answer {
        target: ConnectionId,
        sdp: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sender: Option<PeerIdentity>,
    },
    #[serde(alias = "ice-candidate")]
    Candidate {
        target: ConnectionId,
        candidate: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sender: Option<PeerIdentity>,
    },
}

impl ClientMessage {
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Splits a relay frame into its routing parts. `None` for room frames.
    pub fn into_relay(self) -> Option<RelayRequest> {
        let (kind, target, payload, sender) = match self {
            Self::Offer {
                target,
                sdp,
                sender,
            } => (RelayKind::Offer, target, sdp, sender),
            Self::Answer {
                target,
                sdp,
                sender,
            } => (RelayKind::Answer, target, sdp, sender),
            Self::Candidate {
                target,
                candidate,
                sender,
            } => (RelayKind::Candidate, target, candidate, sender),
            Self::JoinRoom { .. } | Self::LeaveRoom { .. } => return None,
        };

        Some(RelayRequest {
            kind,
            target,
            payload,
            sender,
        })
    }
}

/// Frames sent by the relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ServerMessage {
    Welcome {
        connection_id: ConnectionId,
        ice_servers: Vec<IceServerConfig>,
    },
    PeerJoined {
        room: RoomId,
        identity: PeerIdentity,
        connection_id: ConnectionId,
    },
    PeerLeft {
        room: RoomId,
        identity: PeerIdentity,
        connection_id: ConnectionId,
    },
    Offer {
        sdp: Value,
        sender: PeerIdentity,
        from: ConnectionId,
    },
    Answer {
        sdp: Value,
        sender: PeerIdentity,
        from: ConnectionId,
    },
    Candidate {
        candidate: Value,
        sender: PeerIdentity,
        from: ConnectionId,
    },
}

impl ServerMessage {
    pub fn relay(kind: RelayKind, payload: Value, sender: PeerIdentity, from: ConnectionId) -> Self {
        match kind {
            RelayKind::Offer => Self::Offer {
                sdp: payload,
                sender,
                from,
            },
            RelayKind::Answer => Self::Answer {
                sdp: payload,
                sender,
                from,
            },
            RelayKind::Candidate => Self::Candidate {
                candidate: payload,
                sender,
                from,
            },
        }
    }

}
