mod connection;
mod peer;
mod room;
mod signaling;

pub use connection::ConnectionId;
pub use peer::PeerIdentity;
pub use room::RoomId;
pub use signaling::{ClientMessage, IceServerConfig, RelayKind, RelayRequest, ServerMessage};
