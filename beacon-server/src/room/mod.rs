mod room_registry;
mod room_router;
mod signaling_handler;

pub use room_registry::*;
pub use room_router::*;
pub use signaling_handler::*;
