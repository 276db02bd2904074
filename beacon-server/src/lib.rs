mod app;
mod config;
mod error;
mod room;
mod signaling;

pub use app::*;
pub use config::*;
pub use error::*;
pub use room::*;
pub use signaling::*;
