pub mod error;
pub mod model;

pub use error::{ModelError, ProtocolError};
pub use model::*;
