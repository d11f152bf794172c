//! Core pipeline types shared across steps.

mod context;
mod error;
mod state;

pub use context::{BuildContext, read_input};
pub use error::BuildError;
pub use state::{is_shutdown, register_server, setup_shutdown_handler};
