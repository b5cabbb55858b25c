//! Server module
//!
//! Listener construction, the accept/serve loop and interrupt handling.

pub mod listener;
mod serve;
pub mod signal;

// Re-export commonly used items
pub use listener::create_listener;
pub use serve::run;
pub use signal::{start_signal_handler, SignalHandler};
