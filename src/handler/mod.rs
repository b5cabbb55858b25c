//! Request handler module
//!
//! Every request resolves to the static file tree; there is no routing table.

pub mod listing;
pub mod static_files;

// Re-export main entry point
pub use static_files::handle_request;
