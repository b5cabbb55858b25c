//! HTTP protocol layer module
//!
//! Base HTTP functionality decoupled from the file-serving logic: MIME
//! detection, conditional request handling, response builders, and the
//! cross-origin isolation header injection.

pub mod cache;
pub mod isolation;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use isolation::apply_isolation_headers;
pub use response::{
    build_304_response, build_403_response, build_404_response, build_405_response,
    build_500_response, build_file_response, build_html_response, build_redirect_response,
};
