//! Cross-origin isolation header injection
//!
//! The one behavior that separates this server from a generic static file
//! server: every response carries `Cross-Origin-Opener-Policy: same-origin`
//! and `Cross-Origin-Embedder-Policy: require-corp`. Browsers require both
//! before a page may use `SharedArrayBuffer`, high-resolution timers and the
//! shared-memory primitives that multi-threaded WASM builds depend on.

use hyper::header::{HeaderName, HeaderValue};
use hyper::Response;

pub const OPENER_POLICY: &str = "cross-origin-opener-policy";
pub const OPENER_POLICY_VALUE: &str = "same-origin";
pub const EMBEDDER_POLICY: &str = "cross-origin-embedder-policy";
pub const EMBEDDER_POLICY_VALUE: &str = "require-corp";

/// Append both isolation headers to a finished response.
///
/// Called on every response the handler produces, whatever its status code.
/// This decorates the plain file-serving result instead of being wired into
/// each individual response builder.
pub fn apply_isolation_headers<B>(response: &mut Response<B>) {
    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static(OPENER_POLICY),
        HeaderValue::from_static(OPENER_POLICY_VALUE),
    );
    headers.insert(
        HeaderName::from_static(EMBEDDER_POLICY),
        HeaderValue::from_static(EMBEDDER_POLICY_VALUE),
    );
}
