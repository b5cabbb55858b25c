//! Static file serving module
//!
//! Maps request paths onto the served root, streams file contents or
//! directory listings back, and finishes every response by injecting the
//! cross-origin isolation headers.

use crate::config::AppState;
use crate::handler::listing;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// Request context encapsulating the parts of the request the file server
/// cares about
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Outcome of resolving a request path against the served root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    NotFound,
    Forbidden,
}

/// Main entry point for HTTP request handling.
///
/// Builds the file-serving response, then applies the isolation headers to
/// it, whatever the status code. Errors never propagate past the request
/// they occurred in.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let access_log = state.config.logging.access_log;
    if access_log {
        logger::log_request(&method, req.uri(), req.version());
    }

    let mut response = match check_http_method(&method) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                path: req.uri().path(),
                is_head: method == Method::HEAD,
                if_none_match: req
                    .headers()
                    .get("if-none-match")
                    .and_then(|v| v.to_str().ok())
                    .map(ToString::to_string),
            };
            serve_path(&ctx, &state).await
        }
    };

    http::apply_isolation_headers(&mut response);

    if access_log {
        let size = response.body().size_hint().exact().unwrap_or(0);
        logger::log_response(response.status().as_u16(), usize::try_from(size).unwrap_or(0));
    }

    Ok(response)
}

/// Only GET and HEAD are served; anything else gets a 405
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

async fn serve_path(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let resolved = match resolve_path(&state.root, ctx.path) {
        Ok(p) => p,
        Err(PathError::NotFound) => return http::build_404_response(),
        Err(PathError::Forbidden) => return http::build_403_response(),
    };

    if resolved.is_dir() {
        serve_directory(ctx, state, &resolved).await
    } else {
        serve_file(ctx, &resolved).await
    }
}

/// Resolve a request path to a canonical filesystem path under `root`.
///
/// The path is percent-decoded, joined onto the root and canonicalized;
/// anything that canonicalizes outside the root (`..` traversal, symlinks
/// pointing out of the tree) is treated as not found.
pub fn resolve_path(root: &Path, url_path: &str) -> Result<PathBuf, PathError> {
    let decoded = percent_decode(url_path).ok_or(PathError::NotFound)?;
    if decoded.contains('\0') {
        return Err(PathError::NotFound);
    }

    let joined = root.join(decoded.trim_start_matches('/'));
    let canonical = joined.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => PathError::Forbidden,
        _ => PathError::NotFound,
    })?;

    if canonical.starts_with(root) {
        Ok(canonical)
    } else {
        logger::log_warning(&format!("Path traversal attempt blocked: {url_path}"));
        Err(PathError::NotFound)
    }
}

async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> Response<Full<Bytes>> {
    // Directory URLs get their trailing slash first, so relative links in
    // the listing and in served pages resolve correctly
    if !ctx.path.ends_with('/') {
        return http::build_redirect_response(&format!("{}/", ctx.path));
    }

    for index in &state.config.server.index_files {
        let candidate = dir.join(index);
        if candidate.is_file() {
            return serve_file(ctx, &candidate).await;
        }
    }

    match listing::render_listing(dir, ctx.path).await {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => io_error_response(&e, dir),
    }
}

async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    let meta = match fs::metadata(path).await {
        Ok(m) => m,
        Err(e) => return io_error_response(&e, path),
    };

    let etag = cache::file_etag(&meta);
    if cache::etag_matches(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    // The file can disappear or lose permissions between resolution and
    // read; that stays a per-request error
    let data = match fs::read(path).await {
        Ok(d) => d,
        Err(e) => return io_error_response(&e, path),
    };

    http::build_file_response(
        data,
        mime::content_type_for(path),
        &etag,
        meta.modified().ok(),
        ctx.is_head,
    )
}

fn io_error_response(err: &std::io::Error, path: &Path) -> Response<Full<Bytes>> {
    match err.kind() {
        std::io::ErrorKind::NotFound => http::build_404_response(),
        std::io::ErrorKind::PermissionDenied => http::build_403_response(),
        _ => {
            logger::log_error(&format!("Failed to read '{}': {err}", path.display()));
            http::build_500_response()
        }
    }
}

/// Decode percent escapes in a request path.
///
/// Returns None for truncated escapes or sequences that do not decode to
/// valid UTF-8.
fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = std::str::from_utf8(bytes.get(i + 1..i + 3)?).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
