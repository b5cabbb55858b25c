//! Local static file server with cross-origin isolation headers.
//!
//! Serves a directory tree over HTTP/1.x and appends
//! `Cross-Origin-Opener-Policy: same-origin` and
//! `Cross-Origin-Embedder-Policy: require-corp` to every response, which lets
//! pages served from this origin use `SharedArrayBuffer` and multi-threaded
//! WASM execution in a browser.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
