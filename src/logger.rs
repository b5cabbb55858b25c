use hyper::{Method, Uri, Version};
use std::net::SocketAddr;
use std::path::Path;

pub fn log_server_start(addr: &SocketAddr, root: &Path) {
    println!("Starting server at http://{addr}");
    println!("Serving files from: {}", root.display());
    println!("Press Ctrl+C to stop");
}

pub fn log_shutdown() {
    println!("\nShutting down server...");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[Error] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    println!("[{now}] [Request] {method} {uri} {version:?}");
}

pub fn log_response(status: u16, size: usize) {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    println!("[{now}] [Response] {status} ({size} bytes)");
}

pub fn log_warning(msg: &str) {
    eprintln!("[Warning] {msg}");
}

pub fn log_error(msg: &str) {
    eprintln!("[Error] {msg}");
}
