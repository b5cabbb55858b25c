// Listener module
// Creates the TCP listener with SO_REUSEADDR so a restart can rebind
// immediately after the previous instance released the port

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a `TcpListener`, optionally with `SO_REUSEADDR` enabled.
///
/// `SO_REUSEADDR` lets a new listener bind to a port still in `TIME_WAIT`
/// from a prior instance, so restarting right after a stop does not fail
/// with an address-in-use error.
///
/// # Returns
///
/// * `Ok(TcpListener)` - Successfully created and bound listener
/// * `Err(std::io::Error)` - Failed to create or bind socket; fatal at startup
pub fn create_listener(
    addr: std::net::SocketAddr,
    reuse_address: bool,
) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    if reuse_address {
        socket.set_reuse_address(true)?;
    }

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
