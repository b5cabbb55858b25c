// Serve loop module
// Sequential accept-handle-close loop: one connection is served to
// completion before the next is accepted. The only cancellation point is
// the interrupt-driven shutdown arm.

use crate::config::AppState;
use crate::handler;
use crate::logger;
use crate::server::signal::SignalHandler;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// Run the accept loop until shutdown is requested.
///
/// Accept errors and per-connection errors are logged and the loop keeps
/// going; nothing short of the shutdown signal stops the server. The
/// listener is dropped on return, releasing the port.
pub async fn run(listener: TcpListener, state: Arc<AppState>, signals: Arc<SignalHandler>) {
    loop {
        if signals.shutdown_requested.load(Ordering::SeqCst) {
            return;
        }

        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        if state.config.logging.access_log {
                            logger::log_connection_accepted(&peer_addr);
                        }
                        serve_connection(stream, &state, &signals).await;
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                return;
            }
        }
    }
}

/// Serve one connection to completion on the current task.
///
/// A shutdown signal arriving while the connection is open triggers hyper's
/// graceful shutdown, so an idle keep-alive peer cannot hold the loop past
/// the interrupt; the current request is still finished first.
async fn serve_connection(stream: TcpStream, state: &Arc<AppState>, signals: &SignalHandler) {
    let io = TokioIo::new(stream);
    let service_state = Arc::clone(state);

    let conn = http1::Builder::new().keep_alive(true).serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, Arc::clone(&service_state))),
    );
    tokio::pin!(conn);

    let result = tokio::select! {
        result = conn.as_mut() => result,
        () = signals.shutdown.notified() => {
            conn.as_mut().graceful_shutdown();
            conn.as_mut().await
        }
    };

    if let Err(err) = result {
        logger::log_connection_error(&err);
    }
}
