use coi_serve::{config, logger, server};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // One connection at a time on the main thread; a local development
    // utility has no use for a worker pool
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let root = cfg.root_dir()?.canonicalize()?;

    // Bind failure is fatal: propagate and fail to start
    let listener = server::create_listener(addr, cfg.server.reuse_address)?;
    let local_addr = listener.local_addr()?;

    let state = Arc::new(config::AppState::new(cfg, root));
    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&local_addr, &state.root);

    server::run(listener, state, signals).await;
    Ok(())
}
