//! Server Runner
//!
//! Drives the axum server until the coordinator starts draining, then gives
//! in-flight requests a bounded window to complete.

use std::future::IntoFuture;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::shutdown::{ShutdownCoordinator, ShutdownOutcome};

/// Serves `app` on `listener` until shutdown and reports how draining ended.
///
/// The listener stops accepting as soon as draining begins. If accepted
/// requests are still running when the drain timeout elapses, the server
/// future is dropped and [`ShutdownOutcome::TimedOut`] is returned.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    coordinator: Arc<ShutdownCoordinator>,
) -> ShutdownOutcome {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(coordinator.draining())
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            // Finished without a drain request
            warn!("HTTP server stopped before a shutdown signal");
            return match result {
                Ok(()) => ShutdownOutcome::Clean,
                Err(e) => ShutdownOutcome::CloseFailed(e),
            };
        }
        _ = coordinator.draining() => {}
    }

    match tokio::time::timeout(coordinator.drain_timeout(), server).await {
        Ok(Ok(())) => ShutdownOutcome::Clean,
        Ok(Err(e)) => ShutdownOutcome::CloseFailed(e),
        Err(_) => ShutdownOutcome::TimedOut,
    }
}
