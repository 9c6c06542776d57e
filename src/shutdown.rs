//! Shutdown Module
//!
//! Coordinates the Running → Draining → Stopped lifecycle of the server.
//!
//! The first SIGINT/SIGTERM moves the server to Draining, which stops the
//! listener and starts the bounded drain window. Further signals are
//! absorbed. The final metrics snapshot is logged once, when the
//! coordinator reaches Stopped.

use std::fmt;
use std::future::Future;
use std::process::ExitCode;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::metrics::Metrics;

// == Shutdown State ==
/// Lifecycle state of the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ShutdownState {
    Running = 0,
    Draining = 1,
    Stopped = 2,
}

impl ShutdownState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ShutdownState::Running,
            1 => ShutdownState::Draining,
            _ => ShutdownState::Stopped,
        }
    }
}

// == Shutdown Outcome ==
/// How the drain phase ended.
#[derive(Debug)]
pub enum ShutdownOutcome {
    /// Every accepted request completed inside the drain window
    Clean,
    /// The drain window elapsed with requests still in flight
    TimedOut,
    /// The server reported an error while closing
    CloseFailed(std::io::Error),
}

impl ShutdownOutcome {
    /// Numeric process exit status for this outcome.
    pub fn exit_status(&self) -> u8 {
        match self {
            ShutdownOutcome::Clean => 0,
            ShutdownOutcome::CloseFailed(_) => 1,
            ShutdownOutcome::TimedOut => 2,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, ShutdownOutcome::Clean)
    }
}

impl fmt::Display for ShutdownOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownOutcome::Clean => write!(f, "clean"),
            ShutdownOutcome::TimedOut => write!(f, "drain timed out"),
            ShutdownOutcome::CloseFailed(e) => write!(f, "close failed: {}", e),
        }
    }
}

// == Shutdown Coordinator ==
/// Owns the shutdown state transitions.
///
/// Shared as `Arc<ShutdownCoordinator>` between the signal task, the server
/// runner and the request middleware.
#[derive(Debug)]
pub struct ShutdownCoordinator {
    state: AtomicU8,
    draining: CancellationToken,
    drain_timeout: Duration,
    metrics: Arc<Metrics>,
}

impl ShutdownCoordinator {
    /// Creates a coordinator in the Running state.
    pub fn new(metrics: Arc<Metrics>, drain_timeout: Duration) -> Self {
        Self {
            state: AtomicU8::new(ShutdownState::Running as u8),
            draining: CancellationToken::new(),
            drain_timeout,
            metrics,
        }
    }

    pub fn state(&self) -> ShutdownState {
        ShutdownState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_running(&self) -> bool {
        self.state() == ShutdownState::Running
    }

    pub fn drain_timeout(&self) -> Duration {
        self.drain_timeout
    }

    // == Begin Drain ==
    /// Moves Running → Draining.
    ///
    /// Only the first call makes the transition and returns `true`.
    pub fn begin_drain(&self) -> bool {
        let moved = self
            .state
            .compare_exchange(
                ShutdownState::Running as u8,
                ShutdownState::Draining as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();

        if moved {
            info!(
                "Draining in-flight requests for up to {:?}",
                self.drain_timeout
            );
            self.draining.cancel();
        } else {
            warn!("Shutdown already initiated, ignoring signal");
        }
        moved
    }

    /// Resolves once draining has begun.
    pub fn draining(&self) -> impl Future<Output = ()> + Send + 'static {
        let token = self.draining.clone();
        async move { token.cancelled().await }
    }

    // == Signal Listener ==
    /// Spawns a task turning every SIGINT/SIGTERM into [`Self::begin_drain`].
    ///
    /// The task keeps listening after the first signal so repeated signals
    /// are absorbed instead of killing the process.
    pub fn listen_for_signals(self: &Arc<Self>) -> JoinHandle<()> {
        let coordinator = Arc::clone(self);
        tokio::spawn(async move {
            info!("Signal handler started. Listening for SIGINT and SIGTERM");
            loop {
                let name = wait_for_signal().await;
                info!("Received {}, initiating shutdown...", name);
                coordinator.begin_drain();
            }
        })
    }

    // == Finish ==
    /// Moves to Stopped and logs the final metrics snapshot.
    ///
    /// Returns the exit code on the first call only; later calls return
    /// `None` and log nothing.
    pub fn finish(&self, outcome: &ShutdownOutcome) -> Option<ExitCode> {
        let previous = self
            .state
            .swap(ShutdownState::Stopped as u8, Ordering::AcqRel);
        if ShutdownState::from_u8(previous) == ShutdownState::Stopped {
            return None;
        }
        self.draining.cancel();

        match outcome {
            ShutdownOutcome::Clean => info!("HTTP server shutdown complete"),
            ShutdownOutcome::TimedOut => error!(
                "HTTP server shutdown timed out after {:?}, closing remaining connections",
                self.drain_timeout
            ),
            ShutdownOutcome::CloseFailed(e) => error!("HTTP server shutdown error: {}", e),
        }
        self.metrics.snapshot().log("Counters");

        Some(outcome.exit_code())
    }
}

async fn wait_for_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}
