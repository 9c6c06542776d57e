//! Word Shuffle - A small HTTP service handing out random words
//!
//! Every word is tagged with a process-unique, time-ordered ID.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use word_shuffle::{
    api::create_router,
    config::{APPLICATION_DESCRIPTION, BUILD_VERSION},
    server::serve,
    spawn_metrics_reporter,
    words::Dataset,
    AppState, Config,
};

/// Main entry point for the word shuffle server.
///
/// # Startup Sequence
/// 1. Parse flags and environment into the configuration
/// 2. Print the version and exit when `--version` is given
/// 3. Initialize tracing subscriber for logging
/// 4. Load the dataset and resolve the bind address
/// 5. Start the signal listener and, in debug mode, the metrics reporter
/// 6. Serve until a shutdown signal, then drain
/// 7. Log the final counters and exit with the shutdown status
#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    if config.version {
        println!("{}", Config::version_text());
        return ExitCode::SUCCESS;
    }

    init_tracing(config.debug);

    match run(config).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    let default_filter = if debug {
        "word_shuffle=debug,tower_http=debug"
    } else {
        "word_shuffle=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    debug!("Logger initialised");
}

async fn run(config: Config) -> anyhow::Result<ExitCode> {
    info!("Starting {} v{}", APPLICATION_DESCRIPTION, BUILD_VERSION);
    if config.debug {
        debug!("Debug mode activated");
    }

    let words = Dataset::from_path(&config.dataset)
        .context("Error while reading the dataset file")?
        .into_store();
    info!("Word store initialized with {} words", words.len());

    let service = config.resolve().await?;
    let state = AppState::from_config(&config, &service, words);
    info!(
        "Configuration loaded: listen={}, machine_id={}, drain_timeout={}s, request_timeout={}s",
        service.listen,
        state.uid.machine_id(),
        config.drain_timeout,
        config.request_timeout
    );

    let coordinator = state.shutdown.clone();
    let signal_handle = coordinator.listen_for_signals();

    let reporter_handle = config
        .debug
        .then(|| spawn_metrics_reporter(state.metrics.clone(), config.metrics_interval()));

    let listener = TcpListener::bind(service.listen)
        .await
        .with_context(|| format!("Error while binding {}", service.listen))?;

    let outcome = serve(listener, create_router(state), coordinator.clone()).await;

    if let Some(handle) = reporter_handle {
        handle.abort();
        debug!("Metrics reporter aborted");
    }
    signal_handle.abort();

    Ok(coordinator
        .finish(&outcome)
        .unwrap_or_else(|| outcome.exit_code()))
}
