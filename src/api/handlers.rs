//! API Handlers
//!
//! HTTP request handlers for each word shuffle endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, Method, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, warn};

use crate::config::{Config, ServiceConfiguration, APPLICATION_DESCRIPTION, BUILD_VERSION};
use crate::error::{Result, ServiceError};
use crate::metrics::{Counter, Metrics, EXPOSITION_CONTENT_TYPE};
use crate::models::{CreateRequest, DeleteRequest, ReadResponse, UpdateRequest, ValidateWords};
use crate::shutdown::ShutdownCoordinator;
use crate::uid::UidGenerator;
use crate::words::WordStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-only word list
    pub words: Arc<WordStore>,
    /// Unique ID generator
    pub uid: Arc<UidGenerator>,
    /// Request counters
    pub metrics: Arc<Metrics>,
    /// Shutdown lifecycle, consulted before every request
    pub shutdown: Arc<ShutdownCoordinator>,
    /// Upper bound for a single request
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(
        words: WordStore,
        uid: UidGenerator,
        metrics: Arc<Metrics>,
        shutdown: Arc<ShutdownCoordinator>,
    ) -> Self {
        Self {
            words: Arc::new(words),
            uid: Arc::new(uid),
            metrics,
            shutdown,
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Creates a new AppState around `words` with fresh metrics, a wall-clock
    /// UID generator and a running coordinator.
    pub fn with_words(words: WordStore) -> Self {
        let metrics = Arc::new(Metrics::new());
        let shutdown = Arc::new(ShutdownCoordinator::new(
            metrics.clone(),
            Duration::from_secs(10),
        ));
        Self::new(words, UidGenerator::new(0), metrics, shutdown)
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(
        config: &Config,
        service: &ServiceConfiguration,
        words: WordStore,
    ) -> Self {
        let metrics = Arc::new(Metrics::new());
        let shutdown = Arc::new(ShutdownCoordinator::new(
            metrics.clone(),
            config.drain_timeout(),
        ));
        let uid = UidGenerator::new(config.machine_id_for(service.listen));
        let mut state = Self::new(words, uid, metrics, shutdown);
        state.request_timeout = config.request_timeout();
        state
    }

    /// Logs `err` and updates the counter matching its class.
    ///
    /// Server faults count as errors; client faults and placeholder routes
    /// count as warnings. Draining rejections are not counted.
    pub fn record(&self, err: ServiceError) -> ServiceError {
        match &err {
            ServiceError::ShuttingDown => {}
            e if e.is_server_fault() => {
                self.metrics.increment(Counter::Errors);
                error!("{}", e);
            }
            e => {
                self.metrics.increment(Counter::Warnings);
                warn!("{}", e);
            }
        }
        err
    }
}

/// Middleware refusing every request once draining has begun.
pub async fn reject_when_draining(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.shutdown.is_running() {
        return state.record(ServiceError::ShuttingDown).into_response();
    }
    next.run(request).await
}

/// Handler for `/` and unknown paths.
///
/// Returns the service description and version.
pub async fn index_handler(State(state): State<AppState>) -> String {
    state.metrics.increment(Counter::Index);
    format!("{} v{}\n", APPLICATION_DESCRIPTION, BUILD_VERSION)
}

/// Handler for `/metrics`
///
/// Returns the counters in the text exposition format.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        state.metrics.render_exposition(),
    )
}

/// Handler for GET /read
///
/// Draws a random word and tags it with a fresh UID.
pub async fn read_handler(State(state): State<AppState>) -> Result<Response> {
    state.metrics.increment(Counter::Read);

    let body = read_word(&state).map_err(|e| state.record(e))?;
    info!("Returning {}", body);

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

fn read_word(state: &AppState) -> Result<String> {
    let value = state.words.pick_random()?;
    let uid = state.uid.next_id()?;
    Ok(serde_json::to_string(&ReadResponse::new(uid, value))?)
}

/// Handler for POST /create. Not implemented yet.
pub async fn create_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    payload: std::result::Result<Json<CreateRequest>, JsonRejection>,
) -> ServiceError {
    state.metrics.increment(Counter::Create);
    not_implemented(&state, "create", &method, &uri, payload)
}

/// Handler for PUT /update. Not implemented yet.
pub async fn update_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    payload: std::result::Result<Json<UpdateRequest>, JsonRejection>,
) -> ServiceError {
    state.metrics.increment(Counter::Update);
    not_implemented(&state, "update", &method, &uri, payload)
}

/// Handler for DELETE /delete. Not implemented yet.
pub async fn delete_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    payload: std::result::Result<Json<DeleteRequest>, JsonRejection>,
) -> ServiceError {
    state.metrics.increment(Counter::Delete);
    not_implemented(&state, "delete", &method, &uri, payload)
}

// Malformed bodies are reported as such; well-formed ones get 501.
fn not_implemented<T: ValidateWords>(
    state: &AppState,
    operation: &'static str,
    method: &Method,
    uri: &Uri,
    payload: std::result::Result<Json<T>, JsonRejection>,
) -> ServiceError {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return state.record(ServiceError::InvalidRequest(rejection.body_text()));
        }
    };
    if let Some(message) = request.validate() {
        return state.record(ServiceError::InvalidRequest(message));
    }

    warn!("Not implemented yet {} for {}", method, uri);
    state.record(ServiceError::NotImplemented(operation))
}

/// Fallback for verbs a route does not accept.
pub async fn method_not_allowed_handler(
    State(state): State<AppState>,
    method: Method,
) -> ServiceError {
    state.record(ServiceError::MethodNotAllowed(method))
}
