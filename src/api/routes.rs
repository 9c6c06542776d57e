//! API Routes
//!
//! Configures the Axum router with all word shuffle endpoints.

use axum::{
    middleware,
    routing::{any, delete, get, post, put},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::handlers::{
    create_handler, delete_handler, index_handler, method_not_allowed_handler, metrics_handler,
    read_handler, reject_when_draining, update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `/` (any verb, also every unknown path) - Service description
/// - `/metrics` (any verb) - Counter exposition
/// - `GET /read` - Random word with a UID
/// - `POST /create`, `PUT /update`, `DELETE /delete` - Not implemented (501)
///
/// Other verbs on the operation routes get 405.
///
/// # Middleware
/// - Draining guard: 503 once shutdown has begun
/// - Timeout: 408 when a request exceeds the configured limit
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout;

    Router::new()
        .route("/", any(index_handler))
        .route("/metrics", any(metrics_handler))
        .route(
            "/create",
            post(create_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/read",
            get(read_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/update",
            put(update_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/delete",
            delete(delete_handler).fallback(method_not_allowed_handler),
        )
        .fallback(index_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            reject_when_draining,
        ))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
