//! Error types for the word shuffle service
//!
//! Provides unified per-request error handling using thiserror.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::uid::UidError;

// == Service Error Enum ==
/// Unified per-request error type for the service.
///
/// Every variant is converted into a JSON `{"error": ".."}` body with a
/// matching status code. Only server faults count towards the error counter.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The word store holds no words
    #[error("Word store is empty")]
    EmptyWordStore,

    /// The unique ID generator could not produce an ID
    #[error("UID generation failed: {0}")]
    Uid(#[from] UidError),

    /// The response body could not be serialized
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The verb is not accepted by the route
    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),

    /// The route exists but has no implementation yet
    #[error("Operation {0} is not implemented")]
    NotImplemented(&'static str),

    /// The service is draining and refuses new requests
    #[error("Service is shutting down")]
    ShuttingDown,
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::EmptyWordStore
            | ServiceError::Uid(_)
            | ServiceError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ServiceError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            ServiceError::ShuttingDown => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Whether the failure was caused by the server rather than the client.
    pub fn is_server_fault(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handlers.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_faults() {
        assert!(ServiceError::EmptyWordStore.is_server_fault());
        assert!(ServiceError::Uid(UidError::TimeOverflow).is_server_fault());
    }

    #[test]
    fn test_client_faults_are_not_server_faults() {
        assert!(!ServiceError::InvalidRequest("bad".to_string()).is_server_fault());
        assert!(!ServiceError::MethodNotAllowed(Method::POST).is_server_fault());
        assert!(!ServiceError::NotImplemented("create").is_server_fault());
        assert!(!ServiceError::ShuttingDown.is_server_fault());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::MethodNotAllowed(Method::DELETE).status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ServiceError::NotImplemented("update").status_code(),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            ServiceError::ShuttingDown.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = ServiceError::EmptyWordStore.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
