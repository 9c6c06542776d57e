//! Response DTOs for the word shuffle API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for the read operation (GET /read)
#[derive(Debug, Clone, Serialize)]
pub struct ReadResponse {
    /// Unique, time-ordered identifier of this response
    pub uid: u64,
    /// The chosen word
    pub value: String,
}

impl ReadResponse {
    /// Creates a new ReadResponse
    pub fn new(uid: u64, value: impl Into<String>) -> Self {
        Self {
            uid,
            value: value.into(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_response_serialize() {
        let resp = ReadResponse::new(42, "alpha");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"uid":42,"value":"alpha"}"#);
    }

    #[test]
    fn test_read_response_keeps_full_u64() {
        let resp = ReadResponse::new(u64::MAX, "beta");
        let json: serde_json::Value = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["uid"].as_u64(), Some(u64::MAX));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
