//! Request DTOs for the word shuffle API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the create operation (POST /create)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequest {
    /// The word to add
    pub value: String,
}

/// Request body for the update operation (PUT /update)
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequest {
    /// The word to replace
    pub value_old: String,
    /// The replacement word
    pub value_new: String,
}

/// Request body for the delete operation (DELETE /delete)
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRequest {
    /// The word to remove
    pub value: String,
}

/// Shared validation for word payloads.
pub trait ValidateWords {
    /// Returns an error message if validation fails, None if valid.
    fn validate(&self) -> Option<String>;
}

fn check_word(field: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("Field '{}' cannot be empty", field));
    }
    None
}

impl ValidateWords for CreateRequest {
    fn validate(&self) -> Option<String> {
        check_word("value", &self.value)
    }
}

impl ValidateWords for UpdateRequest {
    fn validate(&self) -> Option<String> {
        check_word("value_old", &self.value_old).or_else(|| check_word("value_new", &self.value_new))
    }
}

impl ValidateWords for DeleteRequest {
    fn validate(&self) -> Option<String> {
        check_word("value", &self.value)
    }
}
