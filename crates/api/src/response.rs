//! Shared response bodies for API handlers.

use serde::Serialize;

/// `{ "message": "..." }` body for mutations that have nothing else to return.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
