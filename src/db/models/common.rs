//! Shared response envelopes.
//!
//! Every endpoint answers with a JSON body whose `success` flag tells the
//! client whether the operation went through; failures carry a `message`
//! instead of data.

use serde::Serialize;

/// Plain acknowledgement envelope.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Acknowledgement carrying a client-side navigation hint.
#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    pub success: bool,
    pub message: String,
    pub redirect: String,
}

impl RedirectResponse {
    pub fn ok(message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            redirect: redirect.into(),
        }
    }
}
