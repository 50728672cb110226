//! Error responses for the webhook endpoint.
//!
//! Each variant maps onto exactly one HTTP status:
//! configuration problems (missing secret, missing collection) and
//! persistence failures are 500s, everything the caller got wrong is a 400.
//! The underlying cause, when present, rides along in the JSON body for
//! diagnostics.

use std::error::Error as _;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;
use crate::web::payload::PayloadError;

/// Failure modes of the webhook endpoint.
#[derive(Debug, Error)]
pub enum HookError {
    /// `MMD_HOOK_SECRET` was not present in the environment at startup.
    #[error("MMD_HOOK_SECRET not set")]
    SecretNotConfigured,

    /// The `MMD-Signature` header did not match the shared secret.
    #[error("invalid signature")]
    InvalidSignature,

    /// The request body failed either parse phase.
    #[error("failed to parse request body")]
    Payload(#[source] PayloadError),

    /// The donations collection is missing from the database.
    #[error("failed to find collection")]
    Collection(#[source] StoreError),

    /// Inserting the record failed.
    #[error("failed to save record")]
    Save(#[source] StoreError),
}

impl HookError {
    /// HTTP status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            HookError::SecretNotConfigured
            | HookError::Collection(_)
            | HookError::Save(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HookError::InvalidSignature | HookError::Payload(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for HookError {
    fn into_response(self) -> Response {
        let status = self.status();
        let cause = self.source().map(|e| e.to_string());

        let payload = match cause {
            Some(cause) => json!({ "error": self.to_string(), "cause": cause }),
            None => json!({ "error": self.to_string() }),
        };

        (status, Json(payload)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            HookError::SecretNotConfigured.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(HookError::InvalidSignature.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            HookError::Payload(PayloadError::MissingEventType).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HookError::Collection(StoreError::CollectionNotFound("donations".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
