//! Web server module.
//!
//! This module provides:
//! - The donation webhook endpoint and its error mapping
//! - Two-phase webhook payload parsing
//! - Shared-secret signature verification
//! - The router builder, including the static file fallback
//!
//! API routes are registered explicitly; the static file service is the
//! router fallback, so it only ever serves paths no other route claims.

pub mod error;
pub mod handlers;
pub mod payload;
pub mod signature;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use error::HookError;
pub use handlers::{health, mmd_hook, AppState, HealthResponse, SIGNATURE_HEADER};
pub use payload::{
    decode_event, peek_event_type, DonationPayload, PayloadError, WebhookEvent,
    DONATION_COMPLETED,
};
pub use signature::verify_hook_signature;

/// Build the application router.
///
/// Static files come from the configured public directory; with index
/// fallback enabled, missing paths serve `index.html` so client-side routed
/// applications keep working under pretty URLs.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/api/mmd-hook", post(mmd_hook));

    let public_dir = state.config.public_dir.clone();
    let router = if state.config.index_fallback {
        let index = ServeFile::new(public_dir.join("index.html"));
        api.fallback_service(ServeDir::new(&public_dir).fallback(index))
    } else {
        api.fallback_service(ServeDir::new(&public_dir))
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
