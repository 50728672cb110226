//! Webhook endpoint handlers.
//!
//! The donation hook is a thin adapter: verify the signature, discriminate
//! the event type, decode, map fields, insert one record. It holds no state
//! of its own; everything shared lives in [`AppState`].

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::store::{DonationStatus, NewDonation, Store, DONATIONS_COLLECTION};
use crate::web::error::HookError;
use crate::web::payload::{self, DONATION_COMPLETED};
use crate::web::signature::verify_hook_signature;

/// Header carrying the webhook shared-secret signature.
pub const SIGNATURE_HEADER: &str = "MMD-Signature";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Store,
}

impl AppState {
    pub fn new(config: Config, store: Store) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Donation Webhook
// =============================================================================

/// Donation platform webhook endpoint.
///
/// Accepts a signed JSON callback and converts `donation_completed` events
/// into rows of the `donations` collection. All other event types are
/// acknowledged with 204 and discarded. Redeliveries are not deduplicated;
/// the same event delivered twice inserts two rows.
pub async fn mmd_hook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, HookError> {
    let secret = state
        .config
        .hook_secret
        .as_deref()
        .ok_or(HookError::SecretNotConfigured)?;

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !verify_hook_signature(secret, signature) {
        warn!("hook_signature_invalid");
        return Err(HookError::InvalidSignature);
    }

    let event_type = payload::peek_event_type(&body).map_err(HookError::Payload)?;
    if event_type != DONATION_COMPLETED {
        info!(event_type = %event_type, "hook_event_ignored");
        return Ok(StatusCode::NO_CONTENT);
    }

    let event = payload::decode_event(&body).map_err(HookError::Payload)?;

    state
        .store
        .find_collection(DONATIONS_COLLECTION)
        .await
        .map_err(HookError::Collection)?;

    let donation = &event.data.donation;
    let record = NewDonation {
        username: donation.dedication.clone(),
        message: donation.message.clone(),
        // Minor currency units (cents) to major units, tip included.
        // Lossy integer division; the currency field is not validated.
        // Saturates instead of overflowing on pathological amounts.
        amount: donation.amount.saturating_add(donation.tip_amount) / 100,
        status: DonationStatus::PendingReview,
    };

    let stored = state
        .store
        .insert_donation(&record)
        .await
        .map_err(HookError::Save)?;

    info!(
        donation_id = %donation.id,
        record_id = stored.id,
        amount = stored.amount,
        "donation_recorded"
    );

    Ok(StatusCode::NO_CONTENT)
}
