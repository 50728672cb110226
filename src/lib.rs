//! MMD Backend - donation review backend.
//!
//! This library provides the modules behind the `mmd-backend` binary:
//! - `config`: startup flags and environment configuration
//! - `store`: SQLite-backed record store with a runtime migration runner
//! - `web`: webhook endpoint, payload parsing, and the router builder
//!
//! ## Architecture
//!
//! ```text
//! Donation platform → POST /api/mmd-hook → donations collection → review UI
//! ```
//!
//! The review frontend is a static SPA served from the public directory.

pub mod config;
pub mod store;
pub mod web;

// Re-export commonly used types
pub use config::{Config, HOOK_SECRET_ENV};
pub use store::{
    DonationRecord, DonationStatus, NewDonation, Store, StoreError, DONATIONS_COLLECTION,
};
pub use web::{build_router, AppState, HookError, SIGNATURE_HEADER};
