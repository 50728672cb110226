//! Persisted record types for the donation store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Collection (table) holding donation records.
pub const DONATIONS_COLLECTION: &str = "donations";

/// Review status of a stored donation.
///
/// Values mirror the `status` column constraint in the migrations. Every
/// webhook-created record starts in `pending_review`; the review workflow
/// moves it from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    PendingReview,
    InReview,
    Rejected,
    Accepted,
}

impl DonationStatus {
    /// Database representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::PendingReview => "pending_review",
            DonationStatus::InReview => "in_review",
            DonationStatus::Rejected => "rejected",
            DonationStatus::Accepted => "accepted",
        }
    }
}

/// A donation ready to be inserted.
///
/// `amount` is in major currency units, already converted from the webhook's
/// minor units.
#[derive(Debug, Clone)]
pub struct NewDonation {
    pub username: String,
    pub message: String,
    pub amount: i64,
    pub status: DonationStatus,
}

/// A donation row as stored in the `donations` collection.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DonationRecord {
    pub id: i64,
    pub username: String,
    pub message: String,
    pub amount: i64,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_database_representation() {
        assert_eq!(DonationStatus::PendingReview.as_str(), "pending_review");
        assert_eq!(DonationStatus::InReview.as_str(), "in_review");
        assert_eq!(DonationStatus::Rejected.as_str(), "rejected");
        assert_eq!(DonationStatus::Accepted.as_str(), "accepted");
    }

    #[test]
    fn test_status_serde_matches_database_representation() {
        let json = serde_json::to_string(&DonationStatus::PendingReview).unwrap();
        assert_eq!(json, "\"pending_review\"");
    }
}
