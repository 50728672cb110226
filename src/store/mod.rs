//! SQLite-backed record store.
//!
//! This module provides:
//! - Record types for the `donations` collection
//! - An async [`Store`] wrapping the connection pool, with a runtime
//!   migration runner
//!
//! The webhook handler consumes a deliberately narrow surface: look up a
//! collection by name, insert one record. Consistency of concurrent writes
//! is delegated to SQLite.

pub mod types;

use std::path::Path;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

pub use types::{DonationRecord, DonationStatus, NewDonation, DONATIONS_COLLECTION};

/// Errors surfaced by the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named collection (table) does not exist in the database.
    #[error("collection {0:?} not found")]
    CollectionNotFound(String),

    /// Loading or applying migrations failed.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Async handle to the SQLite database.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (or create) the database at the given sqlx URL.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;

        Ok(Store { pool })
    }

    /// Open a private in-memory database.
    ///
    /// Pinned to a single connection: every SQLite `:memory:` connection is
    /// its own database.
    pub async fn connect_in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        Ok(Store { pool })
    }

    /// Apply pending SQL migrations from a directory.
    pub async fn run_migrations(&self, dir: &Path) -> Result<(), StoreError> {
        let migrator = Migrator::new(dir).await?;
        migrator.run(&self.pool).await?;
        info!(migrations_dir = %dir.display(), "migrations_applied");
        Ok(())
    }

    /// Check that a collection (table) exists.
    pub async fn find_collection(&self, name: &str) -> Result<(), StoreError> {
        let found: Option<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        match found {
            Some(_) => Ok(()),
            None => Err(StoreError::CollectionNotFound(name.to_string())),
        }
    }

    /// Insert one donation and return the stored row.
    ///
    /// No deduplication: redelivered webhooks insert additional rows.
    pub async fn insert_donation(
        &self,
        donation: &NewDonation,
    ) -> Result<DonationRecord, StoreError> {
        let record = sqlx::query_as::<_, DonationRecord>(
            "INSERT INTO donations (username, message, amount, status) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, username, message, amount, status, created_at, updated_at",
        )
        .bind(&donation.username)
        .bind(&donation.message)
        .bind(donation.amount)
        .bind(donation.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// All stored donations, oldest first.
    pub async fn list_donations(&self) -> Result<Vec<DonationRecord>, StoreError> {
        let records = sqlx::query_as::<_, DonationRecord>(
            "SELECT id, username, message, amount, status, created_at, updated_at \
             FROM donations ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn migrations_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
    }

    async fn migrated_store() -> Store {
        let store = Store::connect_in_memory().await.unwrap();
        store.run_migrations(&migrations_dir()).await.unwrap();
        store
    }

    fn sample_donation() -> NewDonation {
        NewDonation {
            username: "Alice".to_string(),
            message: "Go team!".to_string(),
            amount: 12,
            status: DonationStatus::PendingReview,
        }
    }

    #[tokio::test]
    async fn test_find_collection_after_migrations() {
        let store = migrated_store().await;
        store.find_collection(DONATIONS_COLLECTION).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_collection_missing() {
        let store = Store::connect_in_memory().await.unwrap();
        let err = store.find_collection(DONATIONS_COLLECTION).await.unwrap_err();
        assert!(matches!(err, StoreError::CollectionNotFound(_)));
    }

    #[tokio::test]
    async fn test_insert_donation_returns_stored_row() {
        let store = migrated_store().await;
        let record = store.insert_donation(&sample_donation()).await.unwrap();

        assert_eq!(record.username, "Alice");
        assert_eq!(record.message, "Go team!");
        assert_eq!(record.amount, 12);
        assert_eq!(record.status, "pending_review");
    }

    #[tokio::test]
    async fn test_insert_does_not_deduplicate() {
        let store = migrated_store().await;
        store.insert_donation(&sample_donation()).await.unwrap();
        store.insert_donation(&sample_donation()).await.unwrap();

        let all = store.list_donations().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_ne!(all[0].id, all[1].id);
    }
}
