//! Waitlist storage.
//!
//! Two backends implement the same [`WaitlistStore`] contract:
//!
//! - [`csv::CsvStore`] - three append-only CSV files with fixed header rows
//! - [`sqlite::SqliteStore`] - three tables, with a uniqueness constraint
//!   on email
//!
//! Registration is an atomic insert-if-absent in both backends: the SQLite
//! store leans on its UNIQUE constraint, the CSV store holds its write lock
//! across the existence check and the append. Duplicate registrations are
//! rejected with [`StoreError::Conflict`], never merged.

pub mod csv;
pub mod export;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use chainwait_core::Audience;

use crate::config::StorageConfig;
use crate::models::{FeedbackRecord, NewSignup, SignupRecord};

/// Errors from storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Uniqueness violation (duplicate email).
    #[error("{0}")]
    Conflict(String),

    /// Filesystem error from the CSV backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse or write error.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Storage contract shared by the CSV and SQLite backends.
#[async_trait]
pub trait WaitlistStore: Send + Sync {
    /// Persist a new signup and return the total count after the insert.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the email is already registered;
    /// other variants for backend failures. Exactly one durable write
    /// happens on success, none on failure.
    async fn register(&self, signup: &NewSignup) -> Result<u64, StoreError>;

    /// Total number of signup records.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the store is unreachable. Degrading a
    /// failed count to zero is the HTTP layer's policy, not the store's.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Append one feedback record to the audience's bucket.
    ///
    /// The caller validates the text; the store assigns the timestamp.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the write fails.
    async fn submit_feedback(&self, audience: Audience, text: &str) -> Result<(), StoreError>;

    /// All signup records, oldest-first.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the read fails.
    async fn signups(&self) -> Result<Vec<SignupRecord>, StoreError>;

    /// All feedback records in one bucket, oldest-first.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the read fails.
    async fn feedback(&self, audience: Audience) -> Result<Vec<FeedbackRecord>, StoreError>;
}

/// Shared handle to a storage backend.
pub type SharedStore = Arc<dyn WaitlistStore>;

/// Build the storage backend selected by configuration.
///
/// # Errors
///
/// Returns a backend error if the data directory or database cannot be
/// initialized.
pub async fn make_store(storage: &StorageConfig) -> Result<SharedStore, StoreError> {
    match storage {
        StorageConfig::Csv { data_dir } => {
            let store = csv::CsvStore::open(data_dir)?;
            Ok(Arc::new(store))
        }
        StorageConfig::Sqlite { database_url } => {
            let pool = sqlite::create_pool(database_url).await?;
            let store = sqlite::SqliteStore::new(pool);
            store.init_schema().await?;
            Ok(Arc::new(store))
        }
    }
}
