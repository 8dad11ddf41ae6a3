//! SQLite storage backend.
//!
//! Three tables mirroring the CSV layout plus surrogate ids, with a
//! uniqueness constraint on email. The constraint makes registration a
//! single atomic insert-if-absent: a concurrent duplicate surfaces as a
//! rejected insert, never a silent second record.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use secrecy::ExposeSecret;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

use chainwait_core::{Audience, Email, SignupMethod};

use super::{StoreError, WaitlistStore};
use crate::models::{FeedbackRecord, NewSignup, SignupRecord};

/// Create a SQLite connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Table-backed waitlist store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a store on top of an existing pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the schema if it does not exist yet.
    ///
    /// No migrations beyond `CREATE TABLE IF NOT EXISTS`.
    ///
    /// # Errors
    ///
    /// Returns a database error if a statement fails.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS emails (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                name TEXT,
                signup_method TEXT,
                timestamp TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        for table in ["user_feedback", "seller_feedback"] {
            sqlx::query(&format!(
                r"
                CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    feedback TEXT NOT NULL,
                    timestamp TEXT NOT NULL
                )
                "
            ))
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn count_signups(&self) -> Result<u64, StoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM emails")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}

/// Feedback bucket to table mapping.
const fn feedback_table(audience: Audience) -> &'static str {
    match audience {
        Audience::User => "user_feedback",
        Audience::Seller => "seller_feedback",
    }
}

#[async_trait]
impl WaitlistStore for SqliteStore {
    async fn register(&self, signup: &NewSignup) -> Result<u64, StoreError> {
        sqlx::query(
            r"
            INSERT INTO emails (email, name, signup_method, timestamp)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(signup.email.as_str())
        .bind(signup.name.as_deref())
        .bind(signup.method.as_str())
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return StoreError::Conflict("Email already subscribed".to_string());
            }
            StoreError::Database(e)
        })?;

        self.count_signups().await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.count_signups().await
    }

    async fn submit_feedback(&self, audience: Audience, text: &str) -> Result<(), StoreError> {
        let table = feedback_table(audience);
        sqlx::query(&format!(
            "INSERT INTO {table} (feedback, timestamp) VALUES (?1, ?2)"
        ))
        .bind(text)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn signups(&self) -> Result<Vec<SignupRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT email, name, signup_method, timestamp FROM emails ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let email: String = row.try_get("email")?;
            let email = Email::parse(&email)
                .map_err(|e| StoreError::DataCorruption(format!("invalid email in store: {e}")))?;
            let name: Option<String> = row.try_get("name")?;
            let method: Option<String> = row.try_get("signup_method")?;
            let timestamp: String = row.try_get("timestamp")?;

            records.push(SignupRecord {
                email,
                name: name.filter(|n| !n.is_empty()),
                method: SignupMethod::parse_lenient(method.as_deref().unwrap_or_default()),
                created_at: parse_timestamp(&timestamp)?,
            });
        }
        Ok(records)
    }

    async fn feedback(&self, audience: Audience) -> Result<Vec<FeedbackRecord>, StoreError> {
        let table = feedback_table(audience);
        let rows = sqlx::query(&format!(
            "SELECT feedback, timestamp FROM {table} ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let text: String = row.try_get("feedback")?;
            let timestamp: String = row.try_get("timestamp")?;
            records.push(FeedbackRecord {
                audience,
                text,
                created_at: parse_timestamp(&timestamp)?,
            });
        }
        Ok(records)
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StoreError::DataCorruption(format!("invalid timestamp in store: {e}")))
}
