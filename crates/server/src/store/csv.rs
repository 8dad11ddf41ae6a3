//! CSV file storage backend.
//!
//! Three append-only CSV files with
//! a fixed header row each, created on startup if missing. A single
//! `tokio::sync::Mutex` is held across the duplicate check and the append,
//! so within this process registration is insert-if-absent.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::sync::Mutex;

use async_trait::async_trait;

use chainwait_core::{Audience, Email, SignupMethod};

use super::{StoreError, WaitlistStore};
use crate::models::{FeedbackRecord, NewSignup, SignupRecord};

/// Signups file name (legacy layout, kept so existing files keep working).
const SIGNUPS_FILE: &str = "emails.csv";
/// User feedback bucket file name.
const USER_FEEDBACK_FILE: &str = "user_feedback.csv";
/// Seller feedback bucket file name.
const SELLER_FEEDBACK_FILE: &str = "seller_feedback.csv";

const SIGNUPS_HEADER: [&str; 4] = ["email", "name", "signup_method", "timestamp"];
const FEEDBACK_HEADER: [&str; 2] = ["feedback", "timestamp"];

/// File-backed waitlist store.
pub struct CsvStore {
    signups: PathBuf,
    user_feedback: PathBuf,
    seller_feedback: PathBuf,
    // Serializes check-then-append sequences across handlers.
    lock: Mutex<()>,
}

impl CsvStore {
    /// Open (and if necessary initialize) the CSV files under `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a header row
    /// cannot be written.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir)?;

        let signups = data_dir.join(SIGNUPS_FILE);
        let user_feedback = data_dir.join(USER_FEEDBACK_FILE);
        let seller_feedback = data_dir.join(SELLER_FEEDBACK_FILE);

        init_file(&signups, &SIGNUPS_HEADER)?;
        init_file(&user_feedback, &FEEDBACK_HEADER)?;
        init_file(&seller_feedback, &FEEDBACK_HEADER)?;

        Ok(Self {
            signups,
            user_feedback,
            seller_feedback,
            lock: Mutex::new(()),
        })
    }

    fn feedback_path(&self, audience: Audience) -> &Path {
        match audience {
            Audience::User => &self.user_feedback,
            Audience::Seller => &self.seller_feedback,
        }
    }

    fn read_signups(&self) -> Result<Vec<SignupRecord>, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.signups)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(parse_signup_row(&row)?);
        }
        Ok(records)
    }

    fn read_feedback(&self, audience: Audience) -> Result<Vec<FeedbackRecord>, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(self.feedback_path(audience))?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let text = row
                .get(0)
                .ok_or_else(|| StoreError::DataCorruption("missing feedback column".to_string()))?
                .to_string();
            let created_at = parse_timestamp(row.get(1).unwrap_or_default())?;
            records.push(FeedbackRecord {
                audience,
                text,
                created_at,
            });
        }
        Ok(records)
    }
}

#[async_trait]
impl WaitlistStore for CsvStore {
    async fn register(&self, signup: &NewSignup) -> Result<u64, StoreError> {
        let _guard = self.lock.lock().await;

        let existing = self.read_signups()?;
        if existing
            .iter()
            .any(|record| record.email.as_str() == signup.email.as_str())
        {
            return Err(StoreError::Conflict("Email already subscribed".to_string()));
        }

        append_row(
            &self.signups,
            &[
                signup.email.as_str(),
                signup.name.as_deref().unwrap_or(""),
                signup.method.as_str(),
                &format_timestamp(Utc::now()),
            ],
        )?;

        Ok(existing.len() as u64 + 1)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let _guard = self.lock.lock().await;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.signups)?;

        let mut count: u64 = 0;
        for row in reader.records() {
            row?;
            count += 1;
        }
        Ok(count)
    }

    async fn submit_feedback(&self, audience: Audience, text: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        append_row(
            self.feedback_path(audience),
            &[text, &format_timestamp(Utc::now())],
        )
    }

    async fn signups(&self) -> Result<Vec<SignupRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_signups()
    }

    async fn feedback(&self, audience: Audience) -> Result<Vec<FeedbackRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_feedback(audience)
    }
}

/// Write the header row if the file does not exist yet.
fn init_file(path: &Path, header: &[&str]) -> Result<(), StoreError> {
    if path.exists() {
        return Ok(());
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(header)?;
    writer.flush()?;
    Ok(())
}

/// Append one data row. Each append is a single write call.
fn append_row(path: &Path, fields: &[&str]) -> Result<(), StoreError> {
    let file = OpenOptions::new().append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(fields)?;
    writer.flush()?;
    Ok(())
}

fn parse_signup_row(row: &csv::StringRecord) -> Result<SignupRecord, StoreError> {
    let email = Email::parse(row.get(0).unwrap_or_default())
        .map_err(|e| StoreError::DataCorruption(format!("invalid email in store: {e}")))?;
    let name = match row.get(1).unwrap_or_default() {
        "" => None,
        value => Some(value.to_string()),
    };
    let method = SignupMethod::parse_lenient(row.get(2).unwrap_or_default());
    let created_at = parse_timestamp(row.get(3).unwrap_or_default())?;

    Ok(SignupRecord {
        email,
        name,
        method,
        created_at,
    })
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StoreError::DataCorruption(format!("invalid timestamp in store: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_signup(email: &str) -> NewSignup {
        NewSignup {
            email: Email::parse(email).unwrap(),
            name: None,
            method: SignupMethod::Manual,
        }
    }

    fn temp_store() -> (tempfile::TempDir, CsvStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_register_and_count() {
        let (_dir, store) = temp_store();

        assert_eq!(store.count().await.unwrap(), 0);
        assert_eq!(store.register(&new_signup("a@x.com")).await.unwrap(), 1);
        assert_eq!(store.register(&new_signup("b@x.com")).await.unwrap(), 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (_dir, store) = temp_store();

        store.register(&new_signup("a@x.com")).await.unwrap();
        let err = store.register(&new_signup("a@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_check_is_exact_match() {
        let (_dir, store) = temp_store();

        // A substring check would reject this second address; an exact
        // column match must not.
        store.register(&new_signup("a@x.com")).await.unwrap();
        store.register(&new_signup("aa@x.com")).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_feedback_buckets_are_disjoint() {
        let (_dir, store) = temp_store();

        store
            .submit_feedback(Audience::User, "too slow")
            .await
            .unwrap();
        store
            .submit_feedback(Audience::Seller, "fees too high")
            .await
            .unwrap();

        let user = store.feedback(Audience::User).await.unwrap();
        let seller = store.feedback(Audience::Seller).await.unwrap();
        assert_eq!(user.len(), 1);
        assert_eq!(user[0].text, "too slow");
        assert_eq!(seller.len(), 1);
        assert_eq!(seller[0].text, "fees too high");
    }

    #[tokio::test]
    async fn test_feedback_with_commas_and_quotes_round_trips() {
        let (_dir, store) = temp_store();

        let text = "love it, but \"gasless\" is confusing";
        store.submit_feedback(Audience::User, text).await.unwrap();

        let records = store.feedback(Audience::User).await.unwrap();
        assert_eq!(records[0].text, text);
    }

    #[tokio::test]
    async fn test_reopen_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = CsvStore::open(dir.path()).unwrap();
            store.register(&new_signup("a@x.com")).await.unwrap();
        }
        let store = CsvStore::open(dir.path()).unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        let records = store.signups().await.unwrap();
        assert_eq!(records[0].email.as_str(), "a@x.com");
    }

    #[tokio::test]
    async fn test_concurrent_registrations_admit_each_email_once() {
        let (_dir, store) = temp_store();
        let store = std::sync::Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..10 {
            // Two competing registrations per distinct email.
            for _ in 0..2 {
                let store = std::sync::Arc::clone(&store);
                handles.push(tokio::spawn(async move {
                    store.register(&new_signup(&format!("user{i}@x.com"))).await
                }));
            }
        }

        let mut ok = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(StoreError::Conflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(ok, 10);
        assert_eq!(conflicts, 10);
        assert_eq!(store.count().await.unwrap(), 10);
    }
}
