//! CSV rendering for the export endpoints.
//!
//! Both storage backends return records oldest-first; the renderer orders
//! them newest-first (ties broken newest-insert-first) and serializes them
//! with the same fixed header rows the CSV backend writes on disk.

use chrono::{DateTime, SecondsFormat, Utc};

use super::StoreError;
use crate::models::{FeedbackRecord, SignupRecord};

/// Render signup records as CSV text, newest-first.
///
/// # Errors
///
/// Returns an error if CSV serialization fails.
pub fn render_signups(mut records: Vec<SignupRecord>) -> Result<String, StoreError> {
    newest_first(&mut records, |r| r.created_at);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["email", "name", "signup_method", "timestamp"])?;
    for record in &records {
        writer.write_record([
            record.email.as_str(),
            record.name.as_deref().unwrap_or(""),
            record.method.as_str(),
            &format_timestamp(record.created_at),
        ])?;
    }
    finish(writer)
}

/// Render feedback records as CSV text, newest-first.
///
/// # Errors
///
/// Returns an error if CSV serialization fails.
pub fn render_feedback(mut records: Vec<FeedbackRecord>) -> Result<String, StoreError> {
    newest_first(&mut records, |r| r.created_at);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["feedback", "timestamp"])?;
    for record in &records {
        writer.write_record([record.text.as_str(), &format_timestamp(record.created_at)])?;
    }
    finish(writer)
}

/// Order newest-first by timestamp; equal timestamps keep reverse insertion
/// order (latest insert first).
fn newest_first<T>(records: &mut [T], key: impl Fn(&T) -> DateTime<Utc>) {
    records.reverse();
    // Stable sort preserves the reversed order for equal keys.
    records.sort_by(|a, b| key(b).cmp(&key(a)));
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, StoreError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::DataCorruption(format!("CSV writer flush failed: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| StoreError::DataCorruption(format!("export is not valid UTF-8: {e}")))
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chainwait_core::{Audience, Email, SignupMethod};
    use chrono::TimeZone;

    fn signup(email: &str, at: DateTime<Utc>) -> SignupRecord {
        SignupRecord {
            email: Email::parse(email).unwrap(),
            name: None,
            method: SignupMethod::Manual,
            created_at: at,
        }
    }

    fn at(seconds: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, seconds).unwrap()
    }

    #[test]
    fn test_signups_render_newest_first() {
        let records = vec![signup("old@x.com", at(1)), signup("new@x.com", at(30))];
        let out = render_signups(records).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "email,name,signup_method,timestamp");
        assert!(lines[1].starts_with("new@x.com,"));
        assert!(lines[2].starts_with("old@x.com,"));
    }

    #[test]
    fn test_equal_timestamps_keep_latest_insert_first() {
        let records = vec![signup("first@x.com", at(5)), signup("second@x.com", at(5))];
        let out = render_signups(records).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].starts_with("second@x.com,"));
        assert!(lines[2].starts_with("first@x.com,"));
    }

    #[test]
    fn test_feedback_render_quotes_embedded_commas() {
        let records = vec![FeedbackRecord {
            audience: Audience::User,
            text: "too slow, honestly".to_string(),
            created_at: at(0),
        }];
        let out = render_feedback(records).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "feedback,timestamp");
        assert!(lines[1].starts_with("\"too slow, honestly\","));
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let out = render_signups(Vec::new()).unwrap();
        assert_eq!(out.trim_end(), "email,name,signup_method,timestamp");
    }
}
