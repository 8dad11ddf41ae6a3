//! Waitlist domain types.
//!
//! These types represent validated domain objects separate from wire and
//! storage row shapes.

use chrono::{DateTime, Utc};
use std::str::FromStr;

use chainwait_core::{Audience, Email, SignupMethod};

/// A validated signup waiting to be persisted.
///
/// The store assigns the timestamp at write time.
#[derive(Debug, Clone)]
pub struct NewSignup {
    /// Email address, stored exactly as entered.
    pub email: Email,
    /// Optional display name (present for Google signups).
    pub name: Option<String>,
    /// How the signup reached the waitlist.
    pub method: SignupMethod,
}

/// One accepted email registration.
#[derive(Debug, Clone)]
pub struct SignupRecord {
    /// Email address (unique key).
    pub email: Email,
    /// Optional display name.
    pub name: Option<String>,
    /// How the signup reached the waitlist.
    pub method: SignupMethod,
    /// Server-assigned timestamp.
    pub created_at: DateTime<Utc>,
}

/// One free-text feedback submission.
#[derive(Debug, Clone)]
pub struct FeedbackRecord {
    /// Which bucket the submission belongs to.
    pub audience: Audience,
    /// Trimmed, non-empty feedback text.
    pub text: String,
    /// Server-assigned timestamp.
    pub created_at: DateTime<Utc>,
}

/// Which export a client asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// All signup records.
    Emails,
    /// User-bucket feedback.
    UserFeedback,
    /// Seller-bucket feedback.
    SellerFeedback,
}

impl ExportKind {
    /// The attachment filename served for this export.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Emails => "emails.csv",
            Self::UserFeedback => "user_feedback.csv",
            Self::SellerFeedback => "seller_feedback.csv",
        }
    }

    /// The feedback bucket this export reads, if it is a feedback export.
    #[must_use]
    pub const fn audience(self) -> Option<Audience> {
        match self {
            Self::Emails => None,
            Self::UserFeedback => Some(Audience::User),
            Self::SellerFeedback => Some(Audience::Seller),
        }
    }
}

impl FromStr for ExportKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emails" => Ok(Self::Emails),
            "user-feedback" => Ok(Self::UserFeedback),
            "seller-feedback" => Ok(Self::SellerFeedback),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_kind_from_str() {
        assert_eq!("emails".parse(), Ok(ExportKind::Emails));
        assert_eq!("user-feedback".parse(), Ok(ExportKind::UserFeedback));
        assert_eq!("seller-feedback".parse(), Ok(ExportKind::SellerFeedback));
        assert_eq!("orders".parse::<ExportKind>(), Err(()));
    }

    #[test]
    fn test_export_file_names() {
        assert_eq!(ExportKind::Emails.file_name(), "emails.csv");
        assert_eq!(ExportKind::UserFeedback.file_name(), "user_feedback.csv");
        assert_eq!(
            ExportKind::SellerFeedback.file_name(),
            "seller_feedback.csv"
        );
    }
}
