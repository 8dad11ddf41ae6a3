//! Feedback audience type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Audience`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum AudienceError {
    /// The audience field was missing or blank.
    #[error("audienceType required")]
    Missing,
}

/// Which feedback bucket a submission belongs to.
///
/// The two buckets are disjoint append-only collections. Routing is
/// deliberately permissive: `"seller"` selects the seller bucket, any other
/// non-blank value selects the user bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Feedback from prospective customers.
    User,
    /// Feedback from prospective sellers.
    Seller,
}

impl Audience {
    /// Parse an audience string.
    ///
    /// # Errors
    ///
    /// Returns [`AudienceError::Missing`] if the input is blank after
    /// trimming.
    pub fn parse(s: &str) -> Result<Self, AudienceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AudienceError::Missing);
        }
        if trimmed.eq_ignore_ascii_case("seller") {
            Ok(Self::Seller)
        } else {
            Ok(Self::User)
        }
    }

    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Seller => "seller",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
