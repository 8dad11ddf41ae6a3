//! Signup method type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// How a signup reached the waitlist.
///
/// The public form historically sent free-form method strings (the widget
/// posts `"web3_interface"`), so parsing is lenient: anything that is not
/// recognized as `google` is recorded as a manual signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SignupMethod {
    /// Email typed into the signup form.
    #[default]
    Manual,
    /// Email recovered from a verified Google identity assertion.
    Google,
}

impl SignupMethod {
    /// Parse a method string leniently.
    ///
    /// `"google"` (any case) maps to [`SignupMethod::Google`]; everything
    /// else, including the empty string, maps to [`SignupMethod::Manual`].
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("google") {
            Self::Google
        } else {
            Self::Manual
        }
    }

    /// Returns the canonical string form, as stored in exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Google => "google",
        }
    }
}

impl fmt::Display for SignupMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(SignupMethod::parse_lenient("google"), SignupMethod::Google);
        assert_eq!(SignupMethod::parse_lenient("GOOGLE"), SignupMethod::Google);
        assert_eq!(SignupMethod::parse_lenient("manual"), SignupMethod::Manual);
        assert_eq!(
            SignupMethod::parse_lenient("web3_interface"),
            SignupMethod::Manual
        );
        assert_eq!(SignupMethod::parse_lenient(""), SignupMethod::Manual);
    }

    #[test]
    fn test_default_is_manual() {
        assert_eq!(SignupMethod::default(), SignupMethod::Manual);
    }

    #[test]
    fn test_display() {
        assert_eq!(SignupMethod::Google.to_string(), "google");
        assert_eq!(SignupMethod::Manual.to_string(), "manual");
    }
}
