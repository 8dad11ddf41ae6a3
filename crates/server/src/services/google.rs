//! Google identity assertion verification.
//!
//! Verifies the opaque `credential` token posted by the Google sign-in
//! button against Google's `tokeninfo` endpoint and recovers the
//! authenticated email and display name. Handlers only ever see the
//! [`AssertionVerifier`] trait, so tests can substitute a stub.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use chainwait_core::{Email, EmailError};

/// Google's ID-token introspection endpoint.
const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Errors that can occur while verifying an identity assertion.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The identity provider rejected the token.
    #[error("token rejected: {status}")]
    Rejected {
        /// HTTP status returned by the provider.
        status: u16,
    },

    /// The token was not issued for this application.
    #[error("token audience mismatch")]
    AudienceMismatch,

    /// The token carried no usable email address.
    #[error("token email invalid: {0}")]
    InvalidEmail(#[from] EmailError),

    /// No client ID is configured, so no assertion can be accepted.
    #[error("google sign-in is not configured")]
    NotConfigured,
}

/// An authenticated email/name pair recovered from an assertion.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    /// Email address attested by the identity provider.
    pub email: Email,
    /// Display name, when the provider supplied one.
    pub name: Option<String>,
}

/// Verifies opaque identity assertions out-of-process.
#[async_trait]
pub trait AssertionVerifier: Send + Sync {
    /// Verify `credential` and recover the authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns a [`VerifyError`] if the token is invalid, expired, or not
    /// meant for this application.
    async fn verify(&self, credential: &str) -> Result<VerifiedIdentity, VerifyError>;
}

/// Claims subset returned by the tokeninfo endpoint.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    email: String,
    #[serde(default)]
    name: Option<String>,
}

/// Tokeninfo-backed verifier.
#[derive(Clone)]
pub struct GoogleVerifier {
    client: reqwest::Client,
    client_id: Option<String>,
}

impl GoogleVerifier {
    /// Create a verifier for the given OAuth client ID.
    ///
    /// With `client_id` unset every assertion is rejected, which keeps the
    /// endpoint safe to expose on deployments without Google sign-in.
    #[must_use]
    pub fn new(client_id: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
        }
    }
}

#[async_trait]
impl AssertionVerifier for GoogleVerifier {
    async fn verify(&self, credential: &str) -> Result<VerifiedIdentity, VerifyError> {
        let Some(client_id) = self.client_id.as_deref() else {
            return Err(VerifyError::NotConfigured);
        };

        let response = self
            .client
            .get(TOKENINFO_URL)
            .query(&[("id_token", credential)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(VerifyError::Rejected {
                status: response.status().as_u16(),
            });
        }

        let info: TokenInfo = response.json().await?;
        if info.aud != client_id {
            tracing::warn!(aud = %info.aud, "Assertion issued for a different client");
            return Err(VerifyError::AudienceMismatch);
        }

        Ok(VerifiedIdentity {
            email: Email::parse(&info.email)?,
            name: info.name.filter(|n| !n.is_empty()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_verifier_rejects_everything() {
        let verifier = GoogleVerifier::new(None);
        let err = verifier.verify("some-token").await.unwrap_err();
        assert!(matches!(err, VerifyError::NotConfigured));
    }

    #[test]
    fn test_tokeninfo_claims_parse() {
        let info: TokenInfo = serde_json::from_str(
            r#"{"aud":"client-123","email":"user@example.com","name":"User Name","exp":"123"}"#,
        )
        .unwrap();
        assert_eq!(info.aud, "client-123");
        assert_eq!(info.email, "user@example.com");
        assert_eq!(info.name.as_deref(), Some("User Name"));
    }

    #[test]
    fn test_tokeninfo_name_is_optional() {
        let info: TokenInfo =
            serde_json::from_str(r#"{"aud":"client-123","email":"user@example.com"}"#).unwrap();
        assert!(info.name.is_none());
    }
}
