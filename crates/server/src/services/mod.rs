//! External service clients.
//!
//! # Services
//!
//! - [`google`] - Google identity assertion verification behind the
//!   [`AssertionVerifier`] trait

pub mod google;

pub use google::{AssertionVerifier, GoogleVerifier, VerifiedIdentity, VerifyError};
