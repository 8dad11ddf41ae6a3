//! Core types for Chainwait.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod audience;
pub mod email;
pub mod method;

pub use audience::{Audience, AudienceError};
pub use email::{Email, EmailError};
pub use method::SignupMethod;
