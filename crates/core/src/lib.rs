//! Chainwait Core - Shared types library.
//!
//! This crate provides common types used across all Chainwait components:
//! - `server` - Waitlist HTTP service and storage backends
//! - `widget` - Decorative activity widget (counter, fake hash, block height)
//! - `cli` - Command-line tools for schema setup and exports
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails and the signup/feedback enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
