//! Chainwait server library.
//!
//! This crate provides the waitlist service as a library, allowing the
//! router and storage backends to be exercised in tests and reused by the
//! CLI tooling.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
