//! CLI command implementations.

pub mod export;
pub mod init_db;
