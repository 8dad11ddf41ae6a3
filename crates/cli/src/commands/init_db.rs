//! Storage initialization.
//!
//! Builds the storage backend named by the environment and lets its
//! constructor do the setup work: the SQLite backend creates the
//! `emails`, `user_feedback`, and `seller_feedback` tables; the CSV
//! backend creates the data directory and header-only files. Both are
//! idempotent, so rerunning against existing storage is safe.

use chainwait_server::config::{ServerConfig, StorageConfig};
use chainwait_server::store::{WaitlistStore as _, make_store};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    match &config.storage {
        StorageConfig::Csv { data_dir } => {
            tracing::info!(path = %data_dir.display(), "initializing CSV storage");
        }
        StorageConfig::Sqlite { .. } => {
            tracing::info!("initializing SQLite storage");
        }
    }

    let store = make_store(&config.storage).await?;
    let count = store.count().await?;
    tracing::info!(signups = count, "storage ready");

    Ok(())
}
