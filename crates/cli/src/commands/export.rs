//! Dataset exports.
//!
//! Renders one stored dataset as CSV, newest record first, to stdout or a
//! file. Same output the server's `/export/{kind}` endpoints produce.

use std::path::Path;

use chainwait_server::config::ServerConfig;
use chainwait_server::models::ExportKind;
use chainwait_server::store::export::{render_feedback, render_signups};
use chainwait_server::store::{WaitlistStore as _, make_store};

pub async fn run(kind: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let kind: ExportKind = kind
        .parse()
        .map_err(|()| format!("unknown export kind: {kind} (expected emails, user-feedback, or seller-feedback)"))?;

    let config = ServerConfig::from_env()?;
    let store = make_store(&config.storage).await?;

    let rendered = match kind {
        ExportKind::Emails => render_signups(store.signups().await?)?,
        ExportKind::UserFeedback | ExportKind::SellerFeedback => {
            let audience = kind.audience().ok_or("export kind has no audience")?;
            render_feedback(store.feedback(audience).await?)?
        }
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            tracing::info!(path = %path.display(), "export written");
        }
        None => {
            #[allow(clippy::print_stdout)]
            {
                print!("{rendered}");
            }
        }
    }

    Ok(())
}
