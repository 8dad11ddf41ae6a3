//! Export route handlers.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use chainwait_core::Audience;

use crate::error::{AppError, Result};
use crate::models::ExportKind;
use crate::state::AppState;
use crate::store::WaitlistStore as _;
use crate::store::export::{render_feedback, render_signups};

/// Serve one of the three exports as a CSV attachment, newest-first.
///
/// GET /export/{emails|user-feedback|seller-feedback}
#[instrument(skip(state))]
pub async fn export(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Response> {
    let export_kind: ExportKind = kind
        .parse()
        .map_err(|()| AppError::NotFound(format!("unknown export '{kind}'")))?;

    let body = match export_kind {
        ExportKind::Emails => render_signups(state.store().signups().await?)?,
        ExportKind::UserFeedback => render_feedback(state.store().feedback(Audience::User).await?)?,
        ExportKind::SellerFeedback => {
            render_feedback(state.store().feedback(Audience::Seller).await?)?
        }
    };

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export_kind.file_name()),
        ),
    ];

    Ok((headers, body).into_response())
}
