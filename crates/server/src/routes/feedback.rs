//! Feedback route handlers.
//!
//! The historical form clients send several shapes: structured JSON with
//! the text under `freeText`, `feedback`, or `message`, or a raw text body
//! with the audience in an `?audience=` query parameter. All of them land
//! in one of the two feedback buckets.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use chainwait_core::Audience;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::store::WaitlistStore as _;

/// Query parameters for raw-text submissions.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackQuery {
    #[serde(default)]
    pub audience: Option<String>,
}

/// Structured feedback body. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FeedbackBody {
    #[serde(rename = "audienceType", alias = "audience")]
    audience_type: String,
    #[serde(rename = "freeText", alias = "feedback", alias = "message")]
    text: Option<String>,
}

/// Feedback submission response.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub success: bool,
}

/// Submit free-text feedback.
///
/// POST /feedback
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    Query(query): Query<FeedbackQuery>,
    body: String,
) -> Result<Json<FeedbackResponse>> {
    // Structured JSON first; anything unparseable is treated as a raw text
    // body with the audience taken from the query string.
    let (audience_raw, text) = match serde_json::from_str::<FeedbackBody>(&body) {
        Ok(parsed) => (parsed.audience_type, parsed.text.unwrap_or_default()),
        Err(_) => (query.audience.unwrap_or_default(), body),
    };

    let audience =
        Audience::parse(&audience_raw).map_err(|e| AppError::Validation(e.to_string()))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("feedback text required".to_string()));
    }

    state.store().submit_feedback(audience, text).await?;
    tracing::info!(audience = %audience, "Feedback recorded");

    Ok(Json(FeedbackResponse { success: true }))
}
