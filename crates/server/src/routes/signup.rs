//! Signup and count route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use chainwait_core::{Email, SignupMethod};

use crate::error::{AppError, Result};
use crate::models::NewSignup;
use crate::services::AssertionVerifier as _;
use crate::state::AppState;
use crate::store::WaitlistStore as _;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

/// Successful signup response.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub count: u64,
}

/// Google signup request body.
#[derive(Debug, Deserialize)]
pub struct GoogleSignupRequest {
    /// Opaque identity assertion issued by Google sign-in.
    pub credential: String,
}

/// Successful Google signup response.
#[derive(Debug, Serialize)]
pub struct GoogleSignupResponse {
    pub success: bool,
    pub count: u64,
    pub name: String,
}

/// Current count response.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Register an email on the waitlist.
///
/// POST /signup
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>> {
    let email = Email::parse(body.email.trim())
        .map_err(|_| AppError::Validation("Valid email required".to_string()))?;

    let signup = NewSignup {
        email,
        name: body.name.filter(|n| !n.trim().is_empty()),
        method: SignupMethod::parse_lenient(body.method.as_deref().unwrap_or_default()),
    };

    let count = state.store().register(&signup).await?;
    tracing::info!(count, "Waitlist signup accepted");

    Ok(Json(SubscribeResponse {
        success: true,
        count,
    }))
}

/// Register via a verified Google identity assertion.
///
/// POST /signup/google
#[instrument(skip_all)]
pub async fn google_signup(
    State(state): State<AppState>,
    Json(body): Json<GoogleSignupRequest>,
) -> Result<Json<GoogleSignupResponse>> {
    let identity = state.verifier().verify(&body.credential).await?;

    let signup = NewSignup {
        email: identity.email,
        name: identity.name.clone(),
        method: SignupMethod::Google,
    };

    let count = state.store().register(&signup).await?;
    tracing::info!(count, "Google waitlist signup accepted");

    Ok(Json(GoogleSignupResponse {
        success: true,
        count,
        name: identity.name.unwrap_or_default(),
    }))
}

/// Current signup count.
///
/// GET /count
///
/// Degrades to zero when storage is unreachable so the widget can always
/// render something.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CountResponse> {
    let count = match state.store().count().await {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(error = %e, "Count unavailable, degrading to zero");
            0
        }
    };
    Json(CountResponse { count })
}
