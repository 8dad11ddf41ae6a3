//! HTTP route handlers for the waitlist service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health           - Liveness check
//! GET  /health/ready     - Readiness check (probes storage)
//!
//! # Waitlist API (JSON)
//! POST /signup           - Register an email
//! POST /signup/google    - Register via Google identity assertion
//! GET  /count            - Current signup count (degrades to 0)
//! POST /feedback         - Append free-text feedback to a bucket
//! GET  /export/{kind}    - CSV export, newest-first
//!                          (emails | user-feedback | seller-feedback)
//! ```

pub mod export;
pub mod feedback;
pub mod signup;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;
use crate::store::WaitlistStore as _;

/// Create the waitlist API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup::subscribe))
        .route("/signup/google", post(signup::google_signup))
        .route("/count", get(signup::count))
        .route("/feedback", post(feedback::submit))
        .route("/export/{kind}", get(export::export))
}

/// Create all routes for the waitlist service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(api_routes())
}

/// Build the fully layered application router.
///
/// The widget is served from another origin, so CORS stays permissive.
///
/// The trace span declares an empty `request_id` field; the request-id
/// middleware runs inside that span and fills it in.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the storage backend is reachable before returning OK.
/// Returns 503 Service Unavailable if it is not.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().count().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
