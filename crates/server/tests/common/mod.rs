//! Shared fixtures for API integration tests.

#![allow(clippy::unwrap_used, dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use chainwait_core::{Audience, Email};
use chainwait_server::config::{ServerConfig, StorageConfig};
use chainwait_server::models::{FeedbackRecord, NewSignup, SignupRecord};
use chainwait_server::routes;
use chainwait_server::services::{AssertionVerifier, VerifiedIdentity, VerifyError};
use chainwait_server::state::AppState;
use chainwait_server::store::{
    SharedStore, StoreError, WaitlistStore, csv::CsvStore, sqlite::SqliteStore,
};

/// Token accepted by the stub verifier.
pub const GOOD_TOKEN: &str = "good-token";
/// Email attested for [`GOOD_TOKEN`].
pub const GOOGLE_EMAIL: &str = "google-user@example.com";

/// Deterministic stand-in for the Google verifier.
pub struct StubVerifier;

#[async_trait]
impl AssertionVerifier for StubVerifier {
    async fn verify(&self, credential: &str) -> Result<VerifiedIdentity, VerifyError> {
        if credential == GOOD_TOKEN {
            Ok(VerifiedIdentity {
                email: Email::parse(GOOGLE_EMAIL).unwrap(),
                name: Some("Google User".to_string()),
            })
        } else {
            Err(VerifyError::Rejected { status: 400 })
        }
    }
}

fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        storage: StorageConfig::Csv {
            data_dir: PathBuf::from("unused"),
        },
        google_client_id: None,
    }
}

fn app_with_store(store: SharedStore) -> Router {
    let state = AppState::new(test_config(), store, Arc::new(StubVerifier));
    routes::app(state)
}

/// App backed by CSV files in a fresh temp directory.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub fn csv_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::open(dir.path()).unwrap();
    (dir, app_with_store(Arc::new(store)))
}

/// Store whose every operation fails, for degraded-mode tests.
pub struct UnreachableStore;

#[async_trait]
impl WaitlistStore for UnreachableStore {
    async fn register(&self, _signup: &NewSignup) -> Result<u64, StoreError> {
        Err(unreachable_error())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Err(unreachable_error())
    }

    async fn submit_feedback(&self, _audience: Audience, _text: &str) -> Result<(), StoreError> {
        Err(unreachable_error())
    }

    async fn signups(&self) -> Result<Vec<SignupRecord>, StoreError> {
        Err(unreachable_error())
    }

    async fn feedback(&self, _audience: Audience) -> Result<Vec<FeedbackRecord>, StoreError> {
        Err(unreachable_error())
    }
}

fn unreachable_error() -> StoreError {
    StoreError::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "storage unreachable",
    ))
}

/// App whose storage backend is down.
pub fn unreachable_app() -> Router {
    app_with_store(Arc::new(UnreachableStore))
}

/// App backed by an in-memory SQLite database.
pub async fn sqlite_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SqliteStore::new(pool);
    store.init_schema().await.unwrap();
    app_with_store(Arc::new(store))
}

/// POST a JSON body and return the response.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// POST a raw text body and return the response.
pub async fn post_text(app: &Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// GET a URI and return the response.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as a UTF-8 string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
