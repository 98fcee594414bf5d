//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /api/products           - Product page (?tags=A,B&after=CURSOR&first=N)
//! GET  /api/products/{handle}  - Product detail
//!
//! # Forms
//! POST /api/newsletter         - Newsletter signup (GET answers 405)
//! POST /api/contact            - Contact form (GET answers 405)
//! ```

pub mod contact;
pub mod newsletter;
pub mod products;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    middleware,
    routing::{get, post},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Body of a successful form submission.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{handle}", get(products::show))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .route(
            "/api/newsletter",
            post(newsletter::subscribe).get(newsletter::method_not_allowed),
        )
        .route(
            "/api/contact",
            post(contact::submit).get(contact::method_not_allowed),
        )
}

/// The full application: routes, health check and request IDs.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Unwrap a JSON body.
///
/// A body that parses but has the wrong shape is a validation error. A body
/// that cannot be read or parsed at all is internal and reported with
/// `internal_message`.
fn json_body<T>(
    body: Result<Json<T>, JsonRejection>,
    internal_message: &'static str,
) -> Result<T, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection @ JsonRejection::JsonDataError(_)) => {
            tracing::debug!(error = %rejection, "Rejected request body");
            Err(AppError::Validation("Invalid request body".to_string()))
        }
        Err(rejection) => {
            tracing::error!(error = %rejection, "Failed to read request body");
            Err(AppError::Internal {
                message: internal_message,
                detail: rejection.body_text(),
            })
        }
    }
}

// =============================================================================
// Form fields
// =============================================================================

/// Keep "present but null" apart from "absent" for optional body fields.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A string field that may be left out. Any other JSON type is rejected.
fn optional_string(value: Option<Value>) -> Result<Option<String>, &'static str> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Null) => Err("Expected string, received null"),
        Some(Value::Bool(_)) => Err("Expected string, received boolean"),
        Some(Value::Number(_)) => Err("Expected string, received number"),
        Some(Value::Array(_)) => Err("Expected string, received array"),
        Some(Value::Object(_)) => Err("Expected string, received object"),
    }
}

fn required_string(value: Option<Value>) -> Result<String, &'static str> {
    optional_string(value)?.ok_or("Required")
}
