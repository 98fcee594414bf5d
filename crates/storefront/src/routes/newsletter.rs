//! Newsletter signup route handlers.
//!
//! Signups are only logged for now; there is no mailing list service behind
//! this endpoint yet.

use axum::{Json, extract::rejection::JsonRejection};
use goldsabertooth_core::Email;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::{SubmissionResponse, json_body, required_string};
use crate::error::{AppError, Result};

const SUCCESS_MESSAGE: &str =
    "Thanks for joining the underground! We'll be in touch with the latest chaos.";
const INTERNAL_MESSAGE: &str = "Something went wrong. Please try again later.";
const METHOD_MESSAGE: &str = "Method not allowed. Use POST to subscribe.";
pub(crate) const INVALID_EMAIL: &str = "Please enter a valid email address";

/// Newsletter signup request body.
#[derive(Debug, Deserialize)]
pub struct NewsletterRequest {
    #[serde(default, deserialize_with = "super::present")]
    pub email: Option<Value>,
}

/// Subscribe to the newsletter.
///
/// POST /api/newsletter
#[instrument(skip_all)]
pub async fn subscribe(
    body: std::result::Result<Json<NewsletterRequest>, JsonRejection>,
) -> Result<Json<SubmissionResponse>> {
    let request = json_body(body, INTERNAL_MESSAGE)?;

    let email = required_string(request.email)
        .and_then(|email| Email::parse(&email).map_err(|_| INVALID_EMAIL))
        .map_err(|message| AppError::Validation(message.to_string()))?;

    tracing::info!(
        email = %email,
        at = %chrono::Utc::now().to_rfc3339(),
        "Newsletter signup"
    );

    Ok(Json(SubmissionResponse {
        success: true,
        message: SUCCESS_MESSAGE,
    }))
}

/// GET /api/newsletter
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed(METHOD_MESSAGE)
}
