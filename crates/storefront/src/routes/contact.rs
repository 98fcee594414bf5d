//! Contact form route handlers.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderMap, header},
};
use goldsabertooth_core::Email;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::newsletter::INVALID_EMAIL;
use super::{SubmissionResponse, json_body, optional_string, required_string};
use crate::error::{AppError, Result};

const SUCCESS_MESSAGE: &str = "Message sent! We'll get back to you within 24 hours.";
const INTERNAL_MESSAGE: &str =
    "Something went wrong sending your message. Please try again or email us directly.";
const METHOD_MESSAGE: &str = "Method not allowed. Use POST to send a message.";

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const MESSAGE_MIN: usize = 10;
const MESSAGE_MAX: usize = 2000;

/// Contact form request body, as sent. Fields are checked by
/// [`ContactRequest::validate`].
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default, deserialize_with = "super::present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "super::present")]
    pub email: Option<Value>,
    #[serde(default, deserialize_with = "super::present")]
    pub subject: Option<Value>,
    #[serde(default, deserialize_with = "super::present")]
    pub message: Option<Value>,
}

/// A contact request that passed validation.
#[derive(Debug)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Email,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactRequest {
    /// Validate fields in form order, reporting the first problem.
    ///
    /// # Errors
    ///
    /// Returns the client-facing message for the first invalid field.
    pub fn validate(self) -> std::result::Result<ContactSubmission, &'static str> {
        let name = required_string(self.name)?;
        let name_len = name.chars().count();
        if name_len < NAME_MIN {
            return Err("Name must be at least 2 characters");
        }
        if name_len > NAME_MAX {
            return Err("Name is too long");
        }

        let email = Email::parse(&required_string(self.email)?).map_err(|_| INVALID_EMAIL)?;
        let subject = optional_string(self.subject)?;

        let message = required_string(self.message)?;
        let message_len = message.chars().count();
        if message_len < MESSAGE_MIN {
            return Err("Message must be at least 10 characters");
        }
        if message_len > MESSAGE_MAX {
            return Err("Message is too long");
        }

        Ok(ContactSubmission {
            name,
            email,
            subject: subject.filter(|s| !s.is_empty()),
            message,
        })
    }
}

/// Submit the contact form.
///
/// POST /api/contact
#[instrument(skip_all)]
pub async fn submit(
    headers: HeaderMap,
    body: std::result::Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<SubmissionResponse>> {
    let request = json_body(body, INTERNAL_MESSAGE)?;
    let submission = request
        .validate()
        .map_err(|message| AppError::Validation(message.to_string()))?;

    tracing::info!(
        name = %submission.name,
        email = %submission.email,
        subject = submission.subject.as_deref().unwrap_or("No subject"),
        message = %submission.message,
        user_agent = header_str(&headers, header::USER_AGENT.as_str()).unwrap_or("Unknown"),
        ip = client_ip(&headers).unwrap_or("Unknown"),
        "Contact form submission"
    );

    Ok(Json(SubmissionResponse {
        success: true,
        message: SUCCESS_MESSAGE,
    }))
}

/// GET /api/contact
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed(METHOD_MESSAGE)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Client address as reported by the proxy in front of us.
fn client_ip(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, "x-forwarded-for").or_else(|| header_str(headers, "x-real-ip"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;
    use serde_json::json;

    use super::*;

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: Some(json!(name)),
            email: Some(json!(email)),
            subject: None,
            message: Some(json!(message)),
        }
    }

    #[test]
    fn test_valid_submission() {
        let submission = request("Sam", "sam@example.com", "Do you ship playmats abroad?")
            .validate()
            .unwrap();
        assert_eq!(submission.email.as_str(), "sam@example.com");
        assert!(submission.subject.is_none());
    }

    #[test]
    fn test_first_invalid_field_wins() {
        let err = request("S", "not-an-email", "short").validate().unwrap_err();
        assert_eq!(err, "Name must be at least 2 characters");

        let err = request("Sam", "not-an-email", "short").validate().unwrap_err();
        assert_eq!(err, "Please enter a valid email address");

        let err = request("Sam", "sam@example.com", "short").validate().unwrap_err();
        assert_eq!(err, "Message must be at least 10 characters");
    }

    #[test]
    fn test_missing_and_mistyped_fields() {
        let body: ContactRequest =
            serde_json::from_value(json!({ "email": "sam@example.com" })).unwrap();
        assert_eq!(body.validate().unwrap_err(), "Required");

        let mut body = request("Sam", "sam@example.com", "Do you ship playmats abroad?");
        body.subject = Some(Value::Null);
        assert_eq!(body.validate().unwrap_err(), "Expected string, received null");

        let body: ContactRequest = serde_json::from_value(json!({
            "name": "Sam",
            "email": "sam@example.com",
            "subject": "Hi",
        }))
        .unwrap();
        assert_eq!(body.validate().unwrap_err(), "Required");
    }

    #[test]
    fn test_length_limits() {
        let err = request(&"a".repeat(101), "sam@example.com", "long enough message")
            .validate()
            .unwrap_err();
        assert_eq!(err, "Name is too long");

        let err = request("Sam", "sam@example.com", &"m".repeat(2001))
            .validate()
            .unwrap_err();
        assert_eq!(err, "Message is too long");

        assert!(
            request(&"a".repeat(100), "sam@example.com", &"m".repeat(2000))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_lengths_count_characters() {
        // Two characters, four bytes.
        assert!(
            request("éé", "sam@example.com", "ten chars!")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(client_ip(&headers), Some("10.0.0.2"));

        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7"));
        assert_eq!(client_ip(&headers), Some("203.0.113.7"));
    }
}
