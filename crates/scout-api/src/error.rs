//! API error responses
//!
//! Wraps the core error taxonomy so each variant maps onto one HTTP
//! response shape. Rate limits additionally carry a `Retry-After` header
//! whose value always equals the JSON `retryAfterSeconds` field.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use scout_core::ScoutError;

/// Error response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u64>,
}

/// Handler-level error, convertible from any `ScoutError`
#[derive(Debug)]
pub struct ApiError(pub ScoutError);

impl From<ScoutError> for ApiError {
    fn from(err: ScoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.0.status_code();
        let status =
            StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match self.0 {
            ScoutError::RateLimited {
                message,
                retry_after_seconds,
            } => {
                let client_message = match retry_after_seconds {
                    Some(seconds) => format!("Rate limit/quota exceeded. Retry in ~{seconds}s."),
                    None => "Rate limit/quota exceeded. Please retry shortly.".to_string(),
                };

                tracing::error!(
                    status = 429u16,
                    retry_after_seconds,
                    error = %message,
                    "upstream rate limited"
                );

                let mut response = (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(ErrorResponse {
                        message: client_message,
                        retry_after_seconds,
                    }),
                )
                    .into_response();

                if let Some(seconds) = retry_after_seconds {
                    response
                        .headers_mut()
                        .insert(header::RETRY_AFTER, HeaderValue::from(seconds));
                }

                response
            }
            err => {
                let message = err.to_string();
                if status.is_server_error() {
                    tracing::error!(status = status_code, error = %message, "request failed");
                }

                (
                    status,
                    Json(ErrorResponse {
                        message,
                        retry_after_seconds: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}
