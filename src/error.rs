use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Riot API error: {status} - {message}")]
    RiotApi { status: u16, message: String },

    #[error("Malformed Riot API response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Riot API response from {endpoint} is missing `{field}`")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Insufficient privileges")]
    Forbidden,

    #[error("Too Many Requests")]
    RateLimited,

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a bearer token was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Not authenticated")]
    Missing,
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Upstream statuses are passed through untouched.
            AppError::RiotApi { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::MalformedResponse { .. }
            | AppError::MissingField { .. }
            | AppError::Http(_)
            | AppError::Jwt(_)
            | AppError::InvalidRegion(_)
            | AppError::Config(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text exposed to the client in the `detail` field.
    pub fn detail(&self) -> String {
        match self {
            AppError::RiotApi { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "🌐 ❌ Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "🌐 Request rejected");
        }

        let mut response = (status, Json(json!({ "detail": self.detail() }))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn riot_api_status_is_passed_through() {
        let err = AppError::RiotApi {
            status: 404,
            message: "Not found".into(),
        };

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.detail(), "Not found");
    }

    #[test]
    fn auth_errors_carry_their_reason() {
        let err: AppError = AuthError::Expired.into();

        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.detail(), "Token has expired");
    }

    #[test]
    fn missing_field_is_an_internal_error() {
        let err = AppError::MissingField {
            endpoint: "account-v1",
            field: "puuid",
        };

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.detail().contains("puuid"));
    }
}
