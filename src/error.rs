//!
//! # Error handling
//!
//! A single [`AppError`] enum covers every failure the service can report.
//! It implements `actix_web::error::ResponseError`, so handlers and
//! middleware return `Result<_, AppError>` and the framework renders the
//! wire envelope `{"success": false, "message": ...}` with the right HTTP
//! status. `From` impls for `sqlx::Error`, `validator::ValidationErrors`,
//! and `bcrypt::BcryptError` let call sites propagate with `?`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Every error the application reports, tagged with its HTTP status.
#[derive(Debug)]
pub enum AppError {
    /// Missing/invalid credentials or token (HTTP 401).
    Unauthorized(String),
    /// Malformed or unacceptable request (HTTP 400).
    BadRequest(String),
    /// Resource absent or not owned by the caller (HTTP 404).
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Persistence failure, wrapping `sqlx` errors (HTTP 500).
    DatabaseError(String),
    /// Failed input validation (HTTP 400).
    ValidationError(String),
}

impl AppError {
    /// The message as rendered to the client.
    ///
    /// 500-class detail (database messages, internal state) is only exposed
    /// in debug builds; release builds answer with a generic message. The
    /// full detail still reaches the log and the audit trail.
    fn client_message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg) => msg,
            AppError::InternalServerError(msg) | AppError::DatabaseError(msg) => {
                if cfg!(debug_assertions) {
                    msg
                } else {
                    "Internal Server Error"
                }
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "message": self.client_message(),
        }))
    }
}

/// `sqlx::Error::RowNotFound` maps to `NotFound`; every other database
/// error is a 500.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Hashing or verification failure during password handling.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (AppError::Unauthorized("Invalid token".into()), 401),
            (AppError::BadRequest("Invalid input".into()), 400),
            (AppError::ValidationError("empty title".into()), 400),
            (AppError::NotFound("Todo not found".into()), 404),
            (AppError::InternalServerError("boom".into()), 500),
            (AppError::DatabaseError("connection lost".into()), 500),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code().as_u16(), expected, "{}", error);
            assert_eq!(error.error_response().status().as_u16(), expected);
        }
    }

    #[actix_rt::test]
    async fn test_error_envelope_shape() {
        let error = AppError::NotFound("Todo not found".into());
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Todo not found");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }
}
