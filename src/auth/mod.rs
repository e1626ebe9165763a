pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, hash_reset_token, new_reset_token, verify_token, Claims};

use crate::models::PublicUser;

/// Payload for account creation.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name, free-form.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Payload for a login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Payload asking for a password-reset token.
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

/// Payload redeeming a password-reset token.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[serde(rename = "resetToken")]
    #[validate(length(min = 1))]
    pub reset_token: String,
    #[serde(rename = "newPassword")]
    #[validate(length(min = 6))]
    pub new_password: String,
}

/// Body of a successful signup or login: the public user projection plus a
/// freshly issued session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthData {
    pub user: PublicUser,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_validation() {
        let valid = SignupRequest {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            password: "pw123456".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_name = SignupRequest {
            name: "".to_string(),
            email: "a@x.com".to_string(),
            password: "pw123456".to_string(),
        };
        assert!(empty_name.validate().is_err());

        let bad_email = SignupRequest {
            name: "Alice".to_string(),
            email: "not-an-email".to_string(),
            password: "pw123456".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = SignupRequest {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            password: "pw1".to_string(),
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "a@x.com".to_string(),
            password: "pw123456".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = LoginRequest {
            email: "ax.com".to_string(),
            password: "pw123456".to_string(),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_reset_password_request_field_names() {
        // The wire format uses camelCase keys.
        let payload: ResetPasswordRequest = serde_json::from_value(serde_json::json!({
            "resetToken": "deadbeef",
            "newPassword": "pw123456"
        }))
        .unwrap();

        assert_eq!(payload.reset_token, "deadbeef");
        assert_eq!(payload.new_password, "pw123456");
        assert!(payload.validate().is_ok());

        let short = ResetPasswordRequest {
            reset_token: "deadbeef".to_string(),
            new_password: "pw".to_string(),
        };
        assert!(short.validate().is_err());
    }
}
