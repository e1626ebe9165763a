use crate::{
    auth::{
        generate_token, hash_password, hash_reset_token, new_reset_token,
        token::RESET_TOKEN_TTL_MINUTES, verify_password, AuthData, ForgotPasswordRequest,
        LoginRequest, ResetPasswordRequest, SignupRequest,
    },
    error::AppError,
    models::{PublicUser, UserCredentials},
};
use actix_web::{post, web, HttpResponse, Responder};
use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Create an account and return a session token for it.
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    payload: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let existing = sqlx::query_as::<_, (i32,)>("SELECT id FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&**pool)
        .await?;

    if existing.is_some() {
        return Err(AppError::BadRequest("User already exists".into()));
    }

    let password_hash = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, PublicUser>(
        "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3)
         RETURNING id, name, email",
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&**pool)
    .await?;

    let token = generate_token(user.id)?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": AuthData { user, token },
    })))
}

/// Authenticate and return a session token.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    // The only query that reads the stored password hash.
    let user = sqlx::query_as::<_, UserCredentials>(
        "SELECT id, name, email, password_hash FROM users WHERE email = $1",
    )
    .bind(&payload.email)
    .fetch_optional(&**pool)
    .await?;

    // Unknown email and wrong password answer identically so the endpoint
    // cannot be used to probe which addresses are registered.
    let user = match user {
        Some(user) => user,
        None => return Err(AppError::Unauthorized("Invalid credentials".into())),
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = generate_token(user.id)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": AuthData {
            user: user.public(),
            token,
        },
    })))
}

/// Issue a password-reset token for the given email.
///
/// Only the SHA-256 digest of the token is stored; the plaintext is
/// returned directly in the response body. A real deployment would deliver
/// it out-of-band instead — returning it keeps the recovery flow
/// self-contained and is a deliberate simplification.
#[post("/forgot-password")]
pub async fn forgot_password(
    pool: web::Data<PgPool>,
    payload: web::Json<ForgotPasswordRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let user = sqlx::query_as::<_, (i32,)>("SELECT id FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&**pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let (reset_token, token_hash) = new_reset_token();
    let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);

    sqlx::query("UPDATE users SET reset_token_hash = $1, reset_token_expires = $2 WHERE id = $3")
        .bind(&token_hash)
        .bind(expires_at)
        .bind(user.0)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Password reset token generated",
        "resetToken": reset_token,
    })))
}

/// Redeem a reset token and set a new password.
///
/// Matching and clearing the token happen in a single statement, so a
/// token can be redeemed at most once even under concurrent attempts, and
/// only while its expiry is strictly in the future.
#[post("/reset-password")]
pub async fn reset_password(
    pool: web::Data<PgPool>,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let token_hash = hash_reset_token(&payload.reset_token);
    let password_hash = hash_password(&payload.new_password)?;

    let updated = sqlx::query_as::<_, (i32,)>(
        "UPDATE users
         SET password_hash = $1, reset_token_hash = NULL, reset_token_expires = NULL
         WHERE reset_token_hash = $2 AND reset_token_expires > $3
         RETURNING id",
    )
    .bind(&password_hash)
    .bind(&token_hash)
    .bind(Utc::now())
    .fetch_optional(&**pool)
    .await?;

    if updated.is_none() {
        return Err(AppError::BadRequest("Invalid or expired reset token".into()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Password reset successful",
    })))
}
