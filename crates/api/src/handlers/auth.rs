//! Handlers for the `/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bucketlist_core::error::CoreError;
use bucketlist_core::validation::{validate_email, validate_password_strength};
use bucketlist_db::models::user::{CreateUser, UserResponse};
use bucketlist_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
///
/// Fields are optional at the schema level so a missing field produces a
/// 400 naming the field, not a transport-level decode failure.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub user: UserResponse,
}

/// Successful login response carrying the bearer token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a user from email + password + confirmation. Validates the email
/// shape, the confirmation match, and the password policy before hashing.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let (email, password) = require_credentials(input.email, input.password)?;
    validate_email(&email).map_err(validation)?;

    let confirm = input.confirm_password.unwrap_or_default();
    if password != confirm {
        return Err(validation("Password fields do not match".to_string()));
    }

    validate_password_strength(&password).map_err(validation)?;

    // Friendly conflict for the common case; uq_users_email remains the
    // race-proof enforcement and is translated to the same 409 if two
    // registrations race past this check.
    if UserRepo::email_exists(&state.pool, &email).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Registration failure: {email} is already registered"
        ))));
    }

    let hashed = hash_password(&password)
        .map_err(|e| internal(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash: hashed,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    let response = RegisterResponse {
        message: "Registration successful, welcome to Bucketlist",
        user: UserResponse::from(&user),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Verify an email/password pair and mint a bearer token. The failure
/// message is identical whether the email is unknown or the password is
/// wrong, so login responses never confirm which emails are registered.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (email, password) = require_credentials(input.email, input.password)?;

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !verify_password(&password, &user.password_hash) {
        return Err(invalid_credentials());
    }

    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| internal(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful",
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Require both credential fields to be present and non-blank.
fn require_credentials(
    email: Option<String>,
    password: Option<String>,
) -> Result<(String, String), AppError> {
    let email = email.unwrap_or_default().trim().to_string();
    let password = password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(validation("Email or password cannot be blank".to_string()));
    }
    Ok((email, password))
}

fn validation(msg: String) -> AppError {
    AppError::Core(CoreError::Validation(msg))
}

fn internal(msg: String) -> AppError {
    AppError::Core(CoreError::Internal(msg))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid email or password".to_string(),
    ))
}
