//! Authentication extractor for Axum handlers.
//!
//! Two credential schemes are accepted on the `Authorization` header,
//! tried by scheme tag (at most one is present per request in practice):
//!
//! - `Bearer <token>` -- a signed access token; the subject is looked up
//!   to confirm the account still exists.
//! - `Basic <base64(email:password)>` -- an email/password pair verified
//!   against the stored Argon2id hash.
//!
//! Resolution happens before any handler logic runs: a handler that takes
//! [`AuthUser`] as a parameter is unreachable without a bound identity.
//! The identity is an explicit request-scoped value -- there is no ambient
//! per-request global to leak across concurrent requests.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bucketlist_core::error::CoreError;
use bucketlist_core::types::DbId;
use bucketlist_db::repositories::UserRepo;

use crate::auth::jwt::verify_access_token;
use crate::auth::password::verify_password;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user bound to the current request.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The user's email, for logging and response assembly.
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                unauthorized("Authentication required. Provide a Bearer token or Basic credentials")
            })?;

        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            authenticate_bearer(state, token).await
        } else if let Some(encoded) = auth_header.strip_prefix("Basic ") {
            authenticate_basic(state, encoded).await
        } else {
            Err(unauthorized(
                "Invalid Authorization format. Expected: Bearer <token> or Basic <credentials>",
            ))
        }
    }
}

/// Scheme B: verify a bearer token and bind the subject's identity.
///
/// Expired and invalid tokens are distinguished in the message so the
/// caller knows whether to re-login or to register; both are 401s.
async fn authenticate_bearer(state: &AppState, token: &str) -> Result<AuthUser, AppError> {
    let user_id = verify_access_token(token, &state.config.jwt)
        .map_err(|e| unauthorized(&e.to_string()))?;

    // The subject must still exist; a token can outlive its account.
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| unauthorized("Invalid token. Register or login to access the service"))?;

    Ok(AuthUser {
        user_id: user.id,
        email: user.email,
    })
}

/// Scheme A: verify an email/password pair from a Basic credential.
///
/// Every failure path -- undecodable credential, unknown email, wrong
/// password -- produces the same message, so the response never confirms
/// whether an email is registered.
async fn authenticate_basic(state: &AppState, encoded: &str) -> Result<AuthUser, AppError> {
    let decoded = BASE64
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| unauthorized("Invalid email or password"))?;

    let (email, password) = decoded
        .split_once(':')
        .ok_or_else(|| unauthorized("Invalid email or password"))?;

    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| unauthorized("Invalid email or password"))?;

    if !verify_password(password, &user.password_hash) {
        return Err(unauthorized("Invalid email or password"));
    }

    Ok(AuthUser {
        user_id: user.id,
        email: user.email,
    })
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}
