//! Bearer-token issuance and validation.
//!
//! Access tokens are HS256-signed JWTs carrying only the subject, issue
//! time, and expiry. They are stateless and self-contained: no session
//! table exists server-side, so an issued token cannot be revoked before
//! its natural expiry. That is a deliberate simplicity tradeoff -- expiry
//! is the sole termination mechanism.

use bucketlist_core::types::DbId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Why a presented token was rejected.
///
/// Both variants are user-facing 401 outcomes, never server errors; the
/// messages tell the caller what to do next.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Expired token. Please login again to get a new token")]
    Expired,
    #[error("Invalid token. Register or login to access the service")]
    Invalid,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `15`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
        }
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.access_token_expiry_mins * 60;

    let claims = Claims {
        sub: user_id,
        exp,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate an access token and return the subject's user id.
///
/// A token is valid iff its signature verifies against the server secret
/// AND the current time is before `exp`. An expired-but-well-signed token
/// maps to [`TokenError::Expired`]; every other defect (bad signature,
/// malformed payload, garbage input) maps to [`TokenError::Invalid`].
pub fn verify_access_token(token: &str, config: &JwtConfig) -> Result<DbId, TokenError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })?;
    Ok(token_data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        }
    }

    #[test]
    fn test_verify_returns_subject_after_issuance() {
        let config = test_config();
        let token =
            generate_access_token(42, &config).expect("token generation should succeed");

        let user_id =
            verify_access_token(&token, &config).expect("fresh token should validate");
        assert_eq!(user_id, 42);
    }

    #[test]
    fn test_expired_token_reported_as_expired() {
        let config = test_config();

        // Manually create an already-expired token.
        // Use a margin well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            exp: now - 300,
            iat: now - 600,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert_matches!(
            verify_access_token(&token, &config),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_tampered_token_reported_as_invalid() {
        let config = test_config();
        let other = JwtConfig {
            secret: "a-completely-different-signing-secret".to_string(),
            access_token_expiry_mins: 15,
        };

        let token =
            generate_access_token(1, &other).expect("token generation should succeed");

        assert_matches!(
            verify_access_token(&token, &config),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_garbage_token_reported_as_invalid() {
        let config = test_config();
        assert_matches!(
            verify_access_token("not-a-jwt-at-all", &config),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_error_messages_guide_the_user() {
        assert_eq!(
            TokenError::Expired.to_string(),
            "Expired token. Please login again to get a new token"
        );
        assert_eq!(
            TokenError::Invalid.to_string(),
            "Invalid token. Register or login to access the service"
        );
    }
}
