//! Creation and verification of locally issued identity tokens.
//!
//! Tokens are HS256-signed with the shared secret from [`JwtConfig`] and carry
//! [`Claims`]. Expiry is taken from `JwtConfig::access_token_expiry`, one day
//! unless configured otherwise.
//!
//! # Example
//!
//! ```ignore
//! use fitrec_auth::{create_access_token, verify_token};
//! use fitrec_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token(user_id, user_type_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

use anyhow::anyhow;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;
use uuid::Uuid;

use fitrec_config::JwtConfig;
use fitrec_core::AppError;

use crate::claims::Claims;

/// Creates a signed token for `user_id` with the given role.
///
/// # Errors
///
/// Returns an internal error if the configured expiry is not a positive
/// duration that fits a timestamp, or if token encoding fails.
pub fn create_access_token(
    user_id: Uuid,
    role: i32,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let lifetime = Duration::try_seconds(jwt_config.access_token_expiry)
        .filter(|lifetime| *lifetime > Duration::zero())
        .ok_or_else(|| {
            AppError::internal(anyhow!(
                "Invalid access token expiry: {}",
                jwt_config.access_token_expiry
            ))
        })?;
    let claims = Claims::try_new(user_id, role, Utc::now(), lifetime)
        .ok_or_else(|| AppError::internal(anyhow!("Access token expiry out of range")))?;

    sign_claims(&claims, jwt_config)
}

/// Signs arbitrary [`Claims`] with the configured secret.
pub fn sign_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Verifies a token's signature and expiry and returns its claims.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, expired, or signed
/// with a different secret.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(error = %e, "Token rejected");
        AppError::unauthorized(anyhow!("Invalid or expired token"))
    })
}
