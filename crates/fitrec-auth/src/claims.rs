//! Claim structures embedded in identity tokens.

use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fitrec_core::AppError;

/// Lifetime in seconds of an identity created by [`create_identity`].
pub const IDENTITY_LIFETIME_SECS: i64 = 86_400;

/// Identity claims for locally issued tokens.
///
/// - `sub`: user ID (subject)
/// - `rol`: user type/role ID
/// - `iat`: issued-at timestamp
/// - `exp`: expiration timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub rol: i32,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, role: i32, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            rol: role,
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }

    /// Like [`Claims::new`], but `None` if the expiry overflows the timestamp
    /// range instead of panicking.
    pub fn try_new(
        user_id: Uuid,
        role: i32,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(lifetime)?;
        Some(Self {
            sub: user_id.to_string(),
            rol: role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// The subject as a UUID.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::unauthorized(anyhow!("Invalid user ID in token")))
    }
}

/// Builds the claims for an authenticated user, valid for one day from `now`.
pub fn create_identity(user_id: Uuid, role: i32, now: DateTime<Utc>) -> Claims {
    Claims::new(user_id, role, now, Duration::seconds(IDENTITY_LIFETIME_SECS))
}
