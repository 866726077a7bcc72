use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use serde_json::Value;
use uuid::Uuid;

use fitrec_auth::{Claims, verify_token};
use fitrec_core::AppError;

use crate::logging::record_user_id;
use crate::state::AppState;

/// Extractor that requires a valid locally issued bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.0.user_id()
    }

    pub fn role(&self) -> i32 {
        self.0.rol
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::unauthorized(anyhow!("Missing or invalid authorization header"))
                })?;

        let claims = verify_token(bearer.token(), &state.config.jwt)?;
        record_user_id(&claims.sub);

        Ok(AuthUser(claims))
    }
}

/// Like [`AuthUser`], but lets anonymous requests through.
///
/// A request without an `Authorization` header yields `None`; a request with a
/// bad token is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Claims>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(MaybeAuthUser(None));
        }

        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        Ok(MaybeAuthUser(Some(claims)))
    }
}

/// Extractor for bearer tokens minted by the external identity provider,
/// verified against its key set.
#[derive(Debug, Clone)]
pub struct ProviderUser(pub Value);

impl FromRequestParts<AppState> for ProviderUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let verifier = state
            .jwks
            .as_ref()
            .ok_or_else(|| AppError::internal(anyhow!("JWKS verifier not initialized")))?;

        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authorization header")))?;

        let claims = verifier.verify_bearer(authorization)?;
        if let Some(sub) = claims.get("sub").and_then(Value::as_str) {
            record_user_id(sub);
        }

        Ok(ProviderUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fitrec_auth::create_identity;

    #[test]
    fn test_auth_user_accessors() {
        let user_id = Uuid::new_v4();
        let auth_user = AuthUser(create_identity(user_id, 3, Utc::now()));

        assert_eq!(auth_user.user_id().unwrap(), user_id);
        assert_eq!(auth_user.role(), 3);
    }
}
