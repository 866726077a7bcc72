//! Verification of third-party bearer tokens against a JSON Web Key Set.
//!
//! The identity provider publishes its public keys at a well-known discovery
//! endpoint. [`JwksVerifier::fetch`] downloads that set once; afterwards every
//! verification is local. Tokens must be RS256-signed and carry the configured
//! audience.

use std::time::Duration;

use anyhow::anyhow;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{Algorithm, DecodingKey, Header, Validation, decode, decode_header};
use serde_json::Value;
use tracing::{debug, info};

use fitrec_config::Auth0Config;
use fitrec_core::{AppError, ArgSpec, FieldType};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct JwksVerifier {
    keys: JwkSet,
    audience: String,
}

impl JwksVerifier {
    pub fn new(keys: JwkSet, audience: impl Into<String>) -> Self {
        Self {
            keys,
            audience: audience.into(),
        }
    }

    /// Downloads the key set from `jwks_url`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the endpoint is unreachable, answers with
    /// an error status, or serves something that isn't a key set.
    pub async fn fetch(jwks_url: &str, audience: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| AppError::internal(anyhow!("Failed to build HTTP client: {}", e)))?;

        let keys = client
            .get(jwks_url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                AppError::internal(anyhow!("Failed to fetch JWKS from {}: {}", jwks_url, e))
            })?
            .json::<JwkSet>()
            .await
            .map_err(|e| AppError::internal(anyhow!("Invalid JWKS from {}: {}", jwks_url, e)))?;

        info!(jwks_url = %jwks_url, key_count = keys.keys.len(), "Fetched JWKS");
        Ok(Self::new(keys, audience))
    }

    pub async fn from_config(config: &Auth0Config) -> Result<Self, AppError> {
        Self::fetch(&config.jwks_url, config.audience.clone()).await
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn key_count(&self) -> usize {
        self.keys.keys.len()
    }

    /// Picks the key named by the token's `kid`, or the first key if the token
    /// names none.
    fn key_for(&self, header: &Header) -> Result<&Jwk, AppError> {
        let key = match &header.kid {
            Some(kid) => self.keys.find(kid),
            None => self.keys.keys.first(),
        };
        key.ok_or_else(|| AppError::unauthorized(anyhow!("No matching signing key")))
    }

    /// Verifies signature, expiry and audience, returning the token payload.
    ///
    /// # Errors
    ///
    /// Returns an unauthorized error for any token that fails verification.
    pub fn verify(&self, token: &str) -> Result<Value, AppError> {
        let header = decode_header(token)
            .map_err(|e| AppError::unauthorized(anyhow!("Malformed token: {}", e)))?;
        let jwk = self.key_for(&header)?;
        let key = DecodingKey::from_jwk(jwk)
            .map_err(|e| AppError::unauthorized(anyhow!("Unusable signing key: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.audience]);

        decode::<Value>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Third-party token rejected");
                AppError::unauthorized(anyhow!("Invalid or expired token"))
            })
    }

    /// Verifies the token in an `Authorization: Bearer <token>` header value.
    pub fn verify_bearer(&self, authorization: &str) -> Result<Value, AppError> {
        let token = authorization.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow!("Invalid authorization header format"))
        })?;
        self.verify(token.trim())
    }

    /// Verifies the `token` field of a JSON request body.
    ///
    /// # Errors
    ///
    /// A missing or non-string `token` is a 400; verification failures are 401.
    pub fn verify_body_token(&self, body: &Value) -> Result<Value, AppError> {
        let args = ArgSpec::new().required("token", FieldType::Str).extract(body)?;
        let token = args
            .get_str("token")
            .ok_or_else(|| AppError::internal(anyhow!("token missing after extraction")))?;
        self.verify(token)
    }
}
