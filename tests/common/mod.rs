#![allow(dead_code)]

use axum::body::Body;
use axum::http::Response;
use chrono::{Duration, Utc};
use fitrec::state::AppState;
use fitrec_auth::JwksVerifier;
use fitrec_config::{AppConfig, Auth0Config, JwtConfig, LogConfig};
use http_body_util::BodyExt;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};

pub const AUDIENCE: &str = "https://api.fitrec.test";
pub const KEY_ID: &str = "fitrec-test-key";
pub const JWKS: &str = include_str!("../../crates/fitrec-auth/tests/fixtures/test_jwks.json");
const PRIVATE_KEY: &[u8] =
    include_bytes!("../../crates/fitrec-auth/tests/fixtures/test_rsa_private.pem");

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt: JwtConfig {
            secret: "test_secret_key_for_testing_purposes".to_string(),
            access_token_expiry: 3600,
        },
        auth0: Auth0Config {
            audience: AUDIENCE.to_string(),
            jwks_url: "http://127.0.0.1:9/.well-known/jwks.json".to_string(),
        },
        log: LogConfig::default(),
    }
}

pub fn test_jwks() -> JwkSet {
    serde_json::from_str(JWKS).unwrap()
}

/// State with the fixture key set already loaded.
pub fn test_state() -> AppState {
    AppState::new(test_config()).with_jwks(JwksVerifier::new(test_jwks(), AUDIENCE))
}

/// Signs a provider-style RS256 token with the fixture key.
pub fn provider_token(audience: &str, lifetime: Duration) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(KEY_ID.to_string());
    let claims = json!({
        "sub": "auth0|5b0e6d",
        "aud": audience,
        "exp": (Utc::now() + lifetime).timestamp(),
    });
    encode(&header, &claims, &EncodingKey::from_rsa_pem(PRIVATE_KEY).unwrap()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
