//! # fitrec Auth
//!
//! Identity tokens and third-party token verification for fitrec.
//!
//! - [`claims`]: the [`Claims`] carried by locally issued tokens
//! - [`jwt`]: HS256 token creation and verification
//! - [`jwks`]: RS256 verification against a remote JSON Web Key Set
//!
//! # Example
//!
//! ```ignore
//! use fitrec_auth::{JwksVerifier, create_access_token, verify_token};
//! use fitrec_config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//!
//! // Issue and check our own tokens
//! let token = create_access_token(user_id, user_type_id, &config.jwt)?;
//! let claims = verify_token(&token, &config.jwt)?;
//!
//! // Check tokens minted by the identity provider
//! let verifier = JwksVerifier::from_config(&config.auth0).await?;
//! let payload = verifier.verify_bearer(authorization_header)?;
//! ```

pub mod claims;
pub mod jwks;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, IDENTITY_LIFETIME_SECS, create_identity};
pub use jwks::JwksVerifier;
pub use jwt::{create_access_token, sign_claims, verify_token};
