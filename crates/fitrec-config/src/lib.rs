//! # fitrec Config
//!
//! Configuration types for fitrec, loaded from environment variables.
//!
//! - [`env`]: [`EnvSource`] abstraction and the aggregating [`EnvLoader`]
//! - [`jwt`]: identity token signing configuration
//! - [`auth0`]: external identity provider (JWKS) configuration
//! - [`log`]: logging level and format
//! - [`app`]: [`AppConfig`], all of the above in one pass
//!
//! Nothing is cached globally: callers load a config once and pass it on.
//!
//! # Example
//!
//! ```ignore
//! use fitrec_config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("{}", config.auth0.jwks_url);
//! ```

pub mod app;
pub mod auth0;
pub mod env;
pub mod jwt;
pub mod log;

// Re-export commonly used types at crate root
pub use app::AppConfig;
pub use auth0::Auth0Config;
pub use env::{ConfigError, EnvLoader, EnvSource, ProcessEnv};
pub use jwt::JwtConfig;
pub use log::{LogConfig, LogFormat};
