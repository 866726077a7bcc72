use tracing::debug;

use crate::auth0::Auth0Config;
use crate::env::{ConfigError, EnvLoader, EnvSource, ProcessEnv};
use crate::jwt::JwtConfig;
use crate::log::LogConfig;

/// Every setting the service needs, loaded in one pass.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub auth0: Auth0Config,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&ProcessEnv)
    }

    /// # Errors
    ///
    /// Reports all missing variables across every section together.
    pub fn from_source<S: EnvSource + ?Sized>(source: &S) -> Result<Self, ConfigError> {
        let mut env = EnvLoader::new(source);
        let config = Self {
            jwt: JwtConfig::load(&mut env),
            auth0: Auth0Config::load(&mut env),
            log: LogConfig::load(&mut env),
        };
        env.finish()?;

        debug!(
            jwks_url = %config.auth0.jwks_url,
            token_expiry = config.jwt.access_token_expiry,
            "Configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_load_complete_config() {
        let source = env(&[
            ("FITREC_JWT_SECRET", "secret"),
            ("FITREC_JWT_EXPIRY", "3600"),
            ("FITREC_AUTH0_AUDIENCE", "https://api.example.com"),
            ("FITREC_AUTH0_JWKS_URL", "https://example.auth0.com/.well-known/jwks.json"),
        ]);

        let config = AppConfig::from_source(&source).unwrap();
        assert_eq!(config.jwt.secret, "secret");
        assert_eq!(config.jwt.access_token_expiry, 3600);
        assert_eq!(config.auth0.audience, "https://api.example.com");
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_default_token_expiry_is_one_day() {
        let source = env(&[("FITREC_JWT_SECRET", "secret")]);
        let config = JwtConfig::from_source(&source).unwrap();
        assert_eq!(config.access_token_expiry, 86_400);
    }

    #[test]
    fn test_all_missing_vars_reported() {
        let source = env(&[("FITREC_AUTH0_AUDIENCE", "aud")]);
        let err = AppConfig::from_source(&source).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingVars(vec![
                "FITREC_JWT_SECRET".to_string(),
                "FITREC_AUTH0_JWKS_URL".to_string(),
            ])
        );
    }
}
