use crate::env::{ConfigError, EnvLoader, EnvSource, ProcessEnv};

/// One day, the lifetime of issued identity tokens.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 86_400;

/// Upper bound accepted for `FITREC_JWT_EXPIRY`: one year.
pub const MAX_ACCESS_TOKEN_EXPIRY: i64 = 31_536_000;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of access tokens in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source<S: EnvSource + ?Sized>(source: &S) -> Result<Self, ConfigError> {
        let mut env = EnvLoader::new(source);
        let config = Self::load(&mut env);
        env.finish()?;
        Ok(config)
    }

    pub(crate) fn load<S: EnvSource + ?Sized>(env: &mut EnvLoader<'_, S>) -> Self {
        Self {
            secret: env.required("FITREC_JWT_SECRET"),
            access_token_expiry: env.parsed_in_range(
                "FITREC_JWT_EXPIRY",
                DEFAULT_ACCESS_TOKEN_EXPIRY,
                1..=MAX_ACCESS_TOKEN_EXPIRY,
            ),
        }
    }
}
