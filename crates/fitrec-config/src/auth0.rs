use crate::env::{ConfigError, EnvLoader, EnvSource, ProcessEnv};

/// Settings for verifying tokens issued by the external identity provider.
#[derive(Clone, Debug)]
pub struct Auth0Config {
    /// Expected `aud` claim.
    pub audience: String,
    /// Well-known JWKS discovery endpoint.
    pub jwks_url: String,
}

impl Auth0Config {
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
            audience: env.required("FITREC_AUTH0_AUDIENCE"),
            jwks_url: env.required("FITREC_AUTH0_JWKS_URL"),
        }
    }
}
