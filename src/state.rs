use std::sync::Arc;

use fitrec_auth::JwksVerifier;
use fitrec_config::AppConfig;
use fitrec_core::AppError;

/// Shared state handed to request extractors.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Absent until the provider's key set has been fetched.
    pub jwks: Option<Arc<JwksVerifier>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            jwks: None,
        }
    }

    pub fn with_jwks(mut self, verifier: JwksVerifier) -> Self {
        self.jwks = Some(Arc::new(verifier));
        self
    }

    /// Builds the state and fetches the identity provider's key set.
    pub async fn init(config: AppConfig) -> Result<Self, AppError> {
        let verifier = JwksVerifier::from_config(&config.auth0).await?;
        Ok(Self::new(config).with_jwks(verifier))
    }
}
