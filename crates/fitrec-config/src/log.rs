use std::fmt;
use std::str::FromStr;

use crate::env::{ConfigError, EnvLoader, EnvSource, ProcessEnv};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected `compact` or `json`, got `{}`", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// Default level for fitrec targets when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl LogConfig {
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
            level: env.or_default("FITREC_LOG_LEVEL", "info"),
            format: env.parsed_or("FITREC_LOG_FORMAT", LogFormat::Compact),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let env: HashMap<String, String> = HashMap::new();
        assert_eq!(LogConfig::from_source(&env).unwrap(), LogConfig::default());
    }

    #[test]
    fn test_json_format() {
        let env = HashMap::from([
            ("FITREC_LOG_LEVEL".to_string(), "debug".to_string()),
            ("FITREC_LOG_FORMAT".to_string(), "JSON".to_string()),
        ]);
        let config = LogConfig::from_source(&env).unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_format() {
        let env = HashMap::from([("FITREC_LOG_FORMAT".to_string(), "xml".to_string())]);
        assert!(matches!(
            LogConfig::from_source(&env),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
