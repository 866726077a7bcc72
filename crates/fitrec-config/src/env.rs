//! Environment lookups with aggregated error reporting.
//!
//! Configuration sections read their variables through an [`EnvLoader`], which
//! keeps going after a variable is missing so every absent name can be
//! reported at once.

use std::collections::HashMap;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Errors produced while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Following environment variables undefined: {}", .0.join(", "))]
    MissingVars(Vec<String>),

    #[error("Invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: String,
        value: String,
        reason: String,
    },
}

/// Somewhere named settings can be read from.
pub trait EnvSource {
    fn get(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/// Reads variables from an [`EnvSource`], remembering what went wrong.
pub struct EnvLoader<'a, S: EnvSource + ?Sized> {
    source: &'a S,
    missing: Vec<String>,
    invalid: Option<ConfigError>,
}

impl<'a, S: EnvSource + ?Sized> EnvLoader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            missing: Vec::new(),
            invalid: None,
        }
    }

    /// Returns the variable, or an empty string after recording it as missing.
    pub fn required(&mut self, name: &str) -> String {
        match self.source.get(name) {
            Some(value) => value,
            None => {
                self.missing.push(name.to_string());
                String::new()
            }
        }
    }

    pub fn optional(&mut self, name: &str) -> Option<String> {
        self.source.get(name)
    }

    pub fn or_default(&mut self, name: &str, default: &str) -> String {
        self.source.get(name).unwrap_or_else(|| default.to_string())
    }

    /// Parses the variable if set, falling back to `default` when unset.
    /// Unparseable values are recorded and also fall back to `default`.
    pub fn parsed_or<T>(&mut self, name: &str, default: T) -> T
    where
        T: FromStr,
        T::Err: Display,
    {
        let Some(raw) = self.source.get(name) else {
            return default;
        };

        match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                self.record_invalid(name, raw, e.to_string());
                default
            }
        }
    }

    /// Like [`parsed_or`](Self::parsed_or), but values outside `range` are
    /// recorded as invalid too.
    pub fn parsed_in_range<T>(&mut self, name: &str, default: T, range: RangeInclusive<T>) -> T
    where
        T: FromStr + PartialOrd + Display + Copy,
        T::Err: Display,
    {
        let value = self.parsed_or(name, default);
        if range.contains(&value) {
            return value;
        }

        self.record_invalid(
            name,
            value.to_string(),
            format!("must be between {} and {}", range.start(), range.end()),
        );
        default
    }

    fn record_invalid(&mut self, var: &str, value: String, reason: String) {
        if self.invalid.is_none() {
            self.invalid = Some(ConfigError::Invalid {
                var: var.to_string(),
                value,
                reason,
            });
        }
    }

    /// # Errors
    ///
    /// [`ConfigError::MissingVars`] with every missing name in lookup order,
    /// otherwise the first [`ConfigError::Invalid`] encountered.
    pub fn finish(self) -> Result<(), ConfigError> {
        if !self.missing.is_empty() {
            return Err(ConfigError::MissingVars(self.missing));
        }
        match self.invalid {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_required_present() {
        let env = source(&[("A", "1")]);
        let mut loader = EnvLoader::new(&env);
        assert_eq!(loader.required("A"), "1");
        assert!(loader.finish().is_ok());
    }

    #[test]
    fn test_missing_vars_are_aggregated() {
        let env = source(&[("B", "present")]);
        let mut loader = EnvLoader::new(&env);
        loader.required("C");
        loader.required("B");
        loader.required("A");

        let err = loader.finish().unwrap_err();
        assert_eq!(err, ConfigError::MissingVars(vec!["C".into(), "A".into()]));
        assert_eq!(
            err.to_string(),
            "Following environment variables undefined: C, A"
        );
    }

    #[test]
    fn test_empty_value_counts_as_present() {
        let env = source(&[("A", "")]);
        let mut loader = EnvLoader::new(&env);
        assert_eq!(loader.required("A"), "");
        assert!(loader.finish().is_ok());
    }

    #[test]
    fn test_defaults() {
        let env = source(&[]);
        let mut loader = EnvLoader::new(&env);
        assert_eq!(loader.or_default("LEVEL", "info"), "info");
        assert_eq!(loader.optional("LEVEL"), None);
        assert_eq!(loader.parsed_or("EXPIRY", 86400i64), 86400);
        assert!(loader.finish().is_ok());
    }

    #[test]
    fn test_invalid_value() {
        let env = source(&[("EXPIRY", "tomorrow")]);
        let mut loader = EnvLoader::new(&env);
        assert_eq!(loader.parsed_or("EXPIRY", 86400i64), 86400);

        let err = loader.finish().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "EXPIRY"));
    }

    #[test]
    fn test_value_out_of_range() {
        let env = source(&[("EXPIRY", "0")]);
        let mut loader = EnvLoader::new(&env);
        assert_eq!(loader.parsed_in_range("EXPIRY", 60i64, 1..=3600), 60);

        let err = loader.finish().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value \"0\" for EXPIRY: must be between 1 and 3600"
        );
    }

    #[test]
    fn test_value_in_range() {
        let env = source(&[("EXPIRY", "3600")]);
        let mut loader = EnvLoader::new(&env);
        assert_eq!(loader.parsed_in_range("EXPIRY", 60i64, 1..=3600), 3600);
        assert!(loader.finish().is_ok());
    }

    #[test]
    fn test_missing_reported_before_invalid() {
        let env = source(&[("EXPIRY", "tomorrow")]);
        let mut loader = EnvLoader::new(&env);
        loader.parsed_or("EXPIRY", 0i64);
        loader.required("SECRET");

        let err = loader.finish().unwrap_err();
        assert_eq!(err, ConfigError::MissingVars(vec!["SECRET".into()]));
    }
}
