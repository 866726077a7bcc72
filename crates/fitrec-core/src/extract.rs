//! Declarative extraction of request arguments.
//!
//! An [`ArgSpec`] lists the fields an endpoint expects in four groups:
//!
//! - **required**: name and type; missing or mistyped values fail the call
//! - **defaultable**: name and default value; the default's type drives
//!   coercion and the default is used whenever the source can't supply one
//! - **optional**: name and type; included only when present and valid
//! - **constant**: name and fixed value; always written, overriding the rest
//!
//! Groups are merged in that order, so later groups win on key collisions.
//!
//! # Example
//!
//! ```
//! use fitrec_core::extract::ArgSpec;
//! use fitrec_core::value::FieldType;
//! use serde_json::json;
//!
//! let body = json!({"username": "anna", "password": "secret"});
//! let args = ArgSpec::new()
//!     .required("username", FieldType::Str)
//!     .required("password", FieldType::Str)
//!     .defaultable("type_id", 0)
//!     .extract(&body)
//!     .unwrap();
//!
//! assert_eq!(args.get_str("username"), Some("anna"));
//! assert_eq!(args.get_i64("type_id"), Some(0));
//! ```

use tracing::debug;

use crate::errors::ExtractError;
use crate::source::{ArgSource, Lookup};
use crate::value::{Args, FieldType, FieldValue};

/// Field descriptors for one extraction, kept in insertion order.
///
/// Declaring a key twice within a group replaces the earlier declaration.
#[derive(Debug, Clone, Default)]
pub struct ArgSpec {
    required: Vec<(String, FieldType)>,
    defaultable: Vec<(String, FieldValue)>,
    optional: Vec<(String, FieldType)>,
    constant: Vec<(String, FieldValue)>,
}

impl ArgSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, key: impl Into<String>, ty: FieldType) -> Self {
        upsert(&mut self.required, key.into(), ty);
        self
    }

    pub fn defaultable(mut self, key: impl Into<String>, default: impl Into<FieldValue>) -> Self {
        upsert(&mut self.defaultable, key.into(), default.into());
        self
    }

    pub fn optional(mut self, key: impl Into<String>, ty: FieldType) -> Self {
        upsert(&mut self.optional, key.into(), ty);
        self
    }

    pub fn constant(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        upsert(&mut self.constant, key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
            && self.defaultable.is_empty()
            && self.optional.is_empty()
            && self.constant.is_empty()
    }

    /// Extracts the described fields from `source`.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::NoDescriptors`] if no group has any field
    /// - [`ExtractError::UnsupportedSource`] if `source` can't be looked up
    /// - [`ExtractError::MissingFields`] listing every required field that was
    ///   absent or mistyped, in declaration order
    pub fn extract<S>(&self, source: &S) -> Result<Args, ExtractError>
    where
        S: ArgSource + ?Sized,
    {
        if self.is_empty() {
            return Err(ExtractError::NoDescriptors);
        }

        let mut args = Args::new();
        let mut missing = Vec::new();

        for (key, ty) in &self.required {
            match source.lookup(key, *ty)? {
                Lookup::Present(value) => args.insert(key.as_str(), value),
                unsatisfied => {
                    log_unsatisfied(key, &unsatisfied);
                    missing.push(key.clone());
                }
            }
        }

        for (key, default) in &self.defaultable {
            args.insert(key.as_str(), source.lookup_or(key, default)?);
        }

        for (key, ty) in &self.optional {
            match source.lookup(key, *ty)? {
                Lookup::Present(value) => args.insert(key.as_str(), value),
                unsatisfied => log_unsatisfied(key, &unsatisfied),
            }
        }

        for (key, value) in &self.constant {
            args.insert(key.as_str(), value.clone());
        }

        if !missing.is_empty() {
            return Err(ExtractError::MissingFields(missing));
        }

        Ok(args)
    }
}

fn upsert<V>(group: &mut Vec<(String, V)>, key: String, value: V) {
    match group.iter_mut().find(|(existing, _)| *existing == key) {
        Some(entry) => entry.1 = value,
        None => group.push((key, value)),
    }
}

fn log_unsatisfied(key: &str, lookup: &Lookup) {
    if let Lookup::Mismatched { expected, found } = lookup {
        debug!(field = %key, expected = %expected, found = %found, "Argument has wrong type");
    }
}

/// Extracts `spec` from `source`. Equivalent to [`ArgSpec::extract`].
pub fn get_args<S>(source: &S, spec: &ArgSpec) -> Result<Args, ExtractError>
where
    S: ArgSource + ?Sized,
{
    spec.extract(source)
}
