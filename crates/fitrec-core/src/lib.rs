//! # fitrec Core
//!
//! Core types, errors, and request helpers shared by the fitrec crates.
//!
//! - [`extract`]: declarative request argument extraction ([`ArgSpec`])
//! - [`source`]: JSON and query-string argument sources
//! - [`value`]: typed field values and the [`Args`] output mapping
//! - [`errors`]: error taxonomy and HTTP response conversion
//! - [`request`]: request shape checks
//! - [`response`]: success envelope
//! - [`ids`]: UUID batch generation
//! - [`password`]: password hashing and verification
//!
//! # Example
//!
//! ```
//! use fitrec_core::{ArgSpec, FieldType};
//! use serde_json::json;
//!
//! let body = json!({"id": "42", "payload": {"distance": 2800}});
//! let args = ArgSpec::new()
//!     .required("id", FieldType::Str)
//!     .optional("payload", FieldType::Map)
//!     .optional("event_id", FieldType::Str)
//!     .extract(&body)
//!     .unwrap();
//!
//! assert!(args.contains_key("payload"));
//! assert!(!args.contains_key("event_id"));
//! ```

pub mod errors;
pub mod extract;
pub mod ids;
pub mod password;
pub mod request;
pub mod response;
pub mod source;
pub mod value;

// Re-export commonly used types at crate root
pub use errors::{AppError, ExtractError, RecordError, RequestError};
pub use extract::{ArgSpec, get_args};
pub use ids::generate_uuids;
pub use password::{hash_password, verify_password};
pub use request::ensure_json_content_type;
pub use response::{ApiResponse, success, success_with};
pub use source::{ArgSource, Lookup, QueryArgs};
pub use value::{Args, FieldType, FieldValue};
