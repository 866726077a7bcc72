//! # fitrec
//!
//! Backend utilities for a fitness record collection service: request argument
//! extraction, environment configuration, identity tokens, and error-to-HTTP
//! mapping.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── fitrec-core/     # ArgSpec extractor, sources, errors, responses
//! ├── fitrec-config/   # Env loader and config sections
//! └── fitrec-auth/     # Claims, HS256 tokens, JWKS verification
//! src/
//! ├── cli/             # `fitrec` command-line tool
//! ├── middleware/      # Authentication extractors
//! ├── logging.rs       # tracing-subscriber setup
//! ├── request.rs       # JSON body and query-string extractors
//! └── state.rs         # Shared application state
//! ```
//!
//! ## Extracting arguments in a handler
//!
//! ```ignore
//! use fitrec::request::JsonArgs;
//! use fitrec_core::{AppError, ArgSpec, FieldType, success};
//!
//! async fn post_event(body: JsonArgs) -> Result<impl IntoResponse, AppError> {
//!     let row = body.extract(
//!         &ArgSpec::new()
//!             .required("name", FieldType::Str)
//!             .required("event_at", FieldType::DateTime)
//!             .defaultable("organization_id", 0),
//!     )?;
//!     Ok(success(row))
//! }
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! FITREC_JWT_SECRET=your-secure-secret-key
//! FITREC_JWT_EXPIRY=86400
//! FITREC_AUTH0_AUDIENCE=https://api.example.com
//! FITREC_AUTH0_JWKS_URL=https://example.auth0.com/.well-known/jwks.json
//! FITREC_LOG_LEVEL=info
//! FITREC_LOG_FORMAT=compact
//! ```

pub mod cli;
pub mod logging;
pub mod middleware;
pub mod request;
pub mod state;

// Re-export workspace crates for convenience
pub use fitrec_auth;
pub use fitrec_config;
pub use fitrec_core;
