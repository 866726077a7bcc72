//! Request extractors for authentication.
//!
//! - [`auth::AuthUser`]: requires a token issued by this service
//! - [`auth::MaybeAuthUser`]: optional variant of `AuthUser`
//! - [`auth::ProviderUser`]: requires a token from the identity provider

pub mod auth;

pub use auth::{AuthUser, MaybeAuthUser, ProviderUser};
