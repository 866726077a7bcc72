//! Axum extractors that turn requests into argument sources.
//!
//! - [`JsonArgs`]: a JSON body, rejected with 400 unless the request declares
//!   and contains JSON
//! - [`QueryParams`]: the decoded query string as a multi-value [`QueryArgs`]
//! - [`FormArgs`]: a urlencoded form body, also as a [`QueryArgs`]
//!
//! Each hands their payload to an [`ArgSpec`] for field extraction.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, RawForm, Request},
    http::request::Parts,
};
use serde_json::Value;
use tracing::debug;

use fitrec_core::{AppError, ArgSpec, Args, QueryArgs, ensure_json_content_type};

#[derive(Debug, Clone)]
pub struct JsonArgs(pub Value);

impl JsonArgs {
    pub fn extract(&self, spec: &ArgSpec) -> Result<Args, AppError> {
        Ok(spec.extract(&self.0)?)
    }
}

impl<S> FromRequest<S> for JsonArgs
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        ensure_json_content_type(req.headers())?;

        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "Rejected request body");
                AppError::bad_request(anyhow!("Request body is not JSON."))
            })?;

        Ok(JsonArgs(value))
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryParams(pub QueryArgs);

impl QueryParams {
    pub fn extract(&self, spec: &ArgSpec) -> Result<Args, AppError> {
        Ok(spec.extract(&self.0)?)
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(QueryParams(QueryArgs::from_uri(&parts.uri)))
    }
}

/// A `application/x-www-form-urlencoded` body. `GET` and `HEAD` requests read
/// the query string instead.
#[derive(Debug, Clone, Default)]
pub struct FormArgs(pub QueryArgs);

impl FormArgs {
    pub fn extract(&self, spec: &ArgSpec) -> Result<Args, AppError> {
        Ok(spec.extract(&self.0)?)
    }
}

impl<S> FromRequest<S> for FormArgs
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let RawForm(body) = RawForm::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "Rejected form body");
                AppError::bad_request(anyhow!("Request body is not a form."))
            })?;

        Ok(FormArgs(QueryArgs::from_form_bytes(&body)))
    }
}
