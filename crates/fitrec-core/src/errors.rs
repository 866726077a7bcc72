use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Failures of argument extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("One of the following is required: required, defaultable, optional or constant.")]
    NoDescriptors,

    #[error("Missing following arguments: {}", .0.join(" "))]
    MissingFields(Vec<String>),

    #[error("Unsupported source type: {0}")]
    UnsupportedSource(String),
}

/// Failures caused by the shape of an incoming request.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

/// Failures of record lookups performed on behalf of a request.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{0}")]
    NoRecords(String),

    #[error("{0}")]
    TooManyRecords(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn into_error(self) -> Error {
        self.error
    }

    /// The message sent to the client. Server errors never leak their cause.
    pub fn client_message(&self) -> String {
        if self.status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        }
    }
}

/// Picks the response status for errors raised below the HTTP layer.
fn classify(error: &Error) -> StatusCode {
    if let Some(e) = error.downcast_ref::<ExtractError>() {
        return match e {
            ExtractError::MissingFields(_) => StatusCode::BAD_REQUEST,
            ExtractError::NoDescriptors | ExtractError::UnsupportedSource(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
    }
    if let Some(e) = error.downcast_ref::<RequestError>() {
        return match e {
            RequestError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RequestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
    }
    if let Some(RecordError::NoRecords(_)) = error.downcast_ref::<RecordError>() {
        return StatusCode::BAD_REQUEST;
    }
    StatusCode::INTERNAL_SERVER_ERROR
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let body = Json(json!({
            "http_status_code": self.status.as_u16(),
            "error": self.client_message(),
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        let error = err.into();
        AppError {
            status: classify(&error),
            error,
        }
    }
}

/// Shorthand for a 400 carrying `message`.
pub fn bad_request(message: impl Into<String>) -> AppError {
    let message = message.into();
    AppError::bad_request(anyhow!(message))
}
