use axum::http::{HeaderMap, header};

use crate::errors::RequestError;

/// Fails unless the request declares a JSON body.
///
/// Accepts `application/json` and any `+json` suffix type, ignoring parameters
/// such as `charset`.
pub fn ensure_json_content_type(headers: &HeaderMap) -> Result<(), RequestError> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| is_json_mime(&mime.trim().to_ascii_lowercase()))
        .unwrap_or(false);

    if is_json {
        Ok(())
    } else {
        Err(RequestError::BadRequest("Request body is not JSON.".to_string()))
    }
}

fn is_json_mime(mime: &str) -> bool {
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
