use axum::{Json, http::StatusCode};
use serde::Serialize;

/// Success envelope: `{"result": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub result: T,
}

pub fn success<T: Serialize>(result: T) -> (StatusCode, Json<ApiResponse<T>>) {
    success_with(StatusCode::OK, result)
}

pub fn success_with<T: Serialize>(
    status: StatusCode,
    result: T,
) -> (StatusCode, Json<ApiResponse<T>>) {
    (status, Json(ApiResponse { result }))
}
