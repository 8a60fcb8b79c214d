use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;
use utoipa::ToSchema;

/// Uniform JSON envelope returned by every recipe endpoint.
///
/// `status_code` always equals the HTTP status of the response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, Some(data))
    }

    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<()> {
    /// Envelope with `"data": null`.
    pub fn empty(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        match serde_json::to_vec(&self) {
            Ok(body) => json_response(status, body),
            Err(e) => {
                tracing::error!("Failed to encode response body: {}", e);
                internal_server_error()
            }
        }
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// Fallback when a response cannot be produced normally.
pub fn internal_server_error() -> Response {
    let body = Envelope {
        status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        message: "internal server error".to_string(),
        data: None,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Turns a handler panic into a 500 envelope instead of a dropped connection.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let reason = panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", reason);
    internal_server_error()
}

/// Envelope with untyped `data`. Also the OpenAPI shape of [`ApiResponse`],
/// where `data` depends on the endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope {
    /// Mirrors the HTTP status code
    pub status_code: u16,
    pub message: String,
    /// Endpoint payload, or null
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}
