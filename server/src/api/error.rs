use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::recipes::dto::ValidationError;
use super::response::ApiResponse;
use crate::store::StoreError;

/// Every failure a recipe handler can report.
///
/// All of them are client errors: the status is always 400 and the message is
/// the fixed text shown to the client. A store failure's cause is logged, not sent.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("error decoding request payload")]
    Decode(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} must be numeric")]
    NotNumeric(&'static str),

    #[error("recipe not found")]
    NotFound,

    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Wrap a store failure under the client-facing message for the operation.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Store { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store { message, source } => {
                tracing::error!("{}: {}", message, source);
            }
            ApiError::Decode(reason) => {
                tracing::debug!("Rejected request payload: {}", reason);
            }
            _ => {}
        }

        ApiResponse::empty(StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}
