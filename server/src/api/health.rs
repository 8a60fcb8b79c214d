use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

pub const PING_PATH: &str = "/ping";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
}

/// Liveness probe. Does not touch the database.
#[utoipa::path(
    get,
    path = "/ping",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = PingResponse)
    )
)]
pub async fn ping() -> impl IntoResponse {
    Json(PingResponse {
        message: "pong".to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(paths(ping), components(schemas(PingResponse)))]
pub struct ApiDoc;
