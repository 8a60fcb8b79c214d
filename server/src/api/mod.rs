pub mod error;
pub mod health;
pub mod params;
pub mod recipes;
pub mod response;

use crate::AppState;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use response::Envelope;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Build the application router around the given store.
pub fn router(store: AppState) -> Router {
    Router::new()
        .route(health::PING_PATH, get(health::ping))
        .route(OPENAPI_PATH, get(|| async { Json(openapi()) }))
        .merge(recipes::router())
        .with_state(store)
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Recipe API", description = "CRUD over recipes"),
        components(schemas(Envelope))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> =
        vec![health::ApiDoc::openapi(), recipes::ApiDoc::openapi()];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
