use crate::api::error::ApiError;
use crate::api::params::{decode_body, path_id};
use crate::api::response::{ApiResponse, Envelope};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
};

use super::dto::RecipeDto;

/// Full overwrite of the writable fields. Updating an id that does not exist
/// still reports success.
#[utoipa::path(
    put,
    path = "/recipe/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    request_body = RecipeDto,
    responses(
        (status = 200, description = "Recipe updated", body = Envelope),
        (status = 400, description = "Malformed body, non-numeric or zero id, empty title or store failure", body = Envelope)
    )
)]
pub async fn update_recipe(
    State(store): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let request = RecipeDto::from_body(decode_body(body)?);
    let request = request.with_id(path_id(id)?);
    request.update_validate()?;

    let id = request.id;
    store
        .update_recipe(id, &request.into_input())
        .map_err(ApiError::store("error update recipe"))?;

    Ok(ApiResponse::empty(StatusCode::OK, "success update recipe"))
}
