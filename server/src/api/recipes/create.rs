use crate::api::error::ApiError;
use crate::api::params::decode_body;
use crate::api::response::{ApiResponse, Envelope};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
};

use super::dto::RecipeDto;

#[utoipa::path(
    post,
    path = "/recipe",
    tag = "recipes",
    request_body = RecipeDto,
    responses(
        (status = 200, description = "Recipe created", body = Envelope),
        (status = 400, description = "Malformed body, empty title or store failure", body = Envelope)
    )
)]
pub async fn insert_recipe(
    State(store): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let request = RecipeDto::from_body(decode_body(body)?);
    request.insert_validate()?;

    store
        .insert_recipe(&request.into_input())
        .map_err(ApiError::store("error insert recipe"))?;

    Ok(ApiResponse::empty(StatusCode::OK, "success insert recipe"))
}
