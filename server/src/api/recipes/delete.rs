use crate::api::error::ApiError;
use crate::api::params::path_id;
use crate::api::response::{ApiResponse, Envelope};
use crate::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
};

/// Hard delete. Deleting an id that does not exist still reports success.
#[utoipa::path(
    delete,
    path = "/recipe/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted", body = Envelope),
        (status = 400, description = "Non-numeric id or store failure", body = Envelope)
    )
)]
pub async fn delete_recipe_by_id(
    State(store): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let id = path_id(id)?;

    store
        .delete_recipe_by_id(id)
        .map_err(ApiError::store("error delete recipe"))?;

    Ok(ApiResponse::empty(StatusCode::OK, "success delete recipe"))
}
