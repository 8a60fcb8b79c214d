use crate::api::error::ApiError;
use crate::api::params::path_id;
use crate::api::response::{ApiResponse, Envelope};
use crate::store::StoreError;
use crate::AppState;
use axum::extract::{rejection::PathRejection, Path, State};

use super::dto::RecipeView;

#[utoipa::path(
    get,
    path = "/recipe/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details; data is a RecipeView", body = Envelope),
        (status = 400, description = "Non-numeric id, recipe not found or store failure", body = Envelope)
    )
)]
pub async fn get_recipe_by_id(
    State(store): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<RecipeView>, ApiError> {
    let id = path_id(id)?;

    let recipe = store.get_recipe_by_id(id).map_err(|e| match e {
        StoreError::NotFound => ApiError::NotFound,
        e => ApiError::store("error getting recipe")(e),
    })?;

    Ok(ApiResponse::ok(
        "success get detail recipe",
        RecipeView::from(recipe),
    ))
}
