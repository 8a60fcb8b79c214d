pub mod create;
pub mod delete;
pub mod dto;
pub mod get;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Recipe CRUD routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipe", post(create::insert_recipe))
        .route(
            "/recipe/{id}",
            get(get::get_recipe_by_id)
                .put(update::update_recipe)
                .delete(delete::delete_recipe_by_id),
        )
        .route("/recipe-list", get(list::get_list_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::insert_recipe,
        update::update_recipe,
        get::get_recipe_by_id,
        delete::delete_recipe_by_id,
        list::get_list_recipe,
    ),
    components(schemas(dto::RecipeDto, dto::RecipeView, crate::models::RecipeSummary))
)]
pub struct ApiDoc;
