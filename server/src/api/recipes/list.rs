use crate::api::error::ApiError;
use crate::api::params::Pagination;
use crate::api::response::{ApiResponse, Envelope};
use crate::models::RecipeSummary;
use crate::AppState;
use axum::extract::{Query, State};

/// First value of a query parameter; repeated keys after it are ignored.
fn first<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[utoipa::path(
    get,
    path = "/recipe-list",
    tag = "recipes",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1; values below 1 use the default)"),
        ("limit" = Option<i64>, Query, description = "Page size (default: 10; values outside 1..=100 use the default)")
    ),
    responses(
        (status = 200, description = "Page of recipes; data is a list of RecipeSummary", body = Envelope),
        (status = 400, description = "Non-numeric page or limit, or store failure", body = Envelope)
    )
)]
pub async fn get_list_recipe(
    State(store): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<ApiResponse<Vec<RecipeSummary>>, ApiError> {
    let pagination = Pagination::from_query(first(&query, "page"), first(&query, "limit"))?;

    let recipes = store
        .get_list_recipe(pagination.limit, pagination.offset())
        .map_err(ApiError::store("error get list recipe"))?;

    Ok(ApiResponse::ok("success get list recipe", recipes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        let query = vec![
            ("limit".to_string(), "5".to_string()),
            ("page".to_string(), "2".to_string()),
            ("page".to_string(), "9".to_string()),
        ];
        assert_eq!(first(&query, "page"), Some("2"));
        assert_eq!(first(&query, "limit"), Some("5"));
        assert_eq!(first(&query, "q"), None);
    }
}
