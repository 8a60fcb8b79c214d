use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{Recipe, RecipeInput};

/// Detail dates are rendered day first.
pub const CREATED_AT_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("id must not be empty")]
    EmptyId,
}

/// Request body for create and update.
///
/// Missing or null fields decode to their empty value so that a body without a
/// title is reported by validation rather than as a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct RecipeDto {
    /// Ignored on create; taken from the path on update
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub instruction: String,
    /// Omitted or null leaves the flag unspecified
    pub publish: Option<bool>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl RecipeDto {
    /// Request from a decoded body; a bare `null` body is an empty recipe.
    pub fn from_body(body: Option<RecipeDto>) -> Self {
        body.unwrap_or_default()
    }

    pub fn insert_validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }

    pub fn update_validate(&self) -> Result<(), ValidationError> {
        if self.id == 0 {
            return Err(ValidationError::EmptyId);
        }
        self.insert_validate()
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn into_input(self) -> RecipeInput {
        RecipeInput {
            title: self.title,
            description: self.description,
            instruction: self.instruction,
            publish: self.publish,
        }
    }
}

/// Full recipe as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub instruction: String,
    pub publish: Option<bool>,
    /// Creation date as DD-MM-YYYY
    #[schema(example = "17-08-2024")]
    pub created_at: String,
}

impl From<Recipe> for RecipeView {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            instruction: recipe.instruction,
            publish: recipe.publish,
            created_at: recipe.created_at.format(CREATED_AT_FORMAT).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn dto(id: i64, title: &str) -> RecipeDto {
        RecipeDto {
            id,
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_title_fails_both_validations() {
        assert_eq!(dto(0, "").insert_validate(), Err(ValidationError::EmptyTitle));
        assert_eq!(dto(4, "").update_validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_update_requires_id_before_title() {
        assert_eq!(dto(0, "soto").update_validate(), Err(ValidationError::EmptyId));
        assert_eq!(dto(0, "").update_validate(), Err(ValidationError::EmptyId));
        assert_eq!(dto(1, "soto").update_validate(), Ok(()));
    }

    #[test]
    fn test_insert_ignores_id() {
        assert_eq!(dto(0, "soto").insert_validate(), Ok(()));
    }

    #[test]
    fn test_decode_keeps_publish_tri_state() {
        let unset: RecipeDto = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
        assert_eq!(unset.publish, None);
        let null: RecipeDto = serde_json::from_str(r#"{"title":"t","publish":null}"#).unwrap();
        assert_eq!(null.publish, None);
        let off: RecipeDto = serde_json::from_str(r#"{"title":"t","publish":false}"#).unwrap();
        assert_eq!(off.publish, Some(false));
    }

    #[test]
    fn test_decode_missing_title_is_empty() {
        let empty: RecipeDto = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.title, "");
        assert_eq!(empty.insert_validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_decode_null_fields_are_empty() {
        let dto: RecipeDto = serde_json::from_str(
            r#"{"id":null,"title":"t","description":"d","instruction":null,"publish":true}"#,
        )
        .unwrap();
        assert_eq!(dto.id, 0);
        assert_eq!(dto.instruction, "");
        assert_eq!(dto.insert_validate(), Ok(()));

        let dto: RecipeDto = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert_eq!(dto.insert_validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_null_body_is_empty_recipe() {
        let body: Option<RecipeDto> = serde_json::from_str("null").unwrap();
        let dto = RecipeDto::from_body(body);
        assert_eq!(dto.title, "");
        assert_eq!(dto.insert_validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_view_formats_created_at() {
        let recipe = Recipe {
            id: 1,
            title: "nasi goreng".to_string(),
            description: Some("fried rice".to_string()),
            instruction: "fry".to_string(),
            publish: Some(true),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 23, 15, 0).unwrap(),
        };
        let view = RecipeView::from(recipe);
        assert_eq!(view.created_at, "09-03-2024");
        assert_eq!(view.publish, Some(true));
    }
}
