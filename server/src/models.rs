use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::StoreError;

/// A persisted recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub instruction: String,
    /// `None` means the author never chose, which is distinct from `Some(false)`.
    pub publish: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// Raw `recipes` row.
///
/// The text columns are nullable in the table, so they are loaded loosely and
/// checked when converting into a [`Recipe`].
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub publish: Option<bool>,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = StoreError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let title = row.title.ok_or(StoreError::MalformedRow {
            id: row.id,
            column: "title",
        })?;
        let instruction = row.instruction.ok_or(StoreError::MalformedRow {
            id: row.id,
            column: "instruction",
        })?;

        Ok(Recipe {
            id: row.id,
            title,
            description: row.description,
            instruction,
            publish: row.publish,
            created_at: row.created_at,
        })
    }
}

/// The columns a client may write. Identity and creation time are owned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeInput {
    pub title: String,
    pub description: Option<String>,
    pub instruction: String,
    pub publish: Option<bool>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub instruction: &'a str,
    pub publish: Option<bool>,
}

impl<'a> From<&'a RecipeInput> for NewRecipe<'a> {
    fn from(input: &'a RecipeInput) -> Self {
        NewRecipe {
            title: &input.title,
            description: input.description.as_deref(),
            instruction: &input.instruction,
            publish: input.publish,
        }
    }
}

/// Full-row overwrite: `None` clears the column instead of leaving it untouched.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(treat_none_as_null = true)]
pub struct RecipeChanges<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub instruction: &'a str,
    pub publish: Option<bool>,
}

impl<'a> From<&'a RecipeInput> for RecipeChanges<'a> {
    fn from(input: &'a RecipeInput) -> Self {
        RecipeChanges {
            title: &input.title,
            description: input.description.as_deref(),
            instruction: &input.instruction,
            publish: input.publish,
        }
    }
}

/// List projection: only identity and title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
}
