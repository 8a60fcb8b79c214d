use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use std::fmt;

use super::{RecipeStore, StoreError};
use crate::db::DbPool;
use crate::models::{NewRecipe, Recipe, RecipeChanges, RecipeInput, RecipeRow, RecipeSummary};
use crate::schema::recipes;

type PgPooled = PooledConnection<ConnectionManager<PgConnection>>;

/// [`RecipeStore`] backed by the `recipes` table.
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: DbPool,
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PgPooled, StoreError> {
        Ok(self.pool.get()?)
    }
}

impl fmt::Debug for PgRecipeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.pool.state();
        f.debug_struct("PgRecipeStore")
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish()
    }
}

impl RecipeStore for PgRecipeStore {
    fn insert_recipe(&self, recipe: &RecipeInput) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        let _span = tracing::info_span!("db.query", statement = "insert_recipe").entered();

        diesel::insert_into(recipes::table)
            .values(NewRecipe::from(recipe))
            .execute(&mut conn)?;

        Ok(())
    }

    fn update_recipe(&self, id: i64, recipe: &RecipeInput) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        let _span = tracing::info_span!("db.query", statement = "update_recipe", id).entered();

        // Affected row count is ignored: a missing id is not an error.
        diesel::update(recipes::table.find(id))
            .set(RecipeChanges::from(recipe))
            .execute(&mut conn)?;

        Ok(())
    }

    fn get_recipe_by_id(&self, id: i64) -> Result<Recipe, StoreError> {
        let mut conn = self.conn()?;
        let _span = tracing::info_span!("db.query", statement = "get_recipe_by_id", id).entered();

        let row = recipes::table
            .find(id)
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .optional()?
            .ok_or(StoreError::NotFound)?;

        Recipe::try_from(row)
    }

    fn delete_recipe_by_id(&self, id: i64) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        let _span =
            tracing::info_span!("db.query", statement = "delete_recipe_by_id", id).entered();

        diesel::delete(recipes::table.find(id)).execute(&mut conn)?;

        Ok(())
    }

    fn get_list_recipe(&self, limit: i64, offset: i64) -> Result<Vec<RecipeSummary>, StoreError> {
        let mut conn = self.conn()?;
        let _span = tracing::info_span!("db.query", statement = "get_list_recipe", limit, offset)
            .entered();

        // No ORDER BY: rows come back in whatever order Postgres scans them.
        let rows: Vec<(i64, Option<String>)> = recipes::table
            .select((recipes::id, recipes::title))
            .limit(limit)
            .offset(offset)
            .load(&mut conn)?;

        Ok(summaries_from_rows(rows))
    }
}

/// Rows without a title cannot be listed; they are dropped, keeping the order
/// of the rest.
fn summaries_from_rows(rows: Vec<(i64, Option<String>)>) -> Vec<RecipeSummary> {
    rows.into_iter()
        .filter_map(|(id, title)| match title {
            Some(title) => Some(RecipeSummary { id, title }),
            None => {
                tracing::warn!(id, "skipping recipe row with NULL title");
                None
            }
        })
        .collect()
}
