//! Recipe persistence.
//!
//! Handlers talk to a [`RecipeStore`] trait object so the Postgres-backed
//! implementation can be swapped for an in-memory one in tests.

#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use memory::MemoryRecipeStore;
pub use postgres::PgRecipeStore;

use diesel::r2d2::PoolError;
use std::fmt;
use thiserror::Error;

use crate::models::{Recipe, RecipeInput, RecipeSummary};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("recipe not found")]
    NotFound,

    #[error("database connection failed: {0}")]
    Pool(#[from] PoolError),

    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("recipe {id} has a NULL {column}")]
    MalformedRow { id: i64, column: &'static str },

    #[cfg(test)]
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Single-statement recipe operations.
///
/// Every call is one round-trip with no retries. Update and delete do not
/// check affected rows, so targeting a missing id still succeeds.
pub trait RecipeStore: Send + Sync + fmt::Debug {
    /// Insert a new recipe. The generated id is not reported back.
    fn insert_recipe(&self, recipe: &RecipeInput) -> Result<(), StoreError>;

    /// Overwrite title, description, instruction and publish of recipe `id`.
    fn update_recipe(&self, id: i64, recipe: &RecipeInput) -> Result<(), StoreError>;

    /// Fails with [`StoreError::NotFound`] when no row has this id.
    fn get_recipe_by_id(&self, id: i64) -> Result<Recipe, StoreError>;

    fn delete_recipe_by_id(&self, id: i64) -> Result<(), StoreError>;

    /// Page through `id, title` in the store's natural order.
    ///
    /// Rows that cannot be decoded are skipped instead of failing the page.
    fn get_list_recipe(&self, limit: i64, offset: i64) -> Result<Vec<RecipeSummary>, StoreError>;
}
