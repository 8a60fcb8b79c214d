//! In-memory recipe store for tests.

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use super::{RecipeStore, StoreError};
use crate::models::{Recipe, RecipeInput, RecipeSummary};

/// Behaves like the `recipes` table: ids are assigned on insert, starting at 1,
/// and listing follows insertion order.
#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    rows: RwLock<BTreeMap<i64, Recipe>>,
    last_id: RwLock<i64>,
    failing: AtomicBool,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails, for exercising error responses.
    pub fn failing() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Id handed out by the most recent insert, or 0 if nothing was inserted.
    pub fn last_id(&self) -> i64 {
        *self.last_id.read().unwrap()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

impl RecipeStore for MemoryRecipeStore {
    fn insert_recipe(&self, recipe: &RecipeInput) -> Result<(), StoreError> {
        self.check()?;
        let mut last_id = self.last_id.write().unwrap();
        *last_id += 1;
        self.rows.write().unwrap().insert(
            *last_id,
            Recipe {
                id: *last_id,
                title: recipe.title.clone(),
                description: recipe.description.clone(),
                instruction: recipe.instruction.clone(),
                publish: recipe.publish,
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn update_recipe(&self, id: i64, recipe: &RecipeInput) -> Result<(), StoreError> {
        self.check()?;
        if let Some(row) = self.rows.write().unwrap().get_mut(&id) {
            row.title = recipe.title.clone();
            row.description = recipe.description.clone();
            row.instruction = recipe.instruction.clone();
            row.publish = recipe.publish;
        }
        Ok(())
    }

    fn get_recipe_by_id(&self, id: i64) -> Result<Recipe, StoreError> {
        self.check()?;
        self.rows
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn delete_recipe_by_id(&self, id: i64) -> Result<(), StoreError> {
        self.check()?;
        self.rows.write().unwrap().remove(&id);
        Ok(())
    }

    fn get_list_recipe(&self, limit: i64, offset: i64) -> Result<Vec<RecipeSummary>, StoreError> {
        self.check()?;
        let skip = usize::try_from(offset).unwrap_or(0);
        let take = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .rows
            .read()
            .unwrap()
            .values()
            .skip(skip)
            .take(take)
            .map(|r| RecipeSummary {
                id: r.id,
                title: r.title.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> RecipeInput {
        RecipeInput {
            title: title.to_string(),
            description: Some(format!("desc {title}")),
            instruction: format!("instruction {title}"),
            publish: Some(true),
        }
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let store = MemoryRecipeStore::new();
        assert_eq!(store.last_id(), 0);
        store.insert_recipe(&input("a")).unwrap();
        store.insert_recipe(&input("b")).unwrap();
        assert_eq!(store.last_id(), 2);
        assert_eq!(store.get_recipe_by_id(2).unwrap().title, "b");
    }

    #[test]
    fn test_list_pages_in_insertion_order() {
        let store = MemoryRecipeStore::new();
        for title in ["a", "b", "c", "d", "e"] {
            store.insert_recipe(&input(title)).unwrap();
        }
        let page: Vec<String> = store
            .get_list_recipe(2, 2)
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(page, vec!["c", "d"]);
    }

    #[test]
    fn test_update_keeps_identity_and_created_at() {
        let store = MemoryRecipeStore::new();
        store.insert_recipe(&input("a")).unwrap();
        let before = store.get_recipe_by_id(1).unwrap();

        let mut changes = input("renamed");
        changes.publish = None;
        store.update_recipe(1, &changes).unwrap();

        let after = store.get_recipe_by_id(1).unwrap();
        assert_eq!(after.id, 1);
        assert_eq!(after.title, "renamed");
        assert_eq!(after.publish, None);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_failing_store_fails_everything() {
        let store = MemoryRecipeStore::failing();
        assert!(store.insert_recipe(&input("a")).is_err());
        assert!(store.get_list_recipe(10, 0).is_err());
        assert!(matches!(
            store.get_recipe_by_id(1),
            Err(StoreError::Unavailable(_))
        ));
    }
}
