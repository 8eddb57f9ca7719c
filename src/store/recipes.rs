//! Recipe rows.

use std::collections::BTreeSet;

use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use tracing::{debug, info};

use super::error::{StorageContext, StoreError};
use super::{Result, Store};
use crate::domain::{EntityKind, Recipe, RecipeId};

const ENTITY: EntityKind = EntityKind::Recipe;

impl Store {
    /// Add a recipe, or return the id of the recipe already using `name`.
    ///
    /// Names are unique and case-sensitive here; an existing row keeps its
    /// description.
    pub fn add_recipe(&self, name: &str, description: &str) -> Result<RecipeId> {
        let conn = self.conn()?;

        let inserted = conn
            .execute(
                "INSERT INTO recipes(name, description) VALUES (?1, ?2)
                 ON CONFLICT(name) DO NOTHING",
                params![name, description],
            )
            .during("insert recipe", ENTITY)?;

        let id: RecipeId = conn
            .query_row(
                "SELECT id FROM recipes WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .during("get id of inserted recipe", ENTITY)?;

        if inserted > 0 {
            info!(recipe_id = %id, name, "Added recipe");
        } else {
            debug!(recipe_id = %id, name, "Recipe already exists");
        }

        Ok(id)
    }

    /// Find a recipe by name, ignoring case. The lowest id wins on ties.
    pub fn recipe_id(&self, name: &str) -> Result<Option<RecipeId>> {
        self.conn()?
            .query_row(
                "SELECT id FROM recipes WHERE lower(name) = lower(?1) ORDER BY id LIMIT 1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .during("look up recipe", ENTITY)
    }

    pub fn recipe_exists(&self, id: RecipeId) -> Result<bool> {
        self.conn()?
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM recipes WHERE id = ?1)",
                params![id],
                |row| row.get(0),
            )
            .during("check recipe", ENTITY)
    }

    /// Fetch one recipe. Fails with `NotFound` if there is no such id.
    pub fn recipe(&self, id: RecipeId) -> Result<Recipe> {
        self.conn()?
            .query_row(
                "SELECT id, name, description FROM recipes WHERE id = ?1",
                params![id],
                recipe_from_row,
            )
            .optional()
            .during("select recipe", ENTITY)?
            .ok_or_else(|| StoreError::not_found(ENTITY, format!("ID {}", id)))
    }

    /// Delete every listed recipe in one statement, returning how many rows went.
    ///
    /// Links cascade. An empty list deletes nothing and issues no SQL.
    pub fn delete_recipes(&self, ids: &[RecipeId]) -> Result<usize> {
        let conn = self.conn()?;

        let ids: BTreeSet<RecipeId> = ids.iter().copied().collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("DELETE FROM recipes WHERE id IN ({})", placeholders);

        let deleted = conn
            .execute(&sql, params_from_iter(ids.iter()))
            .during("delete recipes", ENTITY)?;

        info!(requested = ids.len(), deleted, "Deleted recipes");
        Ok(deleted)
    }

    /// Change a recipe's name
    pub fn rename_recipe(&self, id: RecipeId, name: &str) -> Result<()> {
        let changed = self
            .conn()?
            .execute(
                "UPDATE recipes SET name = ?2 WHERE id = ?1",
                params![id, name],
            )
            .during("rename recipe", ENTITY)?;

        if changed == 0 {
            return Err(StoreError::not_found(ENTITY, format!("ID {}", id)));
        }

        info!(recipe_id = %id, name, "Renamed recipe");
        Ok(())
    }

    /// Replace a recipe's description
    pub fn set_recipe_description(&self, id: RecipeId, description: &str) -> Result<()> {
        let changed = self
            .conn()?
            .execute(
                "UPDATE recipes SET description = ?2 WHERE id = ?1",
                params![id, description],
            )
            .during("update recipe description", ENTITY)?;

        if changed == 0 {
            return Err(StoreError::not_found(ENTITY, format!("ID {}", id)));
        }

        debug!(recipe_id = %id, "Updated recipe description");
        Ok(())
    }
}

pub(super) fn recipe_from_row(row: &Row<'_>) -> rusqlite::Result<Recipe> {
    Ok(Recipe {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_recipe_is_insert_or_ignore() {
        let store = Store::open_in_memory().unwrap();

        let first = store.add_recipe("Soup", "warm").unwrap();
        let second = store.add_recipe("Soup", "cold").unwrap();

        assert_eq!(first, second);
        assert_eq!(store.recipe(first).unwrap().description, "warm");
    }

    #[test]
    fn test_recipe_lookup_ignores_case() {
        let store = Store::open_in_memory().unwrap();
        let id = store.add_recipe("Tomato Soup", "").unwrap();

        assert_eq!(store.recipe_id("tomato soup").unwrap(), Some(id));
        assert_eq!(store.recipe_id("TOMATO SOUP").unwrap(), Some(id));
        assert_eq!(store.recipe_id("Bread").unwrap(), None);
    }

    #[test]
    fn test_missing_recipe_is_not_found() {
        let store = Store::open_in_memory().unwrap();

        let err = store.recipe(RecipeId::new(12)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound {
                entity: EntityKind::Recipe,
                ..
            }
        ));
        assert!(!store.recipe_exists(RecipeId::new(12)).unwrap());
    }

    #[test]
    fn test_delete_recipes_in_batch() {
        let store = Store::open_in_memory().unwrap();
        let a = store.add_recipe("A", "").unwrap();
        let b = store.add_recipe("B", "").unwrap();
        let c = store.add_recipe("C", "").unwrap();

        let deleted = store.delete_recipes(&[a, c, a]).unwrap();

        assert_eq!(deleted, 2);
        assert!(!store.recipe_exists(a).unwrap());
        assert!(store.recipe_exists(b).unwrap());
        assert!(!store.recipe_exists(c).unwrap());
    }

    #[test]
    fn test_delete_nothing() {
        let store = Store::open_in_memory().unwrap();
        store.add_recipe("A", "").unwrap();

        assert_eq!(store.delete_recipes(&[]).unwrap(), 0);
    }

    #[test]
    fn test_rename_and_describe() {
        let store = Store::open_in_memory().unwrap();
        let id = store.add_recipe("Stew", "").unwrap();

        store.rename_recipe(id, "Beef Stew").unwrap();
        store.set_recipe_description(id, "slow cooked").unwrap();

        let recipe = store.recipe(id).unwrap();
        assert_eq!(recipe.name, "Beef Stew");
        assert_eq!(recipe.description, "slow cooked");
    }

    #[test]
    fn test_rename_onto_existing_name_fails() {
        let store = Store::open_in_memory().unwrap();
        store.add_recipe("Stew", "").unwrap();
        let other = store.add_recipe("Chili", "").unwrap();

        let err = store.rename_recipe(other, "Stew").unwrap_err();
        assert!(matches!(err, StoreError::Storage { .. }));
    }

    #[test]
    fn test_rename_missing_recipe() {
        let store = Store::open_in_memory().unwrap();
        let err = store.rename_recipe(RecipeId::new(5), "x").unwrap_err();
        assert!(err.is_not_found());
    }
}
