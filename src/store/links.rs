//! Recipe-ingredient and recipe-tag link rows.
//!
//! Linking an existing pair is a no-op. Link rows reference live rows at both
//! ends; linking to a missing recipe, ingredient, or tag fails with a
//! foreign key violation.

use rusqlite::{params, Connection};
use tracing::debug;

use super::error::StorageContext;
use super::{Result, Store};
use crate::domain::{EntityKind, IngredientId, RecipeId, TagId};

impl Store {
    /// Link an ingredient to a recipe. Returns false if they were already linked.
    pub fn link_recipe_ingredient(&self, recipe: RecipeId, ingredient: IngredientId) -> Result<bool> {
        let added = self
            .conn()?
            .execute(
                "INSERT INTO recipe_ingredient(recipe_id, ingredient_id) VALUES (?1, ?2)
                 ON CONFLICT DO NOTHING",
                params![recipe, ingredient],
            )
            .during("link recipe to ingredient", EntityKind::Ingredient)?;

        debug!(recipe_id = %recipe, ingredient_id = %ingredient, added = added > 0, "Linked ingredient");
        Ok(added > 0)
    }

    /// Unlink an ingredient from a recipe. Returns false if they were not linked.
    pub fn unlink_recipe_ingredient(&self, recipe: RecipeId, ingredient: IngredientId) -> Result<bool> {
        let removed = self
            .conn()?
            .execute(
                "DELETE FROM recipe_ingredient WHERE recipe_id = ?1 AND ingredient_id = ?2",
                params![recipe, ingredient],
            )
            .during("unlink recipe from ingredient", EntityKind::Ingredient)?;

        Ok(removed > 0)
    }

    /// Link a tag to a recipe. Returns false if they were already linked.
    pub fn link_recipe_tag(&self, recipe: RecipeId, tag: TagId) -> Result<bool> {
        let added = self
            .conn()?
            .execute(
                "INSERT INTO recipe_tag(recipe_id, tag_id) VALUES (?1, ?2)
                 ON CONFLICT DO NOTHING",
                params![recipe, tag],
            )
            .during("link recipe to tag", EntityKind::Tag)?;

        debug!(recipe_id = %recipe, tag_id = %tag, added = added > 0, "Linked tag");
        Ok(added > 0)
    }

    /// Unlink a tag from a recipe. Returns false if they were not linked.
    pub fn unlink_recipe_tag(&self, recipe: RecipeId, tag: TagId) -> Result<bool> {
        let removed = self
            .conn()?
            .execute(
                "DELETE FROM recipe_tag WHERE recipe_id = ?1 AND tag_id = ?2",
                params![recipe, tag],
            )
            .during("unlink recipe from tag", EntityKind::Tag)?;

        Ok(removed > 0)
    }

    /// Ingredient names of a recipe, in the order they were linked
    pub fn recipe_ingredients(&self, recipe: RecipeId) -> Result<Vec<String>> {
        linked_names(
            self.conn()?,
            "SELECT i.name FROM recipe_ingredient ri
             JOIN ingredients i ON i.id = ri.ingredient_id
             WHERE ri.recipe_id = ?1
             ORDER BY ri.rowid",
            recipe,
        )
        .during("select ingredients of recipe", EntityKind::Ingredient)
    }

    /// Tag names of a recipe, in the order they were linked
    pub fn recipe_tags(&self, recipe: RecipeId) -> Result<Vec<String>> {
        linked_names(
            self.conn()?,
            "SELECT t.name FROM recipe_tag rt
             JOIN tags t ON t.id = rt.tag_id
             WHERE rt.recipe_id = ?1
             ORDER BY rt.rowid",
            recipe,
        )
        .during("select tags of recipe", EntityKind::Tag)
    }
}

fn linked_names(conn: &Connection, sql: &str, recipe: RecipeId) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let names = stmt
        .query_map(params![recipe], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}
