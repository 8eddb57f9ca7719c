//! Ingredient and tag rows.
//!
//! Both tables hold a single unique `name`. Ingredients are lowercased on the
//! way in and on lookup. Tags keep the case they were first written with but
//! are matched without regard to case. Both fold ASCII letters only.

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::error::StorageContext;
use super::{Result, Store};
use crate::domain::{normalize_ingredient, EntityKind, IngredientId, TagId};

impl Store {
    /// Add an ingredient, or return the id it already has
    pub fn add_ingredient(&self, name: &str) -> Result<IngredientId> {
        if let Some(id) = self.ingredient_id(name)? {
            return Ok(id);
        }

        let conn = self.conn()?;
        let name = normalize_ingredient(name);

        let inserted = conn
            .execute(
                "INSERT INTO ingredients(name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
                params![name],
            )
            .during("insert ingredient", EntityKind::Ingredient)?;

        let id: IngredientId = conn
            .query_row(
                "SELECT id FROM ingredients WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .during("get id of inserted ingredient", EntityKind::Ingredient)?;

        if inserted > 0 {
            info!(ingredient_id = %id, name = %name, "Added ingredient");
        }

        Ok(id)
    }

    /// Find an ingredient by name, in any case
    pub fn ingredient_id(&self, name: &str) -> Result<Option<IngredientId>> {
        self.conn()?
            .query_row(
                "SELECT id FROM ingredients WHERE lower(name) = ?1 ORDER BY id LIMIT 1",
                params![normalize_ingredient(name)],
                |row| row.get(0),
            )
            .optional()
            .during("look up ingredient", EntityKind::Ingredient)
    }

    pub fn ingredient_exists(&self, id: IngredientId) -> Result<bool> {
        self.conn()?
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM ingredients WHERE id = ?1)",
                params![id],
                |row| row.get(0),
            )
            .during("check ingredient", EntityKind::Ingredient)
    }

    /// Add a tag, or return the id of a tag with the same name in any case
    pub fn add_tag(&self, name: &str) -> Result<TagId> {
        if let Some(id) = self.tag_id(name)? {
            return Ok(id);
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO tags(name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            params![name],
        )
        .during("insert tag", EntityKind::Tag)?;

        let id: TagId = conn
            .query_row("SELECT id FROM tags WHERE name = ?1", params![name], |row| {
                row.get(0)
            })
            .during("get id of inserted tag", EntityKind::Tag)?;

        info!(tag_id = %id, name, "Added tag");
        Ok(id)
    }

    /// Find a tag by name, ignoring case. The lowest id wins on ties.
    pub fn tag_id(&self, name: &str) -> Result<Option<TagId>> {
        self.conn()?
            .query_row(
                "SELECT id FROM tags WHERE lower(name) = lower(?1) ORDER BY id LIMIT 1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .during("look up tag", EntityKind::Tag)
    }

    pub fn tag_exists(&self, id: TagId) -> Result<bool> {
        self.conn()?
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM tags WHERE id = ?1)",
                params![id],
                |row| row.get(0),
            )
            .during("check tag", EntityKind::Tag)
    }
}
