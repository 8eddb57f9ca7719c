//! Filtered recipe listing.
//!
//! Every filter term becomes its own `id IN (SELECT recipe_id ...)`
//! sub-condition and the sub-conditions are joined with `AND`, so a recipe
//! is listed only when it is linked to all requested ingredients and tags.

use rusqlite::params_from_iter;
use tracing::debug;

use super::error::{StorageContext, StoreError};
use super::recipes::recipe_from_row;
use super::{Result, Store};
use crate::domain::{EntityKind, IngredientId, Recipe, RecipeFilter, TagId};

/// One resolved filter term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Condition {
    Ingredient(IngredientId),
    Tag(TagId),
}

impl Condition {
    fn clause(&self, param: usize) -> String {
        match self {
            Condition::Ingredient(_) => format!(
                "id IN (SELECT recipe_id FROM recipe_ingredient WHERE ingredient_id = ?{})",
                param
            ),
            Condition::Tag(_) => format!(
                "id IN (SELECT recipe_id FROM recipe_tag WHERE tag_id = ?{})",
                param
            ),
        }
    }

    fn param(&self) -> i64 {
        match self {
            Condition::Ingredient(id) => id.get(),
            Condition::Tag(id) => id.get(),
        }
    }
}

/// Conjunction of resolved conditions
#[derive(Debug, Default)]
struct RecipeQuery {
    conditions: Vec<Condition>,
}

impl RecipeQuery {
    fn push(&mut self, condition: Condition) {
        if !self.conditions.contains(&condition) {
            self.conditions.push(condition);
        }
    }

    fn sql(&self) -> String {
        let mut sql = String::from("SELECT id, name, description FROM recipes");

        if !self.conditions.is_empty() {
            let clauses: Vec<String> = self
                .conditions
                .iter()
                .enumerate()
                .map(|(i, c)| c.clause(i + 1))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        sql.push_str(" ORDER BY id");
        sql
    }

    fn params(&self) -> Vec<i64> {
        self.conditions.iter().map(Condition::param).collect()
    }
}

impl Store {
    /// List recipes linked to every ingredient and every tag in `filter`.
    ///
    /// Each name must exist: an unknown name fails the whole call with
    /// `FilterTermNotFound` instead of producing an empty list. An empty
    /// filter lists every recipe. Results are ordered by id.
    pub fn list_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>> {
        let conn = self.conn()?;
        let mut query = RecipeQuery::default();

        for name in filter.ingredients() {
            let id = self
                .ingredient_id(name)?
                .ok_or_else(|| StoreError::FilterTermNotFound {
                    kind: EntityKind::Ingredient,
                    name: name.clone(),
                })?;
            query.push(Condition::Ingredient(id));
        }

        for name in filter.tags() {
            let id = self.tag_id(name)?.ok_or_else(|| StoreError::FilterTermNotFound {
                kind: EntityKind::Tag,
                name: name.clone(),
            })?;
            query.push(Condition::Tag(id));
        }

        let sql = query.sql();
        debug!(%sql, "Listing recipes");

        let mut stmt = conn.prepare(&sql).during("prepare recipe listing", EntityKind::Recipe)?;
        let recipes = stmt
            .query_map(params_from_iter(query.params()), recipe_from_row)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<Recipe>>>())
            .during("select recipes", EntityKind::Recipe)?;

        Ok(recipes)
    }
}
