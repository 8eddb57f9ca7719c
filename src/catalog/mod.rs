//! User-level catalog operations.
//!
//! Each method maps one user intent onto a sequence of [`Store`] calls.
//! Names are resolved with "get the id, or create it" semantics, and the
//! target recipe is checked before anything is changed. Steps are not
//! wrapped in a transaction: a failure part way leaves the earlier steps
//! committed.

pub mod input;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{NewRecipe, Recipe, RecipeDetails, RecipeFilter, RecipeId};
use crate::store::{Store, StoreError};

pub use input::split_list;

/// Errors that can occur with catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("No recipe exists with ID {0}.")]
    RecipeNotFound(RecipeId),

    #[error("Recipe name cannot be empty")]
    EmptyName,

    #[error("No recipe IDs given")]
    NoRecipeIds,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

/// Result of removing names from a recipe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Removal {
    /// Names that were linked and are now unlinked
    pub removed: Vec<String>,

    /// Names that exist but were not linked to the recipe
    pub not_linked: Vec<String>,

    /// Names with no matching ingredient or tag
    pub skipped: Vec<String>,
}

/// Catalog operations over an open store
pub struct Catalog<'a> {
    store: &'a Store,
}

impl<'a> Catalog<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Add a recipe with its ingredients and tags.
    ///
    /// An existing recipe with the same name (in any case) is reused and
    /// gains the given ingredients and tags.
    pub fn add_recipe(&self, recipe: &NewRecipe) -> Result<RecipeId> {
        let name = recipe.name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let id = match self.store.recipe_id(name)? {
            Some(id) => id,
            None => self.store.add_recipe(name, recipe.description.trim())?,
        };

        self.link_ingredients(id, &recipe.ingredients)?;
        self.link_tags(id, &recipe.tags)?;

        Ok(id)
    }

    /// List recipes matching every term in `filter`
    pub fn list(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>> {
        Ok(self.store.list_recipes(filter)?)
    }

    /// Delete recipes by id.
    ///
    /// Every id is checked first; if any is missing nothing is deleted.
    pub fn delete(&self, ids: &[RecipeId]) -> Result<usize> {
        if ids.is_empty() {
            return Err(CatalogError::NoRecipeIds);
        }

        for &id in ids {
            self.require_recipe(id)?;
        }

        Ok(self.store.delete_recipes(ids)?)
    }

    /// A recipe with its ingredient and tag names
    pub fn info(&self, id: RecipeId) -> Result<RecipeDetails> {
        self.require_recipe(id)?;

        Ok(RecipeDetails {
            recipe: self.store.recipe(id)?,
            ingredients: self.store.recipe_ingredients(id)?,
            tags: self.store.recipe_tags(id)?,
        })
    }

    /// Change a recipe's name
    pub fn rename(&self, id: RecipeId, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        self.require_recipe(id)?;
        Ok(self.store.rename_recipe(id, name)?)
    }

    /// Replace a recipe's description
    pub fn describe(&self, id: RecipeId, description: &str) -> Result<()> {
        self.require_recipe(id)?;
        Ok(self.store.set_recipe_description(id, description.trim())?)
    }

    /// Link ingredients to an existing recipe, creating unknown ones
    pub fn add_ingredients(&self, id: RecipeId, names: &[String]) -> Result<()> {
        self.require_recipe(id)?;
        self.link_ingredients(id, names)
    }

    /// Unlink ingredients from an existing recipe. Unknown names are skipped.
    pub fn remove_ingredients(&self, id: RecipeId, names: &[String]) -> Result<Removal> {
        self.require_recipe(id)?;

        let mut removal = Removal::default();
        for name in names {
            match self.store.ingredient_id(name)? {
                Some(ingredient) => {
                    if self.store.unlink_recipe_ingredient(id, ingredient)? {
                        removal.removed.push(name.clone());
                    } else {
                        removal.not_linked.push(name.clone());
                    }
                }
                None => {
                    debug!(recipe_id = %id, ingredient = %name, "Ingredient not found, skipping");
                    removal.skipped.push(name.clone());
                }
            }
        }

        Ok(removal)
    }

    /// Link tags to an existing recipe, creating unknown ones
    pub fn add_tags(&self, id: RecipeId, names: &[String]) -> Result<()> {
        self.require_recipe(id)?;
        self.link_tags(id, names)
    }

    /// Unlink tags from an existing recipe. Unknown names are skipped.
    pub fn remove_tags(&self, id: RecipeId, names: &[String]) -> Result<Removal> {
        self.require_recipe(id)?;

        let mut removal = Removal::default();
        for name in names {
            match self.store.tag_id(name)? {
                Some(tag) => {
                    if self.store.unlink_recipe_tag(id, tag)? {
                        removal.removed.push(name.clone());
                    } else {
                        removal.not_linked.push(name.clone());
                    }
                }
                None => {
                    debug!(recipe_id = %id, tag = %name, "Tag not found, skipping");
                    removal.skipped.push(name.clone());
                }
            }
        }

        Ok(removal)
    }

    fn require_recipe(&self, id: RecipeId) -> Result<()> {
        if self.store.recipe_exists(id)? {
            Ok(())
        } else {
            Err(CatalogError::RecipeNotFound(id))
        }
    }

    fn link_ingredients(&self, id: RecipeId, names: &[String]) -> Result<()> {
        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            let ingredient = match self.store.ingredient_id(name)? {
                Some(existing) => existing,
                None => self.store.add_ingredient(name)?,
            };
            self.store.link_recipe_ingredient(id, ingredient)?;
        }

        info!(recipe_id = %id, count = names.len(), "Linked ingredients");
        Ok(())
    }

    fn link_tags(&self, id: RecipeId, names: &[String]) -> Result<()> {
        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            let tag = match self.store.tag_id(name)? {
                Some(existing) => existing,
                None => self.store.add_tag(name)?,
            };
            self.store.link_recipe_tag(id, tag)?;
        }

        info!(recipe_id = %id, count = names.len(), "Linked tags");
        Ok(())
    }
}
