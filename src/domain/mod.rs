//! Domain types for the recipe catalog.
//!
//! This module contains the core data structures:
//! - Ids: Typed row identifiers for each table
//! - Recipe: Stored recipes, user input, and listing filters

pub mod ids;
pub mod recipe;

// Re-export commonly used types
pub use ids::{IngredientId, RecipeId, TagId};
pub use recipe::{
    normalize_ingredient, EntityKind, NewRecipe, Recipe, RecipeDetails, RecipeFilter,
};
