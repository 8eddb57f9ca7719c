//! menu-helper - a local recipe catalog
//!
//! Keeps recipes, ingredients and tags in a single SQLite database under the
//! user's data directory, and links recipes to the ingredients they use and
//! the tags that describe them.
//!
//! # Modules
//!
//! - `store`: SQLite persistence (schema, lookups, links, filtered listing)
//! - `catalog`: User-level operations built from store calls
//! - `config`: Data directory resolution and on-disk layout
//! - `domain`: Data structures (Recipe, typed ids, RecipeFilter)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Add a recipe interactively
//! menu-helper add
//!
//! # List quick vegetarian recipes that use rice
//! menu-helper list -i rice -t quick,veg
//!
//! # Show one recipe
//! menu-helper info 3
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod store;

// Re-export main types at crate root for convenience
pub use catalog::{Catalog, CatalogError, Removal};
pub use config::{ConfigError, ResolvedConfig};
pub use domain::{
    IngredientId, NewRecipe, Recipe, RecipeDetails, RecipeFilter, RecipeId, TagId,
};
pub use store::{Store, StoreError};
