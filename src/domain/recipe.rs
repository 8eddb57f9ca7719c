//! Recipes and the names attached to them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::RecipeId;

/// A stored recipe row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Row id
    pub id: RecipeId,

    /// Unique, case-sensitive name
    pub name: String,

    /// Free text
    pub description: String,
}

/// A recipe as entered by the user, before anything is stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub tags: Vec<String>,
}

impl NewRecipe {
    /// Create a recipe with no ingredients or tags
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ingredients: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Add ingredients
    pub fn with_ingredients(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ingredients.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add tags
    pub fn with_tags(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(names.into_iter().map(Into::into));
        self
    }
}

/// A recipe together with its ingredient and tag names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDetails {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<String>,
    pub tags: Vec<String>,
}

/// Which table a name or id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Recipe,
    Ingredient,
    Tag,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Recipe => write!(f, "recipe"),
            EntityKind::Ingredient => write!(f, "ingredient"),
            EntityKind::Tag => write!(f, "tag"),
        }
    }
}

/// Conjunctive listing filter.
///
/// A recipe matches only if it is linked to every ingredient and every tag
/// named here. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    ingredients: Vec<String>,
    tags: Vec<String>,
}

impl RecipeFilter {
    /// Filter that matches every recipe
    pub fn new() -> Self {
        Self::default()
    }

    /// Require an ingredient. Repeats (after lowercasing) are dropped.
    pub fn with_ingredient(mut self, name: impl AsRef<str>) -> Self {
        let name = normalize_ingredient(name.as_ref());
        if !self.ingredients.contains(&name) {
            self.ingredients.push(name);
        }
        self
    }

    /// Require several ingredients
    pub fn with_ingredients(self, names: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        names.into_iter().fold(self, |f, n| f.with_ingredient(n))
    }

    /// Require a tag. Repeats differing only in ASCII case are dropped.
    pub fn with_tag(mut self, name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        if !self.tags.iter().any(|t| t.eq_ignore_ascii_case(name)) {
            self.tags.push(name.to_string());
        }
        self
    }

    /// Require several tags
    pub fn with_tags(self, names: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        names.into_iter().fold(self, |f, n| f.with_tag(n))
    }

    /// Required ingredient names, already lowercased
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Required tag names, as given
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// True when the filter matches every recipe
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.tags.is_empty()
    }
}

/// Ingredient names are stored and looked up in lowercase.
///
/// Only ASCII letters are folded, the same rule SQLite's `lower()` applies
/// to tag and recipe lookups.
pub fn normalize_ingredient(name: &str) -> String {
    name.to_ascii_lowercase()
}
