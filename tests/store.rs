//! Store Integration Tests
//!
//! Tests for the on-disk store: layout, reopening, locking, and the
//! ingredient/tag/link behavior seen through a real database file.

use menu_helper::config::ResolvedConfig;
use menu_helper::domain::{EntityKind, IngredientId, RecipeFilter, RecipeId};
use menu_helper::store::{Store, StoreError, SCHEMA_VERSION};
use tempfile::TempDir;

fn open(dir: &TempDir) -> Store {
    Store::open(&ResolvedConfig::with_data_home(dir.path())).unwrap()
}

#[test]
fn test_open_creates_layout() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);

    let db_path = dir.path().join("menu-helper").join("recipes.db");
    assert!(db_path.exists());
    assert_eq!(store.path(), Some(db_path.as_path()));
    assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);

    store.close();
    assert!(!store.is_open());
}

#[test]
fn test_end_to_end_lifecycle() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);

    let soup = store.add_recipe("Soup", "").unwrap();
    let carrot = store.add_ingredient("carrot").unwrap();
    assert_eq!(soup, RecipeId::new(1));
    assert_eq!(carrot, IngredientId::new(1));

    store.link_recipe_ingredient(soup, carrot).unwrap();
    assert_eq!(store.recipe_ingredients(soup).unwrap(), ["carrot"]);

    assert_eq!(store.delete_recipes(&[soup]).unwrap(), 1);
    assert!(!store.recipe_exists(soup).unwrap());
    assert!(store.ingredient_exists(carrot).unwrap());
    assert!(store.recipe_ingredients(soup).unwrap().is_empty());

    store.close();
}

#[test]
fn test_reopen_keeps_data() {
    let dir = TempDir::new().unwrap();

    let mut store = open(&dir);
    let soup = store.add_recipe("Soup", "warm").unwrap();
    let quick = store.add_tag("Quick").unwrap();
    store.link_recipe_tag(soup, quick).unwrap();
    store.close();

    let mut store = open(&dir);
    assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
    assert_eq!(store.recipe(soup).unwrap().description, "warm");
    assert_eq!(store.recipe_tags(soup).unwrap(), ["Quick"]);
    assert_eq!(store.tag_id("quick").unwrap(), Some(quick));
    store.close();
}

#[test]
fn test_closed_store_is_not_open() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.close();
    store.close();

    assert!(matches!(store.add_recipe("Soup", ""), Err(StoreError::NotOpen)));
    assert!(matches!(store.ingredient_id("salt"), Err(StoreError::NotOpen)));
    assert!(matches!(
        store.list_recipes(&RecipeFilter::new()),
        Err(StoreError::NotOpen)
    ));
}

#[test]
fn test_lock_is_released_on_close() {
    let dir = TempDir::new().unwrap();

    let mut first = open(&dir);
    first.add_recipe("Soup", "").unwrap();
    first.close();

    // Would block forever if the first handle still held the lock
    let mut second = open(&dir);
    assert!(second.recipe_id("soup").unwrap().is_some());
    second.close();
}

#[test]
fn test_filtered_listing_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);

    let a = store.add_recipe("A", "").unwrap();
    let b = store.add_recipe("B", "").unwrap();
    let quick = store.add_tag("quick").unwrap();
    let veg = store.add_tag("veg").unwrap();
    store.link_recipe_tag(a, quick).unwrap();
    store.link_recipe_tag(a, veg).unwrap();
    store.link_recipe_tag(b, quick).unwrap();

    let both = store
        .list_recipes(&RecipeFilter::new().with_tags(["quick", "veg"]))
        .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].id, a);

    let all = store.list_recipes(&RecipeFilter::new()).unwrap();
    assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), [a, b]);

    let err = store
        .list_recipes(&RecipeFilter::new().with_ingredient("doesnotexist"))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::FilterTermNotFound {
            kind: EntityKind::Ingredient,
            ..
        }
    ));

    store.close();
}

#[test]
fn test_missing_recipe_is_not_found() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);

    let err = store.recipe(RecipeId::new(7)).unwrap_err();
    assert!(err.is_not_found());
    assert!(store.rename_recipe(RecipeId::new(7), "x").unwrap_err().is_not_found());

    store.close();
}
