//! Text and JSON rendering of command results.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::{Recipe, RecipeDetails};

/// One `id  |  name  |  description` row per recipe
pub fn write_recipes(out: &mut impl Write, recipes: &[Recipe]) -> Result<()> {
    for recipe in recipes {
        writeln!(
            out,
            "{}  |  {}  |  {}",
            recipe.id, recipe.name, recipe.description
        )?;
    }
    Ok(())
}

pub fn write_details(out: &mut impl Write, details: &RecipeDetails) -> Result<()> {
    writeln!(out, "Name: {}", details.recipe.name)?;
    writeln!(out, "Description: {}", details.recipe.description)?;
    writeln!(out, "ID: {}", details.recipe.id)?;
    writeln!(out)?;
    write_block(out, "Ingredients", &details.ingredients)?;
    writeln!(out)?;
    write_block(out, "Tags", &details.tags)?;
    writeln!(out)?;
    Ok(())
}

fn write_block(out: &mut impl Write, title: &str, items: &[String]) -> Result<()> {
    writeln!(out, "{}:", title)?;
    for item in items {
        writeln!(out, "\t- {}", item)?;
    }
    Ok(())
}

/// Pretty-printed JSON followed by a newline
pub fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}
