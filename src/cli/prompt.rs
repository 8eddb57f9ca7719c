//! Line prompts for the interactive commands.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::catalog::split_list;
use crate::domain::NewRecipe;

/// Reads one answer per prompt from `input`, echoing prompts to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one line. End of input gives an empty answer.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;

        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    /// Ask for a comma separated list
    pub fn ask_list(&mut self, prompt: &str) -> Result<Vec<String>> {
        Ok(split_list(&self.ask(prompt)?))
    }

    /// Ask for every field of a new recipe
    pub fn new_recipe(&mut self) -> Result<NewRecipe> {
        let name = self.ask("Name: ")?;
        let description = self.ask("Description: ")?;
        let ingredients = self.ask_list("Ingredients (comma separated): ")?;
        let tags = self.ask_list("Tags (comma separated): ")?;

        Ok(NewRecipe::new(name, description)
            .with_ingredients(ingredients)
            .with_tags(tags))
    }
}
