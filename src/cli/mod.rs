//! Command-line interface for menu-helper.
//!
//! Provides commands for adding, listing, inspecting, editing and deleting
//! recipes, and for attaching ingredients and tags to them.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::catalog::{split_list, Catalog, Removal};
use crate::config::{self, DataHomeSource, DATA_HOME_ENV};
use crate::domain::{NewRecipe, RecipeFilter, RecipeId};
use crate::store::Store;

pub mod output;
pub mod prompt;

use prompt::Prompter;

/// menu-helper - keep a catalog of recipes, ingredients and tags
#[derive(Parser, Debug)]
#[command(name = "menu-helper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base data directory; the catalog lives in <DIR>/menu-helper
    #[arg(long, global = true, env = DATA_HOME_ENV, value_name = "DIR")]
    pub data_home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Add a recipe, prompting for each field
    #[command(visible_alias = "new")]
    Add,

    /// Delete recipes by ID
    #[command(visible_alias = "rm")]
    Del {
        /// Recipe IDs
        #[arg(required = true, value_name = "ID")]
        ids: Vec<RecipeId>,
    },

    /// List recipes, optionally only those with all given ingredients and tags
    #[command(visible_alias = "ls")]
    List {
        /// Required ingredients (comma-separated)
        #[arg(short, long)]
        ingredients: Option<String>,

        /// Required tags (comma-separated)
        #[arg(short, long)]
        tags: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a recipe with its ingredients and tags
    #[command(visible_alias = "i")]
    Info {
        /// Recipe ID
        id: RecipeId,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename a recipe (prompts when NAME is omitted)
    EditName {
        /// Recipe ID
        id: RecipeId,

        /// New name
        name: Option<String>,
    },

    /// Replace a recipe's description (prompts when omitted)
    #[command(visible_alias = "edit-desc")]
    EditDescription {
        /// Recipe ID
        id: RecipeId,

        /// New description
        description: Option<String>,
    },

    /// Add ingredients to a recipe
    AddIngr {
        /// Recipe ID
        id: RecipeId,

        /// Ingredients (comma-separated)
        ingredients: String,
    },

    /// Remove ingredients from a recipe
    RmIngr {
        /// Recipe ID
        id: RecipeId,

        /// Ingredients (comma-separated)
        ingredients: String,
    },

    /// Add tags to a recipe
    AddTag {
        /// Recipe ID
        id: RecipeId,

        /// Tags (comma-separated)
        tags: String,
    },

    /// Remove tags from a recipe
    RmTag {
        /// Recipe ID
        id: RecipeId,

        /// Tags (comma-separated)
        tags: String,
    },

    /// Show resolved configuration
    Config,

    /// Print the program version
    Version,
}

impl Cli {
    /// Execute the CLI command against stdin and stdout
    pub fn execute(self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.execute_with(stdin.lock(), stdout.lock())
    }

    /// Execute the CLI command, reading prompt answers from `input`.
    ///
    /// Prompts are answered before the store is opened, so the database lock
    /// is never held while waiting on the user.
    pub fn execute_with<R: BufRead, W: Write>(self, input: R, mut output: W) -> Result<()> {
        let Cli { data_home, command } = self;

        let action = match command {
            Commands::Version => {
                writeln!(output, "menu-helper v{}", env!("CARGO_PKG_VERSION"))?;
                return Ok(());
            }
            Commands::Config => return show_config(data_home, &mut output),
            Commands::Add => Action::Add(Prompter::new(input, &mut output).new_recipe()?),
            Commands::Del { ids } => Action::Delete(ids),
            Commands::List {
                ingredients,
                tags,
                json,
            } => Action::List {
                filter: RecipeFilter::new()
                    .with_ingredients(split_list(ingredients.as_deref().unwrap_or_default()))
                    .with_tags(split_list(tags.as_deref().unwrap_or_default())),
                json,
            },
            Commands::Info { id, json } => Action::Info { id, json },
            Commands::EditName { id, name } => {
                let name = match name {
                    Some(name) => name,
                    None => Prompter::new(input, &mut output).ask("Name: ")?,
                };
                Action::Rename { id, name }
            }
            Commands::EditDescription { id, description } => {
                let description = match description {
                    Some(description) => description,
                    None => Prompter::new(input, &mut output).ask("Description: ")?,
                };
                Action::Describe { id, description }
            }
            Commands::AddIngr { id, ingredients } => Action::AddIngredients {
                id,
                names: split_list(&ingredients),
            },
            Commands::RmIngr { id, ingredients } => Action::RemoveIngredients {
                id,
                names: split_list(&ingredients),
            },
            Commands::AddTag { id, tags } => Action::AddTags {
                id,
                names: split_list(&tags),
            },
            Commands::RmTag { id, tags } => Action::RemoveTags {
                id,
                names: split_list(&tags),
            },
        };

        let mut store = Store::open_from(data_home)?;
        let result = action.run(&Catalog::new(&store), &mut output);
        store.close();
        result
    }
}

/// A store-backed command with every user answer already collected
enum Action {
    Add(NewRecipe),
    Delete(Vec<RecipeId>),
    List { filter: RecipeFilter, json: bool },
    Info { id: RecipeId, json: bool },
    Rename { id: RecipeId, name: String },
    Describe { id: RecipeId, description: String },
    AddIngredients { id: RecipeId, names: Vec<String> },
    RemoveIngredients { id: RecipeId, names: Vec<String> },
    AddTags { id: RecipeId, names: Vec<String> },
    RemoveTags { id: RecipeId, names: Vec<String> },
}

impl Action {
    fn run(self, catalog: &Catalog<'_>, output: &mut impl Write) -> Result<()> {
        match self {
            Action::Add(recipe) => {
                catalog.add_recipe(&recipe)?;
            }
            Action::Delete(ids) => {
                catalog.delete(&ids)?;
            }
            Action::List { filter, json } => {
                let recipes = catalog.list(&filter)?;
                if json {
                    output::write_json(output, &recipes)?;
                } else {
                    output::write_recipes(output, &recipes)?;
                }
            }
            Action::Info { id, json } => {
                let details = catalog.info(id)?;
                if json {
                    output::write_json(output, &details)?;
                } else {
                    output::write_details(output, &details)?;
                }
            }
            Action::Rename { id, name } => catalog.rename(id, &name)?,
            Action::Describe { id, description } => catalog.describe(id, &description)?,
            Action::AddIngredients { id, names } => catalog.add_ingredients(id, &names)?,
            Action::RemoveIngredients { id, names } => {
                let removal = catalog.remove_ingredients(id, &names)?;
                report_skipped("ingredient", &removal);
            }
            Action::AddTags { id, names } => catalog.add_tags(id, &names)?,
            Action::RemoveTags { id, names } => {
                let removal = catalog.remove_tags(id, &names)?;
                report_skipped("tag", &removal);
            }
        }

        Ok(())
    }
}

fn report_skipped(kind: &str, removal: &Removal) {
    for name in &removal.skipped {
        eprintln!("Could not find {} '{}'. Skipping!", kind, name);
    }
}

/// Show the resolved configuration (for debugging)
fn show_config(data_home: Option<PathBuf>, output: &mut impl Write) -> Result<()> {
    let cfg = config::load(data_home)?;

    let source = match cfg.source {
        DataHomeSource::Environment => "--data-home / XDG_DATA_HOME",
        DataHomeSource::ConfigFile => "config file",
    };

    writeln!(output, "menu-helper Configuration")?;
    writeln!(output)?;
    writeln!(
        output,
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    )?;
    writeln!(output)?;
    writeln!(output, "Paths:")?;
    writeln!(output, "  Data home: {} (from {})", cfg.data_home.display(), source)?;
    writeln!(output, "  Catalog:   {}", cfg.app_dir().display())?;
    writeln!(output, "  Database:  {}", cfg.database_path().display())?;
    writeln!(output, "  Lock:      {}", cfg.lock_path().display())?;

    Ok(())
}
