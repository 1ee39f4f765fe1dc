use std::path::{Path, PathBuf};

mod list;
mod status;
mod terminal;

use clap::ArgAction;
use list::List;
use panier::{
    client::ExtractionClient, storage::Hydrated, Config, GroceryList, RecipeUrl, Store,
};
use status::Status;
use tracing::instrument;

/// List data and configuration live under this directory inside the root.
const DATA_DIR: &str = ".panier";

fn data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

/// Loads the configuration from the data directory, falling back to
/// defaults when there is none.
fn load_config(root: &Path) -> Config {
    let path = data_dir(root).join("config.toml");
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

fn open_list(root: &Path) -> GroceryList<Hydrated> {
    GroceryList::new(Store::new(data_dir(root))).hydrate()
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The path to the directory holding the grocery list data
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Status(Status::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show recipe and ingredient totals (default)
    Status(Status),

    /// Import a recipe from a URL
    Add(Add),

    /// Show the shopping list grouped by recipe
    List(List),

    /// Tick an ingredient off, or back on
    Check(Check),

    /// Remove a recipe and its ingredients
    Remove(Remove),

    /// Show or modify configuration settings
    Config(ConfigCmd),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(root)?,
            Self::Add(command) => command.run(root)?,
            Self::List(command) => command.run(root)?,
            Self::Check(command) => command.run(root)?,
            Self::Remove(command) => command.run(root)?,
            Self::Config(command) => command.run(root)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Add {
    /// The recipe page URL, as typed or pasted
    url: String,
}

impl Add {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        use terminal::Colorize;

        let url = RecipeUrl::new(&self.url)?;
        let config = load_config(root);

        if !url.looks_like_recipe_page(config.recipe_hint()) {
            println!(
                "{}",
                format!(
                    "'{}' does not appear in the URL; this may not be a recipe page",
                    config.recipe_hint()
                )
                .warning()
            );
        }

        let mut list = open_list(root);
        let client = ExtractionClient::new(config.endpoint().to_string());

        let spinner = indicatif::ProgressBar::new_spinner();
        spinner.set_message("Fetching the ingredient list...");
        spinner.enable_steady_tick(std::time::Duration::from_millis(120));

        let result = list.import_recipe(&client, &url);
        spinner.finish_and_clear();

        match result {
            Ok(section) => {
                println!(
                    "{}",
                    format!("✅ Added '{}' ({} ingredients)", section.title, section.data.len())
                        .success()
                );
                Ok(())
            }
            Err(e) => {
                tracing::debug!("import failed: {e}");
                eprintln!("Could not fetch the ingredient list; is the URL a valid recipe page?");
                std::process::exit(1);
            }
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Check {
    /// Recipe number as shown by 'list'
    recipe: usize,

    /// Ingredient number within the recipe as shown by 'list'
    ingredient: usize,
}

impl Check {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut list = open_list(root);

        let Some(section) = list
            .collection()
            .sections()
            .get(self.recipe.wrapping_sub(1))
        else {
            anyhow::bail!("No recipe number {} in the list", self.recipe);
        };
        let Some(entry) = section.data.get(self.ingredient.wrapping_sub(1)) else {
            anyhow::bail!("No ingredient number {} in '{}'", self.ingredient, section.title);
        };

        let section_key = section.key.clone();
        let entry_key = entry.key.clone();
        let raw = entry.raw().to_string();
        let now_checked = !entry.checked;

        if !list.toggle_ingredient(&section_key, &entry_key) {
            anyhow::bail!("Could not toggle '{raw}'");
        }

        if now_checked {
            println!("Checked {raw}");
        } else {
            println!("Unchecked {raw}");
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Remove {
    /// Recipe number as shown by 'list'
    recipe: usize,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

impl Remove {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        use terminal::Colorize;

        let mut list = open_list(root);

        let Some(section) = list
            .collection()
            .sections()
            .get(self.recipe.wrapping_sub(1))
        else {
            anyhow::bail!("No recipe number {} in the list", self.recipe);
        };
        let key = section.key.clone();
        let title = section.title.clone();

        // Removal is gated: mark first, drop only on an explicit
        // confirmation naming the same section.
        list.request_delete(&key);

        let confirmed = self.yes
            || dialoguer::Confirm::new()
                .with_prompt(format!("Remove '{title}' and its ingredients?"))
                .default(false)
                .interact()?;

        if !confirmed {
            println!("Kept '{title}'");
            return Ok(());
        }

        if list.confirm_delete(&key).is_some() {
            println!("{}", format!("✅ Removed '{title}'").success());
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct ConfigCmd {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl ConfigCmd {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Show => {
                let config = load_config(root);
                println!("Configuration:");
                println!("  endpoint: {}", config.endpoint());
                println!("  recipe_hint: {}", config.recipe_hint());
            }
            ConfigCommand::Set { key, value } => {
                let mut config = load_config(root);
                match key.as_str() {
                    "endpoint" => config.set_endpoint(value),
                    "recipe_hint" => config.set_recipe_hint(value),
                    _ => {
                        return Err(anyhow::anyhow!(
                            "Unknown configuration key: '{key}'\nSupported keys: endpoint, \
                             recipe_hint",
                        ));
                    }
                }
                std::fs::create_dir_all(data_dir(root))?;
                config
                    .save(&data_dir(root).join("config.toml"))
                    .map_err(|e| anyhow::anyhow!("{e}"))?;
                println!("Updated {key}");
            }
        }
        Ok(())
    }
}
