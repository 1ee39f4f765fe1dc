use std::path::Path;

use clap::Parser;
use panier::RecipeSection;
use tracing::instrument;

use super::{
    open_list,
    terminal::{is_narrow, Colorize},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Show recipe and ingredient totals")]
pub struct Status {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Status {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let list = open_list(root);
        let sections = list.collection().sections();

        let recipes = sections.len();
        let items: usize = sections.iter().map(|s| s.data.len()).sum();
        let checked: usize = sections.iter().map(RecipeSection::checked_count).sum();

        if recipes == 0 {
            println!("No recipes yet. Import one with 'panier add <URL>'.");
            return Ok(());
        }

        match self.output {
            OutputFormat::Json => Self::output_json(sections, recipes, items, checked)?,
            OutputFormat::Table => {
                if self.quiet {
                    println!("recipes={recipes} items={items} checked={checked}");
                } else {
                    Self::output_table(sections, items, checked);
                }
            }
        }
        Ok(())
    }

    fn output_json(
        sections: &[RecipeSection],
        recipes: usize,
        items: usize,
        checked: usize,
    ) -> anyhow::Result<()> {
        use serde_json::json;

        let recipes_json: Vec<_> = sections
            .iter()
            .map(|section| {
                json!({
                    "key": section.key,
                    "title": section.title,
                    "items": section.data.len(),
                    "checked": section.checked_count(),
                })
            })
            .collect();

        let output = json!({
            "recipes": recipes_json,
            "total": {
                "recipes": recipes,
                "items": items,
                "checked": checked,
            }
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_table(sections: &[RecipeSection], items: usize, checked: usize) {
        let narrow = is_narrow();

        println!("Shopping list");
        println!("{}", "─────────────".dim());

        for section in sections {
            if narrow {
                println!("{}", section.title);
                println!("  {}/{}", section.checked_count(), section.data.len());
            } else {
                println!(
                    "{:<40} {}/{}",
                    section.title,
                    section.checked_count(),
                    section.data.len()
                );
            }
        }

        println!();

        if checked == items {
            println!("{}", format!("All {items} ingredients gathered ✅").success());
        } else {
            println!("{checked} of {items} ingredients gathered");
        }
    }
}
