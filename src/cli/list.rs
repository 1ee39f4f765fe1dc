use std::path::Path;

use clap::Parser;
use panier::RecipeSection;
use tracing::instrument;

use super::{
    open_list,
    terminal::{terminal_width, Colorize},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Show the shopping list grouped by recipe")]
pub struct List {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let list = open_list(root);
        let sections = list.collection().sections();

        if sections.is_empty() {
            println!("The list is empty. Import a recipe with 'panier add <URL>'.");
            return Ok(());
        }

        match self.output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(sections)?);
            }
            OutputFormat::Table => Self::output_table(sections),
        }
        Ok(())
    }

    fn output_table(sections: &[RecipeSection]) {
        // Leave room for the number, the checkbox and a margin.
        let max_raw = terminal_width().map_or(80, usize::from).saturating_sub(10);

        for (number, section) in sections.iter().enumerate() {
            if number > 0 {
                println!();
            }
            println!("{}. {}", number + 1, section.title);
            println!("{}", "─".repeat(section.title.chars().count() + 3).dim());

            for (item, entry) in section.data.iter().enumerate() {
                let marker = if entry.checked { "x" } else { " " };
                let line = format!("{:>4}. [{marker}] {}", item + 1, fit(entry.raw(), max_raw));
                if entry.checked {
                    println!("{}", line.done());
                } else {
                    println!("{line}");
                }
            }
        }
    }
}

/// Cuts an ingredient line so the row fits the terminal.
fn fit(raw: &str, max: usize) -> String {
    if raw.chars().count() <= max {
        return raw.to_string();
    }
    let cut: String = raw.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::fit;

    #[test]
    fn short_lines_pass_through() {
        assert_eq!(fit("2 carrots", 20), "2 carrots");
    }

    #[test]
    fn long_lines_are_cut_with_an_ellipsis() {
        assert_eq!(fit("2 very large orange carrots", 10), "2 very la…");
    }

    #[test]
    fn cutting_respects_character_boundaries() {
        assert_eq!(fit("crème fraîche épaisse", 10), "crème fra…");
    }
}
