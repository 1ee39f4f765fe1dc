use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::ingredient::{Ingredient, IngredientEntry};

/// One recipe's ingredient sub-list within the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSection {
    /// Creation timestamp in ISO-8601, unique across the collection.
    pub key: String,
    /// The recipe name returned by the extraction service.
    pub title: String,
    /// Entries in the order the service returned them.
    pub data: Vec<IngredientEntry>,
}

impl RecipeSection {
    /// Builds a section from a parsed recipe.
    ///
    /// Entries keep the array order of `ingredients`, start unchecked,
    /// and take their keys from their position and raw text. The section
    /// key is the creation instant, so later imports always sort after
    /// earlier ones.
    #[must_use]
    pub fn new(title: String, ingredients: Vec<Ingredient>, created: DateTime<Utc>) -> Self {
        let data = ingredients
            .into_iter()
            .enumerate()
            .map(|(index, ingredient)| IngredientEntry::new(index, ingredient))
            .collect();
        Self {
            key: Self::timestamp_key(created),
            title,
            data,
        }
    }

    /// Formats a creation instant as a section key.
    ///
    /// Millisecond precision with a `Z` suffix, the same rendering the
    /// stored lists have always used.
    #[must_use]
    pub fn timestamp_key(created: DateTime<Utc>) -> String {
        created.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Number of checked entries.
    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.data.iter().filter(|entry| entry.checked).count()
    }
}
