use serde::{Deserialize, Serialize};

/// One parsed ingredient line as returned by the extraction service.
///
/// Immutable once produced. `value` holds the parsed quantity tokens and
/// `label` the parsed name tokens; either may be empty when the service
/// could not split the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// The ingredient line as it appears in the recipe.
    pub raw: String,
    /// Parsed quantity tokens.
    #[serde(default)]
    pub value: Vec<String>,
    /// Parsed ingredient-name tokens.
    #[serde(default)]
    pub label: Vec<String>,
}

/// An [`Ingredient`] as it lives in a shopping list section.
///
/// Carries the checked flag and a key derived at creation time from the
/// ingredient's position and raw text. Two identical raw lines at
/// adjacent computed positions can collide; this identity scheme is
/// deliberate and not hardened beyond the common case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientEntry {
    /// Identifier unique within the owning section's data.
    pub key: String,
    /// Whether the user has ticked this line off.
    pub checked: bool,
    /// The underlying ingredient.
    #[serde(flatten)]
    pub ingredient: Ingredient,
}

impl IngredientEntry {
    /// Wraps an ingredient for inclusion in a section at `index`.
    ///
    /// The key concatenates the position and the raw text, which is how
    /// entries are addressed for toggling. New entries start unchecked.
    #[must_use]
    pub fn new(index: usize, ingredient: Ingredient) -> Self {
        Self {
            key: format!("{index}{raw}", raw = ingredient.raw),
            checked: false,
            ingredient,
        }
    }

    /// The ingredient line as it appears in the recipe.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.ingredient.raw
    }
}
