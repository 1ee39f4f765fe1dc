//! Recipe-based grocery lists
//!
//! Recipes are imported from an ingredient-extraction service and kept as
//! a checkable shopping list that survives between runs.

pub mod domain;
pub use domain::{Config, Ingredient, IngredientEntry, RecipeCollection, RecipeSection, RecipeUrl};

/// Ingredient extraction over HTTP.
pub mod client;
pub use client::{ExtractionClient, ExtractionError, ParsedRecipe, RecipeSource};

/// Key-value persistence and the hydrated grocery list.
pub mod storage;
pub use storage::{GroceryList, Store};
