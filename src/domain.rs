//! Domain models for the grocery list.
//!
//! This module contains the recipe collection state container and the
//! types it is built from.

/// The recipe collection state container and deletion gating.
pub mod collection;
pub use collection::RecipeCollection;

mod config;
pub use config::Config;

/// Parsed ingredients and their checkable list entries.
pub mod ingredient;
pub use ingredient::{Ingredient, IngredientEntry};

/// Recipe URL validation.
pub mod recipe_url;
pub use recipe_url::{InvalidUrlError, RecipeUrl};

mod section;
pub use section::RecipeSection;
