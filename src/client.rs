//! Client for the ingredient extraction service.
//!
//! The service takes a recipe page URL and answers with the recipe title
//! and its parsed ingredient list. Everything the rest of the crate needs
//! is behind the [`RecipeSource`] trait, so imports can be exercised
//! without a network.

use serde::Deserialize;

use crate::domain::{Ingredient, RecipeUrl};

/// A parsed recipe as returned by the extraction service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParsedRecipe {
    /// The recipe name.
    pub title: String,
    /// Parsed ingredient lines, in recipe order.
    pub ingredients: Vec<Ingredient>,
}

/// Anything that can turn a recipe URL into a parsed recipe.
pub trait RecipeSource {
    /// Fetches the parsed ingredient list for a recipe page.
    ///
    /// # Errors
    ///
    /// Returns an error when the service cannot be reached, answers with
    /// a non-success status, or produces a body that is not a parsed
    /// recipe. Callers treat all of these as a failed import.
    fn fetch(&self, url: &RecipeUrl) -> Result<ParsedRecipe, ExtractionError>;
}

/// HTTP client for the extraction service.
///
/// Issues a single blocking GET per fetch with the recipe page URL as the
/// `url` query parameter. No timeout is configured; a slow service keeps
/// the caller's busy indicator running until the request resolves.
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl ExtractionClient {
    /// Creates a client for the service at `endpoint`.
    #[must_use]
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl RecipeSource for ExtractionClient {
    fn fetch(&self, url: &RecipeUrl) -> Result<ParsedRecipe, ExtractionError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url.as_str())])
            .send()
            .map_err(ExtractionError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Status { status });
        }

        response.json().map_err(ExtractionError::Malformed)
    }
}

/// Reasons an extraction request can fail.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The service could not be reached at all.
    #[error("could not reach the extraction service: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered, but not with a success status.
    #[error("extraction service answered with status {status}")]
    Status {
        /// The status the service answered with.
        status: reqwest::StatusCode,
    },

    /// The body was not a parsed recipe.
    #[error("malformed extraction response: {0}")]
    Malformed(#[source] reqwest::Error),
}
