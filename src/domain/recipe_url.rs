use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// A recipe page URL as supplied by the user.
///
/// Validation is deliberately light: the string must be non-empty once
/// trimmed. Whether the page actually is a recipe is only known after the
/// extraction service has been asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeUrl(NonEmptyString);

impl RecipeUrl {
    /// Creates a new `RecipeUrl` from user input.
    ///
    /// Surrounding whitespace is trimmed, which covers the usual paste
    /// artefacts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrlError` if the trimmed string is empty.
    pub fn new(s: &str) -> Result<Self, InvalidUrlError> {
        NonEmptyString::new(s.trim().to_string())
            .map(Self)
            .map_err(|_| InvalidUrlError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Crude recipe-page check: does the URL mention `hint` at all?
    ///
    /// Matched case-insensitively anywhere in the URL. Recipe sites tend
    /// to keep a marker like `recettes` in their recipe paths, so this is
    /// good enough to warn on before an import is attempted.
    #[must_use]
    pub fn looks_like_recipe_page(&self, hint: &str) -> bool {
        self.0
            .as_str()
            .to_lowercase()
            .contains(&hint.to_lowercase())
    }
}

impl TryFrom<String> for RecipeUrl {
    type Error = InvalidUrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl TryFrom<&str> for RecipeUrl {
    type Error = InvalidUrlError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for RecipeUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for RecipeUrl {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for RecipeUrl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecipeUrl {
    type Err = InvalidUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Error returned when a recipe URL is empty.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("recipe URL must not be empty")]
pub struct InvalidUrlError;
