use std::path::Path;

use serde::{Deserialize, Serialize};

/// Settings for talking to the ingredient extraction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Base URL of the extraction service.
    ///
    /// The recipe page URL is passed to it as the `url` query parameter.
    endpoint: String,

    /// Substring that marks a URL as a recipe page.
    ///
    /// Used only to warn before an import is attempted; the extraction
    /// service has the final say on whether a page parses.
    recipe_hint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            recipe_hint: default_recipe_hint(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content
    /// is invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML
    /// or if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Base URL of the extraction service.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Substring that marks a URL as a recipe page.
    #[must_use]
    pub fn recipe_hint(&self) -> &str {
        &self.recipe_hint
    }

    /// Points the configuration at a different extraction service.
    pub fn set_endpoint(&mut self, endpoint: String) {
        self.endpoint = endpoint;
    }

    /// Changes the recipe-page marker.
    pub fn set_recipe_hint(&mut self, hint: String) {
        self.recipe_hint = hint;
    }
}

fn default_endpoint() -> String {
    "https://stormy-wave-07737.herokuapp.com/".to_string()
}

fn default_recipe_hint() -> String {
    "recettes".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_endpoint")]
        endpoint: String,

        #[serde(default = "default_recipe_hint")]
        recipe_hint: String,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                endpoint,
                recipe_hint,
            } => Self {
                endpoint,
                recipe_hint,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            endpoint: config.endpoint,
            recipe_hint: config.recipe_hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nendpoint = \"http://localhost:9000/\"\nrecipe_hint = \"rezepte\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.endpoint(), "http://localhost:9000/");
        assert_eq!(config.recipe_hint(), "rezepte");
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nendpoint = 7\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        // Deserialising a file with only the version marker falls back to
        // the default endpoint and hint.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.set_endpoint("http://localhost:9000/".to_string());

        let serialized = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(back, config);
    }
}
