use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for the demand set tool.
///
/// This struct holds settings that control how demand sets are displayed and
/// checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// A `chrono` format string used to render estimation timestamps.
    ///
    /// For example, `%Y-%m-%d %H:%M:%S UTC`.
    timestamp_format: String,

    /// Whether validation should warn about profiles that share a link.
    ///
    /// Duplicate links are allowed in a demand set; lookups return the first
    /// profile for a link, so later ones are shadowed.
    pub warn_on_duplicate_links: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            warn_on_duplicate_links: true,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the format string for estimation timestamps.
    #[must_use]
    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    /// Sets the format string for estimation timestamps.
    pub fn set_timestamp_format(&mut self, format: String) {
        self.timestamp_format = format;
    }
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S UTC".to_string()
}

const fn default_true() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_timestamp_format")]
        timestamp_format: String,

        #[serde(default = "default_true")]
        warn_on_duplicate_links: bool,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                timestamp_format,
                warn_on_duplicate_links,
            } => Self {
                timestamp_format,
                warn_on_duplicate_links,
            },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            timestamp_format: config.timestamp_format,
            warn_on_duplicate_links: config.warn_on_duplicate_links,
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
            b"_version = \"1\"\ntimestamp_format = \"%H:%M\"\nwarn_on_duplicate_links = false\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.timestamp_format(), "%H:%M");
        assert!(!config.warn_on_duplicate_links);
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
        file.write_all(b"_version = \"1\"\nwarn_on_duplicate_links = \"often\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dds.toml");

        let mut config = Config::default();
        config.set_timestamp_format("%s".to_string());
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
