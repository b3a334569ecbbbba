use serde::Deserialize;
use std::path::Path;
use strum_macros::Display;
use thiserror::Error;

use super::i18n::Language;
use super::npath::{Abs, Dir, NPath};

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "mtime2created.toml";

/// Defines a `ConfigError`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {0:?}")]
    ReadFailed(String, #[source] std::io::Error),

    #[error("Failed to parse config {0:?}")]
    ParseFailed(String, #[source] toml::de::Error),
}

/// How much a successful single file sync tells the user.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVerbosity {
    /// Plain success message.
    #[default]
    #[strum(to_string = "generic")]
    Generic,

    /// Success message followed by the applied timestamp.
    #[strum(to_string = "timestamp")]
    Timestamp,
}

/// Language selection; `auto` asks the host for its locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageSetting {
    #[default]
    Auto,
    Ja,
    En,
}

impl LanguageSetting {
    /// Returns the fixed language, or `None` when it has to be detected.
    pub fn fixed(&self) -> Option<Language> {
        match self {
            LanguageSetting::Auto => None,
            LanguageSetting::Ja => Some(Language::Ja),
            LanguageSetting::En => Some(Language::En),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The vault root. Falls back to the working directory.
    pub vault: Option<NPath<Abs, Dir>>,

    /// The external utility that sets the modification time.
    pub utility: String,

    /// Number of files synced at the same time.
    pub workers: usize,

    /// Success notice verbosity of a single file sync.
    pub notice: NoticeVerbosity,

    /// Display language.
    pub language: LanguageSetting,

    /// Directory of the log files.
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            vault: None,
            utility: "SetFile".to_string(),
            workers: 4,
            notice: NoticeVerbosity::Generic,
            language: LanguageSetting::Auto,
            log_dir: ".".to_string(),
        }
    }
}

impl Config {
    /// Parses a config from toml.
    pub fn from_toml(content: &str, origin: &str) -> Result<Config, ConfigError> {
        toml::from_str::<Config>(content)
            .map_err(|err| ConfigError::ParseFailed(origin.to_string(), err))
    }

    /// Loads the config at `path`. A missing file yields `None`.
    pub fn load(path: &Path) -> Result<Option<Config>, ConfigError> {
        let origin = path.display().to_string();

        match std::fs::read_to_string(path) {
            Ok(content) => Config::from_toml(&content, &origin).map(Some),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ConfigError::ReadFailed(origin, err)),
        }
    }
}

pub const EXAMPLE_CONFIG: &str = r#"
# Root directory the file arguments are relative to.
# Defaults to the working directory.
vault = "/Users/user/Documents/vault"

# Utility that sets the modification time. Called as
# <utility> -m "MM/DD/YYYY HH:MM:SS" <file>
utility = "SetFile"

# Number of files synced at the same time
workers = 4

# Success notice of a single file: "generic" or "timestamp"
notice = "generic"

# Display language: "auto", "ja" or "en"
language = "auto"

# Directory of mtime2created.{info,warn,error}.log
log_dir = "."
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_config_parses() {
        let config = Config::from_toml(EXAMPLE_CONFIG, "example").unwrap();

        assert_eq!(
            config.vault.unwrap().to_raw(),
            "/Users/user/Documents/vault"
        );
        assert_eq!(config.utility, "SetFile");
        assert_eq!(config.workers, 4);
        assert_eq!(config.notice, NoticeVerbosity::Generic);
        assert_eq!(config.language, LanguageSetting::Auto);
    }

    #[test]
    fn omitted_keys_take_defaults() {
        let config = Config::from_toml("notice = \"timestamp\"\nlanguage = \"ja\"", "inline").unwrap();

        assert!(config.vault.is_none());
        assert_eq!(config.utility, "SetFile");
        assert_eq!(config.workers, 4);
        assert_eq!(config.notice, NoticeVerbosity::Timestamp);
        assert_eq!(config.language.fixed(), Some(Language::Ja));
    }

    #[test]
    fn relative_vault_is_rejected() {
        assert!(matches!(
            Config::from_toml("vault = \"notes\"", "inline"),
            Err(ConfigError::ParseFailed(_, _))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml("transfer_threads = 10", "inline").is_err());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();

        assert!(loaded.is_none());
    }
}
