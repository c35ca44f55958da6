//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable overriding [`DictionarySettings::base_url`].
pub const DICTIONARY_URL_ENV: &str = "WORD_LINK_DICTIONARY_URL";

/// Environment variable overriding [`HandOffSettings::storage_dir`].
pub const STORAGE_DIR_ENV: &str = "WORD_LINK_STORAGE_DIR";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Word Link scoring and heart settings.
    #[serde(default)]
    session: SessionSettings,

    /// Remote dictionary settings.
    #[serde(default)]
    dictionary: DictionarySettings,

    /// Mini-game hand-off settings.
    #[serde(default)]
    handoff: HandOffSettings,
}

/// Scoring, heart and hint rules for a Word Link phase.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Hearts a fresh phase starts with.
    #[serde(default = "default_starting_hearts")]
    starting_hearts: u32,

    /// Hints allowed per word.
    #[serde(default = "default_max_hints")]
    max_hints_per_word: u32,

    /// Points for guessing the target word.
    #[serde(default = "default_exact_match_points")]
    exact_match_points: u32,

    /// Points for a real word that is not the target.
    #[serde(default = "default_bonus_word_points")]
    bonus_word_points: u32,

    /// Seed for tile shuffles and hint picks. Random when unset.
    #[serde(default)]
    rng_seed: Option<u64>,
}

/// Where and how the remote dictionary is queried.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DictionarySettings {
    /// Base URL; the lowercased word is appended as the final path segment.
    #[serde(default = "default_dictionary_url")]
    base_url: String,

    /// Request timeout. None leaves it to the network layer.
    #[serde(default)]
    timeout_secs: Option<u64>,
}

/// Locations used when handing play off to a mini-game and back.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct HandOffSettings {
    /// Mini-game page reached when hearts run out.
    #[serde(default = "default_interlude_url")]
    interlude_url: String,

    /// Page the mini-game returns control to.
    #[serde(default = "default_home_url")]
    home_url: String,

    /// Directory holding the session-scoped store.
    #[serde(default = "default_storage_dir")]
    storage_dir: PathBuf,
}

fn default_starting_hearts() -> u32 {
    3
}

fn default_max_hints() -> u32 {
    3
}

fn default_exact_match_points() -> u32 {
    100
}

fn default_bonus_word_points() -> u32 {
    10
}

fn default_dictionary_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en/".to_string()
}

fn default_interlude_url() -> String {
    "http://localhost:8080/minigames/heart-catch.html".to_string()
}

fn default_home_url() -> String {
    "http://localhost:8080/index.html".to_string()
}

fn default_storage_dir() -> PathBuf {
    std::env::temp_dir().join("word_link_session")
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            starting_hearts: default_starting_hearts(),
            max_hints_per_word: default_max_hints(),
            exact_match_points: default_exact_match_points(),
            bonus_word_points: default_bonus_word_points(),
            rng_seed: None,
        }
    }
}

impl SessionSettings {
    /// Returns a copy with the given RNG seed.
    #[instrument(skip(self))]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Returns a copy with a different starting heart count.
    #[instrument(skip(self))]
    pub fn with_starting_hearts(mut self, hearts: u32) -> Self {
        self.starting_hearts = hearts;
        self
    }
}

impl Default for DictionarySettings {
    fn default() -> Self {
        Self {
            base_url: default_dictionary_url(),
            timeout_secs: None,
        }
    }
}

impl Default for HandOffSettings {
    fn default() -> Self {
        Self {
            interlude_url: default_interlude_url(),
            home_url: default_home_url(),
            storage_dir: default_storage_dir(),
        }
    }
}

impl HandOffSettings {
    /// Creates hand-off settings.
    #[instrument(skip_all)]
    pub fn new(
        interlude_url: impl Into<String>,
        home_url: impl Into<String>,
        storage_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            interlude_url: interlude_url.into(),
            home_url: home_url.into(),
            storage_dir: storage_dir.into(),
        }
    }
}

impl GameConfig {
    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!("Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults. Environment
    /// overrides are applied in both cases.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = if path.exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    /// Applies [`DICTIONARY_URL_ENV`] and [`STORAGE_DIR_ENV`] when set.
    #[instrument(skip(self))]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(DICTIONARY_URL_ENV) {
            debug!(url = %url, "Dictionary URL overridden from environment");
            self.dictionary.base_url = url;
        }
        if let Ok(dir) = std::env::var(STORAGE_DIR_ENV) {
            debug!(dir = %dir, "Storage directory overridden from environment");
            self.handoff.storage_dir = PathBuf::from(dir);
        }
        self
    }

    /// Returns a copy with different session settings.
    #[instrument(skip_all)]
    pub fn with_session(mut self, session: SessionSettings) -> Self {
        self.session = session;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
