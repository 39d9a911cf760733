use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::{Dimensions, GameState, Identity, DEFAULT_HEIGHT, DEFAULT_WIDTH};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Largest board side accepted from configuration. The terminal view needs
/// every row and column on screen.
pub const MAX_DIMENSION: usize = 64;

/// Board size and player identities for new games.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    pub first_player: String,
    pub second_player: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            first_player: "red".to_string(),
            second_player: "yellow".to_string(),
        }
    }
}

impl GameConfig {
    /// Start a game with these settings.
    pub fn new_game(&self) -> Result<GameState, ConfigError> {
        let dims = Dimensions::new(self.height, self.width)?;
        let state = GameState::new(
            Identity::new(self.first_player.as_str()),
            Identity::new(self.second_player.as_str()),
            dims,
        )?;
        Ok(state)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter level; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Log file path. Logging is off when unset since the UI owns stdout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, or `None` if the file does not
    /// exist.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load_optional(path)? {
            Some(config) => Ok(config),
            None => {
                eprintln!("Warning: {}", missing_file_warning(path));
                Ok(Self::default())
            }
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.height == 0 || self.game.height > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "game.height must be in 1..={MAX_DIMENSION}"
            )));
        }
        if self.game.width == 0 || self.game.width > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "game.width must be in 1..={MAX_DIMENSION}"
            )));
        }
        if self.game.first_player.trim().is_empty() {
            return Err(ConfigError::Validation(
                "game.first_player must not be empty".into(),
            ));
        }
        if self.game.second_player.trim().is_empty() {
            return Err(ConfigError::Validation(
                "game.second_player must not be empty".into(),
            ));
        }
        if self
            .game
            .first_player
            .trim()
            .eq_ignore_ascii_case(self.game.second_player.trim())
        {
            return Err(ConfigError::Validation(
                "game.first_player and game.second_player must differ".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

/// Message shown when the requested config file is missing.
pub fn missing_file_warning(path: &Path) -> String {
    format!("config file '{}' not found, using defaults", path.display())
}
