use std::path::PathBuf;

/// Reasons a move request is rejected. None of them change the game state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {width} columns)")]
    InvalidColumn { column: isize, width: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("the game is already over")]
    GameOver,
}

/// Errors that can occur when starting a new game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("board dimensions must be at least 1x1 (got {height}x{width})")]
    InvalidDimensions { height: usize, width: usize },

    #[error("player identity must not be empty")]
    EmptyIdentity,

    #[error("both players are named '{0}'")]
    DuplicateIdentity(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid game settings: {0}")]
    Setup(#[from] SetupError),
}
