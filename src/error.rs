//! Error taxonomy
//!
//! Only `Configuration` ever reaches a caller of the round logic. Asset and
//! presentation failures are logged and swallowed at the boundary where they
//! happen.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Invalid round parameters or unreadable settings
    Configuration(String),
    /// A model/texture the host tried to load never arrived
    AssetLoad(String),
    /// A presentation sink could not render an event
    Presentation(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Configuration(s) => write!(f, "configuration error: {s}"),
            GameError::AssetLoad(s) => write!(f, "asset load error: {s}"),
            GameError::Presentation(s) => write!(f, "presentation error: {s}"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        Self::Configuration(e.to_string())
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        Self::Configuration(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
