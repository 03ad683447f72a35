use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card index")]
    InvalidCard,
    #[error("Round has not started yet")]
    NotStarted,
    #[error("Round already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Round needs at least one pair")]
    NoPairs,
    #[error("No images available to build a deck")]
    EmptyImagePool,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Returned by the `FromStr` impls of the named configuration values.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Unknown name")]
pub struct UnknownName;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed round configuration: {0}")]
    Json(#[from] serde_json::Error),
}
