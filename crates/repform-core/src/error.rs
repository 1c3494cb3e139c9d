//! Error types for the repform system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("No active session")]
    NoActiveSession,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
