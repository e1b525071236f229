use crate::config::Difficulty;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrossForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Not enough eligible words for {difficulty}: found {found}, need at least {need}")]
    InsufficientWords {
        difficulty: Difficulty,
        found: usize,
        need: usize,
    },

    #[error("Failed to generate playable crossword for {0} after retries")]
    Exhausted(Difficulty),

    #[error("Store Error: {0}")]
    Store(String),
}

pub type CfResult<T> = Result<T, CrossForgeError>;
