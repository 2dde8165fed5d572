//! Errors raised while locating or reading a collection

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Anki collection not found (looked in: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("home directory not found")]
    NoHomeDir,

    #[error("Deck '{0}' not found")]
    DeckNotFound(String),

    #[error("malformed deck table: {0}")]
    MalformedDecks(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, CollectionError>;

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
