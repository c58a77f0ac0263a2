use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a session needs at least one question")]
    NoQuestions,
}

#[derive(Debug, Error)]
pub enum QuestionSetError {
    #[error("failed to read question file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid question set JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown question pack `{0}`")]
    UnknownPack(String),

    #[error("question set `{0}` has no questions")]
    Empty(String),
}
