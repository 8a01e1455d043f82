//! Errors at the edges of the agent: configuration, names given on the command line, carry-over context.
//!
//! The search itself has no recoverable errors; misuse of it panics.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown heuristic `{0}`")]
    UnknownHeuristic(String),

    #[error("unknown opponent `{0}`")]
    UnknownOpponent(String),
}

pub type Result<T> = std::result::Result<T, Error>;
