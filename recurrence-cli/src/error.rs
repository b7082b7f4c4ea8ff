//! Error types for the CLI

use recurrence_engine::RecurrenceError;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Evaluation error
    #[error("{0}")]
    Recurrence(#[from] RecurrenceError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// The two engines produced different results for the same cell
    #[error("Engines disagree on A({n}, {m}): recursive gave {recursive}, iterative gave {iterative}")]
    Mismatch {
        n: i64,
        m: i64,
        recursive: String,
        iterative: String,
    },
}
