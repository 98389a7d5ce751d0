// engine/src/error.rs
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors surfaced to the input layer. Everything the search can recover from locally
/// (no legal move, inference miss, degenerate forecast) never becomes an `Error`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("grid has {got} rows, expected {expected}")]
    GridRowCount { expected: usize, got: usize },

    #[error("grid row {row} has {got} cells, expected {expected}")]
    GridRowWidth {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid cell character '{ch}' at row {row}, column {col}")]
    InvalidCell { ch: char, row: usize, col: usize },

    #[error("invalid pair '{text}': {reason}")]
    InvalidPair { text: String, reason: &'static str },

    #[error("pair queue has {got} pairs, expected {expected}")]
    PairQueueLength { expected: usize, got: usize },

    #[error("game history is full ({max_turns} turns)")]
    HistoryFull { max_turns: usize },

    #[error("unexpected end of input while reading {what}")]
    UnexpectedEof { what: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
