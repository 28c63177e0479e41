use std::io;
use thiserror::Error;

/// Failures while loading the company table. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] io::Error),
    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("duplicate company name '{name}' on row {row}")]
    DuplicateName { name: String, row: usize },
    #[error("company '{name}' has fortune rank 0; ranks start at 1")]
    InvalidRank { name: String },
    #[error("dataset contains no companies")]
    Empty,
}

/// Rejected session transitions. A rejection never changes the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("'{0}' has already been guessed")]
    AlreadyGuessed(String),
    #[error("the game is already over")]
    GameOver,
    #[error("make at least one guess before giving up")]
    NoGuessesYet,
    #[error("finish the game before sharing results")]
    NotFinished,
    #[error("cannot start a game without any companies")]
    EmptyDataset,
    #[error("max guesses must be at least 1")]
    InvalidMaxGuesses,
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to copy results: {0}")]
    Io(#[from] io::Error),
    #[error("output is not a terminal; copy the results by hand")]
    NotATerminal,
}
