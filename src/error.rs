//! Error types for corpus loading, tree construction and tree persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the library.
///
/// Every variant is terminal for the current run: the computation is
/// deterministic, so retrying with the same input yields the same error.
#[derive(Debug, Error)]
pub enum GuessError {
    /// The word list could not be opened or read.
    #[error("cannot read corpus {}", path.display())]
    CorpusUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fewer than two symbols carry probability mass, so there is nothing to merge.
    #[error("need at least two symbols with non-zero probability, found {non_zero}")]
    DegenerateAlphabet { non_zero: usize },

    /// A word contains a character outside `a`..=`z`.
    #[error("symbol {symbol:?} in word {word:?} is outside the alphabet a-z")]
    OutOfAlphabetSymbol { symbol: char, word: String },

    #[error("probability {value} for symbol {symbol:?} is not a finite non-negative number")]
    InvalidProbability { symbol: char, value: f64 },

    /// A persisted tree violates the decision-node invariants.
    #[error("invalid tree: {0}")]
    InvalidTree(String),

    #[error("malformed tree json")]
    TreeFormat(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GuessError>;
