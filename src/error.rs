//! Error types for grammar construction and text-format parsing.
//!
//! The canonical LR(1) core (`lr1` module) has its own, narrower error types
//! for parse-time failures; see [`crate::lr1::error`].

use thiserror::Error;

/// Reasons a grammar fails construction (component C1, §4.1 of the design).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidGrammarError {
    #[error("grammar has no productions")]
    EmptyGrammar,

    #[error("start symbol '{0}' is not the left-hand side of any production")]
    UnknownStart(String),

    #[error("reserved symbol '{symbol}' used on the right-hand side of {production}")]
    ReservedSymbolInRhs { symbol: String, production: String },

    #[error("start symbol '{0}' has no production even after augmentation")]
    StartHasNoProduction(String),
}

/// Errors that can occur during grammar parsing and analysis.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("Invalid grammar format: {0}")]
    InvalidFormat(String),

    #[error("Invalid production format: {0}")]
    InvalidProduction(String),

    #[error("Empty grammar input")]
    EmptyInput,

    #[error("Not enough production lines: expected {expected}, got {actual}")]
    NotEnoughProductions { expected: usize, actual: usize },

    #[error(transparent)]
    Invalid(#[from] InvalidGrammarError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Type alias for Results in this crate's grammar-construction and
/// text-format-parsing surfaces.
pub type Result<T> = std::result::Result<T, GrammarError>;
