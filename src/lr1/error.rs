//! Parse-time error types for the canonical LR(1) driver (component C5).

use crate::symbol::Symbol;
use thiserror::Error;

/// `ACTION[state, token]` was absent: the driver cannot proceed. Carries
/// everything a caller needs to produce a helpful diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parse error at position {position}: unexpected token '{token}' in state {state} (expected one of: {})", expected_list(expected))]
pub struct ParseError {
    pub state: usize,
    pub token: Symbol,
    pub position: usize,
    pub expected: Vec<Symbol>,
}

fn expected_list(expected: &[Symbol]) -> String {
    expected
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A table bug, not a malformed input: a reduce found no entry in the GOTO
/// table, or the stack held something other than a single root node at
/// accept time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InternalInconsistency {
    #[error("reduce in state {state} found no GOTO entry for nonterminal '{nonterminal}'")]
    MissingGoto { state: usize, nonterminal: Symbol },

    #[error("accept reached with {node_count} node(s) on the stack, expected exactly 1")]
    AcceptStackMismatch { node_count: usize },
}

/// The outcome of a failed `lr1::driver::parse` call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Internal(#[from] InternalInconsistency),
}
