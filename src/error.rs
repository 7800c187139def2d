//! Diagnostics error type.
//!
//! Only the fatal category from spec Section 7 (malformed grammar line) and
//! ambient stdin I/O failures are represented here. Construction conflicts
//! and parse rejection are expected outcomes, not errors — see
//! [`crate::table::Conflict`] and [`crate::driver::ParseOutcome`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("line {line_no}: missing '->' separator: {text:?}")]
    MissingArrow { line_no: usize, text: String },

    #[error("line {line_no}: left-hand side is empty: {text:?}")]
    EmptyLhs { line_no: usize, text: String },

    #[error("expected {expected} production line(s), found {found}")]
    ProductionCountMismatch { expected: usize, found: usize },

    #[error("no productions given")]
    EmptyGrammar,

    #[error("could not read count of productions: {0}")]
    CountParse(#[source] std::num::ParseIntError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GrammarError>;
