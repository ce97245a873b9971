//! Structured error taxonomy for this crate: parse errors, Kripke-construction errors, and
//! JSON-ingestion errors. Each is a `thiserror::Error` enum rather than a bare `String`, so
//! callers can match on a cause instead of scraping a message.

use thiserror::Error;

/// A CTL formula failed to parse.
///
/// `offset` is a byte offset into the whitespace-stripped input (see
/// [crate::formula::lexer]), not the original string the caller passed in.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("parse error at offset {offset}: {cause}")]
pub struct ParseError {
    pub offset: usize,
    pub cause: String,
}

impl ParseError {
    pub fn new(offset: usize, cause: impl Into<String>) -> ParseError {
        ParseError {
            offset,
            cause: cause.into(),
        }
    }
}

/// A Kripke structure failed one of its construction-time invariants.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum KripkeError {
    #[error("a Kripke structure must have at least one state")]
    EmptyStateSet,
    #[error("a Kripke structure must have at least one initial state")]
    EmptyInitialSet,
    #[error("initial state {0} is out of range for {1} states")]
    InitialStateOutOfRange(usize, usize),
    #[error("state {0} has a successor {1} that is out of range for {2} states")]
    SuccessorOutOfRange(usize, usize, usize),
}

/// Loading a Kripke structure (or formula list) from an external source failed.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed Kripke JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("ingested Kripke structure is invalid: {0}")]
    Kripke(#[from] KripkeError),
    #[error("state key {0:?} in Kripke JSON is not a non-negative integer")]
    InvalidStateKey(String),
}
