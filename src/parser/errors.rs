//! Hard parse failures.
//!
//! Inside a recoverable container these never surface: the container
//! catches them and records a [`Problem`](crate::ast::Problem) instead.
//! They reach the caller only through the non-recovering entry points
//! (`parse_expression`, `parse_sentence`), or when a file is unparseable
//! at the very top level.

use thiserror::Error;

/// A syntax error with its byte offset into the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}
