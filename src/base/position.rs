/// Position tracking for AST nodes.
///
/// Every node produced by the parser carries a [`Source`] telling which
/// region of which file it came from, for diagnostics and IDE features.
use std::fmt;

use smol_str::SmolStr;

/// A point in source text.
///
/// `offset` counts bytes from the beginning of the UTF-8 input (0-based).
/// `line` and `column` are 1-based; columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A provenance span: where a node starts and ends, and in which file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Source {
    pub start: Position,
    pub end: Position,
    pub file: SmolStr,
}

impl Source {
    pub fn new(start: Position, end: Position, file: impl Into<SmolStr>) -> Self {
        Self {
            start,
            end,
            file: file.into(),
        }
    }

    /// Check whether a byte offset falls within this span (end-inclusive).
    pub fn contains(&self, offset: usize) -> bool {
        self.start.offset <= offset && offset <= self.end.offset
    }

    /// Byte length of the spanned region.
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}..{}", self.file, self.start, self.end)
    }
}
