//! Recoverable parse problems.
//!
//! A problem marks a region a recoverable container had to skip. The parse
//! goes on; downstream stages treat problems as diagnostics and may still
//! process the container's well-formed children.

use std::fmt;

use crate::base::Source;

/// Diagnostic code of a skipped region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ProblemCode {
    /// No legal entity starts at the cursor inside a package.
    MalformedEntity,
    /// No legal member starts at the cursor inside a class, singleton,
    /// mixin or describe body.
    MalformedMember,
}

impl ProblemCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemCode::MalformedEntity => "malformedEntity",
            ProblemCode::MalformedMember => "malformedMember",
        }
    }
}

impl fmt::Display for ProblemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic with its source span. The parser produces no message text;
/// tooling formats messages from the code and span.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    pub code: ProblemCode,
    pub source: Source,
}

impl Problem {
    pub fn new(code: ProblemCode, source: Source) -> Self {
        Self { code, source }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.source)
    }
}
