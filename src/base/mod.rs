//! Foundation types for the Wollok toolchain.
//!
//! This module provides the types every AST node is annotated with:
//! - [`Position`] - a point in the source (byte offset + line/column)
//! - [`Source`] - a provenance span (start, end, originating file)
//! - [`LineIndex`] - byte offset to line/column conversion
//!
//! This module has NO dependencies on other wollok modules.

mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::{Position, Source};
