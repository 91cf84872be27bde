//! # wollok-base
//!
//! Core library for parsing Wollok source text into a raw (unlinked) AST.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser    → Logos lexer, recursive-descent parser, grammar modules
//!   ↓
//! ast       → Raw AST node types, problems
//!   ↓
//! base      → Primitives (Position, Source, LineIndex)
//! ```
//!
//! The parser is a pure function over `(file_name, source_text)`: it keeps
//! no state between invocations and performs no I/O. Syntax errors inside a
//! recoverable container (packages, classes, singletons, mixins, describes)
//! never abort the parse; the malformed region is skipped and recorded as a
//! [`ast::Problem`] on the container, so downstream stages can still work
//! with every well-formed sibling.

// ============================================================================
// MODULES (dependency order: base → ast → parser)
// ============================================================================

/// Foundation types: Position, Source, LineIndex
pub mod base;

/// Raw AST: node structs, closed-family enums, parse problems
pub mod ast;

/// Parser: Logos lexer, recursive-descent grammar, error recovery
pub mod parser;

// Re-export the entry points and foundation types
pub use base::{LineIndex, Position, Source};
pub use parser::{ParseError, parse_expression, parse_file, parse_sentence, tokenize};
