//! Grammar modules for Wollok parsing.
//!
//! The parsing logic is organized in dependency-leaf order:
//! - `common` - names, references, parameter and argument lists
//! - `expressions` - primaries, send chains, the operator calculus
//! - `sentences` - declarations, returns, assignments, bodies
//! - `members` - fields, methods, constructors, fixtures
//! - `entities` - packages, classes, singletons, mixins, programs,
//!   describes, tests, and the recoverable container loops
//!
//! Every function takes the [`Parser`](super::Parser) cursor and returns
//! `Result<Node, ParseError>`; recoverable containers catch child failures
//! and turn them into problems.

pub(crate) mod common;
pub(crate) mod entities;
pub(crate) mod expressions;
pub(crate) mod members;
pub(crate) mod sentences;

use super::token_kind::TokenKind;

// =============================================================================
// Safeword sets used by the recovery skipper
// =============================================================================

/// Keys at which an entity may start again (plus the container's `}`).
pub(crate) const ENTITY_SAFEWORDS: &[TokenKind] = &[
    TokenKind::PackageKw,
    TokenKind::ClassKw,
    TokenKind::ObjectKw,
    TokenKind::MixinKw,
    TokenKind::ProgramKw,
    TokenKind::DescribeKw,
    TokenKind::TestKw,
    TokenKind::VarKw,
    TokenKind::ConstKw,
    TokenKind::RBrace,
];

/// Member safewords inside singletons, mixins and describes.
pub(crate) const MEMBER_SAFEWORDS: &[TokenKind] = &[
    TokenKind::MethodKw,
    TokenKind::FixtureKw,
    TokenKind::VarKw,
    TokenKind::ConstKw,
    TokenKind::TestKw,
    TokenKind::DescribeKw,
    TokenKind::RBrace,
];

/// Member safewords inside classes.
pub(crate) const CLASS_MEMBER_SAFEWORDS: &[TokenKind] = &[
    TokenKind::MethodKw,
    TokenKind::ConstructorKw,
    TokenKind::VarKw,
    TokenKind::ConstKw,
    TokenKind::RBrace,
];
