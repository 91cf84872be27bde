//! Raw AST produced by the parser.
//!
//! All nodes are untyped and unlinked: references carry names, not targets.
//! Every node owns a [`Source`](crate::base::Source) span pointing back at
//! the region of the file it was parsed from. Nodes are immutable after
//! construction and owned by their parent; a top-level [`Package`]
//! exclusively owns its subtree.

mod enums;
mod problems;
mod types;

pub use enums::{Entity, Expression, LiteralValue, Member, MethodBody, Sentence};
pub use problems::{Problem, ProblemCode};
pub use types::{
    Assignment, BaseCall, Body, Catch, Class, Closure, Constructor, Describe, Field, Fixture, If,
    Import, Literal, Method, Mixin, NamedArgument, New, Package, Parameter, Program, Reference,
    Return, SelfRef, Send, Singleton, SuperCall, Test, Throw, Try, Variable,
};
