//! AST node structs.
//!
//! One struct per node kind, plain `pub` fields, a `source` span on every
//! node. Recoverable containers (package, class, singleton, mixin,
//! describe) additionally carry the `problems` collected while parsing
//! their bodies; their member lists hold only well-formed children.

use smol_str::SmolStr;

use super::enums::{Entity, Expression, Member, MethodBody, Sentence};
use super::problems::Problem;
use crate::base::Source;

// ============================================================================
// Entities
// ============================================================================

/// A package: the whole file at top level, or a nested `package N { … }`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Package {
    pub name: SmolStr,
    pub imports: Vec<Import>,
    pub members: Vec<Entity>,
    pub problems: Vec<Problem>,
    pub source: Source,
}

/// `import some.package.Entity` or `import some.package.*`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Import {
    pub entity: Reference,
    /// `true` for the dot-star form, importing every member.
    pub is_generic: bool,
    pub source: Source,
}

/// `class N [inherits S] [mixed with A and B] { members }`
///
/// `mixins` is stored in reverse surface order: the rightmost listed mixin
/// comes first. The linearization downstream depends on this.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Class {
    pub name: SmolStr,
    pub superclass: Option<Reference>,
    pub mixins: Vec<Reference>,
    pub members: Vec<Member>,
    pub problems: Vec<Problem>,
    pub source: Source,
}

/// A named `object N … { members }` declaration, an anonymous
/// `object { … }` literal, or the desugared `new S(…) with M` form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Singleton {
    pub name: Option<SmolStr>,
    pub superclass: Option<Reference>,
    /// Arguments of the implicit supercall (`inherits S(args)`), possibly
    /// [`Expression::NamedArgument`]s.
    pub supercall_args: Vec<Expression>,
    pub mixins: Vec<Reference>,
    pub members: Vec<Member>,
    pub problems: Vec<Problem>,
    pub source: Source,
}

/// `mixin N [mixed with …] { members }`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mixin {
    pub name: SmolStr,
    pub mixins: Vec<Reference>,
    pub members: Vec<Member>,
    pub problems: Vec<Problem>,
    pub source: Source,
}

/// `program N { sentences }`: a named entry point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub name: SmolStr,
    pub body: Body,
    pub source: Source,
}

/// `describe "…" { members }`: a test suite.
///
/// `name` keeps the surrounding quotes exactly as written.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Describe {
    pub name: SmolStr,
    pub members: Vec<Member>,
    pub problems: Vec<Problem>,
    pub source: Source,
}

/// `[only] test "…" { sentences }`
///
/// `name` keeps the surrounding quotes exactly as written.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Test {
    pub is_only: bool,
    pub name: SmolStr,
    pub body: Body,
    pub source: Source,
}

/// `var x [= e]` / `const x [= e]`, as a sentence or a top-level entity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    pub is_read_only: bool,
    pub name: SmolStr,
    pub value: Option<Expression>,
    pub source: Source,
}

// ============================================================================
// Members
// ============================================================================

/// `(var|const) [property] name [= e]` inside a class, singleton or mixin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub is_read_only: bool,
    /// `true` when the `property` keyword follows the mutability keyword;
    /// only meaningful on fields.
    pub is_property: bool,
    pub name: SmolStr,
    pub value: Option<Expression>,
    pub source: Source,
}

/// `[override] method (name | operator) (params) body`
///
/// `name` is an identifier or an operator symbol such as `===`. A `None`
/// body denotes an abstract method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Method {
    pub is_override: bool,
    pub name: SmolStr,
    pub parameters: Vec<Parameter>,
    pub body: Option<MethodBody>,
    pub source: Source,
}

/// `constructor (params) [= (self|super)(args)] [{ sentences }]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constructor {
    pub parameters: Vec<Parameter>,
    pub base_call: Option<BaseCall>,
    /// Defaults to an empty body when omitted.
    pub body: Body,
    pub source: Source,
}

/// Delegation of a constructor to `self(…)` or `super(…)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseCall {
    pub calls_super: bool,
    pub args: Vec<Expression>,
}

/// `fixture { sentences }` inside a describe.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fixture {
    pub body: Body,
    pub source: Source,
}

// ============================================================================
// Sentences
// ============================================================================

/// `return [e]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Return {
    pub value: Option<Expression>,
    pub source: Source,
}

/// `ref = e`, or the canonical rewrite of a compound assignment: `x += e`
/// becomes `Assignment(x, Send(x, "+", [e]))`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub variable: Reference,
    pub value: Box<Expression>,
    pub source: Source,
}

// ============================================================================
// Expressions
// ============================================================================

/// The receiver of the current method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelfRef {
    pub source: Source,
}

/// `super(args)`: a call to the overridden method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuperCall {
    pub args: Vec<Expression>,
    pub source: Source,
}

/// `new R(args)`; also the desugared form of list and set literals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct New {
    pub instantiated: Reference,
    pub args: Vec<Expression>,
    pub source: Source,
}

/// `if (c) then [else other]`. Bodies are inlineable: a braced block or a
/// single sentence implicitly wrapped into a one-sentence body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct If {
    pub condition: Box<Expression>,
    pub then_body: Body,
    pub else_body: Option<Body>,
    pub source: Source,
}

/// `throw e`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Throw {
    pub exception: Box<Expression>,
    pub source: Source,
}

/// `try body (catch …)* [then always body]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Try {
    pub body: Body,
    pub catches: Vec<Catch>,
    pub always: Option<Body>,
    pub source: Source,
}

/// `catch e [: ExceptionType] body`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catch {
    pub parameter: Parameter,
    pub parameter_type: Option<Reference>,
    pub body: Body,
    pub source: Source,
}

/// A scalar, closure or object literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal {
    pub value: super::LiteralValue,
    pub source: Source,
}

/// A name standing for an entity or variable; fully-qualified references
/// keep the whole dotted path in `name`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference {
    pub name: SmolStr,
    pub source: Source,
}

/// `receiver.message(args)`; also the canonical form of every operator
/// application. Lazy operators (`|| && or and`) take a single
/// zero-parameter closure argument wrapping the right-hand side.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Send {
    pub receiver: Box<Expression>,
    pub message: SmolStr,
    pub args: Vec<Expression>,
    pub source: Source,
}

/// `name = value` inside an argument list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedArgument {
    pub name: SmolStr,
    pub value: Box<Expression>,
    pub source: Source,
}

/// `{ p1, …, pn => sentences }`. The `=>` may be omitted when there are
/// no parameters. `code` is the verbatim source substring of the literal,
/// braces included.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Closure {
    pub parameters: Vec<Parameter>,
    pub body: Body,
    pub code: String,
    pub source: Source,
}

/// A sequence of sentences with its own span.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    pub sentences: Vec<Sentence>,
    pub source: Source,
}

/// A formal parameter; `is_var_arg` marks the `name...` form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub name: SmolStr,
    pub is_var_arg: bool,
    pub source: Source,
}
