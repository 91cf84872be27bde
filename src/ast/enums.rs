//! Closed-family enums over the AST node structs.

use super::types::{
    Assignment, Body, Class, Closure, Constructor, Describe, Field, Fixture, If, Literal, Method,
    Mixin, NamedArgument, New, Package, Program, Reference, Return, SelfRef, Send, Singleton,
    SuperCall, Test, Throw, Try, Variable,
};
use crate::base::Source;

/// A top-level or nested container declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Entity {
    Package(Package),
    Class(Class),
    Singleton(Singleton),
    Mixin(Mixin),
    Program(Program),
    Describe(Describe),
    Test(Test),
    Variable(Variable),
}

impl Entity {
    pub fn source(&self) -> &Source {
        match self {
            Entity::Package(it) => &it.source,
            Entity::Class(it) => &it.source,
            Entity::Singleton(it) => &it.source,
            Entity::Mixin(it) => &it.source,
            Entity::Program(it) => &it.source,
            Entity::Describe(it) => &it.source,
            Entity::Test(it) => &it.source,
            Entity::Variable(it) => &it.source,
        }
    }

    /// The declared name, when the entity has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Entity::Package(it) => Some(&it.name),
            Entity::Class(it) => Some(&it.name),
            Entity::Singleton(it) => it.name.as_deref(),
            Entity::Mixin(it) => Some(&it.name),
            Entity::Program(it) => Some(&it.name),
            Entity::Describe(it) => Some(&it.name),
            Entity::Test(it) => Some(&it.name),
            Entity::Variable(it) => Some(&it.name),
        }
    }
}

/// A declaration inside an entity body. Which variants are legal depends on
/// the container: classes take constructors, fields and methods; singletons
/// and mixins take fields and methods; describes take variables, fixtures,
/// tests and methods.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Member {
    Field(Field),
    Method(Method),
    Constructor(Constructor),
    Fixture(Fixture),
    Variable(Variable),
    Test(Test),
}

impl Member {
    pub fn source(&self) -> &Source {
        match self {
            Member::Field(it) => &it.source,
            Member::Method(it) => &it.source,
            Member::Constructor(it) => &it.source,
            Member::Fixture(it) => &it.source,
            Member::Variable(it) => &it.source,
            Member::Test(it) => &it.source,
        }
    }
}

/// The body of a concrete method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MethodBody {
    /// Host-implemented; the body is the `native` marker.
    Native,
    /// A block body, or the synthesized single-`Return` body of the
    /// `method m() = expr` form.
    Body(Body),
}

/// A statement-level node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sentence {
    Variable(Variable),
    Return(Return),
    Assignment(Assignment),
    Expression(Expression),
}

impl Sentence {
    pub fn source(&self) -> &Source {
        match self {
            Sentence::Variable(it) => &it.source,
            Sentence::Return(it) => &it.source,
            Sentence::Assignment(it) => &it.source,
            Sentence::Expression(it) => it.source(),
        }
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    SelfRef(SelfRef),
    Super(SuperCall),
    New(New),
    If(If),
    Throw(Throw),
    Try(Try),
    Literal(Literal),
    Reference(Reference),
    Send(Send),
    NamedArgument(NamedArgument),
}

impl Expression {
    pub fn source(&self) -> &Source {
        match self {
            Expression::SelfRef(it) => &it.source,
            Expression::Super(it) => &it.source,
            Expression::New(it) => &it.source,
            Expression::If(it) => &it.source,
            Expression::Throw(it) => &it.source,
            Expression::Try(it) => &it.source,
            Expression::Literal(it) => &it.source,
            Expression::Reference(it) => &it.source,
            Expression::Send(it) => &it.source,
            Expression::NamedArgument(it) => &it.source,
        }
    }
}

/// The value of a [`Literal`] expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    /// A brace-delimited anonymous callable.
    Closure(Box<Closure>),
    /// An anonymous object: `object { … }` or `new S(…) with M`.
    Singleton(Box<Singleton>),
}
