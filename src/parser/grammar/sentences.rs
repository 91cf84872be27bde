//! Sentence grammar: variable declarations, returns, assignments and
//! expression statements. Sentences are separated by `;` or whitespace.

use smol_str::SmolStr;

use super::{common, expressions};
use crate::ast::{Assignment, Body, Expression, Reference, Return, Send, Sentence, Variable};
use crate::parser::errors::ParseError;
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

const ASSIGNMENT_OPERATORS: &[TokenKind] = &[
    TokenKind::Eq,
    TokenKind::PipePipeEq,
    TokenKind::AmpAmpEq,
    TokenKind::PlusEq,
    TokenKind::MinusEq,
    TokenKind::StarEq,
    TokenKind::SlashEq,
    TokenKind::PercentEq,
];

pub(crate) fn sentence(p: &mut Parser) -> Result<Sentence, ParseError> {
    match p.current_kind() {
        TokenKind::VarKw | TokenKind::ConstKw => Ok(Sentence::Variable(variable(p)?)),
        TokenKind::ReturnKw => return_sentence(p),
        _ => assignment_or_expression(p),
    }
}

/// `var x [= e]` / `const x [= e]`; also used for top-level and describe
/// variables.
pub(crate) fn variable(p: &mut Parser) -> Result<Variable, ParseError> {
    let start = p.offset();
    let is_read_only = match p.current_kind() {
        TokenKind::VarKw => false,
        TokenKind::ConstKw => true,
        _ => return Err(p.error("expected 'var' or 'const'")),
    };
    p.bump();
    let (name, _) = common::name(p)?;
    let value = if p.eat(TokenKind::Eq) {
        Some(expressions::expression(p)?)
    } else {
        None
    };
    Ok(Variable {
        is_read_only,
        name,
        value,
        source: p.span_from(start),
    })
}

fn return_sentence(p: &mut Parser) -> Result<Sentence, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::ReturnKw)?;
    let value = if expressions::at_expression_start(p) {
        Some(expressions::expression(p)?)
    } else {
        None
    };
    Ok(Sentence::Return(Return {
        value,
        source: p.span_from(start),
    }))
}

fn assignment_or_expression(p: &mut Parser) -> Result<Sentence, ParseError> {
    if common::at_name(p) {
        let checkpoint = p.checkpoint();
        let start = p.offset();
        let variable = common::reference(p)?;
        if p.at_any(ASSIGNMENT_OPERATORS) {
            let operator = p.bump_token()?;
            let value = expressions::expression(p)?;
            return Ok(Sentence::Assignment(build_assignment(
                p,
                start,
                variable,
                operator.text,
                value,
            )));
        }
        p.restore(checkpoint);
    }
    Ok(Sentence::Expression(expressions::expression(p)?))
}

/// A plain `=` assigns directly. A compound `X=` rewrites to an assignment
/// of `ref.X(rhs)`, with the right-hand side thunked when `X` is lazy.
/// The target reference is cloned into the send receiver so the tree stays
/// a tree.
fn build_assignment(
    p: &Parser,
    start: usize,
    variable: Reference,
    operator: &str,
    value: Expression,
) -> Assignment {
    let source = p.span_from(start);
    let value = if operator == "=" {
        value
    } else {
        let message = &operator[..operator.len() - 1];
        let args = if matches!(message, "||" | "&&") {
            vec![expressions::lazy_thunk(p, value)]
        } else {
            vec![value]
        };
        Expression::Send(Send {
            receiver: Box::new(Expression::Reference(variable.clone())),
            message: SmolStr::new(message),
            args,
            source: source.clone(),
        })
    };
    Assignment {
        variable,
        value: Box::new(value),
        source,
    }
}

/// Sentences up to (not including) `end`, eating `;` separators.
pub(crate) fn sentences_until(
    p: &mut Parser,
    end: TokenKind,
) -> Result<Vec<Sentence>, ParseError> {
    let mut sentences = vec![];
    p.eat_separators();
    while !p.at(end) && !p.at_eof() {
        sentences.push(sentence(p)?);
        p.eat_separators();
    }
    Ok(sentences)
}

/// `{ sentences }`; the body's span includes the braces.
pub(crate) fn block_body(p: &mut Parser) -> Result<Body, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::LBrace)?;
    let sentences = sentences_until(p, TokenKind::RBrace)?;
    p.expect(TokenKind::RBrace)?;
    Ok(Body {
        sentences,
        source: p.span_from(start),
    })
}

/// A braced block, or a single sentence implicitly wrapped into a
/// one-sentence body sharing its span.
pub(crate) fn inlineable_body(p: &mut Parser) -> Result<Body, ParseError> {
    if p.at(TokenKind::LBrace) {
        return block_body(p);
    }
    let inline = sentence(p)?;
    let source = inline.source().clone();
    Ok(Body {
        sentences: vec![inline],
        source,
    })
}
