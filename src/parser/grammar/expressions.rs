//! Expression grammar.
//!
//! Wollok unifies operators with message sends: every infix application
//! folds into a `Send` on its left operand, and the lazy operators
//! (`|| && or and`) defer their right-hand side inside a zero-parameter
//! closure. Precedence climbing runs over the static level table below;
//! left associativity falls out of the fold loop.

use smol_str::SmolStr;

use super::{common, entities, sentences};
use crate::ast::{
    Body, Catch, Closure, Expression, If, Literal, LiteralValue, New, Parameter, Reference,
    SelfRef, Send, Sentence, Singleton, SuperCall, Throw, Try,
};
use crate::parser::errors::ParseError;
use crate::parser::lexer::unescape;
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

/// Infix operators, lowest precedence first. Each level is left
/// associative and binds looser than the next.
const LEVEL_OPERATORS: [&[TokenKind]; 8] = [
    &[TokenKind::PipePipe, TokenKind::OrKw],
    &[TokenKind::AmpAmp, TokenKind::AndKw],
    &[
        TokenKind::EqEqEq,
        TokenKind::EqEq,
        TokenKind::BangEqEq,
        TokenKind::BangEq,
    ],
    &[TokenKind::GtEq, TokenKind::Gt, TokenKind::LtEq, TokenKind::Lt],
    &[
        TokenKind::QuestionColon,
        TokenKind::GtGtGt,
        TokenKind::GtGt,
        TokenKind::GtDotDot,
        TokenKind::LtGt,
        TokenKind::LtEqGt,
        TokenKind::LtLtLt,
        TokenKind::LtLt,
        TokenKind::DotDotLt,
        TokenKind::DotDot,
        TokenKind::Arrow,
    ],
    &[TokenKind::Minus, TokenKind::Plus],
    &[TokenKind::Slash, TokenKind::Star],
    &[TokenKind::StarStar, TokenKind::Percent],
];

const PREFIX_OPERATORS: &[TokenKind] = &[
    TokenKind::Bang,
    TokenKind::NotKw,
    TokenKind::Minus,
    TokenKind::Plus,
];

pub(crate) fn expression(p: &mut Parser) -> Result<Expression, ParseError> {
    infix(p, 0)
}

/// Quick check whether an expression may start at the cursor; used where
/// an expression is optional, e.g. after `return`.
pub(crate) fn at_expression_start(p: &Parser) -> bool {
    common::at_name(p)
        || p.at_any(PREFIX_OPERATORS)
        || matches!(
            p.current_kind(),
            TokenKind::SelfKw
                | TokenKind::SuperKw
                | TokenKind::IfKw
                | TokenKind::NewKw
                | TokenKind::ThrowKw
                | TokenKind::TryKw
                | TokenKind::ObjectKw
                | TokenKind::LBrace
                | TokenKind::LBracket
                | TokenKind::HashLBrace
                | TokenKind::LParen
                | TokenKind::TrueKw
                | TokenKind::FalseKw
                | TokenKind::NullKw
                | TokenKind::Number
                | TokenKind::Str
        )
}

fn infix(p: &mut Parser, level: usize) -> Result<Expression, ParseError> {
    if level == LEVEL_OPERATORS.len() {
        return prefixed(p);
    }
    let start = p.offset();
    let mut acc = infix(p, level + 1)?;
    while p.at_any(LEVEL_OPERATORS[level]) {
        let operator = p.bump_token()?;
        let rhs = infix(p, level + 1)?;
        let args = if is_lazy(operator.text) {
            vec![lazy_thunk(p, rhs)]
        } else {
            vec![rhs]
        };
        acc = Expression::Send(Send {
            receiver: Box::new(acc),
            message: SmolStr::new(operator.text),
            args,
            source: p.span_from(start),
        });
    }
    Ok(acc)
}

fn is_lazy(operator: &str) -> bool {
    matches!(operator, "||" | "&&" | "or" | "and")
}

/// Wrap an already-parsed right-hand side in a zero-parameter closure so
/// its evaluation is deferred. The thunk's `code` is the verbatim text of
/// the wrapped expression.
pub(crate) fn lazy_thunk(p: &Parser, rhs: Expression) -> Expression {
    let source = rhs.source().clone();
    let code = p
        .slice(source.start.offset, source.end.offset)
        .to_string();
    Expression::Literal(Literal {
        value: LiteralValue::Closure(Box::new(Closure {
            parameters: vec![],
            body: Body {
                sentences: vec![Sentence::Expression(rhs)],
                source: source.clone(),
            },
            code,
            source: source.clone(),
        })),
        source,
    })
}

/// Stacked prefix operators, folded right-to-left into argument-less
/// sends: `!-x` is `x.invert().negate()`. A `-` glued to a number stays
/// for the primary parser, which reads it as a negative literal.
fn prefixed(p: &mut Parser) -> Result<Expression, ParseError> {
    let mut operators = vec![];
    while p.at_any(PREFIX_OPERATORS) && !p.at_negative_number() {
        let start = p.offset();
        let token = p.bump_token()?;
        operators.push((start, token.text));
    }
    let mut acc = send_chain(p)?;
    for (start, operator) in operators.into_iter().rev() {
        acc = Expression::Send(Send {
            receiver: Box::new(acc),
            message: prefix_message(operator),
            args: vec![],
            source: p.span_from(start),
        });
    }
    Ok(acc)
}

fn prefix_message(operator: &str) -> SmolStr {
    SmolStr::new_static(match operator {
        "!" | "not" => "negate",
        "-" => "invert",
        _ => "plus",
    })
}

/// A primary followed by any number of `.name(args)` / `.name { closure }`
/// segments, folded left-associatively.
fn send_chain(p: &mut Parser) -> Result<Expression, ParseError> {
    let start = p.offset();
    let mut acc = primary(p)?;
    while p.eat(TokenKind::Dot) {
        let (message, _) = common::name(p)?;
        let args = if p.at(TokenKind::LParen) {
            common::arguments(p)?
        } else if p.at(TokenKind::LBrace) {
            vec![closure_expression(p)?]
        } else {
            return Err(p.error(format!(
                "expected arguments or a closure after '{message}'"
            )));
        };
        acc = Expression::Send(Send {
            receiver: Box::new(acc),
            message,
            args,
            source: p.span_from(start),
        });
    }
    Ok(acc)
}

fn primary(p: &mut Parser) -> Result<Expression, ParseError> {
    match p.current_kind() {
        TokenKind::SelfKw => {
            let start = p.offset();
            p.bump();
            Ok(Expression::SelfRef(SelfRef {
                source: p.span_from(start),
            }))
        }
        TokenKind::SuperKw => super_call(p),
        TokenKind::IfKw => if_expression(p),
        TokenKind::NewKw => new_expression(p),
        TokenKind::ThrowKw => throw_expression(p),
        TokenKind::TryKw => try_expression(p),
        TokenKind::ObjectKw => object_literal(p),
        TokenKind::LBrace => closure_expression(p),
        TokenKind::LBracket => {
            collection_literal(p, TokenKind::LBracket, TokenKind::RBracket, "wollok.lang.List")
        }
        TokenKind::HashLBrace => {
            collection_literal(p, TokenKind::HashLBrace, TokenKind::RBrace, "wollok.lang.Set")
        }
        TokenKind::TrueKw
        | TokenKind::FalseKw
        | TokenKind::NullKw
        | TokenKind::Number
        | TokenKind::Str => scalar_literal(p),
        TokenKind::Minus if p.at_negative_number() => scalar_literal(p),
        TokenKind::LParen => {
            p.bump();
            let inner = expression(p)?;
            p.expect(TokenKind::RParen)?;
            Ok(inner)
        }
        _ if common::at_name(p) => Ok(Expression::Reference(common::reference(p)?)),
        _ => Err(p.error(format!(
            "expected an expression, found {}",
            p.current_kind().display_name()
        ))),
    }
}

fn scalar_literal(p: &mut Parser) -> Result<Expression, ParseError> {
    let start = p.offset();
    let value = match p.current_kind() {
        TokenKind::TrueKw => {
            p.bump();
            LiteralValue::Boolean(true)
        }
        TokenKind::FalseKw => {
            p.bump();
            LiteralValue::Boolean(false)
        }
        TokenKind::NullKw => {
            p.bump();
            LiteralValue::Null
        }
        TokenKind::Number => number_value(p, false)?,
        TokenKind::Minus => {
            p.bump();
            number_value(p, true)?
        }
        TokenKind::Str => {
            let token = p.expect(TokenKind::Str)?;
            match unescape(token.text) {
                Some(decoded) => LiteralValue::String(decoded),
                None => {
                    return Err(ParseError::new(
                        "invalid escape sequence in string literal",
                        token.offset,
                    ));
                }
            }
        }
        _ => return Err(p.error("expected a literal")),
    };
    Ok(Expression::Literal(Literal {
        value,
        source: p.span_from(start),
    }))
}

fn number_value(p: &mut Parser, negative: bool) -> Result<LiteralValue, ParseError> {
    let token = p.expect(TokenKind::Number)?;
    let value: f64 = token
        .text
        .parse()
        .map_err(|_| ParseError::new("invalid number literal", token.offset))?;
    Ok(LiteralValue::Number(if negative { -value } else { value }))
}

/// `[e1, …]` and `#{e1, …}` desugar into instantiations of the core
/// collection classes; the linker resolves the references.
fn collection_literal(
    p: &mut Parser,
    open: TokenKind,
    close: TokenKind,
    class_name: &'static str,
) -> Result<Expression, ParseError> {
    let start = p.offset();
    p.expect(open)?;
    let mut args = vec![];
    if !p.at(close) {
        loop {
            args.push(expression(p)?);
            if !p.eat(TokenKind::Comma) {
                break;
            }
        }
    }
    p.expect(close)?;
    let source = p.span_from(start);
    Ok(Expression::New(New {
        instantiated: Reference {
            name: SmolStr::new_static(class_name),
            source: source.clone(),
        },
        args,
        source,
    }))
}

fn super_call(p: &mut Parser) -> Result<Expression, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::SuperKw)?;
    let args = common::arguments(p)?;
    Ok(Expression::Super(SuperCall {
        args,
        source: p.span_from(start),
    }))
}

fn if_expression(p: &mut Parser) -> Result<Expression, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::IfKw)?;
    p.expect(TokenKind::LParen)?;
    let condition = expression(p)?;
    p.expect(TokenKind::RParen)?;
    let then_body = sentences::inlineable_body(p)?;
    let else_body = if p.eat(TokenKind::ElseKw) {
        Some(sentences::inlineable_body(p)?)
    } else {
        None
    };
    Ok(Expression::If(If {
        condition: Box::new(condition),
        then_body,
        else_body,
        source: p.span_from(start),
    }))
}

fn throw_expression(p: &mut Parser) -> Result<Expression, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::ThrowKw)?;
    let exception = expression(p)?;
    Ok(Expression::Throw(Throw {
        exception: Box::new(exception),
        source: p.span_from(start),
    }))
}

fn try_expression(p: &mut Parser) -> Result<Expression, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::TryKw)?;
    let body = sentences::inlineable_body(p)?;
    let mut catches = vec![];
    while p.at(TokenKind::CatchKw) {
        catches.push(catch_clause(p)?);
    }
    // `then always` is a single two-word key; a lone `then` is a name
    let always = if p.at(TokenKind::ThenKw) && p.nth(1) == TokenKind::AlwaysKw {
        p.bump();
        p.bump();
        Some(sentences::inlineable_body(p)?)
    } else {
        None
    };
    Ok(Expression::Try(Try {
        body,
        catches,
        always,
        source: p.span_from(start),
    }))
}

fn catch_clause(p: &mut Parser) -> Result<Catch, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::CatchKw)?;
    let parameter_start = p.offset();
    let (name, _) = common::name(p)?;
    let parameter = Parameter {
        name,
        is_var_arg: false,
        source: p.span_from(parameter_start),
    };
    let parameter_type = if p.eat(TokenKind::Colon) {
        Some(common::qualified_reference(p)?)
    } else {
        None
    };
    let body = sentences::inlineable_body(p)?;
    Ok(Catch {
        parameter,
        parameter_type,
        body,
        source: p.span_from(start),
    })
}

/// `new R(args)` instantiates; `new R(args) with M1 with M2` builds an
/// anonymous singleton whose mixins are listed in reverse surface order.
fn new_expression(p: &mut Parser) -> Result<Expression, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::NewKw)?;
    let instantiated = common::qualified_reference(p)?;
    let args = common::arguments(p)?;
    let mut mixins = vec![];
    while p.eat(TokenKind::WithKw) {
        mixins.push(common::qualified_reference(p)?);
    }
    let source = p.span_from(start);
    if mixins.is_empty() {
        return Ok(Expression::New(New {
            instantiated,
            args,
            source,
        }));
    }
    mixins.reverse();
    Ok(Expression::Literal(Literal {
        value: LiteralValue::Singleton(Box::new(Singleton {
            name: None,
            superclass: Some(instantiated),
            supercall_args: args,
            mixins,
            members: vec![],
            problems: vec![],
            source: source.clone(),
        })),
        source,
    }))
}

fn object_literal(p: &mut Parser) -> Result<Expression, ParseError> {
    let start = p.offset();
    let singleton = entities::anonymous_singleton(p)?;
    let source = p.span_from(start);
    Ok(Expression::Literal(Literal {
        value: LiteralValue::Singleton(Box::new(singleton)),
        source,
    }))
}

/// A closure literal wrapped as an expression.
pub(crate) fn closure_expression(p: &mut Parser) -> Result<Expression, ParseError> {
    let start = p.offset();
    let closure = closure_literal(p)?;
    Ok(Expression::Literal(Literal {
        value: LiteralValue::Closure(Box::new(closure)),
        source: p.span_from(start),
    }))
}

/// `{ p1, …, pn => sentences }`; the `=>` may be omitted when there are no
/// parameters. The verbatim text of the literal, braces included, is kept
/// as `code`.
fn closure_literal(p: &mut Parser) -> Result<Closure, ParseError> {
    let start = p.offset();
    let open = p.expect(TokenKind::LBrace)?;
    let checkpoint = p.checkpoint();
    let parameters = match closure_parameters(p) {
        Ok(parameters) => parameters,
        Err(_) => {
            p.restore(checkpoint);
            vec![]
        }
    };
    let body_start = p.offset();
    let body_sentences = sentences::sentences_until(p, TokenKind::RBrace)?;
    let body_source = p.span_from(body_start);
    let close = p.expect(TokenKind::RBrace)?;
    Ok(Closure {
        parameters,
        body: Body {
            sentences: body_sentences,
            source: body_source,
        },
        code: p.slice(open.offset, close.end()).to_string(),
        source: p.span_from(start),
    })
}

fn closure_parameters(p: &mut Parser) -> Result<Vec<Parameter>, ParseError> {
    let mut parameters = vec![];
    if common::at_name(p) {
        loop {
            parameters.push(common::parameter(p)?);
            if !p.eat(TokenKind::Comma) {
                break;
            }
        }
    }
    p.expect(TokenKind::FatArrow)?;
    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn parse(input: &str) -> Expression {
        parse_expression("test.wlk", input).expect("should parse")
    }

    fn send(expression: &Expression) -> &Send {
        match expression {
            Expression::Send(send) => send,
            other => panic!("expected a send, got {other:?}"),
        }
    }

    #[test]
    fn test_operator_precedence() {
        // 1 + 2 * 3 ** 4 == 5 groups as ((1 + (2 * (3 ** 4))) == 5)
        let comparison = parse("1 + 2 * 3 ** 4 == 5");
        let outer = send(&comparison);
        assert_eq!(outer.message, "==");
        let addition = send(&outer.receiver);
        assert_eq!(addition.message, "+");
        let product = send(&addition.args[0]);
        assert_eq!(product.message, "*");
        let power = send(&product.args[0]);
        assert_eq!(power.message, "**");
    }

    #[test]
    fn test_left_associativity() {
        let expression = parse("1 - 2 - 3");
        let outer = send(&expression);
        assert_eq!(outer.message, "-");
        let inner = send(&outer.receiver);
        assert_eq!(inner.message, "-");
        assert!(matches!(
            inner.receiver.as_ref(),
            Expression::Literal(Literal {
                value: LiteralValue::Number(n),
                ..
            }) if *n == 1.0
        ));
    }

    #[test]
    fn test_lazy_operator_thunks_rhs() {
        for input in ["a || b", "a && b", "a or b", "a and b"] {
            let expression = parse(input);
            let operation = send(&expression);
            assert_eq!(operation.args.len(), 1, "in {input}");
            let Expression::Literal(Literal {
                value: LiteralValue::Closure(closure),
                ..
            }) = &operation.args[0]
            else {
                panic!("expected a closure argument in {input}");
            };
            assert!(closure.parameters.is_empty());
            assert_eq!(closure.body.sentences.len(), 1);
        }
    }

    #[test]
    fn test_eager_operator_keeps_rhs() {
        let expression = parse("a + b");
        let operation = send(&expression);
        assert_eq!(operation.args.len(), 1);
        assert!(matches!(operation.args[0], Expression::Reference(_)));
    }

    #[test]
    fn test_prefix_operators_stack() {
        let expression = parse("!-x");
        let outer = send(&expression);
        assert_eq!(outer.message, "negate");
        assert!(outer.args.is_empty());
        let inner = send(&outer.receiver);
        assert_eq!(inner.message, "invert");
    }

    #[test]
    fn test_not_keyword_prefix() {
        let expression = parse("not ready");
        assert_eq!(send(&expression).message, "negate");
    }

    #[test]
    fn test_negative_number_literal() {
        let expression = parse("-1");
        assert!(matches!(
            expression,
            Expression::Literal(Literal {
                value: LiteralValue::Number(n),
                ..
            }) if n == -1.0
        ));
    }

    #[test]
    fn test_minus_with_space_is_prefix_send() {
        let expression = parse("- 1");
        assert_eq!(send(&expression).message, "invert");
    }

    #[test]
    fn test_subtraction_of_negative_literal() {
        let expression = parse("1 - -2");
        let operation = send(&expression);
        assert_eq!(operation.message, "-");
        assert!(matches!(
            &operation.args[0],
            Expression::Literal(Literal {
                value: LiteralValue::Number(n),
                ..
            }) if *n == -2.0
        ));
    }

    #[test]
    fn test_send_chain_folds_left() {
        let expression = parse("a.b().c()");
        let outer = send(&expression);
        assert_eq!(outer.message, "c");
        let inner = send(&outer.receiver);
        assert_eq!(inner.message, "b");
    }

    #[test]
    fn test_closure_as_send_argument() {
        let expression = parse("xs.map { x => x * 2 }");
        let operation = send(&expression);
        assert_eq!(operation.message, "map");
        assert_eq!(operation.args.len(), 1);
        let Expression::Literal(Literal {
            value: LiteralValue::Closure(closure),
            ..
        }) = &operation.args[0]
        else {
            panic!("expected a closure argument");
        };
        assert_eq!(closure.parameters.len(), 1);
        assert_eq!(closure.parameters[0].name, "x");
        assert_eq!(closure.code, "{ x => x * 2 }");
    }

    #[test]
    fn test_zero_parameter_closure_without_arrow() {
        let expression = parse("{ 1 + 2 }");
        let Expression::Literal(Literal {
            value: LiteralValue::Closure(closure),
            ..
        }) = expression
        else {
            panic!("expected a closure literal");
        };
        assert!(closure.parameters.is_empty());
        assert_eq!(closure.body.sentences.len(), 1);
    }

    #[test]
    fn test_list_literal_desugars_to_new() {
        let expression = parse("[1, 2, 3]");
        let Expression::New(new) = expression else {
            panic!("expected a New node");
        };
        assert_eq!(new.instantiated.name, "wollok.lang.List");
        assert_eq!(new.args.len(), 3);
    }

    #[test]
    fn test_set_literal_desugars_to_new() {
        let expression = parse("#{1, 2}");
        let Expression::New(new) = expression else {
            panic!("expected a New node");
        };
        assert_eq!(new.instantiated.name, "wollok.lang.Set");
        assert_eq!(new.args.len(), 2);
    }

    #[test]
    fn test_new_with_mixins_desugars_to_singleton_literal() {
        let expression = parse("new A(1) with M1 with M2");
        let Expression::Literal(Literal {
            value: LiteralValue::Singleton(singleton),
            ..
        }) = expression
        else {
            panic!("expected a singleton literal");
        };
        assert_eq!(singleton.name, None);
        assert_eq!(singleton.superclass.as_ref().unwrap().name, "A");
        assert_eq!(singleton.supercall_args.len(), 1);
        let mixin_names: Vec<_> = singleton.mixins.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(mixin_names, ["M2", "M1"]);
        assert!(singleton.members.is_empty());
    }

    #[test]
    fn test_string_escapes_are_decoded() {
        let expression = parse(r#""a\tbA""#);
        assert!(matches!(
            expression,
            Expression::Literal(Literal {
                value: LiteralValue::String(s),
                ..
            }) if s == "a\tbA"
        ));
    }

    #[test]
    fn test_invalid_escape_is_an_error() {
        assert!(parse_expression("test.wlk", r#""bad\q""#).is_err());
    }

    #[test]
    fn test_parenthesized_grouping() {
        let expression = parse("(1 + 2) * 3");
        let product = send(&expression);
        assert_eq!(product.message, "*");
        assert_eq!(send(&product.receiver).message, "+");
    }

    #[test]
    fn test_if_else_inline_bodies() {
        let expression = parse("if (a) 1 else 2");
        let Expression::If(if_node) = expression else {
            panic!("expected an if");
        };
        assert_eq!(if_node.then_body.sentences.len(), 1);
        assert_eq!(if_node.else_body.unwrap().sentences.len(), 1);
    }

    #[test]
    fn test_try_catch_always() {
        let expression =
            parse("try { bomb.boom() } catch e : Exception { e.message() } then always { bomb.reset() }");
        let Expression::Try(try_node) = expression else {
            panic!("expected a try");
        };
        assert_eq!(try_node.catches.len(), 1);
        let catch = &try_node.catches[0];
        assert_eq!(catch.parameter.name, "e");
        assert_eq!(catch.parameter_type.as_ref().unwrap().name, "Exception");
        assert!(try_node.always.is_some());
    }

    #[test]
    fn test_throw() {
        let expression = parse("throw new Exception()");
        assert!(matches!(expression, Expression::Throw(_)));
    }

    #[test]
    fn test_elvis_and_range_operators() {
        assert_eq!(send(&parse("a ?: b")).message, "?:");
        assert_eq!(send(&parse("1 .. 5")).message, "..");
        assert_eq!(send(&parse("1 ..< 5")).message, "..<");
        assert_eq!(send(&parse("1 >.. 5")).message, ">..");
        assert_eq!(send(&parse("a <=> b")).message, "<=>");
    }

    #[test]
    fn test_object_literal() {
        let expression = parse("object { method m() = 1 }");
        let Expression::Literal(Literal {
            value: LiteralValue::Singleton(singleton),
            ..
        }) = expression
        else {
            panic!("expected a singleton literal");
        };
        assert_eq!(singleton.name, None);
        assert_eq!(singleton.members.len(), 1);
    }

    #[test]
    fn test_super_call() {
        let expression = parse("super(1, 2)");
        let Expression::Super(super_call) = expression else {
            panic!("expected a super call");
        };
        assert_eq!(super_call.args.len(), 2);
    }
}
