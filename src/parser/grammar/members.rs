//! Member grammar: fields, methods, constructors and fixtures.

use smol_str::SmolStr;

use super::{common, entities, sentences};
use crate::ast::{
    BaseCall, Body, Constructor, Field, Fixture, Member, Method, MethodBody, Return, Sentence,
};
use crate::parser::errors::ParseError;
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

/// Class bodies take constructors, fields and methods.
pub(crate) fn class_member(p: &mut Parser) -> Result<Member, ParseError> {
    match p.current_kind() {
        TokenKind::ConstructorKw => Ok(Member::Constructor(constructor(p)?)),
        TokenKind::VarKw | TokenKind::ConstKw => Ok(Member::Field(field(p)?)),
        TokenKind::MethodKw | TokenKind::OverrideKw => Ok(Member::Method(method(p)?)),
        _ => Err(p.error(format!(
            "expected a class member, found {}",
            p.current_kind().display_name()
        ))),
    }
}

/// Singleton and mixin bodies take fields and methods.
pub(crate) fn object_member(p: &mut Parser) -> Result<Member, ParseError> {
    match p.current_kind() {
        TokenKind::VarKw | TokenKind::ConstKw => Ok(Member::Field(field(p)?)),
        TokenKind::MethodKw | TokenKind::OverrideKw => Ok(Member::Method(method(p)?)),
        _ => Err(p.error(format!(
            "expected a member, found {}",
            p.current_kind().display_name()
        ))),
    }
}

/// Describe bodies take variables, fixtures, tests and methods.
pub(crate) fn describe_member(p: &mut Parser) -> Result<Member, ParseError> {
    match p.current_kind() {
        TokenKind::VarKw | TokenKind::ConstKw => Ok(Member::Variable(sentences::variable(p)?)),
        TokenKind::FixtureKw => Ok(Member::Fixture(fixture(p)?)),
        TokenKind::TestKw | TokenKind::OnlyKw => Ok(Member::Test(entities::test(p)?)),
        TokenKind::MethodKw | TokenKind::OverrideKw => Ok(Member::Method(method(p)?)),
        _ => Err(p.error(format!(
            "expected a describe member, found {}",
            p.current_kind().display_name()
        ))),
    }
}

/// `(var|const) [property] name [= e]`. The `property` key only counts
/// when another name follows it; otherwise it is the field's own name.
fn field(p: &mut Parser) -> Result<Field, ParseError> {
    let start = p.offset();
    let is_read_only = p.current_kind() == TokenKind::ConstKw;
    if !(p.eat(TokenKind::VarKw) || p.eat(TokenKind::ConstKw)) {
        return Err(p.error("expected 'var' or 'const'"));
    }
    let is_property = p.at(TokenKind::PropertyKw) && common::NAME_KINDS.contains(&p.nth(1));
    if is_property {
        p.bump();
    }
    let (name, _) = common::name(p)?;
    let value = if p.eat(TokenKind::Eq) {
        Some(super::expressions::expression(p)?)
    } else {
        None
    };
    Ok(Field {
        is_read_only,
        is_property,
        name,
        value,
        source: p.span_from(start),
    })
}

/// `[override] method (name | operator) (params)` followed by one of:
/// `= expr` (a synthesized single-return body), `native`, a block, or
/// nothing (abstract).
fn method(p: &mut Parser) -> Result<Method, ParseError> {
    let start = p.offset();
    let is_override = p.eat(TokenKind::OverrideKw);
    p.expect(TokenKind::MethodKw)?;
    let name = method_name(p)?;
    let parameters = common::parameters(p)?;
    let body = method_body(p)?;
    Ok(Method {
        is_override,
        name,
        parameters,
        body,
        source: p.span_from(start),
    })
}

fn method_name(p: &mut Parser) -> Result<SmolStr, ParseError> {
    if common::at_name(p) {
        return Ok(common::name(p)?.0);
    }
    if p.current_kind().is_operator() {
        return Ok(SmolStr::new(p.bump_token()?.text));
    }
    Err(p.error(format!(
        "expected method name or operator, found {}",
        p.current_kind().display_name()
    )))
}

fn method_body(p: &mut Parser) -> Result<Option<MethodBody>, ParseError> {
    if p.eat(TokenKind::Eq) {
        // `method m() = expr` synthesizes a single-Return body; both the
        // body and the return share the expression's span
        let expression = super::expressions::expression(p)?;
        let source = expression.source().clone();
        let sentences = vec![Sentence::Return(Return {
            value: Some(expression),
            source: source.clone(),
        })];
        return Ok(Some(MethodBody::Body(Body { sentences, source })));
    }
    if p.eat(TokenKind::NativeKw) {
        return Ok(Some(MethodBody::Native));
    }
    if p.at(TokenKind::LBrace) {
        return Ok(Some(MethodBody::Body(sentences::block_body(p)?)));
    }
    Ok(None)
}

/// `constructor (params) [= (self|super)(args)] [{ sentences }]`; a
/// missing body yields an empty one.
fn constructor(p: &mut Parser) -> Result<Constructor, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::ConstructorKw)?;
    let parameters = common::parameters(p)?;
    let base_call = if p.eat(TokenKind::Eq) {
        let calls_super = match p.current_kind() {
            TokenKind::SelfKw => false,
            TokenKind::SuperKw => true,
            _ => return Err(p.error("expected 'self' or 'super' in constructor delegation")),
        };
        p.bump();
        let args = common::arguments(p)?;
        Some(BaseCall { calls_super, args })
    } else {
        None
    };
    let body = if p.at(TokenKind::LBrace) {
        sentences::block_body(p)?
    } else {
        Body {
            sentences: vec![],
            source: p.empty_span(),
        }
    };
    Ok(Constructor {
        parameters,
        base_call,
        body,
        source: p.span_from(start),
    })
}

fn fixture(p: &mut Parser) -> Result<Fixture, ParseError> {
    let start = p.offset();
    p.expect(TokenKind::FixtureKw)?;
    let body = sentences::block_body(p)?;
    Ok(Fixture {
        body,
        source: p.span_from(start),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, LiteralValue};

    fn parse_class_member(input: &str) -> Member {
        let mut p = Parser::new("test.wlk", input);
        class_member(&mut p).expect("should parse")
    }

    #[test]
    fn test_expression_body_synthesizes_return() {
        let Member::Method(method) = parse_class_member("method m() = 1 + 2") else {
            panic!("expected a method");
        };
        let Some(MethodBody::Body(body)) = method.body else {
            panic!("expected a block body");
        };
        assert_eq!(body.sentences.len(), 1);
        let Sentence::Return(return_node) = &body.sentences[0] else {
            panic!("expected a return");
        };
        let Some(Expression::Send(send)) = &return_node.value else {
            panic!("expected a send");
        };
        assert_eq!(send.message, "+");
        // body, return and expression spans coincide
        assert_eq!(body.source, return_node.source);
        assert_eq!(return_node.source, send.source);
    }

    #[test]
    fn test_operator_method_longest_match() {
        let Member::Method(method) = parse_class_member("method === (other) = true") else {
            panic!("expected a method");
        };
        assert_eq!(method.name, "===");
        assert_eq!(method.parameters.len(), 1);
    }

    #[test]
    fn test_native_method() {
        let Member::Method(method) = parse_class_member("method randomize() native") else {
            panic!("expected a method");
        };
        assert_eq!(method.body, Some(MethodBody::Native));
    }

    #[test]
    fn test_abstract_method() {
        let Member::Method(method) = parse_class_member("method volar(distancia)") else {
            panic!("expected a method");
        };
        assert!(method.body.is_none());
    }

    #[test]
    fn test_override_method_with_block() {
        let Member::Method(method) =
            parse_class_member("override method energia() { return 100 }")
        else {
            panic!("expected a method");
        };
        assert!(method.is_override);
        assert!(matches!(method.body, Some(MethodBody::Body(_))));
    }

    #[test]
    fn test_property_field() {
        let Member::Field(field) = parse_class_member("var property energia = 100") else {
            panic!("expected a field");
        };
        assert!(field.is_property);
        assert!(!field.is_read_only);
        assert_eq!(field.name, "energia");
    }

    #[test]
    fn test_field_named_property() {
        let Member::Field(field) = parse_class_member("const property = 1") else {
            panic!("expected a field");
        };
        assert!(!field.is_property);
        assert!(field.is_read_only);
        assert_eq!(field.name, "property");
    }

    #[test]
    fn test_constructor_with_super_delegation() {
        let Member::Constructor(constructor) =
            parse_class_member("constructor(x) = super(x) { }")
        else {
            panic!("expected a constructor");
        };
        let base_call = constructor.base_call.expect("should delegate");
        assert!(base_call.calls_super);
        assert_eq!(base_call.args.len(), 1);
    }

    #[test]
    fn test_constructor_with_self_delegation_and_no_body() {
        let Member::Constructor(constructor) =
            parse_class_member("constructor() = self(1, 2)")
        else {
            panic!("expected a constructor");
        };
        let base_call = constructor.base_call.expect("should delegate");
        assert!(!base_call.calls_super);
        assert_eq!(base_call.args.len(), 2);
        assert!(constructor.body.sentences.is_empty());
    }

    #[test]
    fn test_field_with_literal_value() {
        let Member::Field(field) = parse_class_member("const nombre = \"pepita\"") else {
            panic!("expected a field");
        };
        assert!(matches!(
            field.value,
            Some(Expression::Literal(crate::ast::Literal {
                value: LiteralValue::String(_),
                ..
            }))
        ));
    }
}
