//! Names, references, parameter lists and argument lists.

use smol_str::SmolStr;

use super::expressions;
use crate::ast::{Expression, NamedArgument, Parameter, Reference};
use crate::base::Source;
use crate::parser::errors::ParseError;
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

/// Token kinds accepted where a plain name is expected. Besides `Ident`
/// this includes the contextual keywords, which are only meaningful in
/// specific grammar positions and stay usable as names everywhere else.
pub(crate) const NAME_KINDS: &[TokenKind] = &[
    TokenKind::Ident,
    TokenKind::PropertyKw,
    TokenKind::OnlyKw,
    TokenKind::ThenKw,
    TokenKind::AlwaysKw,
    TokenKind::NativeKw,
    TokenKind::FixtureKw,
    TokenKind::MixedKw,
];

pub(crate) fn at_name(p: &Parser) -> bool {
    p.at_any(NAME_KINDS)
}

/// A single identifier (or contextual keyword) with its span.
pub(crate) fn name(p: &mut Parser) -> Result<(SmolStr, Source), ParseError> {
    if !at_name(p) {
        return Err(p.error(format!(
            "expected identifier, found {}",
            p.current_kind().display_name()
        )));
    }
    let start = p.offset();
    let token = p.bump_token()?;
    Ok((SmolStr::new(token.text), p.span_from(start)))
}

/// A plain, single-name reference.
pub(crate) fn reference(p: &mut Parser) -> Result<Reference, ParseError> {
    let (name, source) = name(p)?;
    Ok(Reference { name, source })
}

/// A dot-joined reference such as `wollok.lang.Object`, stored as one
/// dotted name. A trailing `.*` is left for the caller (imports).
pub(crate) fn qualified_reference(p: &mut Parser) -> Result<Reference, ParseError> {
    let start = p.offset();
    let (first, _) = name(p)?;
    let mut full = first.to_string();
    while p.at(TokenKind::Dot) && NAME_KINDS.contains(&p.nth(1)) {
        p.bump();
        let (part, _) = name(p)?;
        full.push('.');
        full.push_str(&part);
    }
    Ok(Reference {
        name: SmolStr::new(full),
        source: p.span_from(start),
    })
}

/// A parenthesized formal parameter list; `name...` marks varargs.
pub(crate) fn parameters(p: &mut Parser) -> Result<Vec<Parameter>, ParseError> {
    p.expect(TokenKind::LParen)?;
    let mut parameters = vec![];
    if at_name(p) {
        loop {
            parameters.push(parameter(p)?);
            if !p.eat(TokenKind::Comma) {
                break;
            }
        }
    }
    p.expect(TokenKind::RParen)?;
    Ok(parameters)
}

pub(crate) fn parameter(p: &mut Parser) -> Result<Parameter, ParseError> {
    let start = p.offset();
    let (name, _) = name(p)?;
    let is_var_arg = p.eat(TokenKind::DotDotDot);
    Ok(Parameter {
        name,
        is_var_arg,
        source: p.span_from(start),
    })
}

/// A parenthesized argument list, either positional or named; the named
/// form is chosen when the list opens with `name =`.
pub(crate) fn arguments(p: &mut Parser) -> Result<Vec<Expression>, ParseError> {
    p.expect(TokenKind::LParen)?;
    let mut args = vec![];
    if !p.at(TokenKind::RParen) {
        let named = at_name(p) && p.nth(1) == TokenKind::Eq;
        loop {
            if named {
                args.push(named_argument(p)?);
            } else {
                args.push(expressions::expression(p)?);
            }
            if !p.eat(TokenKind::Comma) {
                break;
            }
        }
    }
    p.expect(TokenKind::RParen)?;
    Ok(args)
}

fn named_argument(p: &mut Parser) -> Result<Expression, ParseError> {
    let start = p.offset();
    let (name, _) = name(p)?;
    p.expect(TokenKind::Eq)?;
    let value = expressions::expression(p)?;
    Ok(Expression::NamedArgument(NamedArgument {
        name,
        value: Box::new(value),
        source: p.span_from(start),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(input: &str) -> Parser<'_> {
        Parser::new("test.wlk", input)
    }

    #[test]
    fn test_qualified_reference_joins_dots() {
        let mut p = parser("wollok.lang.Object");
        let reference = qualified_reference(&mut p).unwrap();
        assert_eq!(reference.name, "wollok.lang.Object");
        assert!(p.at_eof());
    }

    #[test]
    fn test_qualified_reference_leaves_dot_star() {
        let mut p = parser("aves.*");
        let reference = qualified_reference(&mut p).unwrap();
        assert_eq!(reference.name, "aves");
        assert!(p.at(TokenKind::Dot));
    }

    #[test]
    fn test_contextual_keyword_as_name() {
        let mut p = parser("property");
        let (name, _) = name(&mut p).unwrap();
        assert_eq!(name, "property");
    }

    #[test]
    fn test_parameters_with_varargs() {
        let mut p = parser("(a, rest...)");
        let params = parameters(&mut p).unwrap();
        assert_eq!(params.len(), 2);
        assert!(!params[0].is_var_arg);
        assert!(params[1].is_var_arg);
        assert_eq!(params[1].name, "rest");
    }

    #[test]
    fn test_named_arguments() {
        let mut p = parser("(x = 1, y = 2)");
        let args = arguments(&mut p).unwrap();
        assert_eq!(args.len(), 2);
        assert!(matches!(args[0], Expression::NamedArgument(_)));
    }

    #[test]
    fn test_positional_arguments_with_comparison() {
        let mut p = parser("(x == 1)");
        let args = arguments(&mut p).unwrap();
        assert_eq!(args.len(), 1);
        assert!(matches!(args[0], Expression::Send(_)));
    }
}
