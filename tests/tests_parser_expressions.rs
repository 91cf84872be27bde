//! Parser Tests - Expressions
//!
//! Operator-to-message folding across all precedence levels, checked
//! through the public expression entry point.

use rstest::rstest;
use wollok::ast::{Expression, Literal, LiteralValue};
use wollok::parse_expression;

fn parse(input: &str) -> Expression {
    parse_expression("repl.wlk", input).expect("should parse")
}

// ============================================================================
// Every infix operator folds into a send named after it
// ============================================================================

#[rstest]
#[case("a || b", "||")]
#[case("a or b", "or")]
#[case("a && b", "&&")]
#[case("a and b", "and")]
#[case("a === b", "===")]
#[case("a == b", "==")]
#[case("a !== b", "!==")]
#[case("a != b", "!=")]
#[case("a >= b", ">=")]
#[case("a > b", ">")]
#[case("a <= b", "<=")]
#[case("a < b", "<")]
#[case("a ?: b", "?:")]
#[case("a >>> b", ">>>")]
#[case("a >> b", ">>")]
#[case("a >.. b", ">..")]
#[case("a <> b", "<>")]
#[case("a <=> b", "<=>")]
#[case("a <<< b", "<<<")]
#[case("a << b", "<<")]
#[case("a ..< b", "..<")]
#[case("a .. b", "..")]
#[case("a -> b", "->")]
#[case("a - b", "-")]
#[case("a + b", "+")]
#[case("a / b", "/")]
#[case("a * b", "*")]
#[case("a ** b", "**")]
#[case("a % b", "%")]
fn test_infix_operator_message(#[case] input: &str, #[case] message: &str) {
    let Expression::Send(send) = parse(input) else {
        panic!("expected a send for {input}");
    };
    assert_eq!(send.message, message);
    assert_eq!(send.args.len(), 1);
}

#[rstest]
#[case("!a", "negate")]
#[case("not a", "negate")]
#[case("- a", "invert")]
#[case("+a", "plus")]
fn test_prefix_operator_message(#[case] input: &str, #[case] message: &str) {
    let Expression::Send(send) = parse(input) else {
        panic!("expected a send for {input}");
    };
    assert_eq!(send.message, message);
    assert!(send.args.is_empty());
}

// ============================================================================
// Precedence pairs: the looser operator ends up outermost
// ============================================================================

#[rstest]
#[case("a || b && c", "||", "&&")]
#[case("a && b == c", "&&", "==")]
#[case("a == b < c", "==", "<")]
#[case("a < b .. c", "<", "..")]
#[case("a .. b + c", "..", "+")]
#[case("a + b * c", "+", "*")]
#[case("a * b ** c", "*", "**")]
#[case("a * b % c", "*", "%")]
fn test_precedence_pair(#[case] input: &str, #[case] outer: &str, #[case] inner: &str) {
    let Expression::Send(send) = parse(input) else {
        panic!("expected a send for {input}");
    };
    assert_eq!(send.message, outer);
    let rhs = &send.args[0];
    // lazy operators thunk their rhs; unwrap the closure first
    let inner_expression = match rhs {
        Expression::Literal(Literal {
            value: LiteralValue::Closure(closure),
            ..
        }) => {
            let wollok::ast::Sentence::Expression(e) = &closure.body.sentences[0] else {
                panic!("expected an expression in the thunk");
            };
            e.clone()
        }
        other => other.clone(),
    };
    let Expression::Send(inner_send) = inner_expression else {
        panic!("expected an inner send for {input}");
    };
    assert_eq!(inner_send.message, inner);
}

// ============================================================================
// Scalars
// ============================================================================

#[rstest]
#[case("null", LiteralValue::Null)]
#[case("true", LiteralValue::Boolean(true))]
#[case("false", LiteralValue::Boolean(false))]
#[case("42", LiteralValue::Number(42.0))]
#[case("1.5", LiteralValue::Number(1.5))]
#[case("-7", LiteralValue::Number(-7.0))]
fn test_scalar_literals(#[case] input: &str, #[case] expected: LiteralValue) {
    let Expression::Literal(literal) = parse(input) else {
        panic!("expected a literal for {input}");
    };
    assert_eq!(literal.value, expected);
}

#[rstest]
#[case(r#""hola""#, "hola")]
#[case(r#"'hola'"#, "hola")]
#[case(r#""linea\n""#, "linea\n")]
#[case(r#""tab\tcomilla\"""#, "tab\tcomilla\"")]
#[case(r#""Añ""#, "Añ")]
#[case(r"'A'", "A")]
fn test_string_literals(#[case] input: &str, #[case] expected: &str) {
    let Expression::Literal(Literal {
        value: LiteralValue::String(decoded),
        ..
    }) = parse(input)
    else {
        panic!("expected a string literal for {input}");
    };
    assert_eq!(decoded, expected);
}

// ============================================================================
// Mixed shapes
// ============================================================================

#[test]
fn test_closure_code_keeps_braces_and_text() {
    let Expression::Literal(Literal {
        value: LiteralValue::Closure(closure),
        ..
    }) = parse("{ a, b => a + b }")
    else {
        panic!("expected a closure");
    };
    assert_eq!(closure.code, "{ a, b => a + b }");
    assert_eq!(closure.parameters.len(), 2);
}

#[test]
fn test_chained_sends_with_operators() {
    let Expression::Send(send) = parse("pepita.energia() + comida.calorias() * 2") else {
        panic!("expected a send");
    };
    assert_eq!(send.message, "+");
    let Expression::Send(receiver) = send.receiver.as_ref() else {
        panic!("expected a receiver send");
    };
    assert_eq!(receiver.message, "energia");
}

#[test]
fn test_named_arguments_in_new() {
    let Expression::New(new) = parse("new Punto(x = 1, y = 2)") else {
        panic!("expected a New node");
    };
    assert_eq!(new.args.len(), 2);
    let Expression::NamedArgument(first) = &new.args[0] else {
        panic!("expected a named argument");
    };
    assert_eq!(first.name, "x");
}

#[test]
fn test_if_as_expression_argument() {
    let Expression::Send(send) = parse("pepita.come(if (hambre) 10 else 1)") else {
        panic!("expected a send");
    };
    assert!(matches!(send.args[0], Expression::If(_)));
}

#[test]
fn test_lazy_thunk_code_is_rhs_text() {
    let Expression::Send(send) = parse("a or b.c()") else {
        panic!("expected a send");
    };
    let Expression::Literal(Literal {
        value: LiteralValue::Closure(closure),
        ..
    }) = &send.args[0]
    else {
        panic!("expected a thunk");
    };
    assert_eq!(closure.code, "b.c()");
}
