//! Logos-based lexer for Wollok source text.
//!
//! Tokenization keeps trivia (whitespace and comments) as tokens; the
//! parser drops them before navigation. Operator tokens rely on logos'
//! longest-match rule, so `===` always wins over `==` plus a stray `=`,
//! and an identifier like `classy` never splits into `class` + `y`.

use logos::Logos;

use super::token_kind::TokenKind;

/// A token with its kind, text, and byte offset into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// Byte offset one past the end of this token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Lexer wrapping the logos-generated tokenizer.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = match self.inner.next()? {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };
        Some(Token {
            kind,
            text: self.inner.slice(),
            offset: self.inner.span().start,
        })
    }
}

/// Tokenize an entire string into a Vec. Trivia tokens are included.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    // Non-nesting, shortest match; this shape (rather than the more obvious
    // `([^*]|\*[^/])*`) also accepts bodies ending in `**/`
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    Str,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (longest match wins in logos)
    // =========================================================================
    #[token("===")]
    EqEqEq,
    #[token("==")]
    EqEq,
    #[token("!==")]
    BangEqEq,
    #[token("!=")]
    BangEq,
    #[token(">=")]
    GtEq,
    #[token("<=")]
    LtEq,
    #[token("<=>")]
    LtEqGt,
    #[token("<>")]
    LtGt,
    #[token(">>>")]
    GtGtGt,
    #[token(">>")]
    GtGt,
    #[token("<<<")]
    LtLtLt,
    #[token("<<")]
    LtLt,
    #[token(">..")]
    GtDotDot,
    #[token("..<")]
    DotDotLt,
    #[token("...")]
    DotDotDot,
    #[token("..")]
    DotDot,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("?:")]
    QuestionColon,
    #[token("**")]
    StarStar,
    #[token("&&=")]
    AmpAmpEq,
    #[token("&&")]
    AmpAmp,
    #[token("||=")]
    PipePipeEq,
    #[token("||")]
    PipePipe,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("#{")]
    HashLBrace,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("package")]
    PackageKw,
    #[token("import")]
    ImportKw,
    #[token("program")]
    ProgramKw,
    #[token("test")]
    TestKw,
    #[token("describe")]
    DescribeKw,
    #[token("only")]
    OnlyKw,
    #[token("class")]
    ClassKw,
    #[token("object")]
    ObjectKw,
    #[token("mixin")]
    MixinKw,
    #[token("inherits")]
    InheritsKw,
    #[token("mixed")]
    MixedKw,
    #[token("with")]
    WithKw,
    #[token("and")]
    AndKw,
    #[token("or")]
    OrKw,
    #[token("not")]
    NotKw,
    #[token("var")]
    VarKw,
    #[token("const")]
    ConstKw,
    #[token("property")]
    PropertyKw,
    #[token("method")]
    MethodKw,
    #[token("constructor")]
    ConstructorKw,
    #[token("override")]
    OverrideKw,
    #[token("native")]
    NativeKw,
    #[token("fixture")]
    FixtureKw,
    #[token("self")]
    SelfKw,
    #[token("super")]
    SuperKw,
    #[token("new")]
    NewKw,
    #[token("if")]
    IfKw,
    #[token("else")]
    ElseKw,
    #[token("return")]
    ReturnKw,
    #[token("throw")]
    ThrowKw,
    #[token("try")]
    TryKw,
    #[token("catch")]
    CatchKw,
    #[token("then")]
    ThenKw,
    #[token("always")]
    AlwaysKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("null")]
    NullKw,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => TokenKind::Whitespace,
            LogosToken::LineComment => TokenKind::LineComment,
            LogosToken::BlockComment => TokenKind::BlockComment,
            LogosToken::Ident => TokenKind::Ident,
            LogosToken::Number => TokenKind::Number,
            LogosToken::Str => TokenKind::Str,
            LogosToken::EqEqEq => TokenKind::EqEqEq,
            LogosToken::EqEq => TokenKind::EqEq,
            LogosToken::BangEqEq => TokenKind::BangEqEq,
            LogosToken::BangEq => TokenKind::BangEq,
            LogosToken::GtEq => TokenKind::GtEq,
            LogosToken::LtEq => TokenKind::LtEq,
            LogosToken::LtEqGt => TokenKind::LtEqGt,
            LogosToken::LtGt => TokenKind::LtGt,
            LogosToken::GtGtGt => TokenKind::GtGtGt,
            LogosToken::GtGt => TokenKind::GtGt,
            LogosToken::LtLtLt => TokenKind::LtLtLt,
            LogosToken::LtLt => TokenKind::LtLt,
            LogosToken::GtDotDot => TokenKind::GtDotDot,
            LogosToken::DotDotLt => TokenKind::DotDotLt,
            LogosToken::DotDotDot => TokenKind::DotDotDot,
            LogosToken::DotDot => TokenKind::DotDot,
            LogosToken::Arrow => TokenKind::Arrow,
            LogosToken::FatArrow => TokenKind::FatArrow,
            LogosToken::QuestionColon => TokenKind::QuestionColon,
            LogosToken::StarStar => TokenKind::StarStar,
            LogosToken::AmpAmpEq => TokenKind::AmpAmpEq,
            LogosToken::AmpAmp => TokenKind::AmpAmp,
            LogosToken::PipePipeEq => TokenKind::PipePipeEq,
            LogosToken::PipePipe => TokenKind::PipePipe,
            LogosToken::PlusEq => TokenKind::PlusEq,
            LogosToken::MinusEq => TokenKind::MinusEq,
            LogosToken::StarEq => TokenKind::StarEq,
            LogosToken::SlashEq => TokenKind::SlashEq,
            LogosToken::PercentEq => TokenKind::PercentEq,
            LogosToken::HashLBrace => TokenKind::HashLBrace,
            LogosToken::LBrace => TokenKind::LBrace,
            LogosToken::RBrace => TokenKind::RBrace,
            LogosToken::LParen => TokenKind::LParen,
            LogosToken::RParen => TokenKind::RParen,
            LogosToken::LBracket => TokenKind::LBracket,
            LogosToken::RBracket => TokenKind::RBracket,
            LogosToken::Comma => TokenKind::Comma,
            LogosToken::Semicolon => TokenKind::Semicolon,
            LogosToken::Dot => TokenKind::Dot,
            LogosToken::Colon => TokenKind::Colon,
            LogosToken::Eq => TokenKind::Eq,
            LogosToken::Lt => TokenKind::Lt,
            LogosToken::Gt => TokenKind::Gt,
            LogosToken::Plus => TokenKind::Plus,
            LogosToken::Minus => TokenKind::Minus,
            LogosToken::Star => TokenKind::Star,
            LogosToken::Slash => TokenKind::Slash,
            LogosToken::Percent => TokenKind::Percent,
            LogosToken::Bang => TokenKind::Bang,
            LogosToken::PackageKw => TokenKind::PackageKw,
            LogosToken::ImportKw => TokenKind::ImportKw,
            LogosToken::ProgramKw => TokenKind::ProgramKw,
            LogosToken::TestKw => TokenKind::TestKw,
            LogosToken::DescribeKw => TokenKind::DescribeKw,
            LogosToken::OnlyKw => TokenKind::OnlyKw,
            LogosToken::ClassKw => TokenKind::ClassKw,
            LogosToken::ObjectKw => TokenKind::ObjectKw,
            LogosToken::MixinKw => TokenKind::MixinKw,
            LogosToken::InheritsKw => TokenKind::InheritsKw,
            LogosToken::MixedKw => TokenKind::MixedKw,
            LogosToken::WithKw => TokenKind::WithKw,
            LogosToken::AndKw => TokenKind::AndKw,
            LogosToken::OrKw => TokenKind::OrKw,
            LogosToken::NotKw => TokenKind::NotKw,
            LogosToken::VarKw => TokenKind::VarKw,
            LogosToken::ConstKw => TokenKind::ConstKw,
            LogosToken::PropertyKw => TokenKind::PropertyKw,
            LogosToken::MethodKw => TokenKind::MethodKw,
            LogosToken::ConstructorKw => TokenKind::ConstructorKw,
            LogosToken::OverrideKw => TokenKind::OverrideKw,
            LogosToken::NativeKw => TokenKind::NativeKw,
            LogosToken::FixtureKw => TokenKind::FixtureKw,
            LogosToken::SelfKw => TokenKind::SelfKw,
            LogosToken::SuperKw => TokenKind::SuperKw,
            LogosToken::NewKw => TokenKind::NewKw,
            LogosToken::IfKw => TokenKind::IfKw,
            LogosToken::ElseKw => TokenKind::ElseKw,
            LogosToken::ReturnKw => TokenKind::ReturnKw,
            LogosToken::ThrowKw => TokenKind::ThrowKw,
            LogosToken::TryKw => TokenKind::TryKw,
            LogosToken::CatchKw => TokenKind::CatchKw,
            LogosToken::ThenKw => TokenKind::ThenKw,
            LogosToken::AlwaysKw => TokenKind::AlwaysKw,
            LogosToken::TrueKw => TokenKind::TrueKw,
            LogosToken::FalseKw => TokenKind::FalseKw,
            LogosToken::NullKw => TokenKind::NullKw,
        }
    }
}

/// Decode a quoted string literal, quotes included.
///
/// Permitted escapes: `\b \f \n \r \t \v \" \' \\ \/` and `\uXXXX`.
/// Returns `None` on any other escape or a malformed `\u` sequence.
pub(crate) fn unescape(quoted: &str) -> Option<String> {
    let body = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{000B}'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() < 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                    return None;
                }
                let code = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(code)?);
            }
            _ => return None,
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_keyword_boundary() {
        assert_eq!(kinds("classy"), vec![TokenKind::Ident]);
        assert_eq!(kinds("class y"), vec![TokenKind::ClassKw, TokenKind::Ident]);
    }

    #[test]
    fn test_operator_longest_match() {
        assert_eq!(kinds("==="), vec![TokenKind::EqEqEq]);
        assert_eq!(kinds("== ="), vec![TokenKind::EqEq, TokenKind::Eq]);
        assert_eq!(kinds("<=>"), vec![TokenKind::LtEqGt]);
        assert_eq!(kinds("..<"), vec![TokenKind::DotDotLt]);
        assert_eq!(kinds(">>>"), vec![TokenKind::GtGtGt]);
        assert_eq!(kinds("||="), vec![TokenKind::PipePipeEq]);
    }

    #[test]
    fn test_number_then_range() {
        assert_eq!(
            kinds("1..5"),
            vec![TokenKind::Number, TokenKind::DotDot, TokenKind::Number]
        );
        assert_eq!(kinds("1.5"), vec![TokenKind::Number]);
    }

    #[test]
    fn test_comments_are_trivia() {
        let tokens = tokenize("var /* a **/ x // rest\n");
        let significant: Vec<_> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();
        assert_eq!(significant.len(), 2);
        assert_eq!(significant[0].kind, TokenKind::VarKw);
        assert_eq!(significant[1].text, "x");
    }

    #[test]
    fn test_string_both_quotes() {
        assert_eq!(kinds(r#""hola""#), vec![TokenKind::Str]);
        assert_eq!(kinds("'hola'"), vec![TokenKind::Str]);
    }

    #[test]
    fn test_token_offsets() {
        let tokens = tokenize("var x");
        assert_eq!(tokens[0].offset, 0);
        assert_eq!(tokens[0].end(), 3);
        assert_eq!(tokens[2].offset, 4);
    }

    #[test]
    fn test_set_literal_opener() {
        assert_eq!(
            kinds("#{1}"),
            vec![TokenKind::HashLBrace, TokenKind::Number, TokenKind::RBrace]
        );
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r#""a\nb""#), Some("a\nb".into()));
        assert_eq!(unescape("\"\\u0041\""), Some("A".into()));
        assert_eq!(unescape(r"'\''"), Some("'".into()));
        assert_eq!(unescape(r#""\/""#), Some("/".into()));
        assert_eq!(unescape(r#""\x""#), None);
        assert_eq!(unescape(r#""\u00""#), None);
    }
}
