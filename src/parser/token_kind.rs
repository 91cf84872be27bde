//! Token kinds produced by the lexer.

use std::fmt;

/// Every kind of token in Wollok source, plus the two virtual kinds the
/// parser needs: [`TokenKind::Error`] for unlexable input and
/// [`TokenKind::Eof`] for the end of the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Trivia
    Whitespace,
    LineComment,
    BlockComment,

    // Literals
    Ident,
    Number,
    Str,

    // Multi-character punctuation
    EqEqEq,
    EqEq,
    BangEqEq,
    BangEq,
    GtEq,
    LtEq,
    LtEqGt,
    LtGt,
    GtGtGt,
    GtGt,
    LtLtLt,
    LtLt,
    GtDotDot,
    DotDotLt,
    DotDotDot,
    DotDot,
    Arrow,
    FatArrow,
    QuestionColon,
    StarStar,
    AmpAmpEq,
    AmpAmp,
    PipePipeEq,
    PipePipe,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    HashLBrace,

    // Single-character punctuation
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Dot,
    Colon,
    Eq,
    Lt,
    Gt,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,

    // Keywords
    PackageKw,
    ImportKw,
    ProgramKw,
    TestKw,
    DescribeKw,
    OnlyKw,
    ClassKw,
    ObjectKw,
    MixinKw,
    InheritsKw,
    MixedKw,
    WithKw,
    AndKw,
    OrKw,
    NotKw,
    VarKw,
    ConstKw,
    PropertyKw,
    MethodKw,
    ConstructorKw,
    OverrideKw,
    NativeKw,
    FixtureKw,
    SelfKw,
    SuperKw,
    NewKw,
    IfKw,
    ElseKw,
    ReturnKw,
    ThrowKw,
    TryKw,
    CatchKw,
    ThenKw,
    AlwaysKw,
    TrueKw,
    FalseKw,
    NullKw,

    /// Unlexable input; swallowed by error recovery.
    Error,
    /// Virtual kind reported once the token stream is exhausted.
    Eof,
}

impl TokenKind {
    /// Whitespace or a comment.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::PackageKw
                | TokenKind::ImportKw
                | TokenKind::ProgramKw
                | TokenKind::TestKw
                | TokenKind::DescribeKw
                | TokenKind::OnlyKw
                | TokenKind::ClassKw
                | TokenKind::ObjectKw
                | TokenKind::MixinKw
                | TokenKind::InheritsKw
                | TokenKind::MixedKw
                | TokenKind::WithKw
                | TokenKind::AndKw
                | TokenKind::OrKw
                | TokenKind::NotKw
                | TokenKind::VarKw
                | TokenKind::ConstKw
                | TokenKind::PropertyKw
                | TokenKind::MethodKw
                | TokenKind::ConstructorKw
                | TokenKind::OverrideKw
                | TokenKind::NativeKw
                | TokenKind::FixtureKw
                | TokenKind::SelfKw
                | TokenKind::SuperKw
                | TokenKind::NewKw
                | TokenKind::IfKw
                | TokenKind::ElseKw
                | TokenKind::ReturnKw
                | TokenKind::ThrowKw
                | TokenKind::TryKw
                | TokenKind::CatchKw
                | TokenKind::ThenKw
                | TokenKind::AlwaysKw
                | TokenKind::TrueKw
                | TokenKind::FalseKw
                | TokenKind::NullKw
        )
    }

    /// Any prefix or infix operator symbol. These are exactly the tokens
    /// that may name an operator method, e.g. `method === (other)`.
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::EqEqEq
                | TokenKind::EqEq
                | TokenKind::BangEqEq
                | TokenKind::BangEq
                | TokenKind::GtEq
                | TokenKind::LtEq
                | TokenKind::LtEqGt
                | TokenKind::LtGt
                | TokenKind::GtGtGt
                | TokenKind::GtGt
                | TokenKind::LtLtLt
                | TokenKind::LtLt
                | TokenKind::GtDotDot
                | TokenKind::DotDotLt
                | TokenKind::DotDot
                | TokenKind::Arrow
                | TokenKind::QuestionColon
                | TokenKind::StarStar
                | TokenKind::AmpAmp
                | TokenKind::PipePipe
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::Bang
                | TokenKind::AndKw
                | TokenKind::OrKw
                | TokenKind::NotKw
        )
    }

    /// Human-readable name for error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::LineComment | TokenKind::BlockComment => "comment",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::Str => "string",
            TokenKind::EqEqEq => "'==='",
            TokenKind::EqEq => "'=='",
            TokenKind::BangEqEq => "'!=='",
            TokenKind::BangEq => "'!='",
            TokenKind::GtEq => "'>='",
            TokenKind::LtEq => "'<='",
            TokenKind::LtEqGt => "'<=>'",
            TokenKind::LtGt => "'<>'",
            TokenKind::GtGtGt => "'>>>'",
            TokenKind::GtGt => "'>>'",
            TokenKind::LtLtLt => "'<<<'",
            TokenKind::LtLt => "'<<'",
            TokenKind::GtDotDot => "'>..'",
            TokenKind::DotDotLt => "'..<'",
            TokenKind::DotDotDot => "'...'",
            TokenKind::DotDot => "'..'",
            TokenKind::Arrow => "'->'",
            TokenKind::FatArrow => "'=>'",
            TokenKind::QuestionColon => "'?:'",
            TokenKind::StarStar => "'**'",
            TokenKind::AmpAmpEq => "'&&='",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::PipePipeEq => "'||='",
            TokenKind::PipePipe => "'||'",
            TokenKind::PlusEq => "'+='",
            TokenKind::MinusEq => "'-='",
            TokenKind::StarEq => "'*='",
            TokenKind::SlashEq => "'/='",
            TokenKind::PercentEq => "'%='",
            TokenKind::HashLBrace => "'#{'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Dot => "'.'",
            TokenKind::Colon => "':'",
            TokenKind::Eq => "'='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Bang => "'!'",
            TokenKind::PackageKw => "'package'",
            TokenKind::ImportKw => "'import'",
            TokenKind::ProgramKw => "'program'",
            TokenKind::TestKw => "'test'",
            TokenKind::DescribeKw => "'describe'",
            TokenKind::OnlyKw => "'only'",
            TokenKind::ClassKw => "'class'",
            TokenKind::ObjectKw => "'object'",
            TokenKind::MixinKw => "'mixin'",
            TokenKind::InheritsKw => "'inherits'",
            TokenKind::MixedKw => "'mixed'",
            TokenKind::WithKw => "'with'",
            TokenKind::AndKw => "'and'",
            TokenKind::OrKw => "'or'",
            TokenKind::NotKw => "'not'",
            TokenKind::VarKw => "'var'",
            TokenKind::ConstKw => "'const'",
            TokenKind::PropertyKw => "'property'",
            TokenKind::MethodKw => "'method'",
            TokenKind::ConstructorKw => "'constructor'",
            TokenKind::OverrideKw => "'override'",
            TokenKind::NativeKw => "'native'",
            TokenKind::FixtureKw => "'fixture'",
            TokenKind::SelfKw => "'self'",
            TokenKind::SuperKw => "'super'",
            TokenKind::NewKw => "'new'",
            TokenKind::IfKw => "'if'",
            TokenKind::ElseKw => "'else'",
            TokenKind::ReturnKw => "'return'",
            TokenKind::ThrowKw => "'throw'",
            TokenKind::TryKw => "'try'",
            TokenKind::CatchKw => "'catch'",
            TokenKind::ThenKw => "'then'",
            TokenKind::AlwaysKw => "'always'",
            TokenKind::TrueKw => "'true'",
            TokenKind::FalseKw => "'false'",
            TokenKind::NullKw => "'null'",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
