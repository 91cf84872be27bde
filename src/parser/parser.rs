//! Recursive descent parser core.
//!
//! [`Parser`] owns the token stream for one invocation: cursor navigation,
//! backtracking for ordered alternation, span construction, and the
//! skip-to-safeword recovery primitive. The grammar itself lives in the
//! [`grammar`](super::grammar) modules.
//!
//! Trivia is dropped when the stream is built; token byte offsets keep all
//! the information the parser needs (spans, adjacency, closure source
//! capture) without threading whitespace through every grammar function.

use smol_str::SmolStr;
use tracing::{debug, trace};

use super::errors::ParseError;
use super::grammar;
use super::lexer::{Token, tokenize};
use super::token_kind::TokenKind;
use crate::ast::{Expression, Package, Sentence};
use crate::base::{LineIndex, Position, Source};

/// Parse a whole file into a [`Package`].
///
/// The package name is the basename of `file_name` up to its first `.`.
/// Syntax errors never abort this entry point: malformed regions become
/// problems on the innermost recoverable container.
pub fn parse_file(file_name: &str, source_text: &str) -> Package {
    debug!(file = file_name, bytes = source_text.len(), "parsing file");
    let mut parser = Parser::new(file_name, source_text);
    grammar::entities::file_package(&mut parser, file_name)
}

/// Parse an isolated expression. Trailing input is an error.
pub fn parse_expression(file_name: &str, text: &str) -> Result<Expression, ParseError> {
    let mut parser = Parser::new(file_name, text);
    let expression = grammar::expressions::expression(&mut parser)?;
    parser.expect_eof()?;
    Ok(expression)
}

/// Parse an isolated sentence. Trailing input is an error.
pub fn parse_sentence(file_name: &str, text: &str) -> Result<Sentence, ParseError> {
    let mut parser = Parser::new(file_name, text);
    let sentence = grammar::sentences::sentence(&mut parser)?;
    parser.eat_separators();
    parser.expect_eof()?;
    Ok(sentence)
}

/// Saved cursor state for backtracking.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    pos: usize,
    last_end: usize,
}

/// The parser state for one `(file_name, source_text)` invocation.
pub(crate) struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    source: &'a str,
    file: SmolStr,
    line_index: LineIndex,
    /// Byte offset one past the last consumed token.
    last_end: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(file_name: &str, source: &'a str) -> Self {
        let tokens = tokenize(source)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        Self {
            tokens,
            pos: 0,
            source,
            file: SmolStr::new(file_name),
            line_index: LineIndex::new(source),
            last_end: 0,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    pub(crate) fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Kind of the token `n` positions ahead of the cursor.
    pub(crate) fn nth(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// `true` when the cursor sits on `-` glued to a number, e.g. `-1`
    /// but not `- 1`. At primary position this forms a negative literal.
    pub(crate) fn at_negative_number(&self) -> bool {
        match (self.current(), self.tokens.get(self.pos + 1)) {
            (Some(minus), Some(number)) => {
                minus.kind == TokenKind::Minus
                    && number.kind == TokenKind::Number
                    && number.offset == minus.end()
            }
            _ => false,
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(crate) fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        self.last_end = token.end();
        Some(token)
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token, failing only at end of input.
    pub(crate) fn bump_token(&mut self) -> Result<Token<'a>, ParseError> {
        let offset = self.source.len();
        self.bump()
            .ok_or_else(|| ParseError::new("unexpected end of input", offset))
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        if !self.at(kind) {
            return Err(self.error(format!(
                "expected {}, found {}",
                kind.display_name(),
                self.current_kind().display_name()
            )));
        }
        self.bump_token()
    }

    pub(crate) fn expect_eof(&mut self) -> Result<(), ParseError> {
        if self.at_eof() {
            Ok(())
        } else {
            Err(self.error(format!(
                "expected end of input, found {}",
                self.current_kind().display_name()
            )))
        }
    }

    /// Consume any number of `;` sentence separators.
    pub(crate) fn eat_separators(&mut self) {
        while self.eat(TokenKind::Semicolon) {}
    }

    // =========================================================================
    // Backtracking
    // =========================================================================

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            last_end: self.last_end,
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.last_end = checkpoint.last_end;
    }

    // =========================================================================
    // Spans
    // =========================================================================

    /// Byte offset where the next node would start: the current token's
    /// offset, or the end of input at EOF.
    pub(crate) fn offset(&self) -> usize {
        self.current()
            .map(|t| t.offset)
            .unwrap_or(self.source.len())
    }

    pub(crate) fn position_at(&self, offset: usize) -> Position {
        self.line_index.position(self.source, offset)
    }

    /// Span from `start` to the end of the last consumed token. Empty when
    /// nothing was consumed since `start`.
    pub(crate) fn span_from(&self, start: usize) -> Source {
        let end = self.last_end.max(start);
        Source::new(
            self.position_at(start),
            self.position_at(end),
            self.file.clone(),
        )
    }

    /// Span covering the entire input.
    pub(crate) fn full_span(&self) -> Source {
        Source::new(
            self.position_at(0),
            self.position_at(self.source.len()),
            self.file.clone(),
        )
    }

    /// Zero-width span at the end of the last consumed token; the span of
    /// synthesized empty bodies.
    pub(crate) fn empty_span(&self) -> Source {
        let position = self.position_at(self.last_end);
        Source::new(position, position, self.file.clone())
    }

    /// Verbatim source text between two byte offsets.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    // =========================================================================
    // Errors and recovery
    // =========================================================================

    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.offset())
    }

    /// Skip input until one of `safewords` is about to match, consuming
    /// balanced `{ … }` regions as a unit, and return the span of the
    /// skipped region. At least one token is always consumed, so a child
    /// parse that failed while sitting on a safeword still makes progress.
    /// Returns `None` at end of input.
    pub(crate) fn recover_until(&mut self, safewords: &[TokenKind]) -> Option<Source> {
        if self.at_eof() {
            return None;
        }
        let start = self.offset();
        self.bump_balanced();
        while !self.at_eof() && !self.at_any(safewords) {
            self.bump_balanced();
        }
        let source = self.span_from(start);
        trace!(skipped = %source, "skipped malformed region");
        Some(source)
    }

    /// Consume one token, or a whole balanced brace region when the cursor
    /// sits on `{` or `#{`.
    fn bump_balanced(&mut self) {
        if !matches!(
            self.current_kind(),
            TokenKind::LBrace | TokenKind::HashLBrace
        ) {
            self.bump();
            return;
        }
        let mut depth = 0usize;
        while !self.at_eof() {
            match self.current_kind() {
                TokenKind::LBrace | TokenKind::HashLBrace => depth += 1,
                TokenKind::RBrace => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.bump();
            if depth == 0 {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_file() {
        let package = parse_file("empty.wlk", "");
        assert_eq!(package.name, "empty");
        assert!(package.members.is_empty());
        assert!(package.problems.is_empty());
    }

    #[test]
    fn test_package_name_strips_first_extension() {
        assert_eq!(parse_file("pepita.wlk", "").name, "pepita");
        assert_eq!(parse_file("src/aves/pepita.wlk", "").name, "pepita");
        assert_eq!(parse_file("pepita.test.wtest", "").name, "pepita");
    }

    #[test]
    fn test_trailing_input_is_an_error() {
        let result = parse_expression("repl.wlk", "1 + 2 3");
        assert!(result.is_err());
    }

    #[test]
    fn test_recover_until_consumes_balanced_braces() {
        let mut parser = Parser::new("x.wlk", "@ { var inner } class");
        let span = parser
            .recover_until(&[TokenKind::ClassKw])
            .expect("should recover");
        assert!(parser.at(TokenKind::ClassKw));
        assert_eq!(span.start.offset, 0);
        assert_eq!(span.end.offset, 15);
    }

    #[test]
    fn test_recover_until_forces_progress() {
        let mut parser = Parser::new("x.wlk", "class class");
        let span = parser.recover_until(&[TokenKind::ClassKw]).unwrap();
        assert_eq!(span.end.offset, 5);
        assert!(parser.at(TokenKind::ClassKw));
    }
}
