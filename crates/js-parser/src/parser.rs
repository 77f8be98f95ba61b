use js_ast::*;
use js_lexer::token::resolve_keyword;
use js_lexer::{Lexer, Token, TokenKind};

use crate::context::ContextFlags;
use crate::diagnostics::ParseError;
use crate::options::{AllowReserved, ParserOptions};
use crate::private_scope::PrivateNameScope;
use crate::stmt;

/// Fatal diagnostics unwind the parse through `?`; recoverable ones are
/// pushed with [`Parser::error`].
pub type PResult<T> = Result<T, ParseError>;

/// Reserved only in strict code, which includes every class body.
const STRICT_RESERVED: &[&str] = &[
    "implements",
    "interface",
    "let",
    "package",
    "private",
    "protected",
    "public",
    "static",
    "yield",
];

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    prev_end: u32,
    source: &'src str,
    options: ParserOptions,
    errors: Vec<ParseError>,
    pub(crate) scope: PrivateNameScope,
    pub(crate) context: ContextFlags,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, options: ParserOptions) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            prev_end: 0,
            source,
            options,
            errors: Vec::new(),
            scope: PrivateNameScope::new(),
            context: ContextFlags::empty(),
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    // =========================================================================
    // Token navigation
    // =========================================================================

    /// Get the current token kind without consuming it.
    pub fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Get the current token's span.
    pub fn current_span(&self) -> Span {
        self.current.span
    }

    /// Get the text of the current token.
    pub fn current_text(&self) -> &'src str {
        &self.source[self.current.span.start as usize..self.current.span.end as usize]
    }

    /// A line terminator separates the current token from the previous one.
    pub fn current_newline_before(&self) -> bool {
        self.current.newline_before
    }

    /// Advance to the next token, returning the consumed token.
    pub fn advance(&mut self) -> Token {
        let prev = std::mem::replace(&mut self.current, self.lexer.next_token());
        self.prev_end = prev.span.end;
        prev
    }

    /// Check if the current token matches the given kind.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// If the current token matches `kind`, consume and return it. Otherwise return None.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Expect the current token to be `kind` and consume it.
    pub fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.expected(&kind.to_string()))
        }
    }

    /// The current token is the contextual word `word` (`async`, `get`, ...).
    pub fn check_word(&self, word: &str) -> bool {
        self.check(TokenKind::Identifier) && self.current_text() == word
    }

    /// Peek at the next token's kind (one token ahead of current).
    pub fn peek_kind(&mut self) -> TokenKind {
        self.lexer.peek().kind
    }

    /// The token after the current one is on a new line.
    pub fn peek_newline_before(&mut self) -> bool {
        self.lexer.peek().newline_before
    }

    /// Peek two tokens ahead of current.
    pub fn peek2_kind(&mut self) -> TokenKind {
        self.lexer.peek2().kind
    }

    /// Start a span at the current token position.
    pub fn start_span(&self) -> u32 {
        self.current.span.start
    }

    /// End a span at the end of the most recently consumed token.
    pub fn end_span(&self, start: u32) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    // =========================================================================
    // Automatic semicolon insertion
    // =========================================================================

    pub fn can_insert_semicolon(&self) -> bool {
        matches!(self.current_kind(), TokenKind::RightBrace | TokenKind::Eof)
            || self.current.newline_before
    }

    /// Consume a statement-terminating `;`, or accept an inserted one.
    pub fn expect_semicolon(&mut self) -> PResult<()> {
        if self.eat(TokenKind::Semicolon).is_some() || self.can_insert_semicolon() {
            Ok(())
        } else {
            Err(self.expected("';'"))
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    /// Record a recoverable diagnostic.
    pub fn error(&mut self, err: ParseError) {
        self.errors.push(err);
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Error for the current token when `expected` was required.
    pub fn expected(&self, expected: &str) -> ParseError {
        if let Some(err) = self.invalid_token() {
            return err;
        }
        ParseError::Expected {
            expected: expected.to_string(),
            found: self.current_kind(),
            span: self.current_span(),
        }
    }

    /// Error for a current token that no rule accepts.
    pub fn unexpected(&self) -> ParseError {
        if let Some(err) = self.invalid_token() {
            return err;
        }
        ParseError::Unexpected {
            found: self.current_kind(),
            span: self.current_span(),
        }
    }

    fn invalid_token(&self) -> Option<ParseError> {
        if !self.check(TokenKind::Error) {
            return None;
        }
        let message = self
            .lexer
            .error_at(self.current_span())
            .map_or("Unexpected character", |e| e.message);
        Some(ParseError::InvalidToken {
            message,
            span: self.current_span(),
        })
    }

    // =========================================================================
    // Context
    // =========================================================================

    /// Run `f` under `flags`, restoring the previous context afterwards
    /// whether or not `f` succeeded.
    pub fn with_context<T>(
        &mut self,
        flags: ContextFlags,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let saved = std::mem::replace(&mut self.context, flags);
        let result = f(self);
        self.context = saved;
        result
    }

    pub fn in_context(&self, flags: ContextFlags) -> bool {
        self.context.contains(flags)
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Parse an identifier. `liberal` names (property names after `.`, object
    /// and class keys) may be keywords and skip the reserved-word check
    /// unless `allow_reserved` is `Never`.
    pub fn parse_ident(&mut self, liberal: bool) -> PResult<Ident> {
        let name = match self.current_kind() {
            TokenKind::Identifier => self.current_text(),
            kind if liberal => match kind.keyword_text() {
                Some(keyword) => keyword,
                None => return Err(self.expected("identifier")),
            },
            kind if kind.is_keyword() => {
                return Err(ParseError::UnexpectedKeyword {
                    keyword: kind.keyword_text().unwrap_or_default(),
                    span: self.current_span(),
                })
            }
            _ => return Err(self.expected("identifier")),
        };
        let token = self.advance();
        if !liberal || self.options.allow_reserved == AllowReserved::Never {
            self.check_unreserved(name, token.span)?;
        }
        Ok(Ident {
            name: name.to_string(),
            span: token.span,
        })
    }

    /// Parse the `#name` token at the current position.
    pub fn parse_private_name(&mut self) -> PResult<PrivateName> {
        if !self.check(TokenKind::PrivateName) {
            return Err(self.expected("private name"));
        }
        let name = &self.current_text()[1..];
        let token = self.advance();
        if self.options.allow_reserved == AllowReserved::Never {
            self.check_unreserved(name, token.span)?;
        }
        Ok(PrivateName {
            name: name.to_string(),
            span: token.span,
        })
    }

    /// Keywords are always rejected; reserved words are reported as a
    /// recoverable diagnostic unless `allow_reserved` is `Yes`.
    pub fn check_unreserved(&mut self, name: &str, span: Span) -> PResult<()> {
        if let Some(keyword) = resolve_keyword(name).and_then(|kind| kind.keyword_text()) {
            return Err(ParseError::UnexpectedKeyword { keyword, span });
        }
        if self.in_context(ContextFlags::ASYNC) && name == "await" {
            return Err(ParseError::Forbidden {
                message: "Cannot use 'await' as identifier inside an async function",
                span,
            });
        }
        if self.in_context(ContextFlags::GENERATOR) && name == "yield" {
            return Err(ParseError::Forbidden {
                message: "Cannot use 'yield' as identifier inside a generator",
                span,
            });
        }
        if self.options.allow_reserved == AllowReserved::Yes {
            return Ok(());
        }
        let reserved = name == "enum"
            || (self.in_context(ContextFlags::STRICT) && STRICT_RESERVED.contains(&name));
        if reserved {
            self.error(ParseError::ReservedWord {
                word: name.to_string(),
                span,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Top-level parsing
    // =========================================================================

    pub fn parse_program(&mut self) -> PResult<Program> {
        let start = self.start_span();
        let mut body = Vec::new();

        while !self.check(TokenKind::Eof) {
            body.push(stmt::parse_stmt(self)?);
        }

        Ok(Program {
            body,
            span: Span::new(start, self.current.span.end),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(source: &str) -> Parser<'_> {
        Parser::new(source, ParserOptions::default())
    }

    #[test]
    fn test_end_span_tracks_previous_token() {
        let mut p = parser("foo   bar");
        let start = p.start_span();
        p.advance();
        assert_eq!(p.end_span(start), Span::new(0, 3));
    }

    #[test]
    fn test_semicolon_insertion() {
        let mut p = parser("a\nb");
        p.advance();
        assert!(p.expect_semicolon().is_ok());

        let mut p = parser("a b");
        p.advance();
        assert!(matches!(
            p.expect_semicolon(),
            Err(ParseError::Expected { .. })
        ));
    }

    #[test]
    fn test_liberal_ident_accepts_keywords() {
        let mut p = parser("class");
        assert_eq!(p.parse_ident(true).unwrap().name, "class");

        let mut p = parser("class");
        assert_eq!(
            p.parse_ident(false),
            Err(ParseError::UnexpectedKeyword {
                keyword: "class",
                span: Span::new(0, 5)
            })
        );
    }

    #[test]
    fn test_reserved_word_is_recoverable() {
        let mut p = parser("enum");
        assert!(p.parse_ident(false).is_ok());
        let errors = p.into_errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_recoverable());
    }

    #[test]
    fn test_strict_reserved_words() {
        let mut p = parser("static");
        assert!(p.parse_ident(false).is_ok());
        assert!(p.into_errors().is_empty());

        let mut p = parser("static");
        p.context = ContextFlags::STRICT;
        assert!(p.parse_ident(false).is_ok());
        assert_eq!(p.into_errors().len(), 1);
    }

    #[test]
    fn test_private_name_reserved_check() {
        let options = ParserOptions::default().with_allow_reserved(AllowReserved::Never);
        let mut p = Parser::new("#if", options.clone());
        assert!(matches!(
            p.parse_private_name(),
            Err(ParseError::UnexpectedKeyword { keyword: "if", .. })
        ));

        let mut p = parser("#if");
        assert_eq!(p.parse_private_name().unwrap().name, "if");
    }

    #[test]
    fn test_with_context_restores_on_error() {
        let mut p = parser("x");
        p.context = ContextFlags::STRICT;
        let result: PResult<()> = p.with_context(ContextFlags::STATIC_FIELD_INIT, |p| {
            assert!(p.in_context(ContextFlags::STATIC_FIELD_INIT));
            Err(p.unexpected())
        });
        assert!(result.is_err());
        assert_eq!(p.context, ContextFlags::STRICT);
    }

    #[test]
    fn test_invalid_token_message() {
        let p = parser("'open");
        assert_eq!(
            p.unexpected(),
            ParseError::InvalidToken {
                message: "Unterminated string constant",
                span: p.current_span()
            }
        );
    }
}
