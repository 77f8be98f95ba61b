use js_ast::Span;
use logos::Logos;

use crate::token::{resolve_keyword, TokenKind};

#[derive(Debug, Clone, PartialEq)]
pub struct LexerError {
    pub message: &'static str,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// A line terminator appeared between the previous token and this one.
    pub newline_before: bool,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            newline_before: false,
        }
    }

    pub fn eof(offset: u32) -> Self {
        Self::new(TokenKind::Eof, Span::at(offset))
    }
}

pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    peeked: Option<Token>,
    peeked2: Option<Token>,
    pub errors: Vec<LexerError>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        // Skip shebang line if present (e.g., #!/usr/bin/env node)
        let pos = if source.starts_with("#!") {
            memchr::memchr(b'\n', source.as_bytes()).unwrap_or(source.len())
        } else {
            0
        };

        Self {
            source,
            pos,
            peeked: None,
            peeked2: None,
            errors: Vec::new(),
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn peek(&mut self) -> &Token {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.read_next_token(),
        };
        self.peeked.insert(token)
    }

    /// Peek two tokens ahead (past the next token).
    pub fn peek2(&mut self) -> &Token {
        if self.peeked.is_none() {
            self.peeked = Some(self.read_next_token());
        }
        let token = match self.peeked2.take() {
            Some(token) => token,
            None => self.read_next_token(),
        };
        self.peeked2.insert(token)
    }

    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.peeked.take() {
            self.peeked = self.peeked2.take();
            return token;
        }
        self.read_next_token()
    }

    /// Get the text slice corresponding to a token
    pub fn token_text(&self, token: &Token) -> &'src str {
        &self.source[token.span.start as usize..token.span.end as usize]
    }

    /// The most recent error recorded at `span`, if the token there was invalid.
    pub fn error_at(&self, span: Span) -> Option<&LexerError> {
        self.errors.iter().rev().find(|e| e.span == span)
    }

    fn read_next_token(&mut self) -> Token {
        let start_pos = self.pos;
        if start_pos >= self.source.len() {
            return Token::eof(self.source.len() as u32);
        }

        let remaining = &self.source[start_pos..];
        let mut inner = TokenKind::lexer(remaining);
        let result = inner.next();
        let logos_span = inner.span();

        let (kind, start, end) = match result {
            Some(Ok(kind)) => (kind, start_pos + logos_span.start, start_pos + logos_span.end),
            Some(Err(())) => {
                let start = start_pos + logos_span.start;
                // Always make progress, even on a zero-width failure
                let end = (start_pos + logos_span.end).max(self.next_char_boundary(start));
                let message = match remaining.as_bytes().get(logos_span.start) {
                    Some(b'\'') | Some(b'"') => "Unterminated string constant",
                    _ => "Unexpected character",
                };
                self.errors.push(LexerError {
                    message,
                    span: Span::new(start as u32, end as u32),
                });
                (TokenKind::Error, start, end)
            }
            None => {
                self.pos = self.source.len();
                let mut eof = Token::eof(self.source.len() as u32);
                eof.newline_before = has_line_terminator(remaining);
                return eof;
            }
        };

        let newline_before = has_line_terminator(&self.source[start_pos..start]);

        // An unclosed block comment is not matched by the skip pattern and
        // surfaces as `/` followed by `*`.
        if kind == TokenKind::Slash && self.source.as_bytes().get(end) == Some(&b'*') {
            let end = self.source.len();
            let span = Span::new(start as u32, end as u32);
            self.errors.push(LexerError {
                message: "Unterminated comment",
                span,
            });
            self.pos = end;
            return Token {
                kind: TokenKind::Error,
                span,
                newline_before,
            };
        }

        self.pos = end;
        let span = Span::new(start as u32, end as u32);

        let kind = match kind {
            TokenKind::Identifier => {
                resolve_keyword(&self.source[start..end]).unwrap_or(TokenKind::Identifier)
            }
            _ => kind,
        };

        Token {
            kind,
            span,
            newline_before,
        }
    }

    fn next_char_boundary(&self, pos: usize) -> usize {
        let mut next = pos + 1;
        while next < self.source.len() && !self.source.is_char_boundary(next) {
            next += 1;
        }
        next.min(self.source.len())
    }
}

fn has_line_terminator(gap: &str) -> bool {
    memchr::memchr2(b'\n', b'\r', gap.as_bytes()).is_some()
        || memchr::memmem::find(gap.as_bytes(), "\u{2028}".as_bytes()).is_some()
        || memchr::memmem::find(gap.as_bytes(), "\u{2029}".as_bytes()).is_some()
}
