use logos::Logos;

fn lex_quoted_string(lex: &mut logos::Lexer<TokenKind>, quote: char) -> bool {
    let remainder = lex.remainder();
    let mut chars = remainder.chars();
    loop {
        match chars.next() {
            Some('\\') => {
                chars.next(); // skip escaped char
            }
            Some('\n') | None => return false,
            Some(c) if c == quote => {
                let consumed = remainder.len() - chars.as_str().len();
                lex.bump(consumed);
                return true;
            }
            Some(_) => {}
        }
    }
}

fn lex_single_quoted_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    lex_quoted_string(lex, '\'')
}

fn lex_double_quoted_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    lex_quoted_string(lex, '"')
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f\u{0B}\u{A0}\u{FEFF}\u{2028}\u{2029}]+")]
#[logos(skip r"//[^\n\r\u{2028}\u{2029}]*")]
#[logos(skip r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
pub enum TokenKind {
    // --- Literals ---
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r"0[xX][0-9a-fA-F]+")]
    HexNumber,

    #[regex(r"0[oO][0-7]+")]
    OctalNumber,

    #[regex(r"0[bB][01]+")]
    BinaryNumber,

    #[token("'", lex_single_quoted_string)]
    SingleQuotedString,

    #[token("\"", lex_double_quoted_string)]
    DoubleQuotedString,

    // --- Identifiers (keywords resolved from these) ---
    #[regex(r"[\p{ID_Start}_$][\p{ID_Continue}$\u{200C}\u{200D}]*")]
    Identifier,

    /// `#name`; the token text includes the sigil
    #[regex(r"#[\p{ID_Start}_$][\p{ID_Continue}$\u{200C}\u{200D}]*")]
    PrivateName,

    /// A `#` that does not start a private name
    #[token("#")]
    Hash,

    // --- Punctuation ---
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("=>")]
    Arrow,

    // --- Operators ---
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
    #[token("**")]
    StarStar,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    #[token("==")]
    EqualsEquals,
    #[token("===")]
    EqualsEqualsEquals,
    #[token("!=")]
    BangEquals,
    #[token("!==")]
    BangEqualsEquals,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEquals,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEquals,

    #[token("<<")]
    ShiftLeft,
    #[token(">>")]
    ShiftRight,
    #[token(">>>")]
    UnsignedShiftRight,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&&")]
    AmpersandAmpersand,
    #[token("||")]
    PipePipe,
    #[token("??")]
    QuestionQuestion,

    #[token("=")]
    Equals,
    #[token("+=")]
    PlusEquals,
    #[token("-=")]
    MinusEquals,
    #[token("*=")]
    StarEquals,
    #[token("/=")]
    SlashEquals,
    #[token("%=")]
    PercentEquals,
    #[token("**=")]
    StarStarEquals,
    #[token("<<=")]
    ShiftLeftEquals,
    #[token(">>=")]
    ShiftRightEquals,
    #[token(">>>=")]
    UnsignedShiftRightEquals,
    #[token("&=")]
    AmpersandEquals,
    #[token("|=")]
    PipeEquals,
    #[token("^=")]
    CaretEquals,
    #[token("&&=")]
    AmpersandAmpersandEquals,
    #[token("||=")]
    PipePipeEquals,
    #[token("??=")]
    QuestionQuestionEquals,

    // --- Keywords (resolved from Identifier, not matched by logos) ---
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Export,
    Extends,
    False,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    New,
    Null,
    Return,
    Super,
    Switch,
    This,
    Throw,
    True,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,

    // Unterminated string or comment, or an unrecognized character
    Error,

    // End of file
    Eof,
}

impl TokenKind {
    pub fn is_assignment_op(&self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::SlashEquals
                | TokenKind::PercentEquals
                | TokenKind::StarStarEquals
                | TokenKind::ShiftLeftEquals
                | TokenKind::ShiftRightEquals
                | TokenKind::UnsignedShiftRightEquals
                | TokenKind::AmpersandEquals
                | TokenKind::PipeEquals
                | TokenKind::CaretEquals
                | TokenKind::AmpersandAmpersandEquals
                | TokenKind::PipePipeEquals
                | TokenKind::QuestionQuestionEquals
        )
    }

    pub fn is_keyword(&self) -> bool {
        self.keyword_text().is_some()
    }

    /// The source spelling of a keyword token.
    pub fn keyword_text(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Catch => "catch",
            TokenKind::Class => "class",
            TokenKind::Const => "const",
            TokenKind::Continue => "continue",
            TokenKind::Debugger => "debugger",
            TokenKind::Default => "default",
            TokenKind::Delete => "delete",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::Export => "export",
            TokenKind::Extends => "extends",
            TokenKind::False => "false",
            TokenKind::Finally => "finally",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Import => "import",
            TokenKind::In => "in",
            TokenKind::Instanceof => "instanceof",
            TokenKind::New => "new",
            TokenKind::Null => "null",
            TokenKind::Return => "return",
            TokenKind::Super => "super",
            TokenKind::Switch => "switch",
            TokenKind::This => "this",
            TokenKind::Throw => "throw",
            TokenKind::True => "true",
            TokenKind::Try => "try",
            TokenKind::Typeof => "typeof",
            TokenKind::Var => "var",
            TokenKind::Void => "void",
            TokenKind::While => "while",
            TokenKind::With => "with",
            _ => return None,
        };
        Some(text)
    }

    /// Tokens that may be used as a property or member name (`obj.name`, `{ name: 1 }`).
    pub fn is_property_name(&self) -> bool {
        *self == TokenKind::Identifier || self.is_keyword()
    }
}

/// Resolve a keyword from an identifier string. Returns the keyword TokenKind
/// if the string is a keyword, or None if it's a plain identifier.
///
/// Contextual words (`async`, `get`, `set`, `static`, `let`, `yield`, `await`)
/// stay identifiers.
pub fn resolve_keyword(text: &str) -> Option<TokenKind> {
    match text {
        "break" => Some(TokenKind::Break),
        "case" => Some(TokenKind::Case),
        "catch" => Some(TokenKind::Catch),
        "class" => Some(TokenKind::Class),
        "const" => Some(TokenKind::Const),
        "continue" => Some(TokenKind::Continue),
        "debugger" => Some(TokenKind::Debugger),
        "default" => Some(TokenKind::Default),
        "delete" => Some(TokenKind::Delete),
        "do" => Some(TokenKind::Do),
        "else" => Some(TokenKind::Else),
        "export" => Some(TokenKind::Export),
        "extends" => Some(TokenKind::Extends),
        "false" => Some(TokenKind::False),
        "finally" => Some(TokenKind::Finally),
        "for" => Some(TokenKind::For),
        "function" => Some(TokenKind::Function),
        "if" => Some(TokenKind::If),
        "import" => Some(TokenKind::Import),
        "in" => Some(TokenKind::In),
        "instanceof" => Some(TokenKind::Instanceof),
        "new" => Some(TokenKind::New),
        "null" => Some(TokenKind::Null),
        "return" => Some(TokenKind::Return),
        "super" => Some(TokenKind::Super),
        "switch" => Some(TokenKind::Switch),
        "this" => Some(TokenKind::This),
        "throw" => Some(TokenKind::Throw),
        "true" => Some(TokenKind::True),
        "try" => Some(TokenKind::Try),
        "typeof" => Some(TokenKind::Typeof),
        "var" => Some(TokenKind::Var),
        "void" => Some(TokenKind::Void),
        "while" => Some(TokenKind::While),
        "with" => Some(TokenKind::With),
        _ => None,
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(keyword) = self.keyword_text() {
            return write!(f, "'{}'", keyword);
        }
        match self {
            TokenKind::Number
            | TokenKind::HexNumber
            | TokenKind::OctalNumber
            | TokenKind::BinaryNumber => write!(f, "number"),
            TokenKind::SingleQuotedString | TokenKind::DoubleQuotedString => write!(f, "string"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::PrivateName => write!(f, "private name"),
            TokenKind::Hash => write!(f, "'#'"),
            TokenKind::LeftBrace => write!(f, "'{{'"),
            TokenKind::RightBrace => write!(f, "'}}'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::LeftBracket => write!(f, "'['"),
            TokenKind::RightBracket => write!(f, "']'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Ellipsis => write!(f, "'...'"),
            TokenKind::Question => write!(f, "'?'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Arrow => write!(f, "'=>'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::StarStar => write!(f, "'**'"),
            TokenKind::PlusPlus => write!(f, "'++'"),
            TokenKind::MinusMinus => write!(f, "'--'"),
            TokenKind::EqualsEquals => write!(f, "'=='"),
            TokenKind::EqualsEqualsEquals => write!(f, "'==='"),
            TokenKind::BangEquals => write!(f, "'!='"),
            TokenKind::BangEqualsEquals => write!(f, "'!=='"),
            TokenKind::Less => write!(f, "'<'"),
            TokenKind::LessEquals => write!(f, "'<='"),
            TokenKind::Greater => write!(f, "'>'"),
            TokenKind::GreaterEquals => write!(f, "'>='"),
            TokenKind::ShiftLeft => write!(f, "'<<'"),
            TokenKind::ShiftRight => write!(f, "'>>'"),
            TokenKind::UnsignedShiftRight => write!(f, "'>>>'"),
            TokenKind::Ampersand => write!(f, "'&'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::Caret => write!(f, "'^'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Tilde => write!(f, "'~'"),
            TokenKind::AmpersandAmpersand => write!(f, "'&&'"),
            TokenKind::PipePipe => write!(f, "'||'"),
            TokenKind::QuestionQuestion => write!(f, "'??'"),
            TokenKind::Equals => write!(f, "'='"),
            TokenKind::PlusEquals => write!(f, "'+='"),
            TokenKind::MinusEquals => write!(f, "'-='"),
            TokenKind::StarEquals => write!(f, "'*='"),
            TokenKind::SlashEquals => write!(f, "'/='"),
            TokenKind::PercentEquals => write!(f, "'%='"),
            TokenKind::StarStarEquals => write!(f, "'**='"),
            TokenKind::ShiftLeftEquals => write!(f, "'<<='"),
            TokenKind::ShiftRightEquals => write!(f, "'>>='"),
            TokenKind::UnsignedShiftRightEquals => write!(f, "'>>>='"),
            TokenKind::AmpersandEquals => write!(f, "'&='"),
            TokenKind::PipeEquals => write!(f, "'|='"),
            TokenKind::CaretEquals => write!(f, "'^='"),
            TokenKind::AmpersandAmpersandEquals => write!(f, "'&&='"),
            TokenKind::PipePipeEquals => write!(f, "'||='"),
            TokenKind::QuestionQuestionEquals => write!(f, "'??='"),
            TokenKind::Error => write!(f, "invalid token"),
            TokenKind::Eof => write!(f, "end of file"),
            // keywords are handled above
            _ => write!(f, "{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keyword() {
        assert_eq!(resolve_keyword("class"), Some(TokenKind::Class));
        assert_eq!(resolve_keyword("super"), Some(TokenKind::Super));
        assert_eq!(resolve_keyword("delete"), Some(TokenKind::Delete));
        // case-sensitive
        assert_eq!(resolve_keyword("Class"), None);
        // contextual words stay identifiers
        assert_eq!(resolve_keyword("static"), None);
        assert_eq!(resolve_keyword("async"), None);
        assert_eq!(resolve_keyword("get"), None);
        assert_eq!(resolve_keyword("arguments"), None);
    }

    #[test]
    fn test_keyword_text_matches_resolution() {
        for word in ["if", "new", "this", "typeof", "instanceof", "with"] {
            let kind = resolve_keyword(word).unwrap();
            assert_eq!(kind.keyword_text(), Some(word));
            assert!(kind.is_property_name());
        }
        assert_eq!(TokenKind::Identifier.keyword_text(), None);
        assert!(!TokenKind::PrivateName.is_property_name());
    }

    #[test]
    fn test_is_assignment_op() {
        assert!(TokenKind::Equals.is_assignment_op());
        assert!(TokenKind::UnsignedShiftRightEquals.is_assignment_op());
        assert!(TokenKind::QuestionQuestionEquals.is_assignment_op());
        assert!(!TokenKind::EqualsEquals.is_assignment_op());
        assert!(!TokenKind::Arrow.is_assignment_op());
    }

    #[test]
    fn test_logos_private_name() {
        let mut lex = TokenKind::lexer("this.#count #$ok # x");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Identifier)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Dot)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::PrivateName)));
        assert_eq!(lex.slice(), "#count");
        assert_eq!(lex.next(), Some(Ok(TokenKind::PrivateName)));
        assert_eq!(lex.slice(), "#$ok");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Hash)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Identifier)));
    }

    #[test]
    fn test_logos_unicode_separators_split_names() {
        let mut lex = TokenKind::lexer("a\u{A0}b \u{FEFF}#x\u{2028}é\u{200C}z");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Identifier)));
        assert_eq!(lex.slice(), "a");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Identifier)));
        assert_eq!(lex.slice(), "b");
        assert_eq!(lex.next(), Some(Ok(TokenKind::PrivateName)));
        assert_eq!(lex.slice(), "#x");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Identifier)));
        assert_eq!(lex.slice(), "é\u{200C}z");
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_logos_punctuation() {
        let mut lex = TokenKind::lexer("... => ?? ??= >>>= **");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Ellipsis)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Arrow)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::QuestionQuestion)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::QuestionQuestionEquals)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::UnsignedShiftRightEquals)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::StarStar)));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_logos_numbers() {
        let mut lex = TokenKind::lexer("42 3.14 .5 1e10 0xFF 0o17 0b1010");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Number)));
        assert_eq!(lex.slice(), "42");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Number)));
        assert_eq!(lex.slice(), "3.14");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Number)));
        assert_eq!(lex.slice(), ".5");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Number)));
        assert_eq!(lex.slice(), "1e10");
        assert_eq!(lex.next(), Some(Ok(TokenKind::HexNumber)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::OctalNumber)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::BinaryNumber)));
    }

    #[test]
    fn test_logos_strings() {
        let mut lex = TokenKind::lexer(r#"'hello' "world" 'it\'s' "say \"hi\"""#);
        assert_eq!(lex.next(), Some(Ok(TokenKind::SingleQuotedString)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::DoubleQuotedString)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::SingleQuotedString)));
        assert_eq!(lex.slice(), r"'it\'s'");
        assert_eq!(lex.next(), Some(Ok(TokenKind::DoubleQuotedString)));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_logos_unterminated_string_is_error() {
        let mut lex = TokenKind::lexer("'abc");
        assert_eq!(lex.next(), Some(Err(())));
    }

    #[test]
    fn test_logos_comments_skipped() {
        let mut lex = TokenKind::lexer("a // line comment\nb /* block */ c");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Identifier)));
        assert_eq!(lex.slice(), "a");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Identifier)));
        assert_eq!(lex.slice(), "b");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Identifier)));
        assert_eq!(lex.slice(), "c");
        assert_eq!(lex.next(), None);
    }
}
