use js_ast::Span;
use js_lexer::TokenKind;
use miette::{Diagnostic, LabeledSpan, Severity};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Expected {expected}, found {found}")]
    Expected {
        expected: String,
        found: TokenKind,
        span: Span,
    },

    #[error("Unexpected token {found}")]
    Unexpected { found: TokenKind, span: Span },

    /// The lexer could not produce a token here.
    #[error("{message}")]
    InvalidToken { message: &'static str, span: Span },

    #[error("{message}")]
    Forbidden { message: &'static str, span: Span },

    #[error("Unexpected keyword '{keyword}'")]
    UnexpectedKeyword { keyword: &'static str, span: Span },

    #[error("The keyword '{word}' is reserved")]
    ReservedWord { word: String, span: Span },

    // --- Private names ---
    #[error("Duplicate private element")]
    DuplicatePrivateElement { name: String, span: Span },

    #[error("Classes may not have a {qualifier} property named {name}")]
    ReservedPrivateName {
        name: String,
        /// `"private static"` or `"private"`
        qualifier: &'static str,
        span: Span,
    },

    #[error("Usage of undeclared private name")]
    UndeclaredPrivateName { name: String, span: Span },

    #[error("Private elements may not be deleted")]
    InvalidDeletePrivate { span: Span },

    // --- Field initializers and private methods ---
    #[error("A static class field initializer may not contain arguments")]
    InvalidArgumentsInFieldInit { span: Span },

    #[error("A static class field initializer may not contain super")]
    InvalidSuperInFieldInit { span: Span },

    #[error("A class method that is not a constructor may not contain a direct super")]
    InvalidDirectSuperCall { span: Span },

    // --- Class element names ---
    #[error("Classes may not have a static field named constructor")]
    StaticConstructorField { span: Span },

    #[error("Classes may not have a static property named prototype")]
    StaticPrototype { span: Span },

    #[error("Classes may not have a field named constructor")]
    ConstructorField { span: Span },

    #[error("Duplicate constructor in the same class")]
    DuplicateConstructor { span: Span },

    // --- Accessor arity (recoverable) ---
    #[error("getter should have no params")]
    GetterParams { span: Span },

    #[error("setter should have exactly one param")]
    SetterArity { span: Span },

    #[error("Setter cannot use rest params")]
    SetterRestParam { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Expected { span, .. }
            | ParseError::Unexpected { span, .. }
            | ParseError::InvalidToken { span, .. }
            | ParseError::Forbidden { span, .. }
            | ParseError::UnexpectedKeyword { span, .. }
            | ParseError::ReservedWord { span, .. }
            | ParseError::DuplicatePrivateElement { span, .. }
            | ParseError::ReservedPrivateName { span, .. }
            | ParseError::UndeclaredPrivateName { span, .. }
            | ParseError::InvalidDeletePrivate { span }
            | ParseError::InvalidArgumentsInFieldInit { span }
            | ParseError::InvalidSuperInFieldInit { span }
            | ParseError::InvalidDirectSuperCall { span }
            | ParseError::StaticConstructorField { span }
            | ParseError::StaticPrototype { span }
            | ParseError::ConstructorField { span }
            | ParseError::DuplicateConstructor { span }
            | ParseError::GetterParams { span }
            | ParseError::SetterArity { span }
            | ParseError::SetterRestParam { span } => *span,
        }
    }

    /// Recoverable diagnostics are collected while parsing continues; every
    /// other diagnostic ends the parse.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ParseError::GetterParams { .. }
                | ParseError::SetterArity { .. }
                | ParseError::SetterRestParam { .. }
                | ParseError::ReservedWord { .. }
        )
    }

    /// Stable machine-readable identifier for the diagnostic.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::Expected { .. } => "js::expected",
            ParseError::Unexpected { .. } => "js::unexpected",
            ParseError::InvalidToken { .. } => "js::invalid_token",
            ParseError::Forbidden { .. } => "js::forbidden",
            ParseError::UnexpectedKeyword { .. } => "js::unexpected_keyword",
            ParseError::ReservedWord { .. } => "js::reserved_word",
            ParseError::DuplicatePrivateElement { .. } => "js::duplicate_private_element",
            ParseError::ReservedPrivateName { .. } => "js::reserved_private_name",
            ParseError::UndeclaredPrivateName { .. } => "js::undeclared_private_name",
            ParseError::InvalidDeletePrivate { .. } => "js::invalid_delete_private",
            ParseError::InvalidArgumentsInFieldInit { .. } => "js::arguments_in_field_init",
            ParseError::InvalidSuperInFieldInit { .. } => "js::super_in_field_init",
            ParseError::InvalidDirectSuperCall { .. } => "js::direct_super_call",
            ParseError::StaticConstructorField { .. } => "js::static_constructor_field",
            ParseError::StaticPrototype { .. } => "js::static_prototype",
            ParseError::ConstructorField { .. } => "js::constructor_field",
            ParseError::DuplicateConstructor { .. } => "js::duplicate_constructor",
            ParseError::GetterParams { .. } => "js::getter_params",
            ParseError::SetterArity { .. } => "js::setter_arity",
            ParseError::SetterRestParam { .. } => "js::setter_rest_param",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ParseError::DuplicatePrivateElement { .. } => "already declared in this class",
            ParseError::UndeclaredPrivateName { .. } => "first used here",
            ParseError::Expected { .. } | ParseError::Unexpected { .. } => "here",
            _ if self.is_recoverable() => "here",
            _ => "not allowed here",
        }
    }

    /// Attach the parsed source so the diagnostic renders with a snippet.
    pub fn with_source(self, source: &str) -> miette::Report {
        miette::Report::new(self).with_source_code(source.to_string())
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(ParseError::code(self)))
    }

    fn severity(&self) -> Option<Severity> {
        Some(if self.is_recoverable() {
            Severity::Warning
        } else {
            Severity::Error
        })
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let range: std::ops::Range<usize> = self.span().into();
        Some(Box::new(std::iter::once(LabeledSpan::at(
            range,
            self.label(),
        ))))
    }
}
