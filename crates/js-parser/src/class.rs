//! Class declarations and expressions: methods, accessors, public and
//! private fields, and private methods.

use js_ast::*;
use js_lexer::TokenKind;

use crate::context::ContextFlags;
use crate::diagnostics::ParseError;
use crate::expr;
use crate::parser::{PResult, Parser};
use crate::private_scope::PrivateNameKind;
use crate::stmt;

/// Parse `class Name extends Base { ... }`. The name is required for
/// declarations.
pub fn parse_class(parser: &mut Parser, is_statement: bool) -> PResult<Class> {
    let start = parser.start_span();
    parser.expect(TokenKind::Class)?;

    // Every part of a class is strict mode code.
    let flags = parser.context | ContextFlags::STRICT;
    parser.with_context(flags, |parser| {
        let id = if is_statement
            || !matches!(
                parser.current_kind(),
                TokenKind::Extends | TokenKind::LeftBrace
            ) {
            Some(parser.parse_ident(false)?)
        } else {
            None
        };

        let super_class = if parser.eat(TokenKind::Extends).is_some() {
            Some(Box::new(expr::parse_expr_subscripts(parser)?))
        } else {
            None
        };

        parser.expect(TokenKind::LeftBrace)?;
        parser.scope.enter_class();
        let body = parse_class_body(parser, super_class.is_some())?;
        parser.scope.exit_class()?;

        Ok(Class {
            id,
            super_class,
            body,
            span: parser.end_span(start),
        })
    })
}

/// Parse members up to and including the closing `}`.
fn parse_class_body(parser: &mut Parser, has_super: bool) -> PResult<Vec<ClassMember>> {
    let mut members = Vec::new();
    let mut has_constructor = false;

    while !parser.check(TokenKind::RightBrace) {
        if parser.eat(TokenKind::Semicolon).is_some() {
            continue;
        }
        if parser.check(TokenKind::Eof) {
            return Err(parser.expected("'}'"));
        }

        let member = parse_class_element(parser, has_super)?;
        if let ClassMemberKind::Method(method) = &member.kind {
            if method.kind == MethodKind::Constructor {
                if has_constructor {
                    return Err(ParseError::DuplicateConstructor {
                        span: method.key.span(),
                    });
                }
                has_constructor = true;
            }
        }
        members.push(member);
    }
    parser.advance(); // }

    Ok(members)
}

/// Consume the contextual `word` if present. Returns true when it acts as a
/// modifier; when it turns out to be the member's own name it is stored in
/// `key` instead.
fn eat_modifier(
    parser: &mut Parser,
    word: &str,
    no_line_break: bool,
    key: &mut Option<PropertyKey>,
) -> bool {
    if key.is_some() || !parser.check_word(word) {
        return false;
    }
    let token = parser.advance();
    let names_member = matches!(
        parser.current_kind(),
        TokenKind::LeftParen
            | TokenKind::Equals
            | TokenKind::Semicolon
            | TokenKind::RightBrace
            | TokenKind::Eof
    ) || (no_line_break && parser.current_newline_before());
    if !names_member {
        return true;
    }
    *key = Some(PropertyKey::Identifier(Ident {
        name: word.to_string(),
        span: token.span,
    }));
    false
}

fn parse_class_element(parser: &mut Parser, has_super: bool) -> PResult<ClassMember> {
    let start = parser.start_span();
    let mut key = None;

    let is_static = eat_modifier(parser, "static", false, &mut key);
    let mut is_generator = key.is_none() && parser.eat(TokenKind::Star).is_some();
    let mut is_async = false;
    let mut kind = MethodKind::Method;
    if !is_generator {
        if parser.options().async_functions() && eat_modifier(parser, "async", true, &mut key) {
            is_async = true;
            is_generator =
                parser.options().async_generators() && parser.eat(TokenKind::Star).is_some();
        } else if eat_modifier(parser, "get", false, &mut key) {
            kind = MethodKind::Get;
        } else if eat_modifier(parser, "set", false, &mut key) {
            kind = MethodKind::Set;
        }
    }

    let key = match key {
        Some(key) => key,
        None if parser.check(TokenKind::PrivateName) => {
            PropertyKey::PrivateName(parser.parse_private_name()?)
        }
        None => expr::parse_property_key(parser)?,
    };
    let computed = key.is_computed();
    let has_modifier = is_generator || is_async || kind != MethodKind::Method;
    let is_method = parser.check(TokenKind::LeftParen)
        || has_modifier
        || !parser.options().class_fields();

    match &key {
        PropertyKey::PrivateName(name) => {
            let qualifier = if is_static { "private static" } else { "private" };
            if name.name == "constructor" {
                return Err(ParseError::ReservedPrivateName {
                    name: name.name.clone(),
                    qualifier,
                    span: name.span,
                });
            }
            let private_kind = match kind {
                MethodKind::Get => PrivateNameKind::Get,
                MethodKind::Set => PrivateNameKind::Set,
                _ => PrivateNameKind::Field,
            };
            parser
                .scope
                .declare(&name.name, private_kind, Span::new(start, name.span.end))?;
            // Private static methods may be named `#prototype`; fields may not.
            if is_static && !is_method && name.name == "prototype" {
                return Err(ParseError::ReservedPrivateName {
                    name: name.name.clone(),
                    qualifier,
                    span: name.span,
                });
            }
        }
        _ if is_static && key.static_name() == Some("prototype") => {
            return Err(ParseError::StaticPrototype { span: key.span() });
        }
        _ => {}
    }

    if !is_method {
        return parse_field(parser, start, is_static, key);
    }

    let is_constructor = !is_static && key.static_name() == Some("constructor");
    if is_constructor {
        let message = if kind != MethodKind::Method {
            Some("Constructor can't have get/set modifier")
        } else if is_async {
            Some("Constructor can't be an async method")
        } else if is_generator {
            Some("Constructor can't be a generator")
        } else {
            None
        };
        if let Some(message) = message {
            return Err(ParseError::Forbidden {
                message,
                span: key.span(),
            });
        }
        kind = MethodKind::Constructor;
    }

    let mut flags =
        ContextFlags::function(parser.context, is_async, is_generator) | ContextFlags::SUPER;
    flags.set(ContextFlags::PRIVATE_METHOD, key.as_private().is_some());
    flags.set(ContextFlags::SUPER_CALL, is_constructor && has_super);

    let fn_start = parser.start_span();
    let value = stmt::parse_function_rest(parser, fn_start, None, is_async, is_generator, flags)?;
    check_accessor_params(parser, kind, &value);

    Ok(ClassMember {
        kind: ClassMemberKind::Method(MethodDefinition {
            kind,
            is_static,
            computed,
            key,
            value,
        }),
        span: parser.end_span(start),
    })
}

fn parse_field(
    parser: &mut Parser,
    start: u32,
    is_static: bool,
    key: PropertyKey,
) -> PResult<ClassMember> {
    if key.static_name() == Some("constructor") {
        let span = key.span();
        return Err(if is_static {
            ParseError::StaticConstructorField { span }
        } else {
            ParseError::ConstructorField { span }
        });
    }

    let value = if parser.eat(TokenKind::Equals).is_some() {
        let flags = ContextFlags::field_initializer(parser.context, is_static);
        Some(parser.with_context(flags, expr::parse_expr)?)
    } else {
        None
    };
    parser.expect_semicolon()?;

    Ok(ClassMember {
        kind: ClassMemberKind::Field(FieldDefinition {
            is_static,
            computed: key.is_computed(),
            key,
            value,
        }),
        span: parser.end_span(start),
    })
}

/// Accessor arity problems are recoverable.
fn check_accessor_params(parser: &mut Parser, kind: MethodKind, function: &Function) {
    let params_start = Span::new(function.span.start, function.span.start + 1);
    match kind {
        MethodKind::Get if !function.params.is_empty() => {
            parser.error(ParseError::GetterParams { span: params_start });
        }
        MethodKind::Set => {
            if function.params.len() != 1 {
                parser.error(ParseError::SetterArity { span: params_start });
            }
            if let Some(param) = function.params.first().filter(|param| param.is_rest()) {
                parser.error(ParseError::SetterRestParam { span: param.span });
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParserOptions;

    fn parse_class_expr(source: &str) -> (PResult<Class>, Vec<ParseError>) {
        parse_with(source, ParserOptions::default())
    }

    fn parse_with(source: &str, options: ParserOptions) -> (PResult<Class>, Vec<ParseError>) {
        let mut parser = Parser::new(source, options);
        let result = parse_class(&mut parser, false);
        (result, parser.into_errors())
    }

    fn members(source: &str) -> Vec<ClassMember> {
        let (result, errors) = parse_class_expr(source);
        assert!(errors.is_empty(), "unexpected diagnostics: {:?}", errors);
        result.unwrap().body
    }

    #[test]
    fn test_modifier_words_as_names() {
        let body = members("class { static; get() {} set = 1; async\n x() {} static async() {} }");
        let names: Vec<_> = body
            .iter()
            .map(|member| member.key().static_name().unwrap_or("").to_string())
            .collect();
        assert_eq!(names, vec!["static", "get", "set", "async", "x", "async"]);
        assert!(matches!(body[0].kind, ClassMemberKind::Field(_)));
        assert!(matches!(body[3].kind, ClassMemberKind::Field(_)));
        assert!(body[5].is_static());
    }

    #[test]
    fn test_member_kinds() {
        let body = members(
            "class { constructor() {} get a() { return 1 } set a(v) {} *g() {} async *ag() {} static s() {} }",
        );
        let kinds: Vec<_> = body
            .iter()
            .map(|member| match &member.kind {
                ClassMemberKind::Method(method) => method.kind,
                ClassMemberKind::Field(_) => panic!("unexpected field"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                MethodKind::Constructor,
                MethodKind::Get,
                MethodKind::Set,
                MethodKind::Method,
                MethodKind::Method,
                MethodKind::Method,
            ]
        );
    }

    #[test]
    fn test_static_constructor_method_is_allowed() {
        let body = members("class { static constructor() {} constructor() {} }");
        assert_eq!(body.len(), 2);
    }

    #[test]
    fn test_duplicate_constructor() {
        let (result, _) = parse_class_expr("class { constructor() {} 'constructor'() {} }");
        assert_eq!(
            result.unwrap_err(),
            ParseError::DuplicateConstructor {
                span: Span::new(25, 38)
            }
        );
    }

    #[test]
    fn test_constructor_modifiers() {
        for source in [
            "class { get constructor() {} }",
            "class { async constructor() {} }",
            "class { *constructor() {} }",
        ] {
            let (result, _) = parse_class_expr(source);
            assert!(
                matches!(result, Err(ParseError::Forbidden { .. })),
                "{source}"
            );
        }
    }

    #[test]
    fn test_field_initializer_takes_sequence() {
        let body = members("class { static x = 1, 2; y = a, b }");
        assert_eq!(body.len(), 2);
        for member in &body {
            let ClassMemberKind::Field(field) = &member.kind else {
                panic!("expected a field, got {:?}", member.kind);
            };
            let value = field.value.as_ref().expect("initializer");
            assert!(matches!(&value.kind, ExprKind::Sequence(items) if items.len() == 2));
        }
    }

    #[test]
    fn test_constructor_fields() {
        let (result, _) = parse_class_expr("class { static constructor = 1 }");
        assert!(matches!(
            result,
            Err(ParseError::StaticConstructorField { .. })
        ));
        let (result, _) = parse_class_expr("class { constructor }");
        assert!(matches!(result, Err(ParseError::ConstructorField { .. })));
        // computed keys are never the constructor
        assert_eq!(members("class { ['constructor'] = 1 }").len(), 1);
    }

    #[test]
    fn test_private_field_with_modifier_needs_parens() {
        let (result, _) = parse_class_expr("class { get #x = 1 }");
        assert!(matches!(result, Err(ParseError::Expected { .. })));
    }

    #[test]
    fn test_duplicate_private_reported_at_member_start() {
        let (result, _) = parse_class_expr("class { #a; static #a() {} }");
        assert_eq!(
            result.unwrap_err(),
            ParseError::DuplicatePrivateElement {
                name: "a".into(),
                span: Span::new(12, 21)
            }
        );
    }

    #[test]
    fn test_class_fields_need_version_8() {
        let (result, _) = parse_with("class { x = 1 }", ParserOptions::new(7));
        assert!(matches!(result, Err(ParseError::Expected { .. })));
        let (result, _) = parse_with("class { async x() {} }", ParserOptions::new(7));
        assert!(result.is_err());
        let (result, _) = parse_with("class { async *x() {} }", ParserOptions::new(8));
        assert!(result.is_err());
        let (result, _) = parse_with("class { async *x() {} }", ParserOptions::new(2018));
        assert!(result.is_ok());
    }

    #[test]
    fn test_accessor_arity_is_recoverable() {
        let (result, errors) = parse_class_expr("class { get a(x) {} set b() {} set c(...v) {} }");
        assert!(result.is_ok());
        assert_eq!(
            errors,
            vec![
                ParseError::GetterParams {
                    span: Span::new(13, 14)
                },
                ParseError::SetterArity {
                    span: Span::new(25, 26)
                },
                ParseError::SetterRestParam {
                    span: Span::new(37, 41)
                },
            ]
        );
    }

    #[test]
    fn test_class_body_is_strict() {
        let (result, errors) = parse_class_expr("class { m() { var package } }");
        assert!(result.is_ok());
        assert!(matches!(
            errors.as_slice(),
            [ParseError::ReservedWord { word, .. }] if word == "package"
        ));
    }

    #[test]
    fn test_declaration_requires_name() {
        let mut parser = Parser::new("class {}", ParserOptions::default());
        assert!(parse_class(&mut parser, true).is_err());
    }
}
