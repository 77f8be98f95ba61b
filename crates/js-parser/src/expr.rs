use js_ast::*;
use js_lexer::TokenKind;

use crate::class;
use crate::context::{self, ContextFlags};
use crate::diagnostics::ParseError;
use crate::options::AllowReserved;
use crate::parser::{PResult, Parser};
use crate::precedence::{self, TERNARY_BP};
use crate::stmt;

/// Parse an expression, including the comma operator.
pub fn parse_expr(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.start_span();
    let first = parse_assign(parser)?;
    if !parser.check(TokenKind::Comma) {
        return Ok(first);
    }
    let mut exprs = vec![first];
    while parser.eat(TokenKind::Comma).is_some() {
        exprs.push(parse_assign(parser)?);
    }
    Ok(Expr {
        kind: ExprKind::Sequence(exprs),
        span: parser.end_span(start),
    })
}

/// Parse an assignment expression (no top-level comma).
pub fn parse_assign(parser: &mut Parser) -> PResult<Expr> {
    if parser.in_context(ContextFlags::GENERATOR) && parser.check_word("yield") {
        return parse_yield(parser);
    }

    let start = parser.start_span();
    let target = parse_conditional(parser)?;
    let Some(op) = assign_op(parser.current_kind()) else {
        return Ok(target);
    };
    if !is_assignable(&target) {
        return Err(ParseError::Forbidden {
            message: "Invalid assignment target",
            span: target.span,
        });
    }
    parser.advance();
    // Right-associative: `a = b = c`
    let value = parse_assign(parser)?;
    Ok(Expr {
        kind: ExprKind::Assign(AssignExpr {
            target: Box::new(target),
            op,
            value: Box::new(value),
        }),
        span: parser.end_span(start),
    })
}

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    let op = match kind {
        TokenKind::Equals => AssignOp::Assign,
        TokenKind::PlusEquals => AssignOp::Add,
        TokenKind::MinusEquals => AssignOp::Sub,
        TokenKind::StarEquals => AssignOp::Mul,
        TokenKind::SlashEquals => AssignOp::Div,
        TokenKind::PercentEquals => AssignOp::Mod,
        TokenKind::StarStarEquals => AssignOp::Pow,
        TokenKind::ShiftLeftEquals => AssignOp::ShiftLeft,
        TokenKind::ShiftRightEquals => AssignOp::ShiftRight,
        TokenKind::UnsignedShiftRightEquals => AssignOp::UnsignedShiftRight,
        TokenKind::AmpersandEquals => AssignOp::BitAnd,
        TokenKind::PipeEquals => AssignOp::BitOr,
        TokenKind::CaretEquals => AssignOp::BitXor,
        TokenKind::AmpersandAmpersandEquals => AssignOp::And,
        TokenKind::PipePipeEquals => AssignOp::Or,
        TokenKind::QuestionQuestionEquals => AssignOp::Nullish,
        _ => return None,
    };
    Some(op)
}

fn is_assignable(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Identifier(_) | ExprKind::Member(_))
}

fn parse_yield(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.start_span();
    parser.advance(); // yield
    let delegate = !parser.current_newline_before() && parser.eat(TokenKind::Star).is_some();
    let argument = if delegate || !yield_ends_here(parser) {
        Some(Box::new(parse_assign(parser)?))
    } else {
        None
    };
    Ok(Expr {
        kind: ExprKind::Yield { argument, delegate },
        span: parser.end_span(start),
    })
}

fn yield_ends_here(parser: &Parser) -> bool {
    parser.can_insert_semicolon()
        || matches!(
            parser.current_kind(),
            TokenKind::RightParen
                | TokenKind::RightBracket
                | TokenKind::Comma
                | TokenKind::Semicolon
                | TokenKind::Colon
        )
}

fn parse_conditional(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.start_span();
    let test = parse_expr_bp(parser, TERNARY_BP + 1)?;
    if matches!(test.kind, ExprKind::Arrow(_)) || parser.eat(TokenKind::Question).is_none() {
        return Ok(test);
    }
    let consequent = parse_assign(parser)?;
    parser.expect(TokenKind::Colon)?;
    let alternate = parse_assign(parser)?;
    Ok(Expr {
        kind: ExprKind::Conditional(ConditionalExpr {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }),
        span: parser.end_span(start),
    })
}

/// Pratt expression parser for binary operators. Parses operators whose left
/// binding power is at least `min_bp`.
pub fn parse_expr_bp(parser: &mut Parser, min_bp: u8) -> PResult<Expr> {
    let start = parser.start_span();
    let mut unary_lhs = starts_unary(parser);
    let mut lhs = parse_maybe_unary(parser)?;
    if matches!(lhs.kind, ExprKind::Arrow(_)) {
        return Ok(lhs);
    }

    loop {
        let kind = parser.current_kind();
        let Some((left_bp, right_bp)) = precedence::infix_binding_power(&kind) else {
            break;
        };
        if left_bp < min_bp {
            break;
        }
        let Some(op) = precedence::binary_op(&kind) else {
            break;
        };
        if op == BinaryOp::Pow && unary_lhs {
            return Err(ParseError::Forbidden {
                message: "Unary operator used immediately before exponentiation expression",
                span: parser.current_span(),
            });
        }
        parser.advance();
        let rhs = parse_expr_bp(parser, right_bp)?;
        lhs = Expr {
            kind: ExprKind::Binary(BinaryExpr {
                left: Box::new(lhs),
                op,
                right: Box::new(rhs),
            }),
            span: parser.end_span(start),
        };
        unary_lhs = false;
    }

    Ok(lhs)
}

fn starts_unary(parser: &Parser) -> bool {
    unary_op(parser.current_kind()).is_some()
        || (parser.in_context(ContextFlags::ASYNC) && parser.check_word("await"))
}

fn unary_op(kind: TokenKind) -> Option<UnaryOp> {
    let op = match kind {
        TokenKind::Bang => UnaryOp::Not,
        TokenKind::Tilde => UnaryOp::BitNot,
        TokenKind::Plus => UnaryOp::Plus,
        TokenKind::Minus => UnaryOp::Minus,
        TokenKind::Typeof => UnaryOp::Typeof,
        TokenKind::Void => UnaryOp::Void,
        TokenKind::Delete => UnaryOp::Delete,
        _ => return None,
    };
    Some(op)
}

fn update_op(kind: TokenKind) -> Option<UpdateOp> {
    match kind {
        TokenKind::PlusPlus => Some(UpdateOp::Increment),
        TokenKind::MinusMinus => Some(UpdateOp::Decrement),
        _ => None,
    }
}

fn check_update_target(expr: &Expr) -> PResult<()> {
    if is_assignable(expr) {
        Ok(())
    } else {
        Err(ParseError::Forbidden {
            message: "Invalid assignment target",
            span: expr.span,
        })
    }
}

/// Unary, `await` and update expressions.
fn parse_maybe_unary(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.start_span();

    if let Some(op) = unary_op(parser.current_kind()) {
        parser.advance();
        let argument = parse_maybe_unary(parser)?;
        let expr = Expr {
            kind: ExprKind::Unary(UnaryExpr {
                op,
                argument: Box::new(argument),
            }),
            span: parser.end_span(start),
        };
        context::check_delete(&expr)?;
        return Ok(expr);
    }

    if parser.in_context(ContextFlags::ASYNC) && parser.check_word("await") {
        parser.advance();
        let argument = parse_maybe_unary(parser)?;
        return Ok(Expr {
            kind: ExprKind::Await(Box::new(argument)),
            span: parser.end_span(start),
        });
    }

    if let Some(op) = update_op(parser.current_kind()) {
        parser.advance();
        let argument = parse_maybe_unary(parser)?;
        check_update_target(&argument)?;
        return Ok(Expr {
            kind: ExprKind::Update(UpdateExpr {
                op,
                prefix: true,
                argument: Box::new(argument),
            }),
            span: parser.end_span(start),
        });
    }

    let expr = parse_expr_subscripts(parser)?;
    match update_op(parser.current_kind()) {
        // A line break before `++` ends the statement instead.
        Some(op) if !parser.current_newline_before() => {
            check_update_target(&expr)?;
            parser.advance();
            Ok(Expr {
                kind: ExprKind::Update(UpdateExpr {
                    op,
                    prefix: false,
                    argument: Box::new(expr),
                }),
                span: parser.end_span(start),
            })
        }
        _ => Ok(expr),
    }
}

/// An atom followed by any member accesses and calls.
pub fn parse_expr_subscripts(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.start_span();
    let base = parse_atom(parser)?;
    parse_subscripts(parser, base, start, false)
}

/// `.name`, `.#name`, `[expr]` and, unless `no_calls`, `(args)`.
fn parse_subscripts(parser: &mut Parser, mut base: Expr, start: u32, no_calls: bool) -> PResult<Expr> {
    if matches!(base.kind, ExprKind::Arrow(_)) {
        return Ok(base);
    }
    // `async(a, b) => ...` starts out looking like a call.
    let mut maybe_async_arrow = !no_calls
        && parser.options().async_functions()
        && matches!(&base.kind, ExprKind::Identifier(name) if name == "async")
        && !parser.current_newline_before();

    loop {
        match parser.current_kind() {
            TokenKind::Dot => {
                parser.advance();
                let property = if parser.check(TokenKind::PrivateName) {
                    let name = parser.parse_private_name()?;
                    parser.scope.use_name(&name.name, name.span)?;
                    MemberProperty::PrivateName(name)
                } else {
                    MemberProperty::Identifier(parser.parse_ident(true)?)
                };
                base = Expr {
                    kind: ExprKind::Member(MemberExpr {
                        object: Box::new(base),
                        property,
                        computed: false,
                    }),
                    span: parser.end_span(start),
                };
            }
            TokenKind::LeftBracket => {
                parser.advance();
                let property = parse_expr(parser)?;
                parser.expect(TokenKind::RightBracket)?;
                base = Expr {
                    kind: ExprKind::Member(MemberExpr {
                        object: Box::new(base),
                        property: MemberProperty::Computed(Box::new(property)),
                        computed: true,
                    }),
                    span: parser.end_span(start),
                };
            }
            TokenKind::LeftParen if !no_calls => {
                let args = parse_arguments(parser)?;
                if maybe_async_arrow
                    && parser.check(TokenKind::Arrow)
                    && !parser.current_newline_before()
                {
                    let params = exprs_to_params(args)?;
                    return parse_arrow_body(parser, start, params, true);
                }
                base = Expr {
                    kind: ExprKind::Call(CallExpr {
                        callee: Box::new(base),
                        args,
                    }),
                    span: parser.end_span(start),
                };
            }
            _ => break,
        }
        maybe_async_arrow = false;
    }

    Ok(base)
}

fn parse_arguments(parser: &mut Parser) -> PResult<Vec<Expr>> {
    parser.expect(TokenKind::LeftParen)?;
    let mut args = Vec::new();
    while !parser.check(TokenKind::RightParen) {
        args.push(parse_spread_or_assign(parser)?);
        if parser.eat(TokenKind::Comma).is_none() {
            break;
        }
    }
    parser.expect(TokenKind::RightParen)?;
    Ok(args)
}

fn parse_spread_or_assign(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.start_span();
    if parser.eat(TokenKind::Ellipsis).is_some() {
        let argument = parse_assign(parser)?;
        return Ok(Expr {
            kind: ExprKind::Spread(Box::new(argument)),
            span: parser.end_span(start),
        });
    }
    parse_assign(parser)
}

// =============================================================================
// Atoms
// =============================================================================

fn parse_atom(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.start_span();
    match parser.current_kind() {
        TokenKind::Identifier => parse_identifier_atom(parser),
        TokenKind::Number
        | TokenKind::HexNumber
        | TokenKind::OctalNumber
        | TokenKind::BinaryNumber => {
            let value = parse_number(parser.current_kind(), parser.current_text());
            let token = parser.advance();
            Ok(Expr {
                kind: ExprKind::Number(value),
                span: token.span,
            })
        }
        TokenKind::SingleQuotedString | TokenKind::DoubleQuotedString => {
            let value = unescape_string(parser.current_text());
            let token = parser.advance();
            Ok(Expr {
                kind: ExprKind::String(value),
                span: token.span,
            })
        }
        TokenKind::True | TokenKind::False => {
            let token = parser.advance();
            Ok(Expr {
                kind: ExprKind::Bool(token.kind == TokenKind::True),
                span: token.span,
            })
        }
        TokenKind::Null => Ok(Expr {
            kind: ExprKind::Null,
            span: parser.advance().span,
        }),
        TokenKind::This => Ok(Expr {
            kind: ExprKind::This,
            span: parser.advance().span,
        }),
        TokenKind::Super => parse_super(parser),
        TokenKind::LeftParen => parse_paren_or_arrow(parser),
        TokenKind::LeftBracket => parse_array(parser),
        TokenKind::LeftBrace => parse_object(parser),
        TokenKind::Function => parse_function_expr(parser, start, false),
        TokenKind::Class => {
            let class = class::parse_class(parser, false)?;
            let span = class.span;
            Ok(Expr {
                kind: ExprKind::Class(Box::new(class)),
                span,
            })
        }
        TokenKind::New => parse_new(parser),
        // Includes a `#name` outside of `obj.#name`.
        _ => Err(parser.unexpected()),
    }
}

fn parse_identifier_atom(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.start_span();

    if parser.check_word("async")
        && parser.options().async_functions()
        && !parser.peek_newline_before()
    {
        match parser.peek_kind() {
            TokenKind::Function => {
                parser.advance();
                return parse_function_expr(parser, start, true);
            }
            TokenKind::Identifier if parser.peek2_kind() == TokenKind::Arrow => {
                parser.advance();
                let param = parser.parse_ident(false)?;
                return parse_arrow_body(parser, start, vec![ident_pattern(param)], true);
            }
            _ => {}
        }
    }

    let ident = parser.parse_ident(false)?;
    if parser.check(TokenKind::Arrow) && !parser.current_newline_before() {
        return parse_arrow_body(parser, start, vec![ident_pattern(ident)], false);
    }
    context::check_arguments(parser.context, &ident.name, ident.span)?;
    Ok(Expr {
        kind: ExprKind::Identifier(ident.name),
        span: ident.span,
    })
}

fn ident_pattern(ident: Ident) -> Pattern {
    Pattern {
        kind: PatternKind::Identifier(ident.name),
        span: ident.span,
    }
}

fn parse_super(parser: &mut Parser) -> PResult<Expr> {
    let span = parser.current_span();
    let is_call = parser.peek_kind() == TokenKind::LeftParen;
    context::check_super(parser.context, span, is_call)?;
    parser.advance();
    if !matches!(
        parser.current_kind(),
        TokenKind::Dot | TokenKind::LeftBracket | TokenKind::LeftParen
    ) {
        return Err(parser.unexpected());
    }
    Ok(Expr {
        kind: ExprKind::Super,
        span,
    })
}

fn parse_function_expr(parser: &mut Parser, start: u32, is_async: bool) -> PResult<Expr> {
    parser.expect(TokenKind::Function)?;
    let is_generator = parser.eat(TokenKind::Star).is_some();
    let id = if parser.check(TokenKind::LeftParen) {
        None
    } else {
        Some(parser.parse_ident(false)?)
    };
    let flags = ContextFlags::function(parser.context, is_async, is_generator);
    let function = stmt::parse_function_rest(parser, start, id, is_async, is_generator, flags)?;
    let span = function.span;
    Ok(Expr {
        kind: ExprKind::Function(Box::new(function)),
        span,
    })
}

fn parse_new(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.start_span();
    parser.advance(); // new
    let callee_start = parser.start_span();
    let callee = if parser.check(TokenKind::New) {
        parse_new(parser)?
    } else {
        parse_atom(parser)?
    };
    let callee = parse_subscripts(parser, callee, callee_start, true)?;
    let args = if parser.check(TokenKind::LeftParen) {
        parse_arguments(parser)?
    } else {
        Vec::new()
    };
    Ok(Expr {
        kind: ExprKind::New(CallExpr {
            callee: Box::new(callee),
            args,
        }),
        span: parser.end_span(start),
    })
}

// =============================================================================
// Parenthesized expressions and arrow functions
// =============================================================================

fn parse_paren_or_arrow(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.start_span();
    parser.expect(TokenKind::LeftParen)?;

    let mut exprs = Vec::new();
    // First token that only an arrow parameter list accepts.
    let mut arrow_only: Option<(TokenKind, Span)> = None;
    while !parser.check(TokenKind::RightParen) {
        let expr = parse_spread_or_assign(parser)?;
        if matches!(expr.kind, ExprKind::Spread(_)) {
            arrow_only.get_or_insert((TokenKind::Ellipsis, expr.span));
        }
        exprs.push(expr);
        let Some(comma) = parser.eat(TokenKind::Comma) else {
            break;
        };
        if parser.check(TokenKind::RightParen) {
            arrow_only.get_or_insert((TokenKind::Comma, comma.span));
        }
    }
    let close = parser.expect(TokenKind::RightParen)?;

    if parser.check(TokenKind::Arrow) && !parser.current_newline_before() {
        let params = exprs_to_params(exprs)?;
        return parse_arrow_body(parser, start, params, false);
    }

    if let Some((found, span)) = arrow_only {
        return Err(ParseError::Unexpected { found, span });
    }
    match exprs.len() {
        0 => Err(ParseError::Unexpected {
            found: TokenKind::RightParen,
            span: close.span,
        }),
        1 => Ok(exprs.remove(0)),
        _ => {
            let span = exprs[0].span.merge(exprs[exprs.len() - 1].span);
            Ok(Expr {
                kind: ExprKind::Sequence(exprs),
                span,
            })
        }
    }
}

fn exprs_to_params(exprs: Vec<Expr>) -> PResult<Vec<Pattern>> {
    let count = exprs.len();
    exprs
        .into_iter()
        .enumerate()
        .map(|(i, expr)| expr_to_param(expr, i + 1 == count))
        .collect()
}

fn expr_to_param(expr: Expr, is_last: bool) -> PResult<Pattern> {
    let span = expr.span;
    let kind = match expr.kind {
        ExprKind::Identifier(name) => PatternKind::Identifier(name),
        ExprKind::Assign(AssignExpr {
            target,
            op: AssignOp::Assign,
            value,
        }) if matches!(target.kind, ExprKind::Identifier(_)) => PatternKind::Assign {
            target: Box::new(expr_to_param(*target, false)?),
            default: value,
        },
        ExprKind::Spread(inner) if is_last && matches!(inner.kind, ExprKind::Identifier(_)) => {
            PatternKind::Rest(Box::new(expr_to_param(*inner, false)?))
        }
        _ => {
            return Err(ParseError::Forbidden {
                message: "Invalid arrow function parameter",
                span,
            })
        }
    };
    Ok(Pattern { kind, span })
}

fn parse_arrow_body(
    parser: &mut Parser,
    start: u32,
    params: Vec<Pattern>,
    is_async: bool,
) -> PResult<Expr> {
    parser.expect(TokenKind::Arrow)?;
    let flags = ContextFlags::arrow(parser.context, is_async);
    let body = parser.with_context(flags, |parser| {
        if parser.eat(TokenKind::LeftBrace).is_some() {
            Ok(ArrowBody::Block(stmt::parse_stmts_until_brace(parser)?))
        } else {
            Ok(ArrowBody::Expression(Box::new(parse_assign(parser)?)))
        }
    })?;
    Ok(Expr {
        kind: ExprKind::Arrow(Box::new(ArrowFunction {
            params,
            body,
            is_async,
        })),
        span: parser.end_span(start),
    })
}

// =============================================================================
// Array and object literals
// =============================================================================

fn parse_array(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.start_span();
    parser.advance(); // [
    let mut elements = Vec::new();
    while !parser.check(TokenKind::RightBracket) {
        if parser.eat(TokenKind::Comma).is_some() {
            elements.push(None);
            continue;
        }
        elements.push(Some(parse_spread_or_assign(parser)?));
        if !parser.check(TokenKind::RightBracket) {
            parser.expect(TokenKind::Comma)?;
        }
    }
    parser.expect(TokenKind::RightBracket)?;
    Ok(Expr {
        kind: ExprKind::Array(elements),
        span: parser.end_span(start),
    })
}

fn parse_object(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.start_span();
    parser.advance(); // {
    let mut props = Vec::new();
    while !parser.check(TokenKind::RightBrace) {
        props.push(parse_property(parser)?);
        if !parser.check(TokenKind::RightBrace) {
            parser.expect(TokenKind::Comma)?;
        }
    }
    parser.expect(TokenKind::RightBrace)?;
    Ok(Expr {
        kind: ExprKind::Object(props),
        span: parser.end_span(start),
    })
}

/// `get`, `set` and `async` are modifiers unless the property ends right
/// after them (`{ get: 1 }`, `{ async }`, `{ set() {} }`).
fn is_object_modifier(parser: &mut Parser) -> bool {
    !matches!(
        parser.peek_kind(),
        TokenKind::LeftParen
            | TokenKind::Colon
            | TokenKind::Comma
            | TokenKind::RightBrace
            | TokenKind::Equals
            | TokenKind::Eof
    )
}

fn parse_property(parser: &mut Parser) -> PResult<Property> {
    let start = parser.start_span();

    if parser.eat(TokenKind::Ellipsis).is_some() {
        let argument = parse_assign(parser)?;
        return Ok(Property {
            kind: PropertyKind::Spread(argument),
            span: parser.end_span(start),
        });
    }

    let mut is_async = false;
    let mut kind = MethodKind::Method;
    if parser.options().async_functions()
        && parser.check_word("async")
        && is_object_modifier(parser)
        && !parser.peek_newline_before()
    {
        parser.advance();
        is_async = true;
    }
    let is_generator = parser.eat(TokenKind::Star).is_some();
    if !is_async
        && !is_generator
        && (parser.check_word("get") || parser.check_word("set"))
        && is_object_modifier(parser)
    {
        kind = if parser.current_text() == "get" {
            MethodKind::Get
        } else {
            MethodKind::Set
        };
        parser.advance();
    }

    let key = parse_property_key(parser)?;

    if parser.check(TokenKind::LeftParen) || is_async || is_generator || kind != MethodKind::Method {
        let flags =
            ContextFlags::function(parser.context, is_async, is_generator) | ContextFlags::SUPER;
        let fn_start = parser.start_span();
        let value = stmt::parse_function_rest(parser, fn_start, None, is_async, is_generator, flags)?;
        return Ok(Property {
            kind: PropertyKind::Method { kind, key, value },
            span: parser.end_span(start),
        });
    }

    if parser.eat(TokenKind::Colon).is_some() {
        let value = parse_assign(parser)?;
        return Ok(Property {
            kind: PropertyKind::KeyValue { key, value },
            span: parser.end_span(start),
        });
    }

    match key {
        // `{ x }` is a reference to the binding `x`.
        PropertyKey::Identifier(ident) => {
            if parser.options().allow_reserved != AllowReserved::Never {
                parser.check_unreserved(&ident.name, ident.span)?;
            }
            context::check_arguments(parser.context, &ident.name, ident.span)?;
            Ok(Property {
                kind: PropertyKind::Shorthand(ident),
                span: parser.end_span(start),
            })
        }
        _ => Err(parser.expected("':'")),
    }
}

/// Parse an object or class member key: a name (keywords allowed), a string,
/// a number or `[computed]`.
pub fn parse_property_key(parser: &mut Parser) -> PResult<PropertyKey> {
    match parser.current_kind() {
        TokenKind::SingleQuotedString | TokenKind::DoubleQuotedString => {
            let value = unescape_string(parser.current_text());
            let span = parser.advance().span;
            Ok(PropertyKey::String { value, span })
        }
        TokenKind::Number
        | TokenKind::HexNumber
        | TokenKind::OctalNumber
        | TokenKind::BinaryNumber => {
            let value = parse_number(parser.current_kind(), parser.current_text());
            let span = parser.advance().span;
            Ok(PropertyKey::Number { value, span })
        }
        TokenKind::LeftBracket => {
            parser.advance();
            let expr = parse_assign(parser)?;
            parser.expect(TokenKind::RightBracket)?;
            Ok(PropertyKey::Computed(Box::new(expr)))
        }
        _ => Ok(PropertyKey::Identifier(parser.parse_ident(true)?)),
    }
}

// =============================================================================
// Literal values
// =============================================================================

fn parse_number(kind: TokenKind, text: &str) -> f64 {
    let radix = match kind {
        TokenKind::HexNumber => 16,
        TokenKind::OctalNumber => 8,
        TokenKind::BinaryNumber => 2,
        _ => return text.parse().unwrap_or(f64::NAN),
    };
    // Folded as f64 so literals wider than u64 keep their magnitude.
    text[2..]
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, digit| acc * f64::from(radix) + f64::from(digit))
}

/// Decode a quoted string literal, quotes included in `raw`.
fn unescape_string(raw: &str) -> String {
    let inner = raw.get(1..raw.len().saturating_sub(1)).unwrap_or_default();
    if !inner.contains('\\') {
        return inner.to_string();
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('0') => out.push('\0'),
            Some('x') => {
                let digits: String = chars.by_ref().take(2).collect();
                out.push(code_point(&digits));
            }
            Some('u') if chars.peek() == Some(&'{') => {
                chars.next();
                let digits: String = chars.by_ref().take_while(|c| *c != '}').collect();
                out.push(code_point(&digits));
            }
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                out.push(code_point(&digits));
            }
            // Line continuation
            Some('\r') => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            Some('\n' | '\u{2028}' | '\u{2029}') => {}
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn code_point(hex: &str) -> char {
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParserOptions;

    fn parse(source: &str) -> PResult<Expr> {
        let mut parser = Parser::new(source, ParserOptions::default());
        parse_expr(&mut parser)
    }

    #[test]
    fn test_binary_precedence() {
        let expr = parse("1 + 2 * 3").unwrap();
        let ExprKind::Binary(add) = expr.kind else {
            panic!("expected binary");
        };
        assert_eq!(add.op, BinaryOp::Add);
        match add.right.kind {
            ExprKind::Binary(mul) => assert_eq!(mul.op, BinaryOp::Mul),
            other => panic!("expected multiplication, got {:?}", other),
        }
    }

    #[test]
    fn test_pow_after_unary_is_rejected() {
        assert!(matches!(
            parse("-a ** 2"),
            Err(ParseError::Forbidden { .. })
        ));
        assert!(parse("(-a) ** 2").is_ok());
        assert!(parse("a ** -2").is_ok());
    }

    #[test]
    fn test_assignment_target() {
        assert!(parse("a.b = c = 1").is_ok());
        assert!(matches!(
            parse("a + b = 1"),
            Err(ParseError::Forbidden {
                message: "Invalid assignment target",
                ..
            })
        ));
    }

    #[test]
    fn test_arrow_functions() {
        let expr = parse("(a, b = 1, ...c) => a").unwrap();
        let ExprKind::Arrow(arrow) = expr.kind else {
            panic!("expected arrow");
        };
        assert_eq!(arrow.params.len(), 3);
        assert!(arrow.params[2].is_rest());
        assert_eq!(expr.span, Span::new(0, 21));

        assert!(matches!(parse("x => x * 2").unwrap().kind, ExprKind::Arrow(_)));
        assert!(matches!(parse("() => {}").unwrap().kind, ExprKind::Arrow(_)));
        assert!(parse("()").is_err());
        assert!(parse("(...a)").is_err());
    }

    #[test]
    fn test_async_arrow_and_call() {
        let expr = parse("async (a) => await a").unwrap();
        match expr.kind {
            ExprKind::Arrow(arrow) => assert!(arrow.is_async),
            other => panic!("expected arrow, got {:?}", other),
        }
        assert!(matches!(parse("async(a)").unwrap().kind, ExprKind::Call(_)));
        assert!(matches!(
            parse("async x => x").unwrap().kind,
            ExprKind::Arrow(_)
        ));
    }

    #[test]
    fn test_private_member_outside_class() {
        assert_eq!(
            parse("this.#x").unwrap_err(),
            ParseError::UndeclaredPrivateName {
                name: "x".into(),
                span: Span::new(5, 7)
            }
        );
    }

    #[test]
    fn test_private_member_inside_class_frame() {
        let mut parser = Parser::new("a.#x[0].#y(1)", ParserOptions::default());
        parser.scope.enter_class();
        let expr = parse_expr(&mut parser).unwrap();
        assert!(matches!(expr.kind, ExprKind::Call(_)));
        assert!(matches!(
            parser.scope.exit_class(),
            Err(ParseError::UndeclaredPrivateName { .. })
        ));
    }

    #[test]
    fn test_private_name_atom_is_unexpected() {
        assert!(matches!(
            parse("#x"),
            Err(ParseError::Unexpected {
                found: TokenKind::PrivateName,
                ..
            })
        ));
    }

    #[test]
    fn test_delete_private_through_parens() {
        let mut parser = Parser::new("delete (this.#x)", ParserOptions::default());
        parser.scope.enter_class();
        assert_eq!(
            parse_expr(&mut parser).unwrap_err(),
            ParseError::InvalidDeletePrivate {
                span: Span::new(0, 16)
            }
        );
    }

    #[test]
    fn test_super_outside_method() {
        assert!(matches!(
            parse("super.x"),
            Err(ParseError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_object_literal() {
        let expr = parse("{ a: 1, b, get c() { return 1 }, async d() {}, *e() {}, [f]: 2, ...g }")
            .unwrap();
        let ExprKind::Object(props) = expr.kind else {
            panic!("expected object");
        };
        assert_eq!(props.len(), 7);
        assert!(matches!(props[1].kind, PropertyKind::Shorthand(_)));
        assert!(matches!(
            props[2].kind,
            PropertyKind::Method {
                kind: MethodKind::Get,
                ..
            }
        ));
        assert!(matches!(props[6].kind, PropertyKind::Spread(_)));

        let expr = parse("{ get: 1, async: 2, set }").unwrap();
        let ExprKind::Object(props) = expr.kind else {
            panic!("expected object");
        };
        assert!(matches!(props[0].kind, PropertyKind::KeyValue { .. }));
        assert!(matches!(props[2].kind, PropertyKind::Shorthand(_)));
    }

    #[test]
    fn test_new_and_member_chains() {
        let expr = parse("new a.b(1).c").unwrap();
        let ExprKind::Member(member) = expr.kind else {
            panic!("expected member");
        };
        assert!(matches!(member.object.kind, ExprKind::New(_)));
        assert!(matches!(parse("new X").unwrap().kind, ExprKind::New(_)));
    }

    #[test]
    fn test_array_holes() {
        let expr = parse("[, 1, , ...a]").unwrap();
        let ExprKind::Array(elements) = expr.kind else {
            panic!("expected array");
        };
        assert_eq!(elements.len(), 4);
        assert!(elements[0].is_none());
        assert!(elements[2].is_none());
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(parse_number(TokenKind::HexNumber, "0xff"), 255.0);
        assert_eq!(parse_number(TokenKind::OctalNumber, "0o17"), 15.0);
        assert_eq!(parse_number(TokenKind::BinaryNumber, "0b101"), 5.0);
        assert_eq!(parse_number(TokenKind::Number, ".5"), 0.5);
        assert_eq!(parse_number(TokenKind::Number, "1e3"), 1000.0);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(unescape_string(r#""plain""#), "plain");
        assert_eq!(unescape_string(r"'a\nb\tc'"), "a\nb\tc");
        assert_eq!(unescape_string(r"'\x41B\u{43}'"), "ABC");
        assert_eq!(unescape_string(r"'it\'s'"), "it's");
    }

    #[test]
    fn test_yield_only_in_generators() {
        let mut parser = Parser::new("yield* a", ParserOptions::default());
        parser.context = ContextFlags::FUNCTION | ContextFlags::GENERATOR;
        let expr = parse_expr(&mut parser).unwrap();
        assert!(matches!(expr.kind, ExprKind::Yield { delegate: true, .. }));

        assert!(matches!(
            parse("yield").unwrap().kind,
            ExprKind::Identifier(_)
        ));
    }
}
