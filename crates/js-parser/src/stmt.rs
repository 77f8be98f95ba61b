use js_ast::*;
use js_lexer::TokenKind;

use crate::class;
use crate::context::ContextFlags;
use crate::diagnostics::ParseError;
use crate::expr;
use crate::parser::{PResult, Parser};

/// Parse a single statement.
pub fn parse_stmt(parser: &mut Parser) -> PResult<Stmt> {
    match parser.current_kind() {
        TokenKind::Semicolon => {
            let span = parser.advance().span;
            Ok(Stmt {
                kind: StmtKind::Empty,
                span,
            })
        }
        TokenKind::LeftBrace => parse_block(parser),
        TokenKind::Var => parse_var_stmt(parser, VarKind::Var),
        TokenKind::Const => parse_var_stmt(parser, VarKind::Const),
        TokenKind::Identifier if is_let_declaration(parser) => parse_var_stmt(parser, VarKind::Let),
        TokenKind::Function => parse_function_decl(parser, false),
        TokenKind::Identifier if is_async_function(parser) => parse_function_decl(parser, true),
        TokenKind::Class => {
            let class = class::parse_class(parser, true)?;
            let span = class.span;
            Ok(Stmt {
                kind: StmtKind::Class(class),
                span,
            })
        }
        TokenKind::If => parse_if(parser),
        TokenKind::While => parse_while(parser),
        TokenKind::Do => parse_do_while(parser),
        TokenKind::For => parse_for(parser),
        TokenKind::Return => parse_return(parser),
        TokenKind::Break | TokenKind::Continue => parse_break_continue(parser),
        TokenKind::Throw => parse_throw(parser),
        _ => parse_expression_stmt(parser),
    }
}

/// `let` starts a declaration only when a binding follows it.
fn is_let_declaration(parser: &mut Parser) -> bool {
    parser.check_word("let") && parser.peek_kind() == TokenKind::Identifier
}

fn is_async_function(parser: &mut Parser) -> bool {
    parser.check_word("async")
        && parser.options().async_functions()
        && parser.peek_kind() == TokenKind::Function
        && !parser.peek_newline_before()
}

pub fn parse_block(parser: &mut Parser) -> PResult<Stmt> {
    let start = parser.start_span();
    parser.expect(TokenKind::LeftBrace)?;
    let stmts = parse_stmts_until_brace(parser)?;
    Ok(Stmt {
        kind: StmtKind::Block(stmts),
        span: parser.end_span(start),
    })
}

/// Parse statements up to and including the closing `}`.
pub fn parse_stmts_until_brace(parser: &mut Parser) -> PResult<Vec<Stmt>> {
    let mut stmts = Vec::new();
    while !parser.check(TokenKind::RightBrace) {
        if parser.check(TokenKind::Eof) {
            return Err(parser.expected("'}'"));
        }
        stmts.push(parse_stmt(parser)?);
    }
    parser.advance();
    Ok(stmts)
}

// =============================================================================
// Declarations
// =============================================================================

fn parse_var_stmt(parser: &mut Parser, kind: VarKind) -> PResult<Stmt> {
    let start = parser.start_span();
    let decl = parse_var_decl(parser, kind)?;
    parser.expect_semicolon()?;
    Ok(Stmt {
        kind: StmtKind::Var(decl),
        span: parser.end_span(start),
    })
}

/// Parse `var a = 1, b` starting at the declaration keyword.
pub fn parse_var_decl(parser: &mut Parser, kind: VarKind) -> PResult<VarDecl> {
    parser.advance(); // var / let / const
    let mut declarations = Vec::new();
    loop {
        let start = parser.start_span();
        let id = parser.parse_ident(false)?;
        let init = if parser.eat(TokenKind::Equals).is_some() {
            Some(expr::parse_assign(parser)?)
        } else {
            None
        };
        declarations.push(VarDeclarator {
            id,
            init,
            span: parser.end_span(start),
        });
        if parser.eat(TokenKind::Comma).is_none() {
            break;
        }
    }
    Ok(VarDecl { kind, declarations })
}

fn parse_function_decl(parser: &mut Parser, is_async: bool) -> PResult<Stmt> {
    let start = parser.start_span();
    if is_async {
        parser.advance(); // async
    }
    parser.expect(TokenKind::Function)?;
    let is_generator = parser.eat(TokenKind::Star).is_some();
    let id = parser.parse_ident(false)?;
    let flags = ContextFlags::function(parser.context, is_async, is_generator);
    let function = parse_function_rest(parser, start, Some(id), is_async, is_generator, flags)?;
    let span = function.span;
    Ok(Stmt {
        kind: StmtKind::Function(function),
        span,
    })
}

/// Parse `(params) { body }` under `flags`. `start` is where the
/// function's span begins.
pub fn parse_function_rest(
    parser: &mut Parser,
    start: u32,
    id: Option<Ident>,
    is_async: bool,
    is_generator: bool,
    flags: ContextFlags,
) -> PResult<Function> {
    parser.with_context(flags, |parser| {
        let params = parse_params(parser)?;
        parser.expect(TokenKind::LeftBrace)?;
        let body = parse_stmts_until_brace(parser)?;
        Ok(Function {
            id,
            params,
            body,
            is_async,
            is_generator,
            span: parser.end_span(start),
        })
    })
}

/// Parse a parenthesized parameter list.
pub fn parse_params(parser: &mut Parser) -> PResult<Vec<Pattern>> {
    parser.expect(TokenKind::LeftParen)?;
    let mut params = Vec::new();
    while !parser.check(TokenKind::RightParen) {
        let start = parser.start_span();
        if parser.eat(TokenKind::Ellipsis).is_some() {
            let binding = parse_binding(parser)?;
            params.push(Pattern {
                kind: PatternKind::Rest(Box::new(binding)),
                span: parser.end_span(start),
            });
            if !parser.check(TokenKind::RightParen) {
                return Err(ParseError::Forbidden {
                    message: "Comma is not permitted after the rest element",
                    span: parser.current_span(),
                });
            }
            break;
        }

        let binding = parse_binding(parser)?;
        if parser.eat(TokenKind::Equals).is_some() {
            let default = expr::parse_assign(parser)?;
            params.push(Pattern {
                kind: PatternKind::Assign {
                    target: Box::new(binding),
                    default: Box::new(default),
                },
                span: parser.end_span(start),
            });
        } else {
            params.push(binding);
        }

        if parser.eat(TokenKind::Comma).is_none() {
            break;
        }
    }
    parser.expect(TokenKind::RightParen)?;
    Ok(params)
}

fn parse_binding(parser: &mut Parser) -> PResult<Pattern> {
    let ident = parser.parse_ident(false)?;
    Ok(Pattern {
        kind: PatternKind::Identifier(ident.name),
        span: ident.span,
    })
}

// =============================================================================
// Control flow
// =============================================================================

fn parse_paren_expr(parser: &mut Parser) -> PResult<Expr> {
    parser.expect(TokenKind::LeftParen)?;
    let expr = expr::parse_expr(parser)?;
    parser.expect(TokenKind::RightParen)?;
    Ok(expr)
}

fn parse_if(parser: &mut Parser) -> PResult<Stmt> {
    let start = parser.start_span();
    parser.advance(); // if
    let test = parse_paren_expr(parser)?;
    let consequent = Box::new(parse_stmt(parser)?);
    let alternate = if parser.eat(TokenKind::Else).is_some() {
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };
    Ok(Stmt {
        kind: StmtKind::If(IfStmt {
            test,
            consequent,
            alternate,
        }),
        span: parser.end_span(start),
    })
}

fn parse_while(parser: &mut Parser) -> PResult<Stmt> {
    let start = parser.start_span();
    parser.advance(); // while
    let test = parse_paren_expr(parser)?;
    let body = Box::new(parse_stmt(parser)?);
    Ok(Stmt {
        kind: StmtKind::While(WhileStmt { test, body }),
        span: parser.end_span(start),
    })
}

fn parse_do_while(parser: &mut Parser) -> PResult<Stmt> {
    let start = parser.start_span();
    parser.advance(); // do
    let body = Box::new(parse_stmt(parser)?);
    parser.expect(TokenKind::While)?;
    let test = parse_paren_expr(parser)?;
    // A `;` after `do ... while (x)` is always optional.
    parser.eat(TokenKind::Semicolon);
    Ok(Stmt {
        kind: StmtKind::DoWhile(DoWhileStmt { body, test }),
        span: parser.end_span(start),
    })
}

fn parse_for(parser: &mut Parser) -> PResult<Stmt> {
    let start = parser.start_span();
    parser.advance(); // for
    parser.expect(TokenKind::LeftParen)?;

    let init = match parser.current_kind() {
        TokenKind::Semicolon => None,
        TokenKind::Var => Some(ForInit::Var(parse_var_decl(parser, VarKind::Var)?)),
        TokenKind::Const => Some(ForInit::Var(parse_var_decl(parser, VarKind::Const)?)),
        TokenKind::Identifier if is_let_declaration(parser) => {
            Some(ForInit::Var(parse_var_decl(parser, VarKind::Let)?))
        }
        _ => Some(ForInit::Expr(expr::parse_expr(parser)?)),
    };
    parser.expect(TokenKind::Semicolon)?;

    let test = if parser.check(TokenKind::Semicolon) {
        None
    } else {
        Some(expr::parse_expr(parser)?)
    };
    parser.expect(TokenKind::Semicolon)?;

    let update = if parser.check(TokenKind::RightParen) {
        None
    } else {
        Some(expr::parse_expr(parser)?)
    };
    parser.expect(TokenKind::RightParen)?;

    let body = Box::new(parse_stmt(parser)?);
    Ok(Stmt {
        kind: StmtKind::For(ForStmt {
            init,
            test,
            update,
            body,
        }),
        span: parser.end_span(start),
    })
}

fn parse_return(parser: &mut Parser) -> PResult<Stmt> {
    let start = parser.start_span();
    let keyword = parser.advance();
    if !parser.in_context(ContextFlags::FUNCTION) {
        return Err(ParseError::Forbidden {
            message: "'return' outside of function",
            span: keyword.span,
        });
    }
    let argument = if parser.check(TokenKind::Semicolon) || parser.can_insert_semicolon() {
        None
    } else {
        Some(expr::parse_expr(parser)?)
    };
    parser.expect_semicolon()?;
    Ok(Stmt {
        kind: StmtKind::Return(argument),
        span: parser.end_span(start),
    })
}

fn parse_break_continue(parser: &mut Parser) -> PResult<Stmt> {
    let start = parser.start_span();
    let keyword = parser.advance();
    parser.expect_semicolon()?;
    let kind = if keyword.kind == TokenKind::Break {
        StmtKind::Break
    } else {
        StmtKind::Continue
    };
    Ok(Stmt {
        kind,
        span: parser.end_span(start),
    })
}

fn parse_throw(parser: &mut Parser) -> PResult<Stmt> {
    let start = parser.start_span();
    parser.advance(); // throw
    if parser.current_newline_before() {
        return Err(ParseError::Forbidden {
            message: "Illegal newline after throw",
            span: parser.current_span(),
        });
    }
    let argument = expr::parse_expr(parser)?;
    parser.expect_semicolon()?;
    Ok(Stmt {
        kind: StmtKind::Throw(argument),
        span: parser.end_span(start),
    })
}

fn parse_expression_stmt(parser: &mut Parser) -> PResult<Stmt> {
    let start = parser.start_span();
    let expr = expr::parse_expr(parser)?;
    parser.expect_semicolon()?;
    Ok(Stmt {
        kind: StmtKind::Expression(expr),
        span: parser.end_span(start),
    })
}
