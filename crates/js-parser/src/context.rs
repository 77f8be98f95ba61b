use bitflags::bitflags;
use js_ast::{Expr, ExprKind, Span, UnaryOp};

use crate::diagnostics::ParseError;

bitflags! {
    /// Grammar context of the code currently being parsed. Saved and restored
    /// around every function body, class body and field initializer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ContextFlags: u16 {
        /// Inside a function body, so `return` is allowed.
        const FUNCTION = 1 << 0;
        const ASYNC = 1 << 1;
        const GENERATOR = 1 << 2;
        /// `super.x` and `super[x]` are allowed.
        const SUPER = 1 << 3;
        /// `super(...)` is allowed (constructor of a derived class).
        const SUPER_CALL = 1 << 4;
        const STRICT = 1 << 5;
        /// Inside the initializer of a static field.
        const STATIC_FIELD_INIT = 1 << 6;
        /// Inside the body of a method with a private name.
        const PRIVATE_METHOD = 1 << 7;
    }
}

impl ContextFlags {
    /// Context for a non-arrow function body nested in `outer`.
    pub fn function(outer: ContextFlags, is_async: bool, is_generator: bool) -> ContextFlags {
        let mut flags = ContextFlags::FUNCTION | (outer & ContextFlags::STRICT);
        flags.set(ContextFlags::ASYNC, is_async);
        flags.set(ContextFlags::GENERATOR, is_generator);
        flags
    }

    /// Context for an arrow function body. Arrows see their surrounding
    /// `super` and private-member context.
    pub fn arrow(outer: ContextFlags, is_async: bool) -> ContextFlags {
        let mut flags = outer - ContextFlags::ASYNC - ContextFlags::GENERATOR;
        flags |= ContextFlags::FUNCTION;
        flags.set(ContextFlags::ASYNC, is_async);
        flags
    }

    /// Context for a class field initializer.
    pub fn field_initializer(outer: ContextFlags, is_static: bool) -> ContextFlags {
        let mut flags = ContextFlags::SUPER | (outer & ContextFlags::STRICT);
        flags.set(ContextFlags::STATIC_FIELD_INIT, is_static);
        flags
    }
}

/// `delete obj.#x` is never valid; the error points at the `delete`.
pub fn check_delete(expr: &Expr) -> Result<(), ParseError> {
    if let ExprKind::Unary(unary) = &expr.kind {
        if unary.op == UnaryOp::Delete && unary.argument.is_private_member() {
            return Err(ParseError::InvalidDeletePrivate { span: expr.span });
        }
    }
    Ok(())
}

/// An identifier reference named `arguments`.
pub fn check_arguments(flags: ContextFlags, name: &str, span: Span) -> Result<(), ParseError> {
    if name == "arguments" && flags.contains(ContextFlags::STATIC_FIELD_INIT) {
        return Err(ParseError::InvalidArgumentsInFieldInit { span });
    }
    Ok(())
}

/// A `super` keyword; `is_call` when it is immediately followed by `(`.
pub fn check_super(flags: ContextFlags, span: Span, is_call: bool) -> Result<(), ParseError> {
    if flags.contains(ContextFlags::STATIC_FIELD_INIT) {
        return Err(ParseError::InvalidSuperInFieldInit { span });
    }
    if is_call && flags.contains(ContextFlags::PRIVATE_METHOD) {
        return Err(ParseError::InvalidDirectSuperCall { span });
    }
    if is_call && !flags.contains(ContextFlags::SUPER_CALL) {
        return Err(ParseError::Forbidden {
            message: "super() call outside constructor of a subclass",
            span,
        });
    }
    if !flags.contains(ContextFlags::SUPER) {
        return Err(ParseError::Forbidden {
            message: "'super' keyword outside a method",
            span,
        });
    }
    Ok(())
}
