use js_ast::BinaryOp;
use js_lexer::TokenKind;

/// Binding power for Pratt parsing. Returns (left_bp, right_bp).
/// A higher binding power means tighter binding.
///
/// Operator precedence (from lowest to highest):
///  1. `= += -= ...` (assignment)      (right, parsed by the caller)
///  2. `?:` (conditional)              (right, parsed by the caller)
///  3. `??`                            (left)
///  4. `||`                            (left)
///  5. `&&`                            (left)
///  6. `|`                             (left)
///  7. `^`                             (left)
///  8. `&`                             (left)
///  9. `== != === !==`                 (left)
/// 10. `< <= > >= instanceof in`       (left)
/// 11. `<< >> >>>`                     (left)
/// 12. `+ -`                           (left)
/// 13. `* / %`                         (left)
/// 14. `**`                            (right)
pub fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::QuestionQuestion => Some((3, 4)),

        TokenKind::PipePipe => Some((5, 6)),

        TokenKind::AmpersandAmpersand => Some((7, 8)),

        TokenKind::Pipe => Some((9, 10)),

        TokenKind::Caret => Some((11, 12)),

        TokenKind::Ampersand => Some((13, 14)),

        TokenKind::EqualsEquals
        | TokenKind::BangEquals
        | TokenKind::EqualsEqualsEquals
        | TokenKind::BangEqualsEquals => Some((15, 16)),

        TokenKind::Less
        | TokenKind::Greater
        | TokenKind::LessEquals
        | TokenKind::GreaterEquals
        | TokenKind::Instanceof
        | TokenKind::In => Some((17, 18)),

        TokenKind::ShiftLeft | TokenKind::ShiftRight | TokenKind::UnsignedShiftRight => {
            Some((19, 20))
        }

        TokenKind::Plus | TokenKind::Minus => Some((21, 22)),

        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((23, 24)),

        // Exponentiation (right-associative)
        TokenKind::StarStar => Some((26, 25)),

        _ => None,
    }
}

pub fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::QuestionQuestion => BinaryOp::Nullish,
        TokenKind::PipePipe => BinaryOp::Or,
        TokenKind::AmpersandAmpersand => BinaryOp::And,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Ampersand => BinaryOp::BitAnd,
        TokenKind::EqualsEquals => BinaryOp::Eq,
        TokenKind::BangEquals => BinaryOp::NotEq,
        TokenKind::EqualsEqualsEquals => BinaryOp::StrictEq,
        TokenKind::BangEqualsEquals => BinaryOp::StrictNotEq,
        TokenKind::Less => BinaryOp::Lt,
        TokenKind::LessEquals => BinaryOp::LtEq,
        TokenKind::Greater => BinaryOp::Gt,
        TokenKind::GreaterEquals => BinaryOp::GtEq,
        TokenKind::Instanceof => BinaryOp::Instanceof,
        TokenKind::In => BinaryOp::In,
        TokenKind::ShiftLeft => BinaryOp::ShiftLeft,
        TokenKind::ShiftRight => BinaryOp::ShiftRight,
        TokenKind::UnsignedShiftRight => BinaryOp::UnsignedShiftRight,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::StarStar => BinaryOp::Pow,
        _ => return None,
    };
    Some(op)
}

/// Operands of binary operators are parsed starting at this power, so a
/// conditional or assignment never appears unparenthesized inside one.
pub const TERNARY_BP: u8 = 2;
