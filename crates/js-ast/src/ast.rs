use serde::Serialize;

use crate::Span;

/// The root AST node representing a complete script.
#[derive(Debug, Clone, Serialize)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

// =============================================================================
// Names
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

/// A `#name` private name. `name` does not include the sigil; `span` does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivateName {
    pub name: String,
    pub span: Span,
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
#[allow(clippy::large_enum_variant)]
pub enum StmtKind {
    /// Expression statement (e.g. `foo();`)
    Expression(Expr),

    /// `var`, `let` or `const` declaration
    Var(VarDecl),

    /// Function declaration
    Function(Function),

    /// Class declaration
    Class(Class),

    /// Return statement: `return expr;`
    Return(Option<Expr>),

    If(IfStmt),

    While(WhileStmt),

    DoWhile(DoWhileStmt),

    For(ForStmt),

    Break,

    Continue,

    Throw(Expr),

    /// Block statement: `{ stmts }`
    Block(Vec<Stmt>),

    /// Empty statement `;`
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, Serialize)]
pub struct VarDecl {
    pub kind: VarKind,
    pub declarations: Vec<VarDeclarator>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VarDeclarator {
    pub id: Ident,
    pub init: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct IfStmt {
    pub test: Expr,
    pub consequent: Box<Stmt>,
    pub alternate: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoWhileStmt {
    pub body: Box<Stmt>,
    pub test: Expr,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForStmt {
    pub init: Option<ForInit>,
    pub test: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, Serialize)]
pub enum ForInit {
    Var(VarDecl),
    Expr(Expr),
}

// =============================================================================
// Functions
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Function {
    pub id: Option<Ident>,
    pub params: Vec<Pattern>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
    pub is_generator: bool,
    /// Starts at the parameter list's `(` for methods, at `function` otherwise.
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArrowFunction {
    pub params: Vec<Pattern>,
    pub body: ArrowBody,
    pub is_async: bool,
}

#[derive(Debug, Clone, Serialize)]
pub enum ArrowBody {
    Expression(Box<Expr>),
    Block(Vec<Stmt>),
}

/// A binding pattern in a parameter list.
#[derive(Debug, Clone, Serialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum PatternKind {
    Identifier(String),
    /// `name = default`
    Assign {
        target: Box<Pattern>,
        default: Box<Expr>,
    },
    /// `...name`
    Rest(Box<Pattern>),
}

impl Pattern {
    pub fn is_rest(&self) -> bool {
        matches!(self.kind, PatternKind::Rest(_))
    }
}

// =============================================================================
// Classes
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Class {
    pub id: Option<Ident>,
    pub super_class: Option<Box<Expr>>,
    pub body: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassMember {
    pub kind: ClassMemberKind,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum ClassMemberKind {
    Method(MethodDefinition),
    Field(FieldDefinition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodDefinition {
    pub kind: MethodKind,
    pub is_static: bool,
    pub computed: bool,
    pub key: PropertyKey,
    pub value: Function,
}

/// A data member with an optional initializer.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDefinition {
    pub is_static: bool,
    pub computed: bool,
    pub key: PropertyKey,
    pub value: Option<Expr>,
}

impl ClassMember {
    pub fn key(&self) -> &PropertyKey {
        match &self.kind {
            ClassMemberKind::Method(method) => &method.key,
            ClassMemberKind::Field(field) => &field.key,
        }
    }

    pub fn is_static(&self) -> bool {
        match &self.kind {
            ClassMemberKind::Method(method) => method.is_static,
            ClassMemberKind::Field(field) => field.is_static,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum PropertyKey {
    Identifier(Ident),
    PrivateName(PrivateName),
    String { value: String, span: Span },
    Number { value: f64, span: Span },
    /// `[expr]`
    Computed(Box<Expr>),
}

impl PropertyKey {
    pub fn span(&self) -> Span {
        match self {
            PropertyKey::Identifier(ident) => ident.span,
            PropertyKey::PrivateName(name) => name.span,
            PropertyKey::String { span, .. } | PropertyKey::Number { span, .. } => *span,
            PropertyKey::Computed(expr) => expr.span,
        }
    }

    /// The literal name of a non-computed identifier or string key.
    pub fn static_name(&self) -> Option<&str> {
        match self {
            PropertyKey::Identifier(ident) => Some(&ident.name),
            PropertyKey::String { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, PropertyKey::Computed(_))
    }

    pub fn as_private(&self) -> Option<&PrivateName> {
        match self {
            PropertyKey::PrivateName(name) => Some(name),
            _ => None,
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum ExprKind {
    Identifier(String),
    Number(f64),
    String(String),
    Bool(bool),
    Null,
    This,
    Super,

    /// Array literal; `None` marks a hole
    Array(Vec<Option<Expr>>),

    Object(Vec<Property>),

    Function(Box<Function>),

    Arrow(Box<ArrowFunction>),

    Class(Box<Class>),

    Unary(UnaryExpr),

    /// `++x`, `x--`
    Update(UpdateExpr),

    Binary(BinaryExpr),

    Assign(AssignExpr),

    /// `test ? consequent : alternate`
    Conditional(ConditionalExpr),

    Call(CallExpr),

    New(CallExpr),

    Member(MemberExpr),

    /// Comma-separated expressions
    Sequence(Vec<Expr>),

    /// `...expr` in argument lists and array literals
    Spread(Box<Expr>),

    Await(Box<Expr>),

    Yield {
        argument: Option<Box<Expr>>,
        delegate: bool,
    },
}

impl Expr {
    /// True for `obj.#name`.
    pub fn is_private_member(&self) -> bool {
        matches!(
            &self.kind,
            ExprKind::Member(MemberExpr {
                property: MemberProperty::PrivateName(_),
                ..
            })
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Property {
    pub kind: PropertyKind,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum PropertyKind {
    KeyValue { key: PropertyKey, value: Expr },
    Shorthand(Ident),
    Method {
        kind: MethodKind,
        key: PropertyKey,
        value: Function,
    },
    Spread(Expr),
}

#[derive(Debug, Clone, Serialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub argument: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Not,
    BitNot,
    Plus,
    Minus,
    Typeof,
    Void,
    Delete,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateExpr {
    pub op: UpdateOp,
    pub prefix: bool,
    pub argument: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Serialize)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: BinaryOp,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
    Nullish,
    In,
    Instanceof,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignExpr {
    pub target: Box<Expr>,
    pub op: AssignOp,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
    Nullish,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConditionalExpr {
    pub test: Box<Expr>,
    pub consequent: Box<Expr>,
    pub alternate: Box<Expr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub property: MemberProperty,
    pub computed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub enum MemberProperty {
    Identifier(Ident),
    /// Only ever produced for non-computed access
    PrivateName(PrivateName),
    Computed(Box<Expr>),
}
