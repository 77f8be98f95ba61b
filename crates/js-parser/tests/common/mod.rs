#![allow(dead_code)]

use js_ast::visitor::{walk_class, Visitor};
use js_ast::*;
use js_parser::{ParseError, ParseResult, ParserOptions};
use serde::Serialize;

/// Route parser `tracing` output through the test harness. Set `RUST_LOG`
/// (e.g. `RUST_LOG=js_parser=trace`) to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn parse_js(source: &str) -> ParseResult {
    init_tracing();
    js_parser::parse(source)
}

pub fn parse_js_with(source: &str, options: &ParserOptions) -> ParseResult {
    init_tracing();
    js_parser::parse_with_options(source, options)
}

pub fn assert_no_errors(result: &ParseResult) {
    if !result.errors.is_empty() {
        panic!(
            "Expected no parse errors, got {} error(s):\n{:#?}",
            result.errors.len(),
            result.errors
        );
    }
}

/// Parse `source`, requiring a complete program and no diagnostics.
pub fn parse_ok(source: &str) -> Program {
    let result = parse_js(source);
    assert_no_errors(&result);
    result.program.expect("program")
}

/// Parse `source`, requiring a fatal diagnostic, and return it.
pub fn fatal(source: &str) -> ParseError {
    fatal_with(source, &ParserOptions::default())
}

pub fn fatal_with(source: &str, options: &ParserOptions) -> ParseError {
    let result = parse_js_with(source, options);
    assert!(
        result.program.is_none(),
        "Expected a fatal error for {source:?}, got diagnostics {:?}",
        result.errors
    );
    result.fatal().cloned().expect("fatal diagnostic")
}

pub fn to_json(program: &Program) -> serde_json::Value {
    serde_json::to_value(program).unwrap()
}

pub fn parse_fixture(file: &str) -> Program {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(file);
    let source = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    parse_ok(&source)
}

/// The shape of a parsed fixture: top-level statement kinds and every class
/// in visit order with its members.
#[derive(Debug, Serialize)]
pub struct Outline {
    pub statements: Vec<&'static str>,
    pub classes: Vec<ClassOutline>,
}

#[derive(Debug, Serialize)]
pub struct ClassOutline {
    pub name: Option<String>,
    pub extends: bool,
    pub members: Vec<String>,
}

impl Visitor for Outline {
    fn visit_class(&mut self, class: &Class) {
        self.classes.push(ClassOutline {
            name: class.id.as_ref().map(|id| id.name.clone()),
            extends: class.super_class.is_some(),
            members: class.body.iter().map(describe_member).collect(),
        });
        walk_class(self, class);
    }
}

pub fn outline(program: &Program) -> Outline {
    let mut outline = Outline {
        statements: program.body.iter().map(|stmt| stmt_name(&stmt.kind)).collect(),
        classes: Vec::new(),
    };
    outline.visit_program(program);
    outline
}

fn stmt_name(kind: &StmtKind) -> &'static str {
    match kind {
        StmtKind::Expression(_) => "Expression",
        StmtKind::Var(_) => "Var",
        StmtKind::Function(_) => "Function",
        StmtKind::Class(_) => "Class",
        StmtKind::Return(_) => "Return",
        StmtKind::If(_) => "If",
        StmtKind::While(_) => "While",
        StmtKind::DoWhile(_) => "DoWhile",
        StmtKind::For(_) => "For",
        StmtKind::Break => "Break",
        StmtKind::Continue => "Continue",
        StmtKind::Throw(_) => "Throw",
        StmtKind::Block(_) => "Block",
        StmtKind::Empty => "Empty",
    }
}

/// e.g. `static get #count`, `async * method load`
fn describe_member(member: &ClassMember) -> String {
    let mut parts = Vec::new();
    let key = match &member.kind {
        ClassMemberKind::Method(method) => {
            if method.is_static {
                parts.push("static");
            }
            if method.value.is_async {
                parts.push("async");
            }
            if method.value.is_generator {
                parts.push("*");
            }
            parts.push(match method.kind {
                MethodKind::Constructor => "constructor",
                MethodKind::Method => "method",
                MethodKind::Get => "get",
                MethodKind::Set => "set",
            });
            &method.key
        }
        ClassMemberKind::Field(field) => {
            if field.is_static {
                parts.push("static");
            }
            parts.push("field");
            &field.key
        }
    };
    let key = match key {
        PropertyKey::Identifier(ident) => ident.name.clone(),
        PropertyKey::PrivateName(name) => format!("#{}", name.name),
        PropertyKey::String { value, .. } => format!("{value:?}"),
        PropertyKey::Number { value, .. } => value.to_string(),
        PropertyKey::Computed(_) => "[computed]".to_string(),
    };
    format!("{} {key}", parts.join(" "))
}

#[macro_export]
macro_rules! fixture_test {
    ($name:ident, $file:expr) => {
        #[test]
        fn $name() {
            let program = common::parse_fixture($file);
            insta::assert_json_snapshot!(stringify!($name), common::outline(&program));
        }
    };
}
