//! A JavaScript parser with class fields, private methods and accessors,
//! and static class features.
//!
//! ```
//! let result = js_parser::parse("class A { #x = 1; get() { return this.#x } }");
//! assert!(result.errors.is_empty());
//! assert!(result.program.is_some());
//! ```

pub mod class;
pub mod context;
pub mod diagnostics;
pub mod expr;
pub mod options;
pub mod parser;
pub mod precedence;
pub mod private_scope;
pub mod stmt;

pub use diagnostics::ParseError;
pub use options::{AllowReserved, ParserOptions};

use js_ast::Program;
use tracing::debug;

pub struct ParseResult {
    /// `None` when a fatal diagnostic ended the parse.
    pub program: Option<Program>,
    /// Recoverable diagnostics in source order, followed by the fatal one if
    /// there was one.
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// The diagnostic that ended the parse.
    pub fn fatal(&self) -> Option<&ParseError> {
        match self.program {
            Some(_) => None,
            None => self.errors.last(),
        }
    }
}

pub fn parse(source: &str) -> ParseResult {
    parse_with_options(source, &ParserOptions::default())
}

pub fn parse_with_options(source: &str, options: &ParserOptions) -> ParseResult {
    debug!(
        len = source.len(),
        ecma_version = options.version(),
        "parse start"
    );
    let mut parser = parser::Parser::new(source, options.clone());
    let program = parser.parse_program();
    let mut errors = parser.into_errors();
    let program = match program {
        Ok(program) => Some(program),
        Err(err) => {
            errors.push(err);
            None
        }
    };
    debug!(
        errors = errors.len(),
        fatal = program.is_none(),
        "parse finished"
    );
    ParseResult { program, errors }
}
