pub mod lexer;
pub mod token;

pub use lexer::{Lexer, LexerError, Token};
pub use token::TokenKind;
