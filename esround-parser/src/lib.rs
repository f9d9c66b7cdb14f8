//! Lexer, syntax tree and recursive descent parser for JavaScript function bodies.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod visitor;
