//! Parses JavaScript function bodies and prints them back, keeping comments and literal text.

pub mod runner;

pub use esround_parser::ast;
pub use esround_printer::dump;
pub use esround_printer::PrintOptions;
pub use esround_source::{LexError, ParseError, Position, SyntaxError};

use ast::{Block, Program};
use esround_parser::parser::Parser;
use esround_source::Source;

/// Parses a top-level fragment.
pub fn parse(source: &str) -> Result<Program, SyntaxError> {
    let source = Source::new(source);
    let mut parser = Parser::new(&source)?;
    Ok(parser.parse_program()?)
}

/// Parses a function literal (as produced by stringifying a function) or a bare block, and
/// returns its body.
pub fn parse_function_body(source: &str) -> Result<Block, SyntaxError> {
    let source = Source::new(source);
    let mut parser = Parser::new(&source)?;
    Ok(parser.parse_function_body()?)
}

/// Prints `program` with the default [`PrintOptions`].
pub fn print(program: &Program) -> String {
    esround_printer::print_program(program, &PrintOptions::default())
}

/// Prints `block` (braces included) with the default [`PrintOptions`].
pub fn print_block(block: &Block) -> String {
    esround_printer::print_block(block, &PrintOptions::default())
}
