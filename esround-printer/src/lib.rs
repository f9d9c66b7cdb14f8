//! Turns syntax trees back into text: source re-emission and a debugging tree dump.

pub mod dump;
pub mod printer;

pub use printer::{print_block, print_program, PrintOptions, Printer};
