//! Round-trip harness for fixture fragments.
//!
//! A fragment passes when it parses, its printed form parses back to the same tree, printing
//! that tree again gives the same text, and every comment survives.

use crate::ast::{Block, Comment, Program};
use crate::{parse, parse_function_body, print, print_block, SyntaxError};
use esround_parser::visitor::Visitor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoundTripError {
    #[error("fragment does not parse: {0}")]
    Parse(#[source] SyntaxError),
    #[error("printed output does not parse: {error}\n{printed}")]
    Reparse {
        printed: String,
        #[source]
        error: SyntaxError,
    },
    #[error("printed output parses to a different tree:\n{printed}")]
    Mismatch { printed: String },
    #[error("printing the re-parsed tree changed the output:\n{first}\n---\n{second}")]
    Unstable { first: String, second: String },
    #[error("expected {expected} comments in printed output, found {found}")]
    CommentCount { expected: usize, found: usize },
}

/// Outcome of a successful round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTrip {
    pub printed: String,
    /// Number of comments in the fragment (and in the printed output).
    pub comments: usize,
}

/// Round-trips a top-level fragment.
pub fn run(source: &str) -> Result<RoundTrip, RoundTripError> {
    check::<Program>(source)
}

/// Round-trips a function literal such as `function () { ... }`. The body is printed as a block.
pub fn run_function(source: &str) -> Result<RoundTrip, RoundTripError> {
    check::<Block>(source)
}

/// Something the runner can parse, print and inspect.
trait Fragment: PartialEq + Sized {
    fn parse(source: &str) -> Result<Self, SyntaxError>;
    /// Parses text produced by [`Fragment::print`].
    fn reparse(printed: &str) -> Result<Self, SyntaxError>;
    fn print(&self) -> String;
    fn comments(&self) -> Vec<&Comment>;
}

impl Fragment for Program {
    fn parse(source: &str) -> Result<Self, SyntaxError> {
        parse(source)
    }

    fn reparse(printed: &str) -> Result<Self, SyntaxError> {
        parse(printed)
    }

    fn print(&self) -> String {
        print(self)
    }

    fn comments(&self) -> Vec<&Comment> {
        let mut collector = CommentCollector::default();
        collector.visit_program(self);
        collector.comments
    }
}

impl Fragment for Block {
    fn parse(source: &str) -> Result<Self, SyntaxError> {
        parse_function_body(source)
    }

    fn reparse(printed: &str) -> Result<Self, SyntaxError> {
        // a bare block is accepted in place of a function literal
        parse_function_body(printed)
    }

    fn print(&self) -> String {
        print_block(self)
    }

    fn comments(&self) -> Vec<&Comment> {
        let mut collector = CommentCollector::default();
        collector.visit_block(self);
        collector.comments
    }
}

#[derive(Default)]
struct CommentCollector<'ast> {
    comments: Vec<&'ast Comment>,
}

impl<'ast> Visitor<'ast> for CommentCollector<'ast> {
    fn visit_comment(&mut self, comment: &'ast Comment) {
        self.comments.push(comment);
    }
}

fn check<F: Fragment>(source: &str) -> Result<RoundTrip, RoundTripError> {
    log::debug!("round-tripping {} bytes", source.len());
    let ast = F::parse(source).map_err(RoundTripError::Parse)?;
    let printed = ast.print();

    let reparsed = match F::reparse(&printed) {
        Ok(reparsed) => reparsed,
        Err(error) => return Err(RoundTripError::Reparse { printed, error }),
    };
    if reparsed != ast {
        return Err(RoundTripError::Mismatch { printed });
    }

    let second = reparsed.print();
    if second != printed {
        return Err(RoundTripError::Unstable {
            first: printed,
            second,
        });
    }

    let comments = ast.comments();
    let found = reparsed.comments().len();
    if found != comments.len() {
        return Err(RoundTripError::CommentCount {
            expected: comments.len(),
            found,
        });
    }
    // every comment must appear verbatim in the output
    let printed_comments = comments
        .iter()
        .filter(|comment| printed.contains(comment.text.as_str()))
        .count();
    if printed_comments != comments.len() {
        return Err(RoundTripError::CommentCount {
            expected: comments.len(),
            found: printed_comments,
        });
    }

    log::debug!("round trip ok, {} comments", comments.len());
    Ok(RoundTrip {
        comments: comments.len(),
        printed,
    })
}
