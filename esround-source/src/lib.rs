//! Source code representation and error management.

use std::fmt;
use thiserror::Error;

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            content,
            line_starts,
        }
    }

    /// Resolves a byte offset into a line/column [`Position`].
    /// Offsets past the end of the content are clamped.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.content.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        };
        let line_start = self.line_starts[line];
        let column = self.content[line_start..offset].chars().count();
        Position {
            offset,
            line: line as u32 + 1,
            column: column as u32 + 1,
        }
    }

    /// Position just past the last character.
    pub fn end(&self) -> Position {
        self.position(self.content.len())
    }

    /// Returns the number of lines (an empty source has one line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// A byte offset + line/column location in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    /// Byte offset from the beginning of the source string.
    pub offset: usize,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number, measured in Unicode scalar values.
    pub column: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open `[start, end)` source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empty span at `position`.
    pub fn point(position: Position) -> Self {
        Self::new(position, position)
    }
}

/// Error raised while splitting source text into tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("invalid character `{character}` at {position}")]
    InvalidCharacter { character: char, position: Position },
    #[error("unterminated block comment starting at {position}")]
    UnterminatedComment { position: Position },
    #[error("unterminated string literal starting at {position}")]
    UnterminatedString { position: Position },
}

impl LexError {
    /// Where the offending input starts.
    pub fn position(&self) -> Position {
        match self {
            LexError::InvalidCharacter { position, .. }
            | LexError::UnterminatedComment { position }
            | LexError::UnterminatedString { position } => *position,
        }
    }
}

/// Raised on the first token that does not fit the grammar.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected {expected}, found {found} at {position}")]
pub struct ParseError {
    /// Human readable description of what the grammar allows here.
    pub expected: String,
    /// Description of the offending token.
    pub found: String,
    pub position: Position,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(expected: impl ToString, found: impl ToString, position: Position) -> Self {
        Self {
            expected: expected.to_string(),
            found: found.to_string(),
            position,
        }
    }
}

/// Represents a syntax error (lexing or parsing). A fragment either parses completely or fails
/// with exactly one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn position(&self) -> Position {
        match self {
            SyntaxError::Lex(err) => err.position(),
            SyntaxError::Parse(err) => err.position,
        }
    }
}
