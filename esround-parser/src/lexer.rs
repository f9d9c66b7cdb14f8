use esround_source::{LexError, Source, Span};
use logos::{Lexer, Logos};
use std::fmt;

#[derive(Debug, Logos, Clone, PartialEq)]
pub enum Token {
    // literals
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    NumberLit(String),
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    BoolLit(bool),
    #[token("null")]
    Null,
    /// Raw text, quotes and escapes included.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, |lex| lex.slice().to_string())]
    #[regex(r#"'([^'\\\n]|\\[^\n])*'"#, |lex| lex.slice().to_string())]
    StringLit(String),

    // identifiers
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // - assignment
    #[token("=")]
    Equals,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // keywords
    #[token("function")]
    Function,
    #[token("var")]
    Var,
    #[token("this")]
    This,

    // comments
    #[regex(r"//[^\r\n]*", |lex| lex.slice().to_string())]
    LineComment(String),
    #[token("/*", block_comment)]
    BlockComment(String),

    // misc
    #[regex(r"[ \t\n\r\f]+", logos::skip)]
    #[error]
    Error,

    /// Only generated in parse phase when the token stream is exhausted.
    Eof,
}

/// Eats everything up to and including the closing `*/`.
/// Returns `None` (lexed as [`Token::Error`]) when the comment is never closed.
fn block_comment(lex: &mut Lexer<Token>) -> Option<String> {
    let len = lex.remainder().find("*/")?;
    lex.bump(len + 2);
    Some(lex.slice().to_string())
}

impl Token {
    /// Returns the binary binding power or `None` if invalid binop token.
    /// Binding power `0` and `1` is reserved for accepting any expression.
    /// Assignment (`Token::Equals`) is right associative with `(3, 2)`.
    pub fn binop_bp(&self) -> Option<(u8, u8)> {
        match self {
            Token::Equals => Some((3, 2)),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::NumberLit(raw) => write!(f, "number `{}`", raw),
            Token::BoolLit(val) => write!(f, "`{}`", val),
            Token::Null => write!(f, "`null`"),
            Token::StringLit(raw) => write!(f, "string {}", raw),
            Token::Identifier(ident) => write!(f, "identifier `{}`", ident),
            Token::Equals => write!(f, "`=`"),
            Token::OpenParen => write!(f, "`(`"),
            Token::CloseParen => write!(f, "`)`"),
            Token::OpenBrace => write!(f, "`{{`"),
            Token::CloseBrace => write!(f, "`}}`"),
            Token::Comma => write!(f, "`,`"),
            Token::Semi => write!(f, "`;`"),
            Token::Function => write!(f, "`function`"),
            Token::Var => write!(f, "`var`"),
            Token::This => write!(f, "`this`"),
            Token::LineComment(_) | Token::BlockComment(_) => write!(f, "comment"),
            Token::Error => write!(f, "invalid token"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// A [`Token`] together with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Span,
}

/// Splits `source` into lexemes, comments included, in source order.
/// Whitespace is the only input that does not produce a lexeme.
pub fn tokenize(source: &Source) -> Result<Vec<Lexeme>, LexError> {
    let mut lexer = Token::lexer(source.content);
    let mut lexemes = Vec::new();

    while let Some(token) = lexer.next() {
        let range = lexer.span();
        let start = source.position(range.start);

        if token == Token::Error {
            let slice = lexer.slice();
            return Err(if slice.starts_with("/*") {
                LexError::UnterminatedComment { position: start }
            } else if slice.starts_with('"') || slice.starts_with('\'') {
                LexError::UnterminatedString { position: start }
            } else {
                LexError::InvalidCharacter {
                    character: source.content[range.start..].chars().next().unwrap_or('\0'),
                    position: start,
                }
            });
        }

        lexemes.push(Lexeme {
            token,
            span: Span::new(start, source.position(range.end)),
        });
    }

    log::debug!(
        "lexed {} tokens from {} lines ({} bytes)",
        lexemes.len(),
        source.line_count(),
        source.content.len()
    );
    Ok(lexemes)
}
