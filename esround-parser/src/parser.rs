use crate::ast::{Block, Comment, Program};
use crate::lexer::{tokenize, Lexeme, Token};
use esround_source::{LexError, ParseError, Position, Source, Span};
use std::{mem, vec};

mod expr;
mod stmt;

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser<'a> {
    /// Cached token for peeking.
    current_token: Token,
    current_span: Span,
    /// End of the last consumed (non comment) token.
    prev_end: Position,
    lexemes: vec::IntoIter<Lexeme>,
    /// Comments read past but not yet attached to a node, in source order.
    pending_comments: Vec<(Comment, Span)>,
    /// Source code
    source: &'a Source<'a>,
}

impl<'a> Parser<'a> {
    /// Lexes `source` and positions the parser on the first token.
    pub fn new(source: &'a Source<'a>) -> Result<Self, LexError> {
        let lexemes = tokenize(source)?;
        let mut parser = Self {
            current_token: Token::Eof,
            current_span: Span::default(),
            prev_end: Position::default(),
            lexemes: lexemes.into_iter(),
            pending_comments: Vec::new(),
            source,
        };
        parser.next();
        Ok(parser)
    }
}

impl<'a> Parser<'a> {
    /// Parses a top-level fragment until the end of input.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let (body, dangling) = self.parse_stmt_list(Token::Eof)?;
        Ok(Program { body, dangling })
    }

    /// Parses the body of a function literal (`function name? (params) { ... }`) or a bare block.
    /// Nothing but comments may follow the closing `}`.
    pub fn parse_function_body(&mut self) -> ParseResult<Block> {
        if self.eat(Token::Function) {
            // the name is optional for function literals
            let name = match self.current_token.clone() {
                Token::Identifier(ident) => {
                    self.next();
                    Some(ident)
                }
                _ => None,
            };
            let params = self.parse_formal_params()?;
            log::trace!(
                "function literal {:?} with params ({}) parsed for its body",
                name,
                params.join(", ")
            );
        }
        // comments ahead of the `{` lead the first statement of the body
        let mut before = self.take_pending_comments();
        let mut block = self.parse_block()?;

        if self.current_token != Token::Eof {
            return Err(self.unexpected("end of input"));
        }
        let owner = match block.body.first_mut() {
            Some(first) => &mut first.comments.leading,
            None => &mut block.dangling,
        };
        before.append(owner);
        *owner = before;
        block.dangling.extend(self.take_pending_comments());
        Ok(block)
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    /// Advances to the next significant token. Comments on the way are queued in
    /// `pending_comments`.
    fn next(&mut self) -> Token {
        self.prev_end = self.current_span.end;
        loop {
            match self.lexemes.next() {
                Some(Lexeme {
                    token: Token::LineComment(text),
                    span,
                }) => self.pending_comments.push((Comment::line(text), span)),
                Some(Lexeme {
                    token: Token::BlockComment(text),
                    span,
                }) => self.pending_comments.push((Comment::block(text), span)),
                Some(Lexeme { token, span }) => {
                    self.current_token = token;
                    self.current_span = span;
                    break;
                }
                None => {
                    self.current_token = Token::Eof;
                    self.current_span = Span::point(self.source.end());
                    break;
                }
            }
        }
        self.current_token.clone()
    }

    /// Predicate that tests whether the current token has the same discriminant as `tok`.
    fn at(&self, tok: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(tok)
    }

    /// Predicate that tests whether the next token has the same discriminant and eats the next token if yes as a side effect.
    fn eat(&mut self, tok: Token) -> bool {
        if self.at(&tok) {
            self.next(); // eat token
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: Token) -> ParseResult<()> {
        if self.eat(tok.clone()) {
            Ok(())
        } else {
            Err(self.unexpected(tok))
        }
    }

    /// Eats an identifier and returns its name.
    fn expect_identifier(&mut self) -> ParseResult<String> {
        match self.current_token.clone() {
            Token::Identifier(ident) => {
                self.next();
                Ok(ident)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Creates an unexpected token error at the current token.
    fn unexpected(&self, expected: impl ToString) -> ParseError {
        ParseError::new(expected, &self.current_token, self.current_span.start)
    }

    fn take_pending_comments(&mut self) -> Vec<Comment> {
        self.pending_comments
            .drain(..)
            .map(|(comment, _)| comment)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Stmt, StmtKind, VarDeclarator};

    fn program(source: &str) -> Program {
        let source = source.into();
        Parser::new(&source).unwrap().parse_program().unwrap()
    }

    fn function_body(source: &str) -> Block {
        let source = source.into();
        Parser::new(&source).unwrap().parse_function_body().unwrap()
    }

    fn parse_error(source: &str) -> ParseError {
        let source = source.into();
        Parser::new(&source).unwrap().parse_program().unwrap_err()
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(program(""), Program::default());
        assert_eq!(program("  \n\t "), Program::default());
    }

    #[test]
    fn test_function_literal_body() {
        let block = function_body("function () {\n    var michael;\n    var other;\n}");
        assert_eq!(
            block.body,
            vec![
                Stmt::new(StmtKind::VarDeclaration(vec![VarDeclarator {
                    ident: "michael".to_string(),
                    init: None,
                }])),
                Stmt::new(StmtKind::VarDeclaration(vec![VarDeclarator {
                    ident: "other".to_string(),
                    init: None,
                }])),
            ]
        );
        assert_eq!(
            function_body("function named(a, b) { a = b }").body,
            vec![Stmt::new(StmtKind::ExprStmt(Expr::Assign {
                target: "a".to_string(),
                value: Box::new(Expr::Identifier("b".to_string())),
            }))]
        );
        assert_eq!(function_body("{}"), Block::default());
    }

    #[test]
    fn test_comment_only_function_body() {
        let block = function_body("function () {\n    // this is a comment\n}");
        assert!(block.body.is_empty());
        assert_eq!(block.dangling, vec![Comment::line("// this is a comment")]);
    }

    #[test]
    fn test_comment_after_function_literal() {
        let block = function_body("function () {} // done");
        assert_eq!(block.dangling, vec![Comment::line("// done")]);
    }

    #[test]
    fn test_comment_before_function_literal_body() {
        let block = function_body("// head\nfunction /* a */ () /* b */ {\n    var a;\n}");
        assert_eq!(
            block.body[0].comments.leading,
            vec![
                Comment::line("// head"),
                Comment::block("/* a */"),
                Comment::block("/* b */"),
            ]
        );
        assert!(block.dangling.is_empty());

        let block = function_body("function () /* a */ { /* b */ } // c");
        assert_eq!(
            block.dangling,
            vec![
                Comment::block("/* a */"),
                Comment::block("/* b */"),
                Comment::line("// c"),
            ]
        );
    }

    #[test]
    fn test_function_body_rejects_trailing_tokens() {
        let source = "function () {} var a;".into();
        let err = Parser::new(&source)
            .unwrap()
            .parse_function_body()
            .unwrap_err();
        assert_eq!(err.expected, "end of input");
        assert_eq!(err.found, "`var`");
    }

    #[test]
    fn test_errors() {
        let err = parse_error("var a b;");
        assert_eq!(err.to_string(), "expected `;`, found identifier `b` at 1:7");

        let err = parse_error("{ var a;");
        assert_eq!(err.expected, "`}`");
        assert_eq!(err.found, "end of input");

        let err = parse_error("function (a) {}");
        assert_eq!(err.expected, "identifier");

        let err = parse_error("function f(a,) {}");
        assert_eq!(err.expected, "identifier");
        assert_eq!(err.found, "`)`");

        let err = parse_error("function f(a b) {}");
        assert_eq!(err.expected, "`,` or `)`");

        let err = parse_error("}");
        assert_eq!(err.expected, "expression");
    }

    #[test]
    fn test_lex_error_surfaces_from_new() {
        let source = "var a; /* never closed".into();
        assert!(matches!(
            Parser::new(&source),
            Err(LexError::UnterminatedComment { .. })
        ));
    }
}
