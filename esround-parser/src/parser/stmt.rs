use super::*;
use crate::ast::{Comments, FnDeclaration, Stmt, StmtKind, VarDeclarator};

impl<'a> Parser<'a> {
    /// Parses a statement together with the comments it owns.
    pub fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        let leading = self.take_pending_comments();
        let start = self.current_span.start;
        log::trace!("parsing statement at {} ({})", start, self.current_token);

        let kind = match self.current_token {
            Token::OpenBrace => StmtKind::Block(self.parse_block()?),
            Token::Semi => {
                self.next();
                StmtKind::Empty
            }
            Token::Function => self.parse_fn_declaration()?,
            Token::Var => self.parse_var_declaration()?,
            _ => {
                // expression statement
                let expr = self.parse_expr()?;
                self.consume_terminator()?;
                StmtKind::ExprStmt(expr)
            }
        };

        let mut comments = Comments {
            leading,
            trailing: Vec::new(),
        };
        self.attach_comments(&mut comments);
        Ok(Stmt { kind, comments })
    }

    /// Parses a `{ ... }` block. Comments queued before the `{` are queued again after the
    /// `}`, ahead of any comments read past the `}`, so the enclosing statement claims them.
    pub fn parse_block(&mut self) -> ParseResult<Block> {
        let mut outer = mem::take(&mut self.pending_comments);
        self.expect(Token::OpenBrace)?;
        let (body, dangling) = self.parse_stmt_list(Token::CloseBrace)?;
        self.expect(Token::CloseBrace)?;

        outer.append(&mut self.pending_comments);
        self.pending_comments = outer;
        Ok(Block { body, dangling })
    }

    /// Parses statements until `terminator` (not consumed). Comments left over when the
    /// terminator is reached are returned as dangling comments.
    pub(super) fn parse_stmt_list(
        &mut self,
        terminator: Token,
    ) -> ParseResult<(Vec<Stmt>, Vec<Comment>)> {
        let mut body = Vec::new();
        while !self.at(&terminator) {
            if self.current_token == Token::Eof {
                return Err(self.unexpected(terminator));
            }
            body.push(self.parse_stmt()?);
        }
        Ok((body, self.take_pending_comments()))
    }

    fn parse_fn_declaration(&mut self) -> ParseResult<StmtKind> {
        self.expect(Token::Function)?;
        let ident = self.expect_identifier()?;
        let params = self.parse_formal_params()?;
        let body = self.parse_block()?;

        Ok(StmtKind::FnDeclaration(FnDeclaration {
            ident,
            params,
            body,
        }))
    }

    /// Parses `( a, b, ... )`.
    pub(super) fn parse_formal_params(&mut self) -> ParseResult<Vec<String>> {
        self.expect(Token::OpenParen)?;
        let mut params = Vec::new();
        if !self.eat(Token::CloseParen) {
            loop {
                params.push(self.expect_identifier()?);

                if self.eat(Token::CloseParen) {
                    break;
                } else if !self.eat(Token::Comma) {
                    return Err(self.unexpected("`,` or `)`"));
                }
            }
        }
        Ok(params)
    }

    fn parse_var_declaration(&mut self) -> ParseResult<StmtKind> {
        self.expect(Token::Var)?;
        let mut declarators = Vec::new();
        loop {
            let ident = self.expect_identifier()?;
            let init = if self.eat(Token::Equals) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            declarators.push(VarDeclarator { ident, init });

            if !self.eat(Token::Comma) {
                break;
            }
        }
        self.consume_terminator()?;
        Ok(StmtKind::VarDeclaration(declarators))
    }

    /// Eats the `;` ending a statement. A missing `;` is accepted before `}`, at the end of
    /// input, or when the next token starts on a later line.
    fn consume_terminator(&mut self) -> ParseResult<()> {
        if self.eat(Token::Semi) {
            return Ok(());
        }
        match self.current_token {
            Token::CloseBrace | Token::Eof => Ok(()),
            _ if self.current_span.start.line > self.prev_end.line => Ok(()),
            _ => Err(self.unexpected(Token::Semi)),
        }
    }

    /// Hands the queued comments of a just parsed statement to it: comments inside the
    /// statement become leading comments, comments starting on its last line become
    /// trailing comments. The rest stay queued for the next owner.
    fn attach_comments(&mut self, comments: &mut Comments) {
        let end = self.prev_end;
        let mut rest = Vec::new();
        for (comment, span) in self.pending_comments.drain(..) {
            if !rest.is_empty() {
                rest.push((comment, span));
            } else if span.start.offset < end.offset {
                comments.leading.push(comment);
            } else if span.start.line == end.line {
                comments.trailing.push(comment);
            } else {
                rest.push((comment, span));
            }
        }
        self.pending_comments = rest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, NumberLit};
    use insta::assert_debug_snapshot;

    fn stmts(source: &str) -> Vec<Stmt> {
        let source = source.into();
        Parser::new(&source).unwrap().parse_program().unwrap().body
    }

    fn stmt(source: &str) -> StmtKind {
        let mut body = stmts(source);
        assert_eq!(body.len(), 1, "expected a single statement in {:?}", source);
        body.remove(0).kind
    }

    fn declarator(ident: &str, init: Option<Expr>) -> VarDeclarator {
        VarDeclarator {
            ident: ident.to_string(),
            init,
        }
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(stmt("{}"), StmtKind::Block(Block::default()));
        assert_eq!(stmt("{\n}"), StmtKind::Block(Block::default()));
    }

    #[test]
    fn test_empty_stmt() {
        assert_eq!(stmt(";"), StmtKind::Empty);
        assert_eq!(
            stmts(";;").into_iter().map(|s| s.kind).collect::<Vec<_>>(),
            vec![StmtKind::Empty, StmtKind::Empty]
        );
    }

    #[test]
    fn test_fn_declaration() {
        assert_debug_snapshot!(stmt("function buhler () {\n}"), @r###"
        FnDeclaration(
            FnDeclaration {
                ident: "buhler",
                params: [],
                body: Block {
                    body: [],
                    dangling: [],
                },
            },
        )
        "###);

        match stmt("function buhler (michael, other, another) {\n}") {
            StmtKind::FnDeclaration(decl) => {
                assert_eq!(decl.ident, "buhler");
                assert_eq!(decl.params, vec!["michael", "other", "another"]);
                assert_eq!(decl.body, Block::default());
            }
            kind => panic!("expected function declaration, got {:?}", kind),
        }
    }

    #[test]
    fn test_nested_fn_declaration() {
        match stmt("function buhler () {\n    var michael;\n    function other() {}\n}") {
            StmtKind::FnDeclaration(decl) => {
                assert_eq!(decl.body.body.len(), 2);
                assert!(matches!(
                    decl.body.body[1].kind,
                    StmtKind::FnDeclaration(_)
                ));
            }
            kind => panic!("expected function declaration, got {:?}", kind),
        }
    }

    #[test]
    fn test_var_declaration() {
        assert_eq!(
            stmt("var buhler = null;"),
            StmtKind::VarDeclaration(vec![declarator("buhler", Some(Expr::NullLit))])
        );
        assert_eq!(
            stmt("var buhler, michael;"),
            StmtKind::VarDeclaration(vec![
                declarator("buhler", None),
                declarator("michael", None),
            ])
        );
        assert_eq!(
            stmt("var buhler = michael, other = true, another;"),
            StmtKind::VarDeclaration(vec![
                declarator("buhler", Some(Expr::Identifier("michael".to_string()))),
                declarator("other", Some(Expr::BoolLit(true))),
                declarator("another", None),
            ])
        );
        assert_eq!(
            stmt("var buhler = 123, michael = 123.456"),
            StmtKind::VarDeclaration(vec![
                declarator("buhler", Some(Expr::NumberLit(NumberLit::new("123")))),
                declarator("michael", Some(Expr::NumberLit(NumberLit::new("123.456")))),
            ])
        );
    }

    #[test]
    fn test_parenthesized_stmts() {
        assert_eq!(
            stmts("(true); var buhler = (null);")
                .into_iter()
                .map(|s| s.kind)
                .collect::<Vec<_>>(),
            vec![
                StmtKind::ExprStmt(Expr::Paren(Box::new(Expr::BoolLit(true)))),
                StmtKind::VarDeclaration(vec![declarator(
                    "buhler",
                    Some(Expr::Paren(Box::new(Expr::NullLit)))
                )]),
            ]
        );
    }

    #[test]
    fn test_implicit_terminator() {
        assert_eq!(stmts("var a\nvar b").len(), 2);
        assert_eq!(stmts("a = 1\nb = 2").len(), 2);
        assert_eq!(stmts("{ var a }").len(), 1);
        assert_eq!(stmts("this").len(), 1);

        let source = "a = 1 b = 2".into();
        let err = Parser::new(&source)
            .unwrap()
            .parse_program()
            .unwrap_err();
        assert_eq!(err.expected, "`;`");
    }

    #[test]
    fn test_leading_and_trailing_comments() {
        let body = stmts("var buhler;\n/* this is a\n * multiline comment\n */\nvar michael; // same line\n");
        assert_eq!(body.len(), 2);
        assert!(body[0].comments.is_empty());
        assert_eq!(
            body[1].comments.leading,
            vec![Comment::block("/* this is a\n * multiline comment\n */")]
        );
        assert_eq!(body[1].comments.trailing, vec![Comment::line("// same line")]);
    }

    #[test]
    fn test_comment_on_next_line_is_not_trailing() {
        let body = stmts("var a;\n// before b\nvar b;");
        assert!(body[0].comments.trailing.is_empty());
        assert_eq!(body[1].comments.leading, vec![Comment::line("// before b")]);
    }

    #[test]
    fn test_trailing_comment_without_semicolon() {
        let body = stmts("var a /* one */ /* two */\nvar b");
        assert_eq!(
            body[0].comments.trailing,
            vec![Comment::block("/* one */"), Comment::block("/* two */")]
        );
        assert!(body[1].comments.is_empty());
    }

    #[test]
    fn test_comment_inside_stmt_is_leading() {
        let body = stmts("var a = /* inner */ 1;");
        assert_eq!(body[0].comments.leading, vec![Comment::block("/* inner */")]);
        assert!(body[0].comments.trailing.is_empty());
    }

    #[test]
    fn test_block_comments() {
        match stmt("{\n    // only a comment\n}") {
            StmtKind::Block(block) => {
                assert!(block.body.is_empty());
                assert_eq!(block.dangling, vec![Comment::line("// only a comment")]);
            }
            kind => panic!("expected block, got {:?}", kind),
        }

        match stmt("{\n    var a; // trailing\n    // dangling\n}") {
            StmtKind::Block(block) => {
                assert_eq!(block.body[0].comments.trailing, vec![Comment::line("// trailing")]);
                assert_eq!(block.dangling, vec![Comment::line("// dangling")]);
            }
            kind => panic!("expected block, got {:?}", kind),
        }
    }

    #[test]
    fn test_comment_before_nested_block_stays_outside() {
        let body = stmts("function f() /* c */ {\n    var a;\n}");
        assert_eq!(body[0].comments.leading, vec![Comment::block("/* c */")]);
        match &body[0].kind {
            StmtKind::FnDeclaration(decl) => {
                assert!(decl.body.body[0].comments.is_empty());
                assert!(decl.body.dangling.is_empty());
            }
            kind => panic!("expected function declaration, got {:?}", kind),
        }

        let body = stmts("function f /* c */ () {}");
        assert_eq!(body[0].comments.leading, vec![Comment::block("/* c */")]);
        match &body[0].kind {
            StmtKind::FnDeclaration(decl) => assert_eq!(decl.body, Block::default()),
            kind => panic!("expected function declaration, got {:?}", kind),
        }
    }

    #[test]
    fn test_comments_around_block_keep_source_order() {
        let body = stmts("function f() /* a */ { /* b */ } /* c */\nvar d;");
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].comments.leading, vec![Comment::block("/* a */")]);
        assert_eq!(body[0].comments.trailing, vec![Comment::block("/* c */")]);
        match &body[0].kind {
            StmtKind::FnDeclaration(decl) => {
                assert_eq!(decl.body.dangling, vec![Comment::block("/* b */")])
            }
            kind => panic!("expected function declaration, got {:?}", kind),
        }
        assert!(body[1].comments.is_empty());
    }

    #[test]
    fn test_comments_after_last_stmt_are_dangling() {
        let source = "var a;\n\n// end of program".into();
        let program = Parser::new(&source).unwrap().parse_program().unwrap();
        assert_eq!(program.dangling, vec![Comment::line("// end of program")]);
    }
}
