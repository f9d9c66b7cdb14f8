use super::*;
use crate::ast::{Expr, NumberLit};

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_expr_bp(0) // 0 to accept any expression
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        match self.current_token {
            Token::NumberLit(_) | Token::BoolLit(_) | Token::StringLit(_) | Token::Null => {
                self.parse_literal_expr()
            }
            Token::Identifier(_) => Ok(Expr::Identifier(self.expect_identifier()?)),
            Token::This => {
                self.next();
                Ok(Expr::This)
            }
            Token::OpenParen => self.parse_paren_expr(),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression use, [`Self::parse_expr`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_primary_expr()?;

        loop {
            let (l_bp, r_bp) = match self.current_token.binop_bp() {
                Some(bp) => bp,
                None => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            // self.current_token is `=`, the only binop
            let target = match lhs {
                Expr::Identifier(target) => target,
                _ => {
                    return Err(
                        self.unexpected("end of expression (only identifiers can be assigned to)")
                    )
                }
            };
            self.next();

            let rhs = self.parse_expr_bp(r_bp)?;

            lhs = Expr::Assign {
                target,
                value: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    /* Expressions.Literals */
    /// Parses a literal expression.
    /// A literal can be a number, bool, string or `null` literal.
    fn parse_literal_expr(&mut self) -> ParseResult<Expr> {
        let val = match self.current_token {
            Token::NumberLit(ref raw) => Expr::NumberLit(NumberLit::new(raw.clone())),
            Token::BoolLit(val) => Expr::BoolLit(val),
            Token::StringLit(ref raw) => Expr::StringLit(raw.clone()),
            Token::Null => Expr::NullLit,
            _ => return Err(self.unexpected("literal")),
        };
        self.next(); // eat parsed token
        Ok(val)
    }

    /* Expressions.Paren */
    /// Parses `( expr )`. The parentheses are kept in the tree.
    fn parse_paren_expr(&mut self) -> ParseResult<Expr> {
        self.expect(Token::OpenParen)?;
        let inner = self.parse_expr()?;
        self.expect(Token::CloseParen)?;
        Ok(Expr::Paren(Box::new(inner)))
    }
}
