//! Visitor pattern for AST nodes.

use crate::ast::{Block, Comment, Expr, Program, Stmt, StmtKind};

pub trait Visitor<'ast>: Sized {
    fn visit_program(&mut self, program: &'ast Program) {
        walk_program(self, program);
    }
    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }
    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
    fn visit_comment(&mut self, _comment: &'ast Comment) {}
}

/// Iteratively visit all statements in a `Vec<Stmt>`, then the dangling comments.
macro_rules! visit_stmt_list {
    ($visitor: expr, $body: expr, $dangling: expr) => {
        for stmt in $body {
            Visitor::visit_stmt($visitor, stmt);
        }
        for comment in $dangling {
            Visitor::visit_comment($visitor, comment);
        }
    };
}

pub fn walk_program<'ast>(visitor: &mut impl Visitor<'ast>, program: &'ast Program) {
    visit_stmt_list!(visitor, &program.body, &program.dangling);
}

pub fn walk_block<'ast>(visitor: &mut impl Visitor<'ast>, block: &'ast Block) {
    visit_stmt_list!(visitor, &block.body, &block.dangling);
}

pub fn walk_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast Expr) {
    match expr {
        Expr::NumberLit(_) => {}
        Expr::BoolLit(_) => {}
        Expr::NullLit => {}
        Expr::StringLit(_) => {}
        Expr::Identifier(_) => {}
        Expr::This => {}
        Expr::Paren(inner) => visitor.visit_expr(inner),
        Expr::Assign { target: _, value } => visitor.visit_expr(value),
    }
}

pub fn walk_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast Stmt) {
    for comment in &stmt.comments.leading {
        visitor.visit_comment(comment);
    }

    match &stmt.kind {
        StmtKind::Block(block) => visitor.visit_block(block),
        StmtKind::Empty => {}
        StmtKind::FnDeclaration(decl) => visitor.visit_block(&decl.body),
        StmtKind::VarDeclaration(declarators) => {
            for declarator in declarators {
                if let Some(init) = &declarator.init {
                    visitor.visit_expr(init);
                }
            }
        }
        StmtKind::ExprStmt(expr) => visitor.visit_expr(expr),
    }

    for comment in &stmt.comments.trailing {
        visitor.visit_comment(comment);
    }
}
