//! Indented structural listing of a syntax tree, one node per line.

use esround_parser::{
    ast::{Block, Comment, CommentKind, Expr, Program, Stmt, StmtKind},
    visitor::{walk_expr, Visitor},
};

pub fn dump_program(program: &Program) -> String {
    let mut dumper = Dumper::default();
    dumper.visit_program(program);
    dumper.output
}

pub fn dump_block(block: &Block) -> String {
    let mut dumper = Dumper::default();
    dumper.visit_block(block);
    dumper.output
}

#[derive(Default)]
struct Dumper {
    output: String,
    depth: usize,
    /// Label for the next visited comment.
    comment_role: &'static str,
}

impl Dumper {
    fn line(&mut self, line: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.output.push_str("  ");
        }
        self.output.push_str(line.as_ref());
        self.output.push('\n');
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn comments(&mut self, role: &'static str, comments: &[Comment]) {
        self.comment_role = role;
        for comment in comments {
            self.visit_comment(comment);
        }
    }
}

impl<'ast> Visitor<'ast> for Dumper {
    fn visit_program(&mut self, program: &'ast Program) {
        self.line("Program");
        self.nested(|d| {
            for stmt in &program.body {
                d.visit_stmt(stmt);
            }
            d.comments("DanglingComment", &program.dangling);
        });
    }

    fn visit_block(&mut self, block: &'ast Block) {
        self.line("BlockStatement");
        self.nested(|d| {
            for stmt in &block.body {
                d.visit_stmt(stmt);
            }
            d.comments("DanglingComment", &block.dangling);
        });
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        self.comments("LeadingComment", &stmt.comments.leading);
        match &stmt.kind {
            StmtKind::Block(block) => self.visit_block(block),
            StmtKind::Empty => self.line("EmptyStatement"),
            StmtKind::FnDeclaration(decl) => {
                self.line(format!(
                    "FunctionDeclaration {} ({})",
                    decl.ident,
                    decl.params.join(", ")
                ));
                self.nested(|d| d.visit_block(&decl.body));
            }
            StmtKind::VarDeclaration(declarators) => {
                self.line("VariableDeclaration");
                self.nested(|d| {
                    for declarator in declarators {
                        d.line(format!("VariableDeclarator {}", declarator.ident));
                        if let Some(init) = &declarator.init {
                            d.nested(|d| d.visit_expr(init));
                        }
                    }
                });
            }
            StmtKind::ExprStmt(expr) => {
                self.line("ExpressionStatement");
                self.nested(|d| d.visit_expr(expr));
            }
        }
        self.comments("TrailingComment", &stmt.comments.trailing);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        match expr {
            Expr::NumberLit(lit) => self.line(format!("NumericLiteral {}", lit.raw)),
            Expr::BoolLit(val) => self.line(format!("BooleanLiteral {}", val)),
            Expr::NullLit => self.line("NullLiteral"),
            Expr::StringLit(raw) => self.line(format!("StringLiteral {}", raw)),
            Expr::Identifier(ident) => self.line(format!("Identifier {}", ident)),
            Expr::This => self.line("ThisExpression"),
            Expr::Paren(_) => {
                self.line("ParenthesizedExpression");
                self.nested(|d| walk_expr(d, expr));
            }
            Expr::Assign { target, .. } => {
                self.line(format!("AssignmentExpression {}", target));
                self.nested(|d| walk_expr(d, expr));
            }
        }
    }

    fn visit_comment(&mut self, comment: &'ast Comment) {
        let kind = match comment.kind {
            CommentKind::Line => "line",
            CommentKind::Block => "block",
        };
        // multi-line block comments are flattened so that the listing stays one node per line
        let text = comment.text.lines().map(str::trim).collect::<Vec<_>>().join(" ");
        self.line(format!("{} ({}) {}", self.comment_role, kind, text));
    }
}
