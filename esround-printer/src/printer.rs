//! Re-emits source text from the AST.

use esround_parser::{
    ast::{Block, Comment, Expr, Program, Stmt, StmtKind},
    visitor::Visitor,
};

/// Printer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

/// Prints a top-level fragment.
pub fn print_program(program: &Program, options: &PrintOptions) -> String {
    let mut printer = Printer::new(options.clone());
    printer.visit_program(program);
    printer.into_output()
}

/// Prints a block, braces included.
pub fn print_block(block: &Block, options: &PrintOptions) -> String {
    let mut printer = Printer::new(options.clone());
    printer.visit_block(block);
    printer.newline();
    printer.into_output()
}

/// Writes one statement per line. Comments are reproduced verbatim: leading and dangling
/// comments on their own lines, trailing comments after the statement on the same line.
pub struct Printer {
    output: String,
    indent: usize,
    options: PrintOptions,
}

impl Printer {
    pub fn new(options: PrintOptions) -> Self {
        Self {
            output: String::new(),
            indent: 0,
            options,
        }
    }

    /// Consumes `self` and returns the printed text.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn newline(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent * self.options.indent_width {
            self.output.push(' ');
        }
    }

    /// Write a comma-separated list using a per-item formatting closure.
    fn comma_sep<T>(&mut self, items: &[T], mut fmt_item: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            fmt_item(self, item);
        }
    }

    /// Writes comments that sit on their own lines.
    fn write_comment_lines(&mut self, comments: &[Comment]) {
        for comment in comments {
            self.write_indent();
            self.write(&comment.text);
            self.newline();
        }
    }
}

impl<'ast> Visitor<'ast> for Printer {
    fn visit_program(&mut self, program: &'ast Program) {
        for stmt in &program.body {
            self.visit_stmt(stmt);
        }
        self.write_comment_lines(&program.dangling);
    }

    /// Writes the block starting at the current column, without a final newline.
    fn visit_block(&mut self, block: &'ast Block) {
        if block.body.is_empty() && block.dangling.is_empty() {
            self.write("{}");
            return;
        }

        self.write("{");
        self.newline();
        self.indent += 1;
        for stmt in &block.body {
            self.visit_stmt(stmt);
        }
        self.write_comment_lines(&block.dangling);
        self.indent -= 1;
        self.write_indent();
        self.write("}");
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        log::trace!("printing statement at depth {}", self.indent);
        self.write_comment_lines(&stmt.comments.leading);
        self.write_indent();

        match &stmt.kind {
            StmtKind::Block(block) => self.visit_block(block),
            StmtKind::Empty => self.write(";"),
            StmtKind::FnDeclaration(decl) => {
                self.write("function ");
                self.write(&decl.ident);
                self.write("(");
                self.comma_sep(&decl.params, |p, param| p.write(param));
                self.write(") ");
                self.visit_block(&decl.body);
            }
            StmtKind::VarDeclaration(declarators) => {
                self.write("var ");
                self.comma_sep(declarators, |p, declarator| {
                    p.write(&declarator.ident);
                    if let Some(init) = &declarator.init {
                        p.write(" = ");
                        p.visit_expr(init);
                    }
                });
                self.write(";");
            }
            StmtKind::ExprStmt(expr) => {
                self.visit_expr(expr);
                self.write(";");
            }
        }

        for comment in &stmt.comments.trailing {
            self.write(" ");
            self.write(&comment.text);
        }
        self.newline();
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        match expr {
            Expr::NumberLit(lit) => self.write(&lit.raw),
            Expr::BoolLit(val) => self.write(if *val { "true" } else { "false" }),
            Expr::NullLit => self.write("null"),
            Expr::StringLit(raw) => self.write(raw),
            Expr::Identifier(ident) => self.write(ident),
            Expr::This => self.write("this"),
            Expr::Paren(inner) => {
                self.write("(");
                self.visit_expr(inner);
                self.write(")");
            }
            Expr::Assign { target, value } => {
                self.write(target);
                self.write(" = ");
                self.visit_expr(value);
            }
        }
    }
}
