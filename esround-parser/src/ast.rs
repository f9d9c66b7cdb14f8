//! Syntax tree for JavaScript function bodies.
//!
//! Nodes carry no source locations, so the derived `PartialEq` compares structure only.

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    NumberLit(NumberLit),
    BoolLit(bool),
    NullLit,
    /// Raw string literal, quotes included.
    StringLit(String),
    /// An identifier (e.g. `foo`).
    Identifier(String),
    /// `this`
    This,
    /// A parenthesized expression (e.g. `(null)`). Kept so that it can be printed back.
    Paren(Box<Expr>),
    /// An assignment expression (e.g. `a = b`).
    Assign { target: String, value: Box<Expr> },
}

/// A numeric literal as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLit {
    pub raw: String,
}

impl NumberLit {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// `true` for literals written without a fractional part or exponent.
    pub fn is_integer(&self) -> bool {
        !self.raw.contains(|c| matches!(c, '.' | 'e' | 'E'))
    }

    pub fn value(&self) -> f64 {
        // the lexer only produces valid float syntax (`2.` and `.5` included)
        self.raw.parse().unwrap_or(f64::NAN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub kind: CommentKind,
    /// Exact source text, delimiters included.
    pub text: String,
}

impl Comment {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Line,
            text: text.into(),
        }
    }

    pub fn block(text: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Block,
            text: text.into(),
        }
    }
}

/// Comments owned by a statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comments {
    /// Comments before the statement (or inside it, not claimed by a nested statement).
    pub leading: Vec<Comment>,
    /// Comments after the statement, starting on the line the statement ends on.
    pub trailing: Vec<Comment>,
}

impl Comments {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub comments: Comments,
}

impl Stmt {
    /// A statement without comments.
    pub fn new(kind: StmtKind) -> Self {
        Self {
            kind,
            comments: Comments::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Block(Block),
    /// `;`
    Empty,
    FnDeclaration(FnDeclaration),
    /// `var a, b = 1;` with at least one declarator.
    VarDeclaration(Vec<VarDeclarator>),
    ExprStmt(Expr),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub body: Vec<Stmt>,
    /// Comments after the last statement, before the closing `}`.
    pub dangling: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclaration {
    pub ident: String,
    pub params: Vec<String>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclarator {
    pub ident: String,
    /// `None` when declared without an initializer.
    pub init: Option<Expr>,
}

/// A top-level fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
    /// Comments after the last statement.
    pub dangling: Vec<Comment>,
}
