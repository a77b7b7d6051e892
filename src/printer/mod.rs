mod error;
mod sink;

pub use self::{error::FormatError, sink::Sink};

use crate::parse::{ast::*, token::Token, Spanned};

type PrintResult = Result<(), FormatError>;

/// Renders a syntax tree as canonical source text.
///
/// The output reproduces the tree structure exactly: a `Paren` node always
/// prints its parentheses and no other node ever gains any. Precedence is not
/// consulted, so a tree whose grouping differs from what its unparenthesized
/// text would parse to (e.g. `(a + b) * c` built without a `Paren` node) is
/// printed as `a + b * c` and does not survive a reparse. The parser never
/// builds such trees; other producers have to insert `Paren` nodes themselves.
pub struct Printer<'w, S: Sink> {
    sink: &'w mut S,
}

impl<'w, S: Sink> Printer<'w, S> {
    pub fn new(sink: &'w mut S) -> Self {
        Printer { sink }
    }

    /// Prints every declaration in order, then the trailing expression and a
    /// final line break. Stops at the first node that cannot be printed.
    pub fn program(&mut self, prg: &Program) -> PrintResult {
        for decl in &prg.decls {
            self.decl(decl)?;
        }

        self.expr(&prg.expr)?;
        self.sink.emit_char('\n')?;
        Ok(())
    }

    pub fn decl(&mut self, decl: &Decl) -> PrintResult {
        self.sink.emit(decl.name.node)?;
        self.sink.emit(" = ")?;
        self.expr(&decl.value)?;
        self.sink.emit_char('\n')?;
        Ok(())
    }

    pub fn expr(&mut self, expr: &Spanned<Expr>) -> PrintResult {
        match &expr.node {
            Expr::IntLit(lit) | Expr::BoolLit(lit) => self.sink.emit(lit)?,
            Expr::Ident(name) => self.sink.emit(name)?,
            Expr::Arith(left, op, right) => {
                let symbol = arith_symbol(op.node).ok_or_else(|| unknown_operator(op, expr))?;
                self.binary(left, symbol, right)?;
            }
            Expr::Cmp(left, op, right) => {
                let symbol = cmp_symbol(op.node).ok_or_else(|| unknown_operator(op, expr))?;
                self.binary(left, symbol, right)?;
            }
            Expr::App { func, arg } => {
                self.expr(func)?;
                self.sink.emit_char(' ')?;
                self.expr(arg)?;
            }
            Expr::Abs { param, body } => {
                self.sink.emit_char('\\')?;
                self.sink.emit(param.node)?;
                self.sink.emit(" -> ")?;
                self.expr(body)?;
            }
            Expr::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.sink.emit("if ")?;
                self.expr(cond)?;
                self.sink.emit(" then ")?;
                self.expr(then_branch)?;
                self.sink.emit(" else ")?;
                self.expr(else_branch)?;
            }
            Expr::Paren(inner) => {
                self.sink.emit_char('(')?;
                self.expr(inner)?;
                self.sink.emit_char(')')?;
            }
            Expr::EmptyList => self.sink.emit("[]")?,
            Expr::Error(_) => {
                return Err(FormatError::UnrecognizedNode {
                    node: format!("{:?}", expr.node),
                    span: expr.span,
                })
            }
        }

        Ok(())
    }

    fn binary(&mut self, left: &Spanned<Expr>, symbol: &str, right: &Spanned<Expr>) -> PrintResult {
        self.expr(left)?;
        self.sink.emit_char(' ')?;
        self.sink.emit(symbol)?;
        self.sink.emit_char(' ')?;
        self.expr(right)
    }
}

fn arith_symbol(op: Token) -> Option<&'static str> {
    Some(match op {
        Token::Plus => "+",
        Token::Minus => "-",
        Token::Star => "*",
        Token::Slash => "/",
        _ => return None,
    })
}

fn cmp_symbol(op: Token) -> Option<&'static str> {
    Some(match op {
        Token::EqualsEquals => "==",
        Token::SlashEquals => "/=",
        Token::Smaller => "<",
        Token::Greater => ">",
        Token::SmallerEquals => "<=",
        Token::GreaterEquals => ">=",
        _ => return None,
    })
}

fn unknown_operator(op: &Spanned<Token>, expr: &Spanned<Expr>) -> FormatError {
    FormatError::UnrecognizedOperator {
        op: op.node.to_string(),
        expr: format!("{:?}", expr.node),
        span: op.span,
    }
}
