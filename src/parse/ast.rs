use super::error::ParseError;
use super::token::Token;
use super::Spanned;

pub type ExprNode<'src> = Box<Spanned<Expr<'src>>>;

/// Declarations in source order, followed by the expression the program
/// evaluates to.
#[derive(Debug, Eq, PartialEq)]
pub struct Program<'src> {
    pub decls: Vec<Decl<'src>>,
    pub expr: Spanned<Expr<'src>>,
}

#[derive(Debug, Eq, PartialEq)]
pub struct Decl<'src> {
    pub name: Spanned<&'src str>,
    pub value: Spanned<Expr<'src>>,
}

#[derive(Debug, Eq, PartialEq)]
pub enum Expr<'src> {
    /// left behind by error recovery in the parser
    Error(ParseError<'src>),
    IntLit(&'src str),
    BoolLit(&'src str),
    Ident(&'src str),
    /// `+ - * /`
    Arith(ExprNode<'src>, Spanned<Token<'src>>, ExprNode<'src>),
    /// `== /= < > <= >=`
    Cmp(ExprNode<'src>, Spanned<Token<'src>>, ExprNode<'src>),
    App {
        func: ExprNode<'src>,
        arg: ExprNode<'src>,
    },
    Abs {
        param: Spanned<&'src str>,
        body: ExprNode<'src>,
    },
    If {
        cond: ExprNode<'src>,
        then_branch: ExprNode<'src>,
        else_branch: ExprNode<'src>,
    },
    /// parentheses that were written in the source
    Paren(ExprNode<'src>),
    EmptyList,
}

impl<'src> Expr<'src> {
    pub fn is_error(&self) -> bool {
        match self {
            Expr::Error(_) => true,
            _ => false,
        }
    }
}
