use std::iter::Peekable;

use super::{ast::*, error::LexError, token::*, *};

type ExprResult<'input> = Result<Spanned<Expr<'input>>, Spanned<ParseError<'input>>>;
type LineResult<'input> = Result<Line<'input>, Spanned<ParseError<'input>>>;

enum Line<'input> {
    Decl(Decl<'input>),
    Expr(Spanned<Expr<'input>>),
}

pub struct Parser<'input, I>
where
    I: Scanner<'input>,
{
    pub(crate) source: &'input Source,
    scanner: Peekable<I>,
    pub(crate) err_count: usize,
}

impl<'input, I> Parser<'input, I>
where
    I: Scanner<'input>,
{
    pub fn new(scanner: I) -> Self {
        let source = scanner.source();
        let peekable = scanner.peekable();

        Parser {
            source,
            scanner: peekable,
            err_count: 0,
        }
    }

    pub fn err_count(&self) -> usize {
        self.err_count
    }
}

impl<'input, I> Parser<'input, I>
where
    I: Scanner<'input>,
{
    /// Parses the whole source. Lines that fail to parse are kept in the tree
    /// as `Expr::Error` nodes and counted in `err_count`.
    pub fn parse(&mut self) -> Program<'input> {
        let mut decls = vec![];
        let mut expr: Option<Spanned<Expr<'input>>> = None;

        self.skip_newlines();
        while self.scanner.peek().is_some() {
            // another line follows, so the previous expression was not the last one
            if let Some(prev) = expr.take() {
                let value = if prev.node.is_error() {
                    prev
                } else {
                    self.err_count += 1;
                    Spanned::from_span(prev.span, Expr::Error(ParseError::ExpectedDecl))
                };
                let name = Spanned::from_span(value.span, "");
                decls.push(Decl { name, value });
            }

            match self.line() {
                Ok(Line::Decl(decl)) => decls.push(decl),
                Ok(Line::Expr(e)) => expr = Some(e),
                Err(err) => {
                    self.advance_until(Token::Newline);
                    expr = Some(Spanned::from_span(err.span, Expr::Error(err.node)));
                }
            }
            self.skip_newlines();
        }

        let expr = expr.unwrap_or_else(|| {
            self.err_count += 1;
            let len = self.source.code.len();
            Spanned::new(len, len, Expr::Error(ParseError::MissingExpr))
        });

        Program { decls, expr }
    }

    fn line(&mut self) -> LineResult<'input> {
        let expr = self.parse_expression(Precedence::None)?;

        let line = if self.peek_eq(Token::Equals) {
            let eq = self.advance()?;
            if let Expr::Ident(name) = expr.node {
                self.skip_newlines();
                let value = self.parse_expression(Precedence::None)?;
                Line::Decl(Decl {
                    name: Spanned::from_span(expr.span, name),
                    value,
                })
            } else {
                return Err(self.infix_err(&eq));
            }
        } else {
            Line::Expr(expr)
        };

        if self.scanner.peek().is_some() {
            self.consume(Token::Newline)?;
        }
        Ok(line)
    }

    fn skip_newlines(&mut self) {
        while self.peek_eq(Token::Newline) {
            self.scanner.next();
        }
    }

    fn advance_until(&mut self, token: Token<'input>) {
        while let Some(peek) = self.scanner.peek() {
            if let Ok(Spanned { node, .. }) = peek {
                if *node == token {
                    break;
                }
            }

            self.scanner.next();
        }
    }

    pub fn expression(&mut self) -> Spanned<Expr<'input>> {
        let as_err = |err: Spanned<ParseError<'input>>| {
            Spanned::new(err.span.start, err.span.end, Expr::Error(err.node))
        };

        let expr = self.parse_expression(Precedence::None);

        if expr.is_err() {
            self.advance_until(Token::Newline);
        }

        expr.unwrap_or_else(as_err)
    }

    fn parse_expression(&mut self, precedence: Precedence) -> ExprResult<'input> {
        let token = self.advance()?;
        let mut left = self.prefix(&token)?;

        while self.next_higher_precedence(precedence) {
            let token = self.advance()?;
            left = self.infix(&token, left)?;
        }

        Ok(left)
    }

    fn advance(&mut self) -> Scanned<'input> {
        match self.scanner.next() {
            Some(Ok(token)) => Ok(token),
            Some(Err(err)) => {
                self.err_count += 1;
                Err(err)
            }
            None => {
                let len = self.source.code.len();
                let span = Span::new(len, len);
                self.make_lex_err(span, "Unexpected end of file")
            }
        }
    }

    fn peek_eq(&mut self, expected: Token<'input>) -> bool {
        self.scanner.peek().map_or(false, |peek| match peek {
            Ok(Spanned { node, .. }) => *node == expected,
            _ => false,
        })
    }

    fn consume_ident(&mut self) -> Result<Spanned<&'input str>, Spanned<ParseError<'input>>> {
        let next = self.advance()?;
        if let Spanned {
            span,
            node: Token::Ident(ident),
        } = next
        {
            Ok(Spanned::from_span(span, ident))
        } else {
            Err(self.consume_err(&next, Token::Ident("identifier")))
        }
    }

    fn consume(&mut self, expected: Token<'input>) -> Scanned<'input> {
        let next = self.advance()?;
        if next.node == expected {
            Ok(next)
        } else {
            Err(self.consume_err(&next, expected))
        }
    }

    /// Consumes `expected`, allowing it to start a new line.
    fn consume_keyword(&mut self, expected: Token<'input>) -> Scanned<'input> {
        self.skip_newlines();
        let token = self.consume(expected)?;
        self.skip_newlines();
        Ok(token)
    }

    fn next_higher_precedence(&mut self, precedence: Precedence) -> bool {
        self.scanner.peek().map_or(false, |scanned| {
            if let Ok(spanned) = scanned {
                spanned.node.precedence() > precedence
            } else {
                false
            }
        })
    }

    fn infix(
        &mut self,
        token: &Spanned<Token<'input>>,
        left: Spanned<Expr<'input>>,
    ) -> ExprResult<'input> {
        let tok = token.node;
        match tok {
            Token::Plus | Token::Minus | Token::Star | Token::Slash => {
                self.skip_newlines();
                let right = self.parse_expression(tok.precedence())?;
                Ok(Spanned::new(
                    left.span.start,
                    right.span.end,
                    Expr::Arith(Box::new(left), *token, Box::new(right)),
                ))
            }
            Token::EqualsEquals
            | Token::SlashEquals
            | Token::Smaller
            | Token::SmallerEquals
            | Token::Greater
            | Token::GreaterEquals => {
                self.skip_newlines();
                let right = self.parse_expression(tok.precedence())?;
                Ok(Spanned::new(
                    left.span.start,
                    right.span.end,
                    Expr::Cmp(Box::new(left), *token, Box::new(right)),
                ))
            }
            // juxtaposition: the token already starts the argument
            _ if tok.starts_atom() => {
                let arg = self.prefix(token)?;
                Ok(Spanned::new(
                    left.span.start,
                    arg.span.end,
                    Expr::App {
                        func: Box::new(left),
                        arg: Box::new(arg),
                    },
                ))
            }
            _ => Err(self.infix_err(token)),
        }
    }

    fn prefix(&mut self, token: &Spanned<Token<'input>>) -> ExprResult<'input> {
        let ok_spanned = |expr| Ok(Spanned::from_span(token.span, expr));

        match token.node {
            Token::IntLit(lit) => ok_spanned(Expr::IntLit(lit)),
            Token::True => ok_spanned(Expr::BoolLit("true")),
            Token::False => ok_spanned(Expr::BoolLit("false")),
            Token::Ident(name) => ok_spanned(Expr::Ident(name)),
            Token::LParen => {
                let inner = self.parse_expression(Precedence::None)?;
                let close = self.consume(Token::RParen)?;
                Ok(Spanned::new(
                    token.span.start,
                    close.span.end,
                    Expr::Paren(Box::new(inner)),
                ))
            }
            Token::LBracket => {
                let close = self.consume(Token::RBracket)?;
                Ok(Spanned::new(token.span.start, close.span.end, Expr::EmptyList))
            }
            Token::Backslash => {
                let param = self.consume_ident()?;
                self.consume(Token::Arrow)?;
                self.skip_newlines();
                let body = self.parse_expression(Precedence::None)?;
                Ok(Spanned::new(
                    token.span.start,
                    body.span.end,
                    Expr::Abs {
                        param,
                        body: Box::new(body),
                    },
                ))
            }
            Token::If => {
                self.skip_newlines();
                let cond = self.parse_expression(Precedence::None)?;
                self.consume_keyword(Token::Then)?;
                let then_branch = self.parse_expression(Precedence::None)?;
                self.consume_keyword(Token::Else)?;
                let else_branch = self.parse_expression(Precedence::None)?;
                Ok(Spanned::new(
                    token.span.start,
                    else_branch.span.end,
                    Expr::If {
                        cond: Box::new(cond),
                        then_branch: Box::new(then_branch),
                        else_branch: Box::new(else_branch),
                    },
                ))
            }
            _ => Err(self.prefix_err(token)),
        }
    }

    fn make_lex_err(&mut self, span: Span, cause: &str) -> Scanned<'input> {
        self.err_count += 1;
        Err(Spanned {
            span,
            node: ParseError::LexError(LexError::with_cause(cause)),
        })
    }

    fn prefix_err(&mut self, token: &Spanned<Token<'input>>) -> Spanned<ParseError<'input>> {
        self.err_count += 1;
        let s = format!("Invalid token in prefix rule: '{}'", token.node);
        Spanned::from_span(token.span, ParseError::PrefixError(s))
    }

    fn infix_err(&mut self, token: &Spanned<Token<'input>>) -> Spanned<ParseError<'input>> {
        self.err_count += 1;
        let s = format!("Invalid token in infix rule: '{}'", token.node);
        Spanned::from_span(token.span, ParseError::InfixError(s))
    }

    fn consume_err(
        &mut self,
        actual: &Spanned<Token<'input>>,
        expected: Token<'input>,
    ) -> Spanned<ParseError<'input>> {
        self.err_count += 1;
        Spanned::from_span(
            actual.span,
            ParseError::ConsumeError {
                actual: actual.node,
                expected,
            },
        )
    }
}
