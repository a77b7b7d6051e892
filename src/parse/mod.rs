pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

use self::{error::ParseError, token::Token};
use crate::Source;

pub type Scanned<'src> = Result<Spanned<Token<'src>>, Spanned<ParseError<'src>>>;
type CharPos = usize;

/// Byte range into the source. `end` is the start of the last char, so the
/// range is inclusive.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Span {
    pub start: CharPos,
    pub end: CharPos,
}

impl Span {
    pub fn new(start: CharPos, end: CharPos) -> Self {
        Span { start, end }
    }
}

#[derive(Debug)]
pub struct Spanned<T> {
    pub span: Span,
    pub node: T,
}

impl<T> Spanned<T> {
    pub fn new(start: CharPos, end: CharPos, node: T) -> Self {
        let span = Span { start, end };

        Spanned { span, node }
    }

    pub fn from_span(span: Span, node: T) -> Self {
        Self { span, node }
    }
}

impl<T: Clone> Clone for Spanned<T> {
    fn clone(&self) -> Self {
        Self {
            span: self.span,
            node: self.node.clone(),
        }
    }
}

impl<T: Copy> Copy for Spanned<T> {}

impl<T: PartialEq> PartialEq for Spanned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.span == other.span
    }
}

impl<T: PartialEq> Eq for Spanned<T> {}

pub trait Scanner<'src>: Iterator<Item = Scanned<'src>> {
    fn source(&self) -> &'src Source;
}
