use std::{iter::Peekable, str::CharIndices};

use super::{error::*, token::*, *};
use crate::Source;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct InputPos {
    pos: CharPos,
    value: char,
}

impl InputPos {
    fn new_opt(value: Option<(CharPos, char)>) -> Option<Self> {
        let (pos, value) = value?;

        Some(InputPos { pos, value })
    }
}

pub struct Lexer<'src> {
    source: &'src Source,
    src: &'src str,
    chars: Peekable<CharIndices<'src>>,
    current: Option<InputPos>,
    prev: Option<char>,
    // open '(' and '[' - line breaks inside them are plain whitespace
    nesting: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src Source) -> Self {
        let src = &source.code;
        let mut chars = src.char_indices().peekable();

        Lexer {
            source,
            src,
            current: InputPos::new_opt(chars.next()),
            chars,
            prev: None,
            nesting: 0,
        }
    }
}

impl<'src> Lexer<'src> {
    fn pos(&self) -> CharPos {
        if let Some(InputPos { pos, .. }) = self.current {
            return pos;
        }

        self.src.len()
    }

    fn slice(&self, start: CharPos, end: CharPos) -> &'src str {
        let end = if end > self.src.len() {
            self.src.len()
        } else {
            end
        };

        &self.src[start..end]
    }

    fn spanned<T>(&self, start: CharPos, t: T) -> Spanned<T> {
        Spanned::new(start, self.pos() - self.prev.map_or(0, char::len_utf8), t)
    }
}

impl<'src> Scanner<'src> for Lexer<'src> {
    fn source(&self) -> &'src Source {
        self.source
    }
}

macro_rules! consume_single {
    ($self:ident, $start:ident, $token:expr) => {{
        $self.advance();
        Ok($self.spanned($start, $token))
    }};
}

macro_rules! consume_double {
    ($self:ident, $start:ident, $next_char:expr, $single_tok:expr, $double_tok:expr) => {{
        $self.advance();
        if let Some(InputPos { value: new, .. }) = $self.current {
            if new == $next_char {
                $self.advance();
                Ok($self.spanned($start, $double_tok))
            } else {
                Ok($self.spanned($start, $single_tok))
            }
        } else {
            Ok($self.spanned($start, $single_tok))
        }
    }};
}

impl<'src> Lexer<'src> {
    fn advance(&mut self) -> Option<InputPos> {
        let curr = self.current?;
        self.prev = Some(curr.value);
        self.current = InputPos::new_opt(self.chars.next());
        Some(curr)
    }

    fn read_while<P>(&mut self, predicate: P) -> &'src str
    where
        P: Fn(char) -> bool,
    {
        let start = self.pos();

        while let Some(InputPos { value, .. }) = self.current {
            if predicate(value) {
                self.advance();
            } else {
                break;
            }
        }

        self.slice(start, self.pos())
    }

    fn skip_whitespace(&mut self) {
        let nested = self.nesting > 0;
        self.read_while(|c| c.is_whitespace() && (nested || c != '\n'));
    }

    fn scan_ident(&mut self) -> Scanned<'src> {
        let start = self.pos();
        let slice = self.read_while(|c| c.is_alphanumeric() || c == '_');
        if let Some(keyword) = self.check_keyword(start, slice) {
            return Ok(keyword);
        }

        if !slice.is_ascii() {
            Err(self.spanned(
                start,
                ParseError::LexError(LexError::with_cause(
                    "Non ascii identifiers are currently not supported",
                )),
            ))
        } else {
            Ok(self.spanned(start, Token::Ident(slice)))
        }
    }

    fn check_keyword(&mut self, start: CharPos, slice: &'src str) -> Option<Spanned<Token<'src>>> {
        Some(self.spanned(
            start,
            match slice {
                "true" => Token::True,
                "false" => Token::False,
                "if" => Token::If,
                "then" => Token::Then,
                "else" => Token::Else,
                _ => return None,
            },
        ))
    }

    fn scan_num(&mut self) -> Scanned<'src> {
        let start = self.pos();
        let slice = self.read_while(|c| c.is_digit(10));

        match self.current {
            Some(InputPos { value, .. }) if value.is_alphabetic() || value == '_' => {
                self.read_while(|c| c.is_alphanumeric() || c == '_');
                Err(self.spanned(
                    start,
                    ParseError::LexError(LexError::with_cause(
                        "Identifiers must not start with a digit",
                    )),
                ))
            }
            _ => Ok(self.spanned(start, Token::IntLit(slice))),
        }
    }

    fn open(&mut self, start: CharPos, token: Token<'src>) -> Scanned<'src> {
        self.nesting += 1;
        consume_single!(self, start, token)
    }

    fn close(&mut self, start: CharPos, token: Token<'src>) -> Scanned<'src> {
        self.nesting = self.nesting.saturating_sub(1);
        consume_single!(self, start, token)
    }

    fn scan_token(&mut self) -> Option<Scanned<'src>> {
        self.skip_whitespace();
        let start = self.pos();

        let ch = self.current.map(|InputPos { value, .. }| value)?;

        let scanned: Scanned = match ch {
            '\n' => consume_single!(self, start, Token::Newline),
            '=' => consume_double!(self, start, '=', Token::Equals, Token::EqualsEquals),
            '/' => consume_double!(self, start, '=', Token::Slash, Token::SlashEquals),
            '<' => consume_double!(self, start, '=', Token::Smaller, Token::SmallerEquals),
            '>' => consume_double!(self, start, '=', Token::Greater, Token::GreaterEquals),
            '-' => consume_double!(self, start, '>', Token::Minus, Token::Arrow),
            '+' => consume_single!(self, start, Token::Plus),
            '*' => consume_single!(self, start, Token::Star),
            '\\' => consume_single!(self, start, Token::Backslash),
            '(' => self.open(start, Token::LParen),
            ')' => self.close(start, Token::RParen),
            '[' => self.open(start, Token::LBracket),
            ']' => self.close(start, Token::RBracket),
            c if c.is_alphabetic() => self.scan_ident(),
            c if c.is_digit(10) => self.scan_num(),
            _ => {
                self.advance();
                let span = Span::new(start, start);
                Err(Spanned {
                    span,
                    node: ParseError::LexError(LexError::default()),
                })
            }
        };

        Some(scanned)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Scanned<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scan_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &Source) -> Vec<Spanned<Token>> {
        Lexer::new(source).map(|e| e.unwrap()).collect()
    }

    #[test]
    fn test_scan_declaration() {
        let source = Source::new("main", "n  =  3+1");

        let expected = vec![
            Spanned::new(0, 0, Token::Ident("n")),
            Spanned::new(3, 3, Token::Equals),
            Spanned::new(6, 6, Token::IntLit("3")),
            Spanned::new(7, 7, Token::Plus),
            Spanned::new(8, 8, Token::IntLit("1")),
        ];

        assert_eq!(expected, tokens(&source));
    }

    #[test]
    fn test_scan_lambda() {
        let source = Source::new("main", "\\ x->x-1");

        let expected = vec![
            Spanned::new(0, 0, Token::Backslash),
            Spanned::new(2, 2, Token::Ident("x")),
            Spanned::new(3, 4, Token::Arrow),
            Spanned::new(5, 5, Token::Ident("x")),
            Spanned::new(6, 6, Token::Minus),
            Spanned::new(7, 7, Token::IntLit("1")),
        ];

        assert_eq!(expected, tokens(&source));
    }

    #[test]
    fn test_scan_comparison_operators() {
        let source = Source::new("main", "1 <= 2 <=2< =3 >= > == /= /");
        let lexer = Lexer::new(&source);

        let tokens: Vec<Token> = lexer.map(|e| e.unwrap().node).collect();
        assert_eq!(
            vec![
                Token::IntLit("1"),
                Token::SmallerEquals,
                Token::IntLit("2"),
                Token::SmallerEquals,
                Token::IntLit("2"),
                Token::Smaller,
                Token::Equals,
                Token::IntLit("3"),
                Token::GreaterEquals,
                Token::Greater,
                Token::EqualsEquals,
                Token::SlashEquals,
                Token::Slash,
            ],
            tokens
        );
    }

    #[test]
    fn test_scan_keywords() {
        let source = Source::new("main", "if true then iffy else false");
        let lexer = Lexer::new(&source);

        let tokens: Vec<Token> = lexer.map(|e| e.unwrap().node).collect();
        assert_eq!(
            vec![
                Token::If,
                Token::True,
                Token::Then,
                Token::Ident("iffy"),
                Token::Else,
                Token::False,
            ],
            tokens
        );
    }

    #[test]
    fn test_newlines_are_tokens_outside_of_parens() {
        let source = Source::new("main", "a\n(b\n c)\n[\n]");
        let lexer = Lexer::new(&source);

        let tokens: Vec<Token> = lexer.map(|e| e.unwrap().node).collect();
        assert_eq!(
            vec![
                Token::Ident("a"),
                Token::Newline,
                Token::LParen,
                Token::Ident("b"),
                Token::Ident("c"),
                Token::RParen,
                Token::Newline,
                Token::LBracket,
                Token::RBracket,
            ],
            tokens
        );
    }

    #[test]
    fn test_unbalanced_close_does_not_underflow() {
        let source = Source::new("main", ")\n)");
        let lexer = Lexer::new(&source);

        let tokens: Vec<Token> = lexer.map(|e| e.unwrap().node).collect();
        assert_eq!(vec![Token::RParen, Token::Newline, Token::RParen], tokens);
    }

    #[test]
    fn test_integer_literal_text_is_kept() {
        let source = Source::new("main", "007");

        assert_eq!(vec![Spanned::new(0, 2, Token::IntLit("007"))], tokens(&source));
    }

    #[test]
    fn test_slice_returns_correct_substring() {
        let source = Source::new("main", "hello world");
        let lexer = Lexer::new(&source);

        let slice = lexer.slice(0, source.code.len());
        assert_eq!("hello world", slice);

        let source = Source::new("main", "こんにちは");
        let mut lexer = Lexer::new(&source);

        lexer.advance();
        let pos = lexer.pos();
        let slice = lexer.slice(pos, 1000);

        assert_eq!("んにちは", slice);
    }

    #[test]
    fn pos_after_advance_equals_sizeof_char() {
        let source = Source::new("main", "こんにちは");
        let mut lexer = Lexer::new(&source);

        assert_eq!(0, lexer.pos());

        lexer.advance();
        assert_eq!('こ'.len_utf8(), lexer.pos());
    }

    #[test]
    fn test_read_while() {
        let source = Source::new("main", "hello1 world");
        let mut lexer = Lexer::new(&source);

        let slice = lexer.read_while(|c| c.is_alphabetic());
        assert_eq!("hello", slice);

        let source = Source::new("main", "hello1 world");
        let mut lexer = Lexer::new(&source);

        let slice = lexer.read_while(|c| !c.is_digit(10));
        assert_eq!("hello", slice);
    }

    #[test]
    fn test_scan_non_ascii_identifier_should_return_error() {
        let source = Source::new("main", "x = こんにちは");
        let mut lexer = Lexer::new(&source);

        lexer.scan_token().unwrap().unwrap();
        lexer.scan_token().unwrap().unwrap();
        let ident = lexer.scan_token().unwrap();

        assert_eq!(
            Err(Spanned::new(
                4,
                source.code.len() - 'は'.len_utf8(),
                ParseError::LexError(LexError::with_cause(
                    "Non ascii identifiers are currently not supported"
                ))
            )),
            ident
        );

        assert_eq!(None, lexer.scan_token());
    }

    #[test]
    fn test_scan_illegal_char_should_return_some_err() {
        let source = Source::new("main", "x `");
        let lexer = Lexer::new(&source);

        let tokens: Vec<Scanned> = lexer.skip(1).collect();

        if let Some(Err(Spanned { node: err, span })) = tokens.get(0) {
            assert_eq!("Failed to lex token", err.to_string());
            assert_eq!(Span::new(2, 2), *span);
        } else {
            panic!("Token should be some error");
        }
    }

    #[test]
    fn test_scan_number_followed_by_letters_should_return_error() {
        let source = Source::new("main", "my_var1 = 3x_2 + 1");
        let tokens: Vec<Scanned> = Lexer::new(&source).collect();

        assert_eq!(Ok(Spanned::new(0, 6, Token::Ident("my_var1"))), tokens[0]);
        assert_eq!(
            Err(Spanned::new(
                10,
                13,
                ParseError::LexError(LexError::with_cause(
                    "Identifiers must not start with a digit"
                ))
            )),
            tokens[2]
        );
        assert_eq!(Ok(Spanned::new(15, 15, Token::Plus)), tokens[3]);
        assert_eq!(5, tokens.len());
    }

    #[test]
    fn test_scan_number_in_multiple_parens() {
        let source = Source::new("main", "(((42)))");
        let lexer = Lexer::new(&source);

        let tokens: Vec<Token> = lexer.map(|e| e.unwrap().node).collect();
        let expected = vec![
            Token::LParen,
            Token::LParen,
            Token::LParen,
            Token::IntLit("42"),
            Token::RParen,
            Token::RParen,
            Token::RParen,
        ];

        assert_eq!(expected, tokens);
    }
}
