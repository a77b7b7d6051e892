use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Token<'input> {
    Ident(&'input str),
    IntLit(&'input str),

    // Keywords
    True,
    False,
    If,
    Then,
    Else,

    // Operators
    Equals,        // =
    EqualsEquals,  // ==
    SlashEquals,   // /=
    Smaller,       // <
    SmallerEquals, // <=
    Greater,       // >
    GreaterEquals, // >=
    Plus,          // +
    Minus,         // -
    Star,          // *
    Slash,         // /

    Backslash, // \
    Arrow,     // ->

    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]

    Newline,
}

#[repr(u8)]
#[derive(Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Debug)]
pub enum Precedence {
    None = 0,
    Compare = 1,
    Sum = 2,
    Product = 3,
    Apply = 4,
}

impl<'input> Token<'input> {
    pub fn precedence(&self) -> Precedence {
        match self {
            Token::EqualsEquals
            | Token::SlashEquals
            | Token::Smaller
            | Token::SmallerEquals
            | Token::Greater
            | Token::GreaterEquals => Precedence::Compare,
            Token::Plus | Token::Minus => Precedence::Sum,
            Token::Star | Token::Slash => Precedence::Product,
            _ if self.starts_atom() => Precedence::Apply,
            _ => Precedence::None,
        }
    }

    /// Tokens that can begin a function argument.
    pub fn starts_atom(&self) -> bool {
        match self {
            Token::Ident(_)
            | Token::IntLit(_)
            | Token::True
            | Token::False
            | Token::LParen
            | Token::LBracket => true,
            _ => false,
        }
    }
}

impl<'input> fmt::Display for Token<'input> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Ident(ref name) => write!(f, "{}", name),
            Token::IntLit(ref lit) => write!(f, "{}", lit),
            // Keywords
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::If => write!(f, "if"),
            Token::Then => write!(f, "then"),
            Token::Else => write!(f, "else"),
            // Operators
            Token::Equals => write!(f, "="),
            Token::EqualsEquals => write!(f, "=="),
            Token::SlashEquals => write!(f, "/="),
            Token::Smaller => write!(f, "<"),
            Token::SmallerEquals => write!(f, "<="),
            Token::Greater => write!(f, ">"),
            Token::GreaterEquals => write!(f, ">="),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),

            Token::Backslash => write!(f, "\\"),
            Token::Arrow => write!(f, "->"),

            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),

            Token::Newline => write!(f, "newline"),
        }
    }
}
