use super::token::Token;
use std::{error, fmt};

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum ParseError<'src> {
    LexError(LexError),
    PrefixError(String),
    InfixError(String),
    ConsumeError {
        actual: Token<'src>,
        expected: Token<'src>,
    },
    /// an expression line that is followed by further lines
    ExpectedDecl,
    /// the program ends without a trailing expression
    MissingExpr,
}

impl<'src> fmt::Display for ParseError<'src> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::LexError(err) => write!(f, "{}", err.as_string()),
            ParseError::PrefixError(err) => write!(f, "{}", err),
            ParseError::InfixError(err) => write!(f, "{}", err),
            ParseError::ConsumeError { expected, actual } => {
                write!(f, "Expected '{}', but got '{}'", expected, actual)
            }
            ParseError::ExpectedDecl => write!(
                f,
                "Only the last line may be an expression, expected 'name = expression'"
            ),
            ParseError::MissingExpr => {
                write!(f, "Expected an expression after the declarations")
            }
        }
    }
}

impl<'src> error::Error for ParseError<'src> {}

#[derive(Default, Eq, PartialEq, Clone)]
pub struct LexError {
    cause: Option<String>,
}

impl LexError {
    pub fn with_cause(cause: &str) -> Self {
        LexError {
            cause: Some(cause.to_owned()),
        }
    }

    fn as_string(&self) -> String {
        let msg = "Failed to lex token";

        if let Some(ref reason) = self.cause {
            format!("{}, because: {}", msg, reason)
        } else {
            msg.to_string()
        }
    }
}

impl fmt::Debug for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl error::Error for LexError {}
