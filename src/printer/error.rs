use std::{error, fmt, io};

use crate::Span;

/// Why a tree could not be printed. Any of these aborts the whole print pass.
#[derive(Debug)]
pub enum FormatError {
    /// A node kind the printer has no rendering for, e.g. a parse error node.
    UnrecognizedNode { node: String, span: Span },
    /// An arithmetic or comparison node tagged with an operator outside its set.
    UnrecognizedOperator {
        op: String,
        expr: String,
        span: Span,
    },
    Io(io::Error),
}

impl FormatError {
    /// Location of the offending node, if the error came from the tree.
    pub fn span(&self) -> Option<Span> {
        match self {
            FormatError::UnrecognizedNode { span, .. }
            | FormatError::UnrecognizedOperator { span, .. } => Some(*span),
            FormatError::Io(_) => None,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatError::UnrecognizedNode { node, .. } => {
                write!(f, "unknown expression: {}", node)
            }
            FormatError::UnrecognizedOperator { op, expr, .. } => {
                write!(f, "unknown operator: {} (in {})", op, expr)
            }
            FormatError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for FormatError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            FormatError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for FormatError {
    fn from(err: io::Error) -> Self {
        FormatError::Io(err)
    }
}
