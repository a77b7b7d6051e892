use std::{
    cmp, error, fmt, fs,
    io::{self, Write},
};

mod cli;
pub mod parse;
pub mod printer;

use self::parse::{ast::Program, lexer::Lexer, parser::Parser};

pub use self::{
    cli::{format_error, print_error},
    parse::{Span, Spanned},
    printer::{FormatError, Printer, Sink},
};
use self::cli::{report_errors, report_format_error};

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[derive(Debug)]
pub struct Source {
    pub name: String,
    pub code: String,
}

impl cmp::PartialEq for Source {
    fn eq(&self, other: &Source) -> bool {
        self.name == other.name
    }
}

impl cmp::Eq for Source {}

impl Source {
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.to_owned(),
            code: code.to_owned(),
        }
    }
}

/// A failed formatting run, labelled with the stage and file it failed in.
#[derive(Debug)]
pub enum FmtError {
    Read { file: String, err: io::Error },
    Parse { file: String, errors: usize },
    Format { file: String, err: FormatError },
    IO(io::Error),
}

impl fmt::Display for FmtError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use FmtError::*;

        match self {
            Read { file, err } => write!(f, "reading {}: {}", file, err),
            Parse { file, errors: 1 } => write!(f, "parsing {}: 1 syntax error", file),
            Parse { file, errors } => write!(f, "parsing {}: {} syntax errors", file, errors),
            Format { file, err } => write!(f, "formatting {}: {}", file, err),
            IO(err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for FmtError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            FmtError::Read { err, .. } | FmtError::IO(err) => Some(err),
            FmtError::Format { err, .. } => Some(err),
            FmtError::Parse { .. } => None,
        }
    }
}

impl From<io::Error> for FmtError {
    fn from(err: io::Error) -> Self {
        FmtError::IO(err)
    }
}

fn init_ansi() {
    #[cfg(windows)]
    {
        if let Err(code) = ansi_term::enable_ansi_support() {
            eprintln!(
                "Could not initialise windows ansi support. Error code: {}",
                code
            );
        }
    }
}

/// Parses `source`, returning the tree together with the number of syntax
/// errors. Lines with errors are `Expr::Error` nodes in the tree.
pub fn parse(source: &Source) -> (Program<'_>, usize) {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer);
    let prg = parser.parse();
    (prg, parser.err_count())
}

/// Formats `source` into `out`. Diagnostics for syntax errors or unprintable
/// nodes go to `err_writer`; in that case nothing is written to `out`.
/// `out` is not flushed.
pub fn format<W: Write, E: Write>(
    source: &Source,
    out: &mut W,
    err_writer: &mut E,
) -> Result<(), FmtError> {
    init_ansi();
    let (prg, err_count) = parse(source);

    if err_count != 0 {
        report_errors(source, &prg, err_writer)?;
        return Err(FmtError::Parse {
            file: source.name.clone(),
            errors: err_count,
        });
    }

    print_program(source, &prg, out, err_writer)
}

/// Prints an already parsed program of `source` into `out`. If the tree holds
/// a node the printer cannot render, the diagnostic goes to `err_writer` and
/// nothing is written to `out`.
pub fn print_program<W: Write, E: Write>(
    source: &Source,
    prg: &Program,
    out: &mut W,
    err_writer: &mut E,
) -> Result<(), FmtError> {
    let mut buf = Vec::new();
    if let Err(err) = Printer::new(&mut buf).program(prg) {
        report_format_error(source, &err, err_writer)?;
        return Err(FmtError::Format {
            file: source.name.clone(),
            err,
        });
    }

    out.write_all(&buf)?;
    Ok(())
}

pub fn format_file<W: Write, E: Write>(
    path: &str,
    out: &mut W,
    err_writer: &mut E,
) -> Result<(), FmtError> {
    let code = fs::read_to_string(path).map_err(|err| FmtError::Read {
        file: path.to_owned(),
        err,
    })?;

    let source = Source {
        name: path.to_owned(),
        code,
    };
    format(&source, out, err_writer)
}
