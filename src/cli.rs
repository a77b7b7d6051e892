use std::{
    cmp,
    io::{self, Write},
};

use super::{parse::ast::*, printer::FormatError, Source, Span};

use ansi_term::Colour::Red;
use unicode_width::UnicodeWidthStr;

pub fn print_error<W: Write>(msg: &str, writer: &mut W) -> io::Result<()> {
    writer.write_all(msg.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn report_errors<W: Write>(source: &Source, prg: &Program, writer: &mut W) -> io::Result<()> {
    for (span, msg) in find_errors(prg) {
        print_error(&format_error(source, span, span, &msg), writer)?;
    }

    Ok(())
}

pub fn report_format_error<W: Write>(
    source: &Source,
    err: &FormatError,
    writer: &mut W,
) -> io::Result<()> {
    let msg = match err.span() {
        Some(span) => format_error(source, span, span, &err.to_string()),
        None => format!("error: {}", err),
    };
    print_error(&msg, writer)
}

// the parser recovers line by line, so error nodes only appear at the top
fn find_errors(prg: &Program) -> Vec<(Span, String)> {
    prg.decls
        .iter()
        .map(|decl| &decl.value)
        .chain(Some(&prg.expr))
        .filter_map(|value| match value.node {
            Expr::Error(ref err) => Some((value.span, err.to_string())),
            _ => None,
        })
        .collect()
}

pub fn format_error(source: &Source, expr_span: Span, err_tok_span: Span, msg: &str) -> String {
    let (line_nr, index) = find_line_index(source, err_tok_span.start);

    format!(
        "error: {}\n--> {}:{}:{}\n{}",
        msg,
        source.name,
        line_nr,
        index,
        err_to_string(source, expr_span, err_tok_span, line_nr)
    )
}

pub fn find_line_index(source: &Source, start: usize) -> (usize, usize) {
    let slice = &source.code[..start];

    let line_nr = slice.chars().filter(|c| *c == '\n').count() + 1;
    let index = slice.chars().rev().take_while(|c| *c != '\n').count() + 1;

    (line_nr, index)
}

fn find_dist(source: &Source, start: usize) -> usize {
    let slice = &source.code[..start];

    UnicodeWidthStr::width(
        slice
            .chars()
            .rev()
            .take_while(|c| *c != '\n')
            .collect::<String>()
            .as_str(),
    )
}

// display width of the chars in the inclusive span, at least one column
fn find_width(source: &Source, span: Span) -> usize {
    let text = source.code[span.start..]
        .char_indices()
        .take_while(|(i, _)| span.start + i <= span.end)
        .map(|(_, c)| c)
        .collect::<String>();

    cmp::max(UnicodeWidthStr::width(text.as_str()), 1)
}

pub fn err_to_string(
    source: &Source,
    expr_span: Span,
    err_tok_span: Span,
    line_nr: usize,
) -> String {
    let (start_line, _) = find_line_index(source, expr_span.start);
    let (end_line, _) = find_line_index(source, expr_span.end);

    let start_line = start_line - 1;

    // the number of digits in the number displayed as string
    let len_line_nr = line_nr.to_string().len();
    let filler = " ".repeat(len_line_nr + 1);

    let len = find_width(source, err_tok_span);
    let dist = find_dist(source, err_tok_span.start);

    let marker = Red.paint(format!("{}{}", " ".repeat(dist), "^".repeat(len)));

    // split instead of lines, so a span at the very end still gets a line
    let lines: Vec<String> = source
        .code
        .split('\n')
        .map(|l| l.trim_end_matches('\r'))
        .enumerate()
        .skip(start_line)
        .take(end_line - start_line)
        .map(|(nr, l)| {
            if nr + 1 == line_nr {
                format!("{}|\n{} |{}\n{}|{}", filler, line_nr, l, filler, marker)
            } else {
                format!("{}|{}", filler, l)
            }
        })
        .collect();

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_line_index() {
        let source = Source::new("main", "n = 1\nm = n +\nm");

        assert_eq!((1, 1), find_line_index(&source, 0));
        assert_eq!((2, 1), find_line_index(&source, 6));
        assert_eq!((2, 7), find_line_index(&source, 12));
        assert_eq!((3, 2), find_line_index(&source, source.code.len()));
    }

    #[test]
    fn test_wide_chars_move_the_marker() {
        let source = Source::new("main", "こん = `");

        assert_eq!(7, find_dist(&source, source.code.len() - 1));
        assert_eq!(4, find_width(&source, Span::new(0, 3)));
    }

    #[test]
    fn test_format_error_points_at_token() {
        let source = Source::new("test", "n = 1\nm = n +* 2\nm");

        let msg = format_error(&source, Span::new(13, 13), Span::new(13, 13), "oops");
        assert_eq!(
            "error: oops\n--> test:2:8\n  |\n2 |m = n +* 2\n  |\u{1b}[31m       ^\u{1b}[0m",
            msg
        );
    }

    #[test]
    fn test_format_error_at_end_of_file() {
        let source = Source::new("test", "n = 1\n");

        let msg = format_error(&source, Span::new(6, 6), Span::new(6, 6), "eof");
        assert_eq!(
            "error: eof\n--> test:2:1\n  |\n2 |\n  |\u{1b}[31m^\u{1b}[0m",
            msg
        );
    }
}
