use clap::{App, Arg, ArgMatches};
use std::{
    io::{self, BufWriter, Write},
    process,
};

use elfmt::{format_file, print_error, FmtError, AUTHOR, DESCRIPTION, NAME, VERSION};

fn main() {
    let args = parse_args();
    let file_name = args
        .value_of("source-file")
        .expect("clap enforces the source file argument");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let stderr = io::stderr();
    let mut err_writer = stderr.lock();

    let result = format_file(file_name, &mut out, &mut err_writer)
        .and_then(|()| out.flush().map_err(FmtError::from));

    if let Err(err) = result {
        let _ = print_error(&format!("{}: {}", NAME, err), &mut err_writer);
        process::exit(1);
    }
}

pub fn parse_args<'a>() -> ArgMatches<'a> {
    App::new(NAME)
        .version(VERSION)
        .author(AUTHOR)
        .about(DESCRIPTION)
        .arg(
            Arg::with_name("source-file")
                .help("the source file to format")
                .required(true),
        )
        .get_matches()
}
