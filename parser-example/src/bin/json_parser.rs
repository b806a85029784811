//! Parses a JSON document from a file, or from stdin when no path is given,
//! and prints it back in compact form.
//!
//! Usage: `json-parser [FILE]`. Set `RUST_LOG=debug` to trace the pipeline.

use common_framework::Position;
use lexer_example::init_tracing;
use parser_example::{parse_document, DocumentError};
use pipeline_core::PipelineError;
use std::io::{self, Read};
use std::process::ExitCode;
use std::{env, fs};

fn read_input() -> io::Result<Vec<u8>> {
    match env::args_os().nth(1) {
        Some(path) => fs::read(path),
        None => {
            let mut input = Vec::new();
            io::stdin().read_to_end(&mut input)?;
            Ok(input)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let input = match read_input() {
        Ok(input) => input,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match parse_document(input.clone()) {
        Ok(document) => {
            println!("{document}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let offset = match &err {
                DocumentError::Pipeline(PipelineError::Parse(parse)) => parse.offset(),
                _ => None,
            };
            match offset {
                Some(offset) => eprintln!("{}: error: {err}", Position::locate(&input, offset)),
                None => eprintln!("error: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}
