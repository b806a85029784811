//! Prints the JSON tokens of a file, or of stdin when no path is given.
//!
//! Usage: `json-lexer [FILE]`. Set `RUST_LOG=debug` to trace the lexer.

use common_framework::Position;
use lexer_example::json::{self, Json};
use lexer_example::init_tracing;
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

    let tokens = match json::tokenize(input.clone()) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    for token in &tokens {
        if token.ty == Json::Whitespace {
            continue;
        }
        let position = Position::locate(&input, token.offset);
        println!("{position}: {token}");
        failed |= token.ty == Json::Error;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
