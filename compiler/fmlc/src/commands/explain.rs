//! The `explain` command: long-form documentation for an error code.

use std::process::ExitCode;

use fml_diagnostic::{ErrorCode, ErrorDocs};

pub fn explain_error(code_str: &str) -> ExitCode {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX where X is a digit.");
        eprintln!("Examples: E0001, E1001, E2001, E6001");
        return ExitCode::FAILURE;
    };

    match ErrorDocs::get(code) {
        Some(doc) => {
            println!("{doc}");
            println!("Category: {}", code.category().as_str());
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("No documentation available for {code}: {}", code.summary());
            ExitCode::FAILURE
        }
    }
}
