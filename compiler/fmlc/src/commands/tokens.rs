//! The `tokens` command.

use std::process::ExitCode;

use super::emit_diagnostics;

pub fn tokens_formula(formula: &str) -> ExitCode {
    let mut errors = Vec::new();
    for (index, (span, tokens)) in fml_lexer::lex(formula).into_iter().enumerate() {
        println!("statement {index}: `{}`", span.slice(formula));
        match tokens {
            Ok(tokens) => {
                for token in tokens.iter() {
                    println!("  {token:?}");
                }
            }
            Err(err) => {
                println!("  error[{}]", err.code());
                errors.push(err.to_diagnostic());
            }
        }
    }
    emit_diagnostics(formula, &errors);
    ExitCode::SUCCESS
}
