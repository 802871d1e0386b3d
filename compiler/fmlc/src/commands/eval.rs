//! The `eval` command.

use std::process::ExitCode;

use super::{emit_diagnostics, engine_for};
use crate::args::Invocation;

/// Evaluate the formula and print one result per statement.
///
/// Soft failures print `null` and a diagnostic on stderr. A runtime error
/// stops the run and fails the process.
pub fn eval_formula(invocation: &Invocation) -> ExitCode {
    let engine = engine_for(invocation);
    let mut bindings = match invocation.bindings(engine.registry()) {
        Ok(bindings) => bindings,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match engine.evaluate_detailed(&invocation.uid, &invocation.formula, &mut bindings) {
        Ok(evaluation) => {
            emit_diagnostics(&invocation.formula, &evaluation.diagnostics);
            for value in &evaluation.results {
                println!("{value}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            emit_diagnostics(&invocation.formula, [&err.to_diagnostic()]);
            ExitCode::FAILURE
        }
    }
}
