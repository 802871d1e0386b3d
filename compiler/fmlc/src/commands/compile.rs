//! The `compile` command.

use std::process::ExitCode;

use super::{emit_diagnostics, engine_for};
use crate::args::Invocation;

/// Print each statement's postfix program, or its diagnostic.
///
/// Bindings only matter for name resolution; their values are not used.
pub fn compile_formula(invocation: &Invocation) -> ExitCode {
    let engine = engine_for(invocation);
    let bindings = match invocation.bindings(engine.registry()) {
        Ok(bindings) => bindings,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let compiled = engine.compile(&invocation.uid, &invocation.formula, &bindings);
    for (index, statement) in compiled.statements().iter().enumerate() {
        println!("statement {index}: `{}`", compiled.statement_text(statement));
        match &statement.outcome {
            Ok(program) => println!("  {program}"),
            Err(diag) => println!("  error[{}]: {}", diag.code, diag.message),
        }
    }
    emit_diagnostics(&invocation.formula, compiled.diagnostics());
    ExitCode::SUCCESS
}
