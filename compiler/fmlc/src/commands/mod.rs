//! The `fml` subcommands. Each returns the process exit code.

mod compile;
mod eval;
mod explain;
mod tokens;

pub use compile::compile_formula;
pub use eval::eval_formula;
pub use explain::explain_error;
pub use tokens::tokens_formula;

use std::io::IsTerminal;

use fml_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use fml_diagnostic::Diagnostic;
use fml_eval::{Engine, TypeRegistry};

use crate::args::Invocation;

fn emit_diagnostics<'a>(source: &str, diagnostics: impl IntoIterator<Item = &'a Diagnostic>) {
    let stderr = std::io::stderr();
    let is_tty = stderr.is_terminal();
    let mut emitter =
        TerminalEmitter::with_color_mode(stderr, ColorMode::Auto, is_tty).with_source(source);
    for diag in diagnostics {
        emitter.emit(diag);
    }
    emitter.flush();
}

fn engine_for(invocation: &Invocation) -> Engine {
    Engine::builder()
        .registry(TypeRegistry::with_builtins())
        .config(invocation.config.clone())
        .build()
}
