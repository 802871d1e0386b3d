//! The `fml` command-line driver.

use std::process::ExitCode;

use fmlc::args::{parse_invocation, UsageError};
use fmlc::commands::{compile_formula, eval_formula, explain_error, tokens_formula};

fn main() -> ExitCode {
    fmlc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        print_usage();
        return ExitCode::SUCCESS;
    };

    let outcome = match command.as_str() {
        "eval" => parse_invocation(rest).map(|inv| eval_formula(&inv)),
        "compile" => parse_invocation(rest).map(|inv| compile_formula(&inv)),
        "tokens" => match rest {
            [formula] => Ok(tokens_formula(formula)),
            _ => Err(UsageError::Arity("tokens <formula>")),
        },
        "explain" => match rest {
            [code] => Ok(explain_error(code)),
            _ => Err(UsageError::Arity("explain <code>")),
        },
        "help" | "--help" | "-h" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        other => Err(UsageError::UnknownCommand(other.to_string())),
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("Usage: fml <command> [arguments]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  eval <formula> [name=value ...]     Evaluate and print one result per statement");
    eprintln!("  compile <formula> [name=value ...]  Print the compiled program of each statement");
    eprintln!("  tokens <formula>                    Print the token stream of each statement");
    eprintln!("  explain <code>                      Describe an error code (e.g. E2001)");
    eprintln!();
    eprintln!("Options (eval, compile):");
    eprintln!("  --uid <id>        Call-site identity used as part of the cache key");
    eprintln!("  --no-cache        Compile on every call");
    eprintln!("  --max-hops <n>    Longest accepted member chain (default 100)");
    eprintln!();
    eprintln!("Bindings:");
    eprintln!("  x=3  r=2.5  ok=true  s=text  s='42'  v=null  xs=[1, 2, 3]");
    eprintln!("  name:type=value declares the type, e.g. n:float=3 or m:Mode=Run");
    eprintln!();
    eprintln!("Logging: RUST_LOG=fml_eval=debug, add FML_LOG_TREE=1 for a span tree.");
}
