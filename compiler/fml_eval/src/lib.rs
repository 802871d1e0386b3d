//! Formula evaluation.
//!
//! The [`Engine`] ties the pieces together: formulas are compiled by
//! `fml_parse`, cached per call site in a [`FormulaCache`], and run by the
//! [`Interpreter`] against caller-supplied [`Bindings`]. Member access goes
//! through the [`TypeRegistry`], the allow-list of host types.
//!
//! ```ignore
//! let engine = Engine::new();
//! let mut bindings = Bindings::new().with("x", 2_i64);
//! let results = engine.evaluate("site-1", "x += 5; x * 2", &mut bindings)?;
//! assert_eq!(results, vec![Value::Int(7), Value::Int(14)]);
//! ```

mod bindings;
mod cache;
mod convert;
mod engine;
pub mod errors;
mod interpreter;
mod operators;
pub mod registry;
mod value;

#[cfg(test)]
mod test_support;

pub use bindings::{BackingStore, BindingSignature, Bindings, Variable};
pub use cache::{CacheKey, CacheStats, FormulaCache};
pub use convert::convert_to;
pub use engine::{CompileScope, Engine, EngineBuilder, EngineConfig, Evaluation};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::Interpreter;
pub use operators::{evaluate_binary, values_equal};
pub use registry::{
    CallArgs, EnumType, FromValue, HostType, IntoValue, ParamType, TypeDef, TypeRegistry,
};
pub use value::{EnumValue, ObjectRef, Value, LIST_TYPE};

// Re-exported so hosts can name types and read diagnostics without extra
// dependencies.
pub use fml_diagnostic::{Diagnostic, ErrorCategory, ErrorCode};
pub use fml_ir::{Name, TypeTag};
pub use fml_parse::CompiledFormula;
