//! The evaluation entry point.
//!
//! An [`Engine`] owns the host type registry, the configuration and the
//! formula cache. It can be shared across threads; each call borrows its
//! bindings for the duration of the call only.
//!
//! Failures are split by category. Parse, lookup and type errors are soft:
//! they are logged, recorded as diagnostics and the statement yields `null`
//! while its siblings still run. Runtime and internal errors abort the call.

use std::sync::Arc;

use fml_diagnostic::Diagnostic;
use fml_parse::{compile, CompiledFormula, NameResolver, ParseOptions};
use fml_ir::TypeTag;
use fml_stack::{IterationGuard, DEFAULT_MAX_CHAIN_HOPS, DEFAULT_MAX_LOOP_ITERATIONS};

use crate::cache::{CacheKey, CacheStats, FormulaCache};
use crate::errors::{assertion_failed, loop_limit_exceeded, non_boolean_condition, EvalResult};
use crate::interpreter::Interpreter;
use crate::{Bindings, TypeRegistry, Value};

/// Engine limits and switches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum `.` hops in one member chain.
    pub max_chain_hops: usize,
    /// Maximum iterations of [`Engine::run_while`].
    pub max_loop_iterations: usize,
    /// Compile every call afresh when false.
    pub cache_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_chain_hops: DEFAULT_MAX_CHAIN_HOPS,
            max_loop_iterations: DEFAULT_MAX_LOOP_ITERATIONS,
            cache_enabled: true,
        }
    }
}

/// Resolves identifiers against a binding list and a registry.
///
/// Bindings shadow type names.
pub struct CompileScope<'a> {
    bindings: &'a Bindings,
    registry: &'a TypeRegistry,
}

impl<'a> CompileScope<'a> {
    pub fn new(bindings: &'a Bindings, registry: &'a TypeRegistry) -> Self {
        CompileScope { bindings, registry }
    }
}

impl NameResolver for CompileScope<'_> {
    fn is_variable(&self, name: &str) -> bool {
        self.bindings.contains(name)
    }

    fn resolve_type(&self, name: &str) -> Option<TypeTag> {
        self.registry.resolve_type(name)
    }
}

/// Results of one call plus the diagnostics of statements that yielded
/// `null` because of a soft failure.
#[derive(Clone, Debug, Default)]
pub struct Evaluation {
    pub results: Vec<Value>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Evaluation {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Default)]
pub struct EngineBuilder {
    registry: Option<TypeRegistry>,
    config: EngineConfig,
}

impl EngineBuilder {
    /// Host types formulas may use. Defaults to
    /// [`TypeRegistry::with_builtins`].
    #[must_use]
    pub fn registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            registry: self.registry.unwrap_or_else(TypeRegistry::with_builtins),
            parse_options: ParseOptions {
                max_chain_hops: self.config.max_chain_hops,
            },
            config: self.config,
            cache: FormulaCache::new(),
        }
    }
}

pub struct Engine {
    registry: TypeRegistry,
    config: EngineConfig,
    parse_options: ParseOptions,
    cache: FormulaCache,
}

impl Default for Engine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Engine {
    /// An engine with the built-in types and default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The compiled form of `formula` for the names in `bindings`.
    pub fn compile(&self, uid: &str, formula: &str, bindings: &Bindings) -> Arc<CompiledFormula> {
        let build = || {
            compile(
                formula,
                &CompileScope::new(bindings, &self.registry),
                &self.parse_options,
            )
        };
        if self.config.cache_enabled {
            self.cache
                .get_or_compile(CacheKey::new(uid, formula, bindings.signature()), build)
        } else {
            Arc::new(build())
        }
    }

    /// Evaluate every statement of `formula`; one value per statement.
    pub fn evaluate(
        &self,
        uid: &str,
        formula: &str,
        bindings: &mut Bindings,
    ) -> EvalResult<Vec<Value>> {
        self.evaluate_detailed(uid, formula, bindings)
            .map(|evaluation| evaluation.results)
    }

    #[tracing::instrument(level = "debug", skip(self, bindings), fields(bindings = bindings.len()))]
    pub fn evaluate_detailed(
        &self,
        uid: &str,
        formula: &str,
        bindings: &mut Bindings,
    ) -> EvalResult<Evaluation> {
        let compiled = self.compile(uid, formula, bindings);
        self.evaluate_compiled(&compiled, bindings)
    }

    /// Run an already compiled formula.
    pub fn evaluate_compiled(
        &self,
        compiled: &CompiledFormula,
        bindings: &mut Bindings,
    ) -> EvalResult<Evaluation> {
        let mut evaluation = Evaluation::default();
        for statement in compiled.statements() {
            let text = compiled.statement_text(statement);
            let program = match &statement.outcome {
                Ok(program) => program,
                Err(diag) => {
                    tracing::warn!(code = %diag.code, statement = text, "{}", diag.message);
                    evaluation.results.push(Value::Null);
                    evaluation.diagnostics.push(diag.clone());
                    continue;
                }
            };

            match Interpreter::new(&self.registry, bindings).run(program) {
                Ok(value) => evaluation.results.push(value),
                Err(err) if err.category().is_soft() => {
                    let err = err.in_statement(text);
                    tracing::warn!(code = %err.code(), statement = text, "{err}");
                    evaluation.results.push(Value::Null);
                    evaluation.diagnostics.push(err.to_diagnostic());
                }
                Err(err) => return Err(err.in_statement(text)),
            }
        }
        Ok(evaluation)
    }

    /// Fail unless every statement of `formula` yields `true`.
    pub fn check(&self, uid: &str, formula: &str, bindings: &mut Bindings) -> EvalResult<()> {
        let compiled = self.compile(uid, formula, bindings);
        let evaluation = self.evaluate_compiled(&compiled, bindings)?;
        for (statement, result) in compiled.statements().iter().zip(&evaluation.results) {
            if *result != Value::Bool(true) {
                let text = compiled.statement_text(statement);
                return Err(assertion_failed(text, &result.describe()).in_statement(text));
            }
        }
        Ok(())
    }

    /// Run `body` while `condition` yields `true`; returns the number of
    /// iterations. The condition's last statement decides.
    #[tracing::instrument(level = "debug", skip(self, bindings))]
    pub fn run_while(
        &self,
        uid: &str,
        condition: &str,
        body: &str,
        bindings: &mut Bindings,
    ) -> EvalResult<usize> {
        let mut guard = IterationGuard::new(self.config.max_loop_iterations);
        loop {
            let results = self.evaluate(uid, condition, bindings)?;
            match results.last() {
                Some(Value::Bool(true)) => {}
                Some(Value::Bool(false)) => return Ok(guard.count()),
                other => {
                    let found = other.map_or_else(|| "nothing".to_string(), Value::type_name);
                    return Err(non_boolean_condition(&found).in_statement(condition));
                }
            }
            guard
                .tick()
                .map_err(|exceeded| loop_limit_exceeded(exceeded.limit))?;
            self.evaluate(uid, body, bindings)?;
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests;
