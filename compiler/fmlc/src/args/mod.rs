//! Command-line argument parsing.
//!
//! Hand-rolled like the rest of the driver: the grammar is small and every
//! positional after the formula is a binding.

use fml_eval::{convert_to, Bindings, EngineConfig, TypeRegistry, Value, Variable};

/// Bad command line. Reported with the usage text and exit code 1.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("expected `fml {0}`")]
    Arity(&'static str),
    #[error("missing formula")]
    MissingFormula,
    #[error("unknown option `{0}`")]
    UnknownFlag(String),
    #[error("option `{0}` needs a value")]
    MissingFlagValue(&'static str),
    #[error("option `{flag}` expects a number, found `{value}`")]
    InvalidNumber { flag: &'static str, value: String },
    #[error("binding `{0}` is not of the form name=value or name:type=value")]
    MalformedBinding(String),
    #[error("`{0}` is not a valid binding name")]
    InvalidName(String),
    #[error("unknown type `{ty}` for binding `{name}`")]
    UnknownType { name: String, ty: String },
    #[error("binding `{name}`: {message}")]
    Conversion { name: String, message: String },
}

/// One `name[:type]=value` argument, not yet resolved against a registry.
#[derive(Clone, Debug, PartialEq)]
pub struct BindingArg {
    pub name: String,
    pub ty: Option<String>,
    pub value: Value,
}

impl BindingArg {
    pub fn parse(text: &str) -> Result<Self, UsageError> {
        let (lhs, raw) = text
            .split_once('=')
            .ok_or_else(|| UsageError::MalformedBinding(text.to_string()))?;
        let (name, ty) = match lhs.split_once(':') {
            Some((name, ty)) => (name.trim(), Some(ty.trim().to_string())),
            None => (lhs.trim(), None),
        };
        if !is_identifier(name) {
            return Err(UsageError::InvalidName(name.to_string()));
        }
        Ok(BindingArg {
            name: name.to_string(),
            ty,
            value: parse_value(raw),
        })
    }

    /// Build the variable, converting to the declared type if there is one.
    pub fn to_variable(&self, registry: &TypeRegistry) -> Result<Variable, UsageError> {
        let Some(ty) = &self.ty else {
            return Ok(Variable::infer(&self.name, self.value.clone()));
        };
        let tag = registry
            .resolve_type(ty)
            .ok_or_else(|| UsageError::UnknownType {
                name: self.name.clone(),
                ty: ty.clone(),
            })?;
        let value =
            convert_to(self.value.clone(), &tag, registry).map_err(|err| UsageError::Conversion {
                name: self.name.clone(),
                message: err.to_string(),
            })?;
        Ok(Variable::new(&self.name, tag, value))
    }
}

/// Parsed arguments of `eval` and `compile`.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    pub formula: String,
    pub uid: String,
    pub bindings: Vec<BindingArg>,
    pub config: EngineConfig,
}

impl Invocation {
    pub fn bindings(&self, registry: &TypeRegistry) -> Result<Bindings, UsageError> {
        self.bindings
            .iter()
            .map(|arg| arg.to_variable(registry))
            .collect()
    }
}

/// Parse everything after the subcommand.
///
/// Only the known `--` options are flags. Anything else starting with `--`
/// is rejected; a single leading `-` is left alone so `fml eval -3+2` works.
pub fn parse_invocation(args: &[String]) -> Result<Invocation, UsageError> {
    let mut formula = None;
    let mut uid = "cli".to_string();
    let mut bindings = Vec::new();
    let mut config = EngineConfig::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--no-cache" => config.cache_enabled = false,
            "--uid" => {
                uid = iter
                    .next()
                    .ok_or(UsageError::MissingFlagValue("--uid"))?
                    .clone();
            }
            "--max-hops" => {
                let value = iter
                    .next()
                    .ok_or(UsageError::MissingFlagValue("--max-hops"))?;
                config.max_chain_hops =
                    value.parse().map_err(|_| UsageError::InvalidNumber {
                        flag: "--max-hops",
                        value: value.clone(),
                    })?;
            }
            flag if flag.starts_with("--") => {
                return Err(UsageError::UnknownFlag(flag.to_string()));
            }
            _ if formula.is_none() => formula = Some(arg.clone()),
            binding => bindings.push(BindingArg::parse(binding)?),
        }
    }

    Ok(Invocation {
        formula: formula.ok_or(UsageError::MissingFormula)?,
        uid,
        bindings,
        config,
    })
}

/// Interpret a binding value.
///
/// `null`, `true`, `false`, integers, floats and `[a, b]` lists are
/// recognised; quotes force a string; anything else is a string as written.
pub fn parse_value(raw: &str) -> Value {
    let text = raw.trim();
    match text {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Some(inner) = strip_quotes(text) {
        return Value::from(inner);
    }
    if let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        let items = if inner.trim().is_empty() {
            Vec::new()
        } else {
            inner.split(',').map(parse_value).collect()
        };
        return Value::list(items);
    }
    if looks_numeric(text) {
        if let Ok(n) = text.parse::<i64>() {
            return Value::Int(n);
        }
        if let Ok(f) = text.parse::<f64>() {
            return Value::Float(f);
        }
    }
    Value::from(text)
}

fn strip_quotes(text: &str) -> Option<&str> {
    ['"', '\'']
        .into_iter()
        .find_map(|q| text.strip_prefix(q).and_then(|t| t.strip_suffix(q)))
}

// Keeps `inf` and `NaN` as strings; `str::parse::<f64>` would take them.
fn looks_numeric(text: &str) -> bool {
    let digits = text.trim_start_matches(['-', '+']);
    digits.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && digits.chars().any(|c| c.is_ascii_digit())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests;
