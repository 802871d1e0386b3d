//! Parser and compiler tests.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

mod compile;
mod grammar;

use fml_ir::{Name, Span, TypeTag};

use crate::{parse_statement, NameResolver, ParseOptions};

/// A fixed set of bindings and types.
pub(crate) struct TestScope {
    pub vars: Vec<&'static str>,
    pub types: Vec<&'static str>,
}

impl TestScope {
    pub fn new(vars: &[&'static str], types: &[&'static str]) -> Self {
        TestScope {
            vars: vars.to_vec(),
            types: types.to_vec(),
        }
    }
}

impl NameResolver for TestScope {
    fn is_variable(&self, name: &str) -> bool {
        self.vars.contains(&name)
    }

    fn resolve_type(&self, name: &str) -> Option<TypeTag> {
        TypeTag::primitive(name).or_else(|| {
            self.types
                .contains(&name)
                .then(|| TypeTag::Object(Name::new(name)))
        })
    }
}

/// Parse a single statement and render its grouping.
pub(crate) fn render(source: &str) -> String {
    let parsed = parse_statement(
        source,
        Span::from_range(0..source.len()),
        &ParseOptions::default(),
    )
    .unwrap();
    parsed.arena.render(parsed.root)
}

/// Parse a single statement that must fail; return its error code.
pub(crate) fn parse_error_code(source: &str, options: &ParseOptions) -> String {
    parse_statement(source, Span::from_range(0..source.len()), options)
        .unwrap_err()
        .code
        .to_string()
}
