//! Literal constants embedded in compiled programs.
//!
//! Literals are plain data (no host handles), so compiled programs are
//! `Send + Sync` and can live in a shared cache.

use std::fmt;
use std::sync::Arc;

use crate::TypeTag;

/// A constant produced by the lexer.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
}

impl Literal {
    /// The runtime type this literal evaluates to.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Literal::Null => TypeTag::Null,
            Literal::Bool(_) => TypeTag::Bool,
            Literal::Int(_) => TypeTag::Int,
            Literal::Float(_) => TypeTag::Float,
            Literal::Str(_) => TypeTag::Str,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Float(x) => write!(f, "{x:?}"),
            Literal::Str(s) => write!(f, "\"{s}\""),
        }
    }
}
