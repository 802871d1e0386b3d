//! Fml IR - intermediate representation types for the formula evaluator.
//!
//! This crate holds the data shared by every phase:
//! - Spans and names
//! - The operator table with its precedence classes
//! - Literals and runtime type tags
//! - Tokens and `TokenList` for lexer output
//! - The flat expression arena built by the parser
//! - Compiled postfix programs run by the evaluator
//!
//! Nothing here owns host state, so everything is `Send + Sync` and can sit
//! in the shared formula cache.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod literal;
mod name;
mod operators;
pub mod program;
mod span;
mod token;
mod type_tag;

pub use ast::{Expr, ExprArena, ExprId, ExprKind, TypeArg};
pub use literal::Literal;
pub use name::Name;
pub use operators::OperationType;
pub use program::{AccessKind, AccessorCall, Assignment, Instr, Place, Program, TernaryCall};
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
pub use type_tag::TypeTag;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::ExprId;
    crate::static_assert_size!(ExprId, 4);
}
