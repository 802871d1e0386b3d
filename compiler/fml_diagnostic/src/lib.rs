//! Diagnostic system for formula errors.
//!
//! Every failure a formula can produce carries:
//! - an error code for searchability (`fml explain E1001`)
//! - a category that decides whether the failure is soft (the statement
//!   yields `null`) or hard (the evaluate call fails)
//! - a message and labelled spans into the formula text

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::{ErrorCategory, ErrorCode};
pub use errors::ErrorDocs;
