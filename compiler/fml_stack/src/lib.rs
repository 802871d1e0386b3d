//! Recursion and iteration bounds.
//!
//! Two kinds of runaway input are possible in a formula: deep nesting
//! (parentheses, nested ternaries, method arguments) and long or cyclic
//! repetition (member chains, host-level loops).
//!
//! - [`ensure_sufficient_stack`] grows the stack on demand around recursive
//!   parser, lowering and evaluator calls.
//! - [`IterationGuard`] counts steps and fails once a fixed limit is passed.
//!
//! On `wasm32` the stack helper is a passthrough.

use std::fmt;

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone, a new segment is allocated
/// before calling `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Default bound on `.` hops in one member chain.
pub const DEFAULT_MAX_CHAIN_HOPS: usize = 100;

/// Default bound on host-level loop iterations.
pub const DEFAULT_MAX_LOOP_ITERATIONS: usize = 1000;

/// A step counter with a hard limit.
///
/// `tick` succeeds `limit` times; the next call fails.
#[derive(Clone, Debug)]
pub struct IterationGuard {
    limit: usize,
    count: usize,
}

/// Returned by [`IterationGuard::tick`] once the limit is passed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LimitExceeded {
    pub limit: usize,
}

impl fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "limit of {} exceeded", self.limit)
    }
}

impl std::error::Error for LimitExceeded {}

impl IterationGuard {
    pub const fn new(limit: usize) -> Self {
        IterationGuard { limit, count: 0 }
    }

    /// Record one step.
    #[inline]
    pub fn tick(&mut self) -> Result<(), LimitExceeded> {
        if self.count >= self.limit {
            return Err(LimitExceeded { limit: self.limit });
        }
        self.count += 1;
        Ok(())
    }

    /// Steps recorded so far.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }
}
