//! Types every registry built with
//! [`TypeRegistry::with_builtins`](super::TypeRegistry::with_builtins)
//! carries.

mod convert;
mod list;
mod math;
mod primitives;
mod string;

use super::TypeRegistry;

pub(super) fn register_all(registry: &mut TypeRegistry) {
    registry.register(string::string_type());
    for ty in primitives::primitive_types() {
        registry.register(ty);
    }
    registry.register(list::list_type());
    registry.register(math::math_type());
    registry.register(convert::convert_type());
}

/// Length or index as a formula int.
fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// A formula int as an index below `len`.
fn index(i: i64, len: usize) -> Option<usize> {
    usize::try_from(i).ok().filter(|&i| i < len)
}
