//! Conversion of values to a target type.
//!
//! Used when a value is stored into a binding (declared type) or a member
//! (the member's current runtime type), and by `Convert`.
//!
//! | target   | accepted sources                                          |
//! |----------|-----------------------------------------------------------|
//! | `int`    | float (banker's rounding), bool (0/1), numeric string, enum ordinal |
//! | `float`  | int, bool, numeric string                                 |
//! | `bool`   | int/float (nonzero), `"true"`/`"false"` (any case)        |
//! | `string` | anything (display form)                                   |
//! | enum     | variant-name string, ordinal                              |
//! | object   | an object of the same type                                |
//!
//! `null` is stored as-is whatever the target. A `null` target accepts
//! anything unchanged.

use std::sync::Arc;

use fml_ir::TypeTag;

use crate::errors::{conversion_failed, unknown_variant, EvalResult};
use crate::{TypeRegistry, Value};

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "range is checked before the cast"
)]
fn float_to_int(x: f64) -> Option<i64> {
    let rounded = x.round_ties_even();
    // i64::MAX as f64 rounds up to 2^63, which is out of range.
    (rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64)
        .then_some(rounded as i64)
}

pub fn convert_to(value: Value, target: &TypeTag, registry: &TypeRegistry) -> EvalResult {
    if value.is_null() || *target == TypeTag::Null || value.type_tag() == *target {
        return Ok(value);
    }
    let fail = |value: &Value| conversion_failed(&value.describe(), target.name());

    match target {
        TypeTag::Int => match &value {
            Value::Float(x) => float_to_int(*x).map(Value::Int).ok_or_else(|| fail(&value)),
            Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
            Value::Str(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| fail(&value)),
            Value::Enum(e) => Ok(Value::Int(e.ordinal)),
            _ => Err(fail(&value)),
        },
        TypeTag::Float => match &value {
            Value::Int(_) => value.as_float().map(Value::Float).ok_or_else(|| fail(&value)),
            Value::Bool(b) => Ok(Value::Float(f64::from(u8::from(*b)))),
            Value::Str(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| fail(&value)),
            _ => Err(fail(&value)),
        },
        TypeTag::Bool => match &value {
            Value::Int(n) => Ok(Value::Bool(*n != 0)),
            Value::Float(x) => Ok(Value::Bool(*x != 0.0)),
            Value::Str(s) if s.trim().eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
            Value::Str(s) if s.trim().eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
            _ => Err(fail(&value)),
        },
        TypeTag::Str => Ok(Value::Str(Arc::from(value.to_string()))),
        TypeTag::Enum(enum_name) => match &value {
            Value::Str(s) => registry
                .enum_variant(enum_name.as_str(), s.trim())
                .map(Value::Enum),
            Value::Int(n) => registry
                .for_tag(target)?
                .variant_at(*n)
                .map(Value::Enum)
                .ok_or_else(|| unknown_variant(enum_name.as_str(), &n.to_string())),
            _ => Err(fail(&value)),
        },
        TypeTag::Object(_) | TypeTag::Null => Err(fail(&value)),
    }
}
