//! Binary operator implementations.
//!
//! Direct enum dispatch on the operand pair. The operand set is closed, so
//! exhaustive matching is preferred over per-type operator traits.
//!
//! Only `+ - * / %` coerce booleans to `0`/`1`; relational, logical and
//! bitwise operators see booleans as booleans.

use std::sync::Arc;

use fml_ir::OperationType;

use crate::errors::{
    division_by_zero, integer_overflow, internal, invalid_operands, modulo_by_zero,
    shift_out_of_range, EvalResult,
};
use crate::Value;

// Checked arithmetic helpers

#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

#[inline]
fn checked_div(is_zero: bool, op: impl FnOnce() -> Option<i64>, op_name: &'static str) -> EvalResult {
    if is_zero {
        Err(division_by_zero())
    } else {
        op().map(Value::Int).ok_or_else(|| integer_overflow(op_name))
    }
}

#[inline]
fn checked_mod(is_zero: bool, op: impl FnOnce() -> Option<i64>, op_name: &'static str) -> EvalResult {
    if is_zero {
        Err(modulo_by_zero())
    } else {
        op().map(Value::Int).ok_or_else(|| integer_overflow(op_name))
    }
}

fn shift_amount(b: i64) -> EvalResult<u32> {
    u32::try_from(b)
        .ok()
        .filter(|&n| n < 64)
        .ok_or_else(|| shift_out_of_range(b))
}

/// Booleans as `0`/`1` for arithmetic.
fn coerce(value: Value) -> Value {
    match value {
        Value::Bool(b) => Value::Int(i64::from(b)),
        other => other,
    }
}

#[cold]
fn mismatch(left: &Value, right: &Value, op: OperationType) -> crate::EvalError {
    invalid_operands(op, &left.type_name(), &right.type_name())
}

/// Evaluate `left op right`. Operands are popped off the value stack.
pub fn evaluate_binary(left: Value, right: Value, op: OperationType) -> EvalResult {
    let (left, right) = if op.coerces_booleans() {
        (coerce(left), coerce(right))
    } else {
        (left, right)
    };

    match op {
        OperationType::Equal => return Ok(Value::Bool(values_equal(&left, &right))),
        OperationType::NotEqual => return Ok(Value::Bool(!values_equal(&left, &right))),
        OperationType::Add if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) => {
            return Ok(Value::Str(Arc::from(format!("{left}{right}"))));
        }
        _ if !op.is_binary() => {
            return Err(internal(format!("`{op}` is not a binary operator")));
        }
        _ => {}
    }

    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        (Value::Int(_), Value::Float(b)) => match left.as_float() {
            Some(a) => eval_float_binary(a, *b, op),
            None => Err(mismatch(&left, &right, op)),
        },
        (Value::Float(a), Value::Int(_)) => match right.as_float() {
            Some(b) => eval_float_binary(*a, b, op),
            None => Err(mismatch(&left, &right, op)),
        },
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        _ => Err(mismatch(&left, &right, op)),
    }
}

fn eval_int_binary(a: i64, b: i64, op: OperationType) -> EvalResult {
    match op {
        OperationType::Add => checked_arith(a.checked_add(b), "addition"),
        OperationType::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        OperationType::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        OperationType::Div => checked_div(b == 0, || a.checked_div(b), "division"),
        OperationType::Mod => checked_mod(b == 0, || a.checked_rem(b), "remainder"),
        OperationType::Greater => Ok(Value::Bool(a > b)),
        OperationType::GreaterEqual => Ok(Value::Bool(a >= b)),
        OperationType::Less => Ok(Value::Bool(a < b)),
        OperationType::LessEqual => Ok(Value::Bool(a <= b)),
        OperationType::BitwiseAnd => Ok(Value::Int(a & b)),
        OperationType::BitwiseOr => Ok(Value::Int(a | b)),
        OperationType::Xor => Ok(Value::Int(a ^ b)),
        OperationType::ShiftLeft => Ok(Value::Int(a << shift_amount(b)?)),
        OperationType::ShiftRight => Ok(Value::Int(a >> shift_amount(b)?)),
        _ => Err(invalid_operands(op, "int", "int")),
    }
}

/// IEEE semantics: division by zero yields infinity or NaN.
fn eval_float_binary(a: f64, b: f64, op: OperationType) -> EvalResult {
    match op {
        OperationType::Add => Ok(Value::Float(a + b)),
        OperationType::Sub => Ok(Value::Float(a - b)),
        OperationType::Mul => Ok(Value::Float(a * b)),
        OperationType::Div => Ok(Value::Float(a / b)),
        OperationType::Mod => Ok(Value::Float(a % b)),
        OperationType::Greater => Ok(Value::Bool(a > b)),
        OperationType::GreaterEqual => Ok(Value::Bool(a >= b)),
        OperationType::Less => Ok(Value::Bool(a < b)),
        OperationType::LessEqual => Ok(Value::Bool(a <= b)),
        _ => Err(invalid_operands(op, "float", "float")),
    }
}

/// No short-circuit: both operands were already evaluated.
fn eval_bool_binary(a: bool, b: bool, op: OperationType) -> EvalResult {
    match op {
        OperationType::And | OperationType::BitwiseAnd => Ok(Value::Bool(a & b)),
        OperationType::Or | OperationType::BitwiseOr => Ok(Value::Bool(a | b)),
        OperationType::Xor => Ok(Value::Bool(a ^ b)),
        _ => Err(invalid_operands(op, "bool", "bool")),
    }
}

/// Formula equality.
///
/// Numbers compare across int and float, enums compare with the name of
/// their variant, objects compare by identity. Values of unrelated types
/// are unequal.
#[allow(clippy::float_cmp, reason = "formula equality is exact")]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            left.as_float() == right.as_float()
        }
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Enum(a), Value::Enum(b)) => a == b,
        (Value::Enum(e), Value::Str(s)) | (Value::Str(s), Value::Enum(e)) => e.variant == **s,
        (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
        (Value::Type(a), Value::Type(b)) => a == b,
        _ => false,
    }
}
