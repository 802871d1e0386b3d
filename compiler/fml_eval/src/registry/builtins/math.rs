//! `Math`: constants and numeric helpers, int and float overloads.

use crate::errors::{host_failure, integer_overflow};
use crate::registry::{ParamType as P, TypeDef};
use crate::Value;

pub(super) fn math_type() -> TypeDef<()> {
    TypeDef::statics("Math")
        .static_property("PI", || Ok(Value::Float(std::f64::consts::PI)))
        .static_property("E", || Ok(Value::Float(std::f64::consts::E)))
        .static_method("Abs", &[P::INT], |args| {
            args.int(0)?
                .checked_abs()
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("Math.Abs"))
        })
        .static_method("Abs", &[P::FLOAT], |args| Ok(Value::Float(args.float(0)?.abs())))
        .static_method("Min", &[P::INT, P::INT], |args| {
            Ok(Value::Int(args.int(0)?.min(args.int(1)?)))
        })
        .static_method("Min", &[P::FLOAT, P::FLOAT], |args| {
            Ok(Value::Float(args.float(0)?.min(args.float(1)?)))
        })
        .static_method("Max", &[P::INT, P::INT], |args| {
            Ok(Value::Int(args.int(0)?.max(args.int(1)?)))
        })
        .static_method("Max", &[P::FLOAT, P::FLOAT], |args| {
            Ok(Value::Float(args.float(0)?.max(args.float(1)?)))
        })
        .static_method("Clamp", &[P::INT, P::INT, P::INT], |args| {
            let (value, low, high) = (args.int(0)?, args.int(1)?, args.int(2)?);
            if low > high {
                return Err(host_failure(format!("Math.Clamp bounds {low} > {high}")));
            }
            Ok(Value::Int(value.clamp(low, high)))
        })
        .static_method("Clamp", &[P::FLOAT, P::FLOAT, P::FLOAT], |args| {
            let (value, low, high) = (args.float(0)?, args.float(1)?, args.float(2)?);
            if low > high || low.is_nan() || high.is_nan() {
                return Err(host_failure(format!("Math.Clamp bounds {low} > {high}")));
            }
            Ok(Value::Float(value.clamp(low, high)))
        })
        .static_method("Pow", &[P::FLOAT, P::FLOAT], |args| {
            Ok(Value::Float(args.float(0)?.powf(args.float(1)?)))
        })
        .static_method("Sqrt", &[P::FLOAT], |args| Ok(Value::Float(args.float(0)?.sqrt())))
        .static_method("Floor", &[P::FLOAT], |args| {
            Ok(Value::Float(args.float(0)?.floor()))
        })
        .static_method("Ceiling", &[P::FLOAT], |args| {
            Ok(Value::Float(args.float(0)?.ceil()))
        })
        // Banker's rounding.
        .static_method("Round", &[P::FLOAT], |args| {
            Ok(Value::Float(args.float(0)?.round_ties_even()))
        })
}
