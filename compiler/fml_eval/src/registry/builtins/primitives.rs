use std::cmp::Ordering;

use fml_ir::TypeTag;

use crate::errors::{internal, EvalResult};
use crate::registry::{CallArgs, ParamType as P, TypeDef};
use crate::Value;

fn ordering(order: Ordering) -> Value {
    Value::Int(match order {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    })
}

pub(super) fn primitive_types() -> [TypeDef<()>; 3] {
    let to_string =
        |args: &CallArgs<'_>| -> EvalResult { Ok(Value::from(args.receiver.to_string())) };
    [
        TypeDef::primitive(TypeTag::Int)
            .method("ToString", &[], to_string)
            .method("CompareTo", &[P::INT], |args| {
                let this = args
                    .receiver
                    .as_int()
                    .ok_or_else(|| internal("receiver is not an int"))?;
                Ok(ordering(this.cmp(&args.int(0)?)))
            }),
        TypeDef::primitive(TypeTag::Float)
            .method("ToString", &[], to_string)
            .method("CompareTo", &[P::FLOAT], |args| {
                let this = args
                    .receiver
                    .as_float()
                    .ok_or_else(|| internal("receiver is not a float"))?;
                Ok(ordering(this.total_cmp(&args.float(0)?)))
            }),
        TypeDef::primitive(TypeTag::Bool).method("ToString", &[], to_string),
    ]
}
