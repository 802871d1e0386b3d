use fml_ir::TypeTag;

use super::{count, index};
use crate::errors::{host_failure, index_out_of_range, internal};
use crate::registry::{ParamType as P, TypeDef};
use crate::Value;

/// Character index of the byte offset `byte` in `text`.
fn char_index(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

fn substring(text: &str, start: i64, len: Option<i64>) -> crate::EvalResult {
    let total = text.chars().count();
    let from = if start == count(total) {
        total
    } else {
        index(start, total).ok_or_else(|| index_out_of_range(start, total))?
    };
    let take = match len {
        None => total - from,
        Some(n) => usize::try_from(n)
            .ok()
            .filter(|&n| n <= total - from)
            .ok_or_else(|| host_failure(format!("length {n} out of range")))?,
    };
    Ok(Value::from(text.chars().skip(from).take(take).collect::<String>()))
}

pub(super) fn string_type() -> TypeDef<()> {
    TypeDef::primitive(TypeTag::Str)
        .raw_property("Length", |receiver| {
            let text = receiver.as_str().ok_or_else(|| internal("receiver is not a string"))?;
            Ok(Value::Int(count(text.chars().count())))
        })
        .method("ToUpper", &[], |args| {
            Ok(Value::from(args.receiver_str()?.to_uppercase()))
        })
        .method("ToLower", &[], |args| {
            Ok(Value::from(args.receiver_str()?.to_lowercase()))
        })
        .method("Trim", &[], |args| Ok(Value::string(args.receiver_str()?.trim())))
        .method("Contains", &[P::STR], |args| {
            Ok(Value::Bool(args.receiver_str()?.contains(args.str(0)?)))
        })
        .method("StartsWith", &[P::STR], |args| {
            Ok(Value::Bool(args.receiver_str()?.starts_with(args.str(0)?)))
        })
        .method("EndsWith", &[P::STR], |args| {
            Ok(Value::Bool(args.receiver_str()?.ends_with(args.str(0)?)))
        })
        .method("IndexOf", &[P::STR], |args| {
            let text = args.receiver_str()?;
            Ok(Value::Int(
                text.find(args.str(0)?)
                    .map_or(-1, |byte| count(char_index(text, byte))),
            ))
        })
        .method("Substring", &[P::INT], |args| {
            substring(args.receiver_str()?, args.int(0)?, None)
        })
        .method("Substring", &[P::INT, P::INT], |args| {
            substring(args.receiver_str()?, args.int(0)?, Some(args.int(1)?))
        })
        .method("Replace", &[P::STR, P::STR], |args| {
            let from = args.str(0)?;
            if from.is_empty() {
                return Err(host_failure("`Replace` needs a non-empty search string"));
            }
            Ok(Value::from(args.receiver_str()?.replace(from, args.str(1)?)))
        })
        .method("ToString", &[], |args| Ok(args.receiver.clone()))
}
