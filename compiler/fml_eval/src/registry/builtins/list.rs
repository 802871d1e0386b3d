//! `List`, a growable reference-type sequence of values.

use super::{count, index};
use crate::errors::{index_out_of_range, EvalResult};
use crate::operators::values_equal;
use crate::registry::{ParamType as P, TypeDef};
use crate::value::LIST_TYPE;
use crate::Value;

type Items = Vec<Value>;

fn slot(at: i64, len: usize) -> EvalResult<usize> {
    index(at, len).ok_or_else(|| index_out_of_range(at, len))
}

pub(super) fn list_type() -> TypeDef<Items> {
    TypeDef::<Items>::reference(LIST_TYPE)
        .property("Count", |items: &Items| count(items.len()))
        .static_method("Create", &[], |_| Ok(Value::list(Vec::new())))
        .void_method("Add", &[P::ANY], |args| {
            let item = args.arg(0)?.clone();
            args.with_receiver_mut(|items: &mut Items| items.push(item))
        })
        .void_method("Insert", &[P::INT, P::ANY], |args| {
            let at = args.int(0)?;
            let item = args.arg(1)?.clone();
            args.with_receiver_mut(|items: &mut Items| {
                // Inserting at `Count` appends.
                let at = if at == count(items.len()) {
                    Ok(items.len())
                } else {
                    slot(at, items.len())
                };
                at.map(|at| items.insert(at, item))
            })?
        })
        .void_method("RemoveAt", &[P::INT], |args| {
            let at = args.int(0)?;
            args.with_receiver_mut(|items: &mut Items| {
                slot(at, items.len()).map(|at| {
                    items.remove(at);
                })
            })?
        })
        .void_method("Clear", &[], |args| {
            args.with_receiver_mut(|items: &mut Items| items.clear())
        })
        .void_method("Set", &[P::INT, P::ANY], |args| {
            let at = args.int(0)?;
            let item = args.arg(1)?.clone();
            args.with_receiver_mut(|items: &mut Items| {
                slot(at, items.len()).map(|at| items[at] = item)
            })?
        })
        .method("Remove", &[P::ANY], |args| {
            let needle = args.arg(0)?;
            args.with_receiver_mut(|items: &mut Items| {
                let found = items.iter().position(|item| values_equal(item, needle));
                if let Some(at) = found {
                    items.remove(at);
                }
                Value::Bool(found.is_some())
            })
        })
        .method("Contains", &[P::ANY], |args| {
            let needle = args.arg(0)?;
            args.with_receiver(|items: &Items| {
                Value::Bool(items.iter().any(|item| values_equal(item, needle)))
            })
        })
        .method("IndexOf", &[P::ANY], |args| {
            let needle = args.arg(0)?;
            args.with_receiver(|items: &Items| {
                Value::Int(
                    items
                        .iter()
                        .position(|item| values_equal(item, needle))
                        .map_or(-1, count),
                )
            })
        })
        .method("Get", &[P::INT], |args| {
            let at = args.int(0)?;
            args.with_receiver(|items: &Items| slot(at, items.len()).map(|at| items[at].clone()))?
        })
}
