//! `Convert`: explicit conversions, same rules as assignment.

use fml_ir::TypeTag;

use crate::convert::convert_to;
use crate::registry::{ParamType as P, TypeDef};

pub(super) fn convert_type() -> TypeDef<()> {
    let to = |tag: TypeTag| {
        move |args: &crate::CallArgs<'_>| convert_to(args.arg(0)?.clone(), &tag, args.registry)
    };
    TypeDef::statics("Convert")
        .static_generic_method("To", 1, &[P::ANY], |args| {
            convert_to(args.arg(0)?.clone(), args.type_arg(0)?, args.registry)
        })
        .static_method("ToInt", &[P::ANY], to(TypeTag::Int))
        .static_method("ToFloat", &[P::ANY], to(TypeTag::Float))
        .static_method("ToBool", &[P::ANY], to(TypeTag::Bool))
        .static_method("ToString", &[P::ANY], to(TypeTag::Str))
}
