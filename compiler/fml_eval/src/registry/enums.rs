//! Registered enum types.

use std::sync::Arc;

use fml_ir::{Name, TypeTag};

use super::descriptor::{CallArgs, MemberDescriptor, MemberKind, MethodDescriptor};
use super::typedef::MemberTable;
use super::HostType;
use crate::errors::internal;
use crate::value::EnumValue;
use crate::Value;

/// An enum: variants are static members (`Axis.Y`), instances expose
/// `Name`, `Ordinal` and `ToString()`.
pub struct EnumType {
    table: MemberTable,
    variants: Vec<Name>,
}

impl EnumType {
    pub fn new(name: &str, variants: &[&str]) -> Self {
        let ty = Name::new(name);
        let mut table = MemberTable::new(TypeTag::Enum(ty.clone()));
        let variants: Vec<Name> = variants.iter().map(|v| Name::new(v)).collect();

        for (ordinal, variant) in (0_i64..).zip(&variants) {
            let value = EnumValue {
                ty: ty.clone(),
                variant: variant.clone(),
                ordinal,
            };
            table.add_static(
                variant.as_str(),
                Some(Arc::new(move |_: &Value| Ok(Value::Enum(value.clone())))),
                None,
            );
        }

        table.add_property(
            "Name",
            MemberKind::Property,
            Some(Arc::new(|receiver: &Value| match receiver {
                Value::Enum(e) => Ok(Value::string(e.variant.as_str())),
                _ => Err(internal("enum member read on a non-enum")),
            })),
            None,
        );
        table.add_property(
            "Ordinal",
            MemberKind::Property,
            Some(Arc::new(|receiver: &Value| match receiver {
                Value::Enum(e) => Ok(Value::Int(e.ordinal)),
                _ => Err(internal("enum member read on a non-enum")),
            })),
            None,
        );
        table.add_method(
            false,
            MethodDescriptor {
                name: Name::new("ToString"),
                params: Vec::new(),
                generic_arity: 0,
                returns_void: false,
                invoke: Arc::new(|args: &CallArgs<'_>| Ok(Value::from(args.receiver.to_string()))),
            },
        );

        EnumType { table, variants }
    }

    pub fn variants(&self) -> &[Name] {
        &self.variants
    }

    fn value_at(&self, ordinal: usize) -> Option<EnumValue> {
        let variant = self.variants.get(ordinal)?;
        Some(EnumValue {
            ty: Name::new(self.table.tag.name()),
            variant: variant.clone(),
            ordinal: i64::try_from(ordinal).ok()?,
        })
    }
}

impl HostType for EnumType {
    fn type_tag(&self) -> &TypeTag {
        &self.table.tag
    }

    fn resolve_member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.table.member(name)
    }

    fn resolve_method(&self, name: &str) -> Option<&[MethodDescriptor]> {
        self.table.methods.get(name).map(Vec::as_slice)
    }

    fn resolve_static_member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.table.static_members.get(name)
    }

    fn resolve_static_method(&self, name: &str) -> Option<&[MethodDescriptor]> {
        self.table.static_methods.get(name).map(Vec::as_slice)
    }

    fn variant(&self, name: &str) -> Option<EnumValue> {
        let ordinal = self.variants.iter().position(|v| v == name)?;
        self.value_at(ordinal)
    }

    fn variant_at(&self, ordinal: i64) -> Option<EnumValue> {
        self.value_at(usize::try_from(ordinal).ok()?)
    }
}
