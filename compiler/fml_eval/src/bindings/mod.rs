//! Variable bindings.
//!
//! The caller supplies a [`Bindings`] list per evaluation. Each
//! [`Variable`] has a unique, case-sensitive name, a declared type that
//! assignments convert to, and a slot holding the value. A slot either owns
//! its value or forwards to a [`BackingStore`] owned by the host.

use std::fmt;
use std::rc::Rc;

use fml_ir::{Name, TypeTag};
use rustc_hash::FxHashMap;

use crate::Value;

/// Host-owned storage behind a variable.
pub trait BackingStore {
    fn load(&self) -> Value;
    fn store(&self, value: Value);
}

#[derive(Clone)]
enum Slot {
    Owned(Value),
    Backed(Rc<dyn BackingStore>),
}

/// A named, typed, mutable slot.
#[derive(Clone)]
pub struct Variable {
    name: Name,
    ty: TypeTag,
    slot: Slot,
}

impl Variable {
    pub fn new(name: &str, ty: TypeTag, value: Value) -> Self {
        Variable {
            name: Name::new(name),
            ty,
            slot: Slot::Owned(value),
        }
    }

    /// A variable whose declared type is the type of `value`.
    pub fn infer(name: &str, value: Value) -> Self {
        Variable::new(name, value.type_tag(), value)
    }

    /// A variable that reads and writes through `store`.
    pub fn backed(name: &str, ty: TypeTag, store: Rc<dyn BackingStore>) -> Self {
        Variable {
            name: Name::new(name),
            ty,
            slot: Slot::Backed(store),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Declared type. `null` accepts any value unchanged.
    pub fn ty(&self) -> &TypeTag {
        &self.ty
    }

    pub fn get(&self) -> Value {
        match &self.slot {
            Slot::Owned(value) => value.clone(),
            Slot::Backed(store) => store.load(),
        }
    }

    /// Store a value that already has the declared type.
    pub fn set(&mut self, value: Value) {
        match &mut self.slot {
            Slot::Owned(slot) => *slot = value,
            Slot::Backed(store) => store.store(value),
        }
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} = {:?}", self.name, self.ty, self.get())
    }
}

/// Names and declared types of a binding list, sorted by name.
///
/// Part of the formula cache key: compilation depends on which names are
/// bindings, and the declared types decide how the formula behaves.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct BindingSignature(Vec<(Name, TypeTag)>);

impl BindingSignature {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BindingSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, (name, ty)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {ty}")?;
        }
        f.write_str(")")
    }
}

/// An ordered list of variables with unique names.
#[derive(Clone, Default)]
pub struct Bindings {
    vars: Vec<Variable>,
    index: FxHashMap<Name, usize>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, replacing any variable of the same name in place.
    pub fn insert(&mut self, var: Variable) {
        if let Some(&slot) = self.index.get(var.name()) {
            self.vars[slot] = var;
        } else {
            self.index.insert(var.name().clone(), self.vars.len());
            self.vars.push(var);
        }
    }

    /// Builder-style [`insert`](Self::insert) with an inferred type.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(Variable::infer(name, value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|&slot| &self.vars[slot])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.index.get(name).map(|&slot| &mut self.vars[slot])
    }

    /// Current value of a variable.
    pub fn value(&self, name: &str) -> Option<Value> {
        self.get(name).map(Variable::get)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn signature(&self) -> BindingSignature {
        let mut entries: Vec<(Name, TypeTag)> = self
            .vars
            .iter()
            .map(|var| (var.name.clone(), var.ty.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        BindingSignature(entries)
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.vars).finish()
    }
}

impl FromIterator<Variable> for Bindings {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for var in iter {
            bindings.insert(var);
        }
        bindings
    }
}
