//! Immutable schema snapshots.

use std::sync::Arc;

use ddlc_core::QualifiedName;
use rustc_hash::FxHashMap;

use crate::function::Function;
use crate::object::{ObjectKind, SchemaObject};

/// A snapshot of the schema: qualified name to object.
///
/// Snapshots are values. [`Schema::apply`] returns a new snapshot and leaves the
/// receiver untouched; objects are shared between snapshots until changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    objects: FxHashMap<QualifiedName, Arc<SchemaObject>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &QualifiedName) -> Option<&SchemaObject> {
        self.objects.get(name).map(Arc::as_ref)
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.objects.contains_key(name)
    }

    /// Look up a function by its overload-qualified name.
    pub fn get_function(&self, name: &QualifiedName) -> Option<Function<'_>> {
        self.get(name).and_then(Function::new)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaObject> {
        self.objects.values().map(Arc::as_ref)
    }

    /// All functions, sorted by qualified name.
    pub fn functions(&self) -> Vec<Function<'_>> {
        let mut functions: Vec<_> = self
            .iter()
            .filter(|o| o.kind() == ObjectKind::Function)
            .filter_map(Function::new)
            .collect();
        functions.sort_by(|a, b| a.name().cmp(b.name()));
        functions
    }

    /// Overloads of `base`: functions in the same module whose name is `base`
    /// specialized by some parameter list.
    pub fn overloads<'s>(&'s self, base: &QualifiedName) -> Vec<Function<'s>> {
        let nullary = base.specialize(std::iter::empty::<&str>());
        let prefix = format!("{}_", nullary.name);
        self.functions()
            .into_iter()
            .filter(|f| {
                let name = f.name();
                name.module == base.module
                    && (name.name == nullary.name || name.name.starts_with(&prefix))
            })
            .collect()
    }

    pub(crate) fn insert(&mut self, object: SchemaObject) {
        self.objects
            .insert(object.name().clone(), Arc::new(object));
    }

    pub(crate) fn remove(&mut self, name: &QualifiedName) -> Option<SchemaObject> {
        self.objects.remove(name).map(Arc::unwrap_or_clone)
    }
}
