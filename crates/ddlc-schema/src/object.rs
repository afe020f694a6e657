//! Schema objects and their per-kind field declarations.

use std::fmt;

use ddlc_core::{DeltaError, FieldError, QualifiedName, Span};
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use crate::field::{FieldDecl, FieldType, Value};
use crate::function::{self, FUNCTION_SCHEMA};

/// The kinds of object a schema can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ObjectKind {
    Function,
}

impl ObjectKind {
    /// Field declarations for this kind.
    pub fn schema(self) -> &'static ObjectSchema {
        match self {
            ObjectKind::Function => &*FUNCTION_SCHEMA,
        }
    }

    /// Lowercase kind name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Function => "function",
        }
    }

    /// Check the kind-specific invariants of an object after a change.
    pub(crate) fn validate(self, object: &SchemaObject, span: Option<Span>) -> Result<(), DeltaError> {
        match self {
            ObjectKind::Function => function::validate(object, span),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered field declarations of one object kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSchema {
    kind_name: &'static str,
    fields: Vec<FieldDecl>,
}

impl ObjectSchema {
    pub fn new(kind_name: &'static str) -> Self {
        Self {
            kind_name,
            fields: Vec::new(),
        }
    }

    /// Declare a field. `compcoef` is clamped into `[0, 1]`.
    ///
    /// Redeclaring a name replaces the earlier declaration in place.
    pub fn declare_field(
        &mut self,
        name: &'static str,
        ty: FieldType,
        default: Value,
        coerce: bool,
        compcoef: f64,
    ) -> &mut Self {
        let decl = FieldDecl {
            name,
            ty,
            default,
            coerce,
            compcoef: OrderedFloat(compcoef.clamp(0.0, 1.0)),
        };
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = decl,
            None => self.fields.push(decl),
        }
        self
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind_name
    }

    /// Declarations in declaration order.
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Like [`field`](Self::field), but an unknown name is an error.
    pub fn lookup(&self, name: &str) -> Result<&FieldDecl, FieldError> {
        self.field(name).ok_or_else(|| FieldError::UnknownField {
            kind: self.kind_name,
            field: name.to_string(),
        })
    }
}

/// A named object in a schema snapshot.
///
/// Every declared field always has a value, starting from its default. Objects
/// are only changed by applying commands, which work on private copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaObject {
    kind: ObjectKind,
    name: QualifiedName,
    fields: FxHashMap<&'static str, Value>,
}

impl SchemaObject {
    pub(crate) fn new(kind: ObjectKind, name: QualifiedName) -> Self {
        let fields = kind
            .schema()
            .fields()
            .iter()
            .map(|decl| (decl.name, decl.default.clone()))
            .collect();
        Self { kind, name, fields }
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// Read a field value.
    pub fn get(&self, field: &str) -> Result<&Value, FieldError> {
        let decl = self.kind.schema().lookup(field)?;
        Ok(self.fields.get(decl.name).unwrap_or(&decl.default))
    }

    /// Assign a field, coercing the value to the declared type.
    pub(crate) fn set(&mut self, field: &str, value: Value) -> Result<(), FieldError> {
        let decl = self.kind.schema().lookup(field)?;
        let value = decl.coerce(value)?;
        self.fields.insert(decl.name, value);
        Ok(())
    }

    pub(crate) fn set_name(&mut self, name: QualifiedName) {
        self.name = name;
    }

    /// Field values in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        self.kind
            .schema()
            .fields()
            .iter()
            .map(|decl| (decl.name, self.fields.get(decl.name).unwrap_or(&decl.default)))
    }

    /// Similarity with another version of an object, in `[0, 1]`.
    ///
    /// Starts at 1 and multiplies in the field's `compcoef` for every field
    /// whose values differ. Objects of different kinds score 0.
    pub fn similarity(&self, other: &SchemaObject) -> f64 {
        if self.kind != other.kind {
            return 0.0;
        }
        self.fields()
            .zip(other.fields())
            .filter(|((_, a), (_, b))| a != b)
            .filter_map(|((name, _), _)| self.kind.schema().field(name))
            .fold(1.0, |acc, decl| acc * decl.compcoef.into_inner())
    }
}
