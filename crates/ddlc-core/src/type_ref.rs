//! Resolved type references.
//!
//! A [`TypeRef`] is what the type resolver produces for a syntactic type and
//! what function objects store for parameter and return types. It has exactly
//! three shapes, which keeps signature mangling a total function.

use std::fmt;

use crate::QualifiedName;

/// Plain name of the universal polymorphic type.
pub const POLYMORPHIC_TYPE: &str = "any";

/// A resolved reference to a schema type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Reference to another schema object by qualified name, not yet bound.
    ForwardRef(QualifiedName),
    /// Concrete builtin scalar, identified by its plain name (e.g. `int64`).
    Scalar(String),
    /// Container type wrapping an element type (e.g. `array<str>`).
    Container {
        /// The container's own schema name (e.g. `array`).
        schema_name: String,
        /// Element type.
        element: Box<TypeRef>,
    },
}

impl TypeRef {
    /// Create a scalar type reference.
    pub fn scalar(name: impl Into<String>) -> Self {
        TypeRef::Scalar(name.into())
    }

    /// Create a forward reference.
    pub fn forward(name: QualifiedName) -> Self {
        TypeRef::ForwardRef(name)
    }

    /// Create a container type reference.
    pub fn container(schema_name: impl Into<String>, element: TypeRef) -> Self {
        TypeRef::Container {
            schema_name: schema_name.into(),
            element: Box::new(element),
        }
    }

    /// The polymorphic `any` type.
    pub fn polymorphic() -> Self {
        TypeRef::Scalar(POLYMORPHIC_TYPE.to_string())
    }

    /// Whether this is the universal polymorphic type.
    pub fn is_polymorphic(&self) -> bool {
        matches!(self, TypeRef::Scalar(name) if name == POLYMORPHIC_TYPE)
    }

    /// Plain (unqualified) name of the type.
    pub fn plain_name(&self) -> &str {
        match self {
            TypeRef::ForwardRef(name) => name.simple_name(),
            TypeRef::Scalar(name) => name,
            TypeRef::Container { schema_name, .. } => schema_name,
        }
    }

    /// Append the signature qualifier tokens for this type.
    ///
    /// - forward reference: its qualified name
    /// - container: its schema name, then the element's tokens
    /// - scalar: its plain name
    pub fn push_qualifiers(&self, out: &mut Vec<String>) {
        match self {
            TypeRef::ForwardRef(name) => out.push(name.to_string()),
            TypeRef::Scalar(name) => out.push(name.clone()),
            TypeRef::Container {
                schema_name,
                element,
            } => {
                out.push(schema_name.clone());
                element.push_qualifiers(out);
            }
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::ForwardRef(name) => write!(f, "{}", name),
            TypeRef::Scalar(name) => write!(f, "{}", name),
            TypeRef::Container {
                schema_name,
                element,
            } => write!(f, "{}<{}>", schema_name, element),
        }
    }
}
