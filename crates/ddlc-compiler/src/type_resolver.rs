//! Type resolution for converting syntactic types to [`TypeRef`]s.
//!
//! - builtin scalars (`int64`, `str`, `any`, ...) resolve to [`TypeRef::Scalar`]
//!   when written unqualified or qualified with `std`
//! - `array<T>` resolves to a container of the resolved element type
//! - every other name becomes a [`TypeRef::ForwardRef`] in the aliased, literal
//!   or default module

use ddlc_ast::ast::{ObjectRef, TypeName};
use ddlc_core::{CompileError, QualifiedName, TypeRef};
use ddlc_schema::{ObjectKind, Schema};

use crate::context::{ModuleAliases, STD_MODULE};

/// Builtin scalar types of the `std` module.
pub const STD_SCALARS: &[&str] = &[
    "any", "bool", "bytes", "datetime", "decimal", "float32", "float64", "int16", "int32",
    "int64", "json", "str", "uuid",
];

/// Schema name of the builtin array container.
pub const ARRAY_TYPE: &str = "array";

/// Resolves syntactic types and object names against module aliases.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    modaliases: &'a ModuleAliases,
    schema: &'a Schema,
}

impl<'a> TypeResolver<'a> {
    pub fn new(modaliases: &'a ModuleAliases, schema: &'a Schema) -> Self {
        Self { modaliases, schema }
    }

    /// Qualify an object name (e.g. a function name).
    pub fn resolve_name(&self, name: &ObjectRef<'_>) -> QualifiedName {
        self.modaliases.qualify(name.module, name.name)
    }

    /// Resolve a syntactic type.
    pub fn resolve(&self, ty: &TypeName<'_>) -> Result<TypeRef, CompileError> {
        let maintype = &ty.maintype;
        let is_std = match maintype.module {
            None => true,
            Some(_) => self.modaliases.resolve_module(maintype.module) == STD_MODULE,
        };

        if is_std && maintype.name == ARRAY_TYPE {
            return match ty.subtypes {
                [element] => Ok(TypeRef::container(ARRAY_TYPE, self.resolve(element)?)),
                _ => Err(self.invalid(
                    ty,
                    format!("expected 1 type argument, found {}", ty.subtypes.len()),
                )),
            };
        }

        if !ty.subtypes.is_empty() {
            return Err(self.invalid(ty, "type does not take type arguments".to_string()));
        }

        if is_std && STD_SCALARS.iter().any(|s| *s == maintype.name) {
            return Ok(TypeRef::scalar(maintype.name));
        }

        let name = self.resolve_name(maintype);
        if self
            .schema
            .get(&name)
            .is_some_and(|o| o.kind() == ObjectKind::Function)
        {
            return Err(self.invalid(ty, format!("{} is a function, not a type", name)));
        }
        Ok(TypeRef::forward(name))
    }

    fn invalid(&self, ty: &TypeName<'_>, message: String) -> CompileError {
        CompileError::InvalidType {
            name: ty.to_string(),
            message,
            span: ty.span,
        }
    }
}

/// Resolve `ty` using `modaliases`.
pub fn resolve_type_reference(
    ty: &TypeName<'_>,
    modaliases: &ModuleAliases,
    schema: &Schema,
) -> Result<TypeRef, CompileError> {
    TypeResolver::new(modaliases, schema).resolve(ty)
}
