//! Parameter extraction.
//!
//! Reads the parameter list of any signature-bearing statement into parallel,
//! order-preserving sequences.

use ddlc_ast::ast::{ParameterKind, SignatureNode, TypeModifier};
use ddlc_ast::generate_source;
use ddlc_core::{CompileError, TypeRef};
use ddlc_schema::{ExpressionText, Schema, TypedList, Value};

use crate::context::ModuleAliases;
use crate::type_resolver::TypeResolver;

/// Parameters of a function signature as parallel sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParametersInfo {
    pub names: Vec<String>,
    pub types: Vec<TypeRef>,
    pub typemods: Vec<TypeModifier>,
    pub kinds: Vec<ParameterKind>,
    /// Rendered default expression per parameter.
    pub defaults: Vec<Option<ExpressionText>>,
    /// Index of the variadic parameter.
    pub variadic: Option<usize>,
}

impl ParametersInfo {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn has_defaults(&self) -> bool {
        self.defaults.iter().any(Option::is_some)
    }

    pub fn names_value(&self) -> Value {
        Value::List(TypedList::Str(self.names.clone()))
    }

    pub fn types_value(&self) -> Value {
        Value::List(TypedList::Type(self.types.clone()))
    }

    pub fn typemods_value(&self) -> Value {
        Value::List(TypedList::TypeMod(self.typemods.clone()))
    }

    pub fn kinds_value(&self) -> Value {
        Value::List(TypedList::Kind(self.kinds.clone()))
    }

    pub fn defaults_value(&self) -> Value {
        Value::List(TypedList::Expr(self.defaults.clone()))
    }
}

/// Extract the parameters of `node`.
///
/// Fails with [`CompileError::InvalidParameterKind`] for a NAMED ONLY parameter
/// when `allow_named` is false and for a second VARIADIC parameter, and with
/// [`CompileError::InvalidType`] when a parameter type cannot be resolved.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn extract_parameters<'ast, N>(
    node: &N,
    modaliases: &ModuleAliases,
    schema: &Schema,
    allow_named: bool,
) -> Result<ParametersInfo, CompileError>
where
    N: SignatureNode<'ast>,
{
    let params = node.params();
    let resolver = TypeResolver::new(modaliases, schema);
    let mut info = ParametersInfo {
        names: Vec::with_capacity(params.len()),
        types: Vec::with_capacity(params.len()),
        typemods: Vec::with_capacity(params.len()),
        kinds: Vec::with_capacity(params.len()),
        defaults: Vec::with_capacity(params.len()),
        variadic: None,
    };

    for (i, param) in params.iter().enumerate() {
        match param.kind {
            ParameterKind::NamedOnly if !allow_named => {
                return Err(CompileError::InvalidParameterKind {
                    message: "named only parameters are not allowed in this context".to_string(),
                    span: node.span(),
                });
            }
            ParameterKind::Variadic => {
                if let Some(first) = info.variadic {
                    return Err(CompileError::InvalidParameterKind {
                        message: format!(
                            "parameter '{}' cannot be VARIADIC: '{}' already is",
                            param.name, info.names[first]
                        ),
                        span: param.span,
                    });
                }
                info.variadic = Some(i);
            }
            _ => {}
        }

        info.names.push(param.name.name.to_string());
        info.typemods.push(param.typemod);
        info.kinds.push(param.kind);
        info.defaults
            .push(param.default.map(|d| ExpressionText::new(generate_source(d))));
        info.types.push(resolver.resolve(&param.ty)?);
    }

    Ok(info)
}
