//! Function signature compiler.
//!
//! Turns function DDL statements into command trees. Functions are identified by
//! their overload-qualified name: the base name specialized by one qualifier per
//! parameter type (see [`qualify_name`]). Two overloads of `f` therefore live
//! side by side as e.g. `default::f_int64` and `default::f_str`.

use ddlc_ast::ast::{
    AlterFunction, CreateFunction, DdlStatement, DropFunction, Expr, LiteralKind, RenameFunction,
    SetField, SignatureNode, TypeName,
};
use ddlc_ast::generate_source;
use ddlc_core::{CompileError, QualifiedName, TypeRef};
use ddlc_schema::function::fields;
use ddlc_schema::{
    Command, ExpressionText, FieldType, ObjectCommand, ObjectKind, ObjectOp, FUNCTION_SCHEMA,
    SIGNATURE_FIELDS, Value,
};
use tracing::debug;

use crate::context::CommandContext;
use crate::params::{ParametersInfo, extract_parameters};
use crate::type_resolver::TypeResolver;

// ============================================================================
// Names
// ============================================================================

/// Compute the overload-qualified name of `base` for the given parameter types.
///
/// Each parameter contributes its qualifier tokens in order: a forward reference
/// its qualified name, a container its schema name followed by the tokens of its
/// element, a scalar its plain name.
///
/// ```
/// use ddlc_compiler::qualify_name;
/// use ddlc_core::{QualifiedName, TypeRef};
///
/// let base = QualifiedName::new("a", "f");
/// assert_eq!(qualify_name(&base, &[TypeRef::scalar("int64")]).to_string(), "a::f_int64");
/// assert_eq!(
///     qualify_name(&base, &[TypeRef::container("array", TypeRef::scalar("str"))]).to_string(),
///     "a::f_array_str"
/// );
/// ```
pub fn qualify_name(base: &QualifiedName, param_types: &[TypeRef]) -> QualifiedName {
    let mut qualifiers = Vec::with_capacity(param_types.len());
    for ty in param_types {
        ty.push_qualifiers(&mut qualifiers);
    }
    base.specialize(qualifiers)
}

fn signature<'ast, N: SignatureNode<'ast>>(
    node: &N,
    ctx: &CommandContext<'_>,
) -> Result<(QualifiedName, ParametersInfo), CompileError> {
    let base = TypeResolver::new(ctx.modaliases, ctx.schema).resolve_name(&node.name());
    let params = extract_parameters(node, ctx.modaliases, ctx.schema, true)?;
    Ok((base, params))
}

// ============================================================================
// Create
// ============================================================================

/// Compile `CREATE FUNCTION` into a Create command.
///
/// Fails with [`CompileError::PolymorphicDefault`] when an `any`-typed parameter
/// has a default, and with [`CompileError::DuplicateSignature`] when a function
/// with the same overload-qualified name is already in the snapshot.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile_create(
    ast: &CreateFunction<'_>,
    ctx: &CommandContext<'_>,
) -> Result<Command, CompileError> {
    let (base, params) = signature(ast, ctx)?;
    let resolver = TypeResolver::new(ctx.modaliases, ctx.schema);
    let return_type = resolver.resolve(&ast.returning)?;

    for (i, ty) in params.types.iter().enumerate() {
        if ty.is_polymorphic() && params.defaults[i].is_some() {
            return Err(CompileError::PolymorphicDefault {
                function: base.to_string(),
                param: params.names[i].clone(),
                ty: ty.to_string(),
                span: ast.params[i].span,
            });
        }
    }

    let fullname = qualify_name(&base, &params.types);
    if ctx.schema.contains(&fullname) {
        return Err(CompileError::DuplicateSignature {
            function: base.to_string(),
            span: ast.span,
        });
    }

    let mut cmd = ObjectCommand::builder(ObjectOp::Create, ObjectKind::Function, fullname);
    cmd.set(fields::PARAMNAMES, params.names_value())
        .set(fields::PARAMTYPES, params.types_value())
        .set(fields::PARAMTYPEMODS, params.typemods_value())
        .set(fields::PARAMKINDS, params.kinds_value())
        .set(fields::PARAMDEFAULTS, params.defaults_value())
        .set(fields::RETURN_TYPE, return_type)
        .set(fields::AGGREGATE, ast.aggregate)
        .set(fields::RETURN_TYPEMOD, ast.returning_typemod);

    if let Some(initial) = ast.initial_value {
        cmd.set(fields::INITIAL_VALUE, ExpressionText::new(generate_source(initial)));
    }

    if let Some(code) = &ast.code {
        cmd.set(fields::LANGUAGE, code.language);
        match (code.from_name, code.code) {
            (Some(delegate), _) => cmd.set(fields::FROM_FUNCTION, delegate),
            (None, Some(source)) => cmd.set(fields::CODE, source),
            (None, None) => cmd.set(fields::CODE, Value::Null),
        };
    }

    let cmd = cmd.with_span(ast.span).build();
    debug!(function = %base, arity = params.len(), "compiled create function");
    Ok(cmd)
}

// ============================================================================
// Rename
// ============================================================================

/// Compile `RENAME FUNCTION` into a Rename command.
///
/// The new name keeps the signature suffix: renaming `f(x: int64)` to `g` targets
/// `g_int64`. An unqualified new name stays in the function's module.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile_rename(
    ast: &RenameFunction<'_>,
    ctx: &CommandContext<'_>,
) -> Result<Command, CompileError> {
    let (base, params) = signature(ast, ctx)?;
    let new_base = match ast.new_name.module {
        Some(_) => TypeResolver::new(ctx.modaliases, ctx.schema).resolve_name(&ast.new_name),
        None => QualifiedName::new(base.module.clone(), ast.new_name.name),
    };

    let target = qualify_name(&base, &params.types);
    let new_name = qualify_name(&new_base, &params.types);
    debug!(from = %target, to = %new_name, "compiled rename function");

    Ok(
        ObjectCommand::builder(ObjectOp::Rename { new_name }, ObjectKind::Function, target)
            .with_span(ast.span)
            .build(),
    )
}

// ============================================================================
// Alter
// ============================================================================

/// Compile `ALTER FUNCTION` into an Alter command of property assignments.
///
/// Signature fields cannot be altered and unknown fields are rejected here
/// rather than at apply time.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile_alter(
    ast: &AlterFunction<'_>,
    ctx: &CommandContext<'_>,
) -> Result<Command, CompileError> {
    let (base, params) = signature(ast, ctx)?;
    let target = qualify_name(&base, &params.types);

    let mut cmd = ObjectCommand::builder(ObjectOp::Alter, ObjectKind::Function, target.clone());
    for set in ast.commands {
        let value = alter_value(set, &target, ctx)?;
        cmd.set(set.name.name, value);
    }

    debug!(function = %target, changes = ast.commands.len(), "compiled alter function");
    Ok(cmd.with_span(ast.span).build())
}

fn alter_value(
    set: &SetField<'_>,
    target: &QualifiedName,
    ctx: &CommandContext<'_>,
) -> Result<Value, CompileError> {
    let field = set.name.name;
    if SIGNATURE_FIELDS.iter().any(|f| *f == field) {
        return Err(CompileError::ImmutableSignatureField {
            function: target.to_string(),
            field: field.to_string(),
            span: set.span,
        });
    }
    let decl = FUNCTION_SCHEMA
        .field(field)
        .ok_or_else(|| CompileError::UnknownField {
            kind: FUNCTION_SCHEMA.kind_name(),
            field: field.to_string(),
            span: set.name.span,
        })?;

    // `{}` resets the field.
    let value = set.value;
    if value.is_empty_set() {
        return Ok(decl.default.clone());
    }
    Ok(match (decl.ty, value) {
        (FieldType::Expr, expr) => Value::Expr(ExpressionText::new(generate_source(expr))),
        (FieldType::Type, Expr::Path(path)) => {
            let ty = TypeName {
                maintype: *path,
                subtypes: &[],
                span: path.span,
            };
            Value::Type(TypeResolver::new(ctx.modaliases, ctx.schema).resolve(&ty)?)
        }
        (_, Expr::Literal(lit)) => match lit.kind {
            LiteralKind::Str(s) => Value::Str(s.to_string()),
            LiteralKind::Bool(b) => Value::Bool(b),
            LiteralKind::Int(_) | LiteralKind::Float(_) => {
                Value::Expr(ExpressionText::new(generate_source(value)))
            }
        },
        (_, expr) => Value::Expr(ExpressionText::new(generate_source(expr))),
    })
}

// ============================================================================
// Delete
// ============================================================================

/// The overload-qualified name a `DROP FUNCTION` statement targets.
pub fn compile_delete_target_name(
    ast: &DropFunction<'_>,
    ctx: &CommandContext<'_>,
) -> Result<QualifiedName, CompileError> {
    let (base, params) = signature(ast, ctx)?;
    Ok(qualify_name(&base, &params.types))
}

/// Compile `DROP FUNCTION` into a Delete command.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile_delete(
    ast: &DropFunction<'_>,
    ctx: &CommandContext<'_>,
) -> Result<Command, CompileError> {
    let target = compile_delete_target_name(ast, ctx)?;
    debug!(function = %target, "compiled drop function");
    Ok(
        ObjectCommand::builder(ObjectOp::Delete, ObjectKind::Function, target)
            .with_span(ast.span)
            .build(),
    )
}

/// Compile any function DDL statement.
pub fn compile_statement(
    stmt: &DdlStatement<'_>,
    ctx: &CommandContext<'_>,
) -> Result<Command, CompileError> {
    match stmt {
        DdlStatement::CreateFunction(ast) => compile_create(ast, ctx),
        DdlStatement::AlterFunction(ast) => compile_alter(ast, ctx),
        DdlStatement::RenameFunction(ast) => compile_rename(ast, ctx),
        DdlStatement::DropFunction(ast) => compile_delete(ast, ctx),
    }
}
