//! ddlc: compile function DDL into validated schema changes.
//!
//! The pipeline is split across the workspace crates and re-exported here:
//!
//! ```text
//! syntax tree (ddlc-ast)
//!     │  extract_parameters / compile_* (ddlc-compiler)
//!     ▼
//! command tree (ddlc-schema::delta)
//!     │  Schema::apply
//!     ▼
//! new schema snapshot (ddlc-schema::schema)
//! ```
//!
//! # Example
//!
//! ```
//! use ddlc::prelude::*;
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let create = b.create_function(
//!     "math::double",
//!     &[b.param("x", b.type_name("int64"))],
//!     b.type_name("int64"),
//! );
//!
//! let aliases = ModuleAliases::default();
//! let schema = ddlc::execute(&DdlStatement::CreateFunction(create), &aliases, &Schema::new())?;
//! assert!(schema.contains(&QualifiedName::new("math", "double_int64")));
//! # Ok::<(), DdlError>(())
//! ```

pub use ddlc_ast as ast;
pub use ddlc_compiler as compiler;
pub use ddlc_core as core;
pub use ddlc_schema as schema;

pub use ddlc_compiler::{
    CommandContext, ModuleAliases, ParametersInfo, compile_alter, compile_create, compile_delete,
    compile_delete_target_name, compile_rename, compile_statement, extract_parameters,
    qualify_name, resolve_type_reference,
};
pub use ddlc_core::{CompileError, DdlError, DeltaError, FieldError, QualifiedName, Span, TypeRef};
pub use ddlc_schema::{Command, Schema, apply};

use ddlc_ast::ast::DdlStatement;
use tracing::debug;

/// Compile `statement` against `schema` and apply the result.
///
/// Returns the new snapshot; `schema` itself is left unchanged.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn execute(
    statement: &DdlStatement<'_>,
    modaliases: &ModuleAliases,
    schema: &Schema,
) -> Result<Schema, DdlError> {
    let ctx = CommandContext::new(modaliases, schema);
    let command = compile_statement(statement, &ctx)?;
    debug!(span = %statement.span(), "applying compiled statement");
    Ok(schema.apply(&command)?)
}

/// Execute statements in order, threading the snapshot through.
///
/// Stops at the first failing statement; no partial result is returned.
pub fn execute_all<'ast, I>(
    statements: I,
    modaliases: &ModuleAliases,
    schema: &Schema,
) -> Result<Schema, DdlError>
where
    I: IntoIterator<Item = &'ast DdlStatement<'ast>>,
{
    statements
        .into_iter()
        .try_fold(schema.clone(), |current, stmt| execute(stmt, modaliases, &current))
}

/// Commonly used types.
pub mod prelude {
    pub use bumpalo::Bump;
    pub use ddlc_ast::AstBuilder;
    pub use ddlc_ast::ast::{
        DdlStatement, Language, ParameterKind, SignatureNode, TypeModifier,
    };
    pub use ddlc_compiler::{CommandContext, ModuleAliases};
    pub use ddlc_core::{CompileError, DdlError, DeltaError, FieldError, QualifiedName, Span, TypeRef};
    pub use ddlc_schema::delta::{ObjectCommand, ObjectOp};
    pub use ddlc_schema::function::fields;
    pub use ddlc_schema::{Command, Function, ObjectKind, Schema, Value};
}
