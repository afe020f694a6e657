//! Function DDL compiler.
//!
//! Compiles create / alter / rename / drop function statements into command
//! trees for [`ddlc_schema`]. Compilation only reads the snapshot it is given;
//! the resulting [`Command`](ddlc_schema::Command) is applied separately.
//!
//! - [`context`]: module aliases and the compilation context
//! - [`type_resolver`]: syntactic types to [`TypeRef`](ddlc_core::TypeRef)s
//! - [`params`]: parameter extraction
//! - [`function`]: the statement compilers and overload name qualification

pub mod context;
pub mod function;
pub mod params;
pub mod type_resolver;

pub use context::{CommandContext, ModuleAliases, DEFAULT_MODULE, STD_MODULE};
pub use function::{
    compile_alter, compile_create, compile_delete, compile_delete_target_name, compile_rename,
    compile_statement, qualify_name,
};
pub use params::{extract_parameters, ParametersInfo};
pub use type_resolver::{resolve_type_reference, TypeResolver, STD_SCALARS};
