//! Schema object model and command trees.
//!
//! - [`field`]: typed field values and declarations with coercion
//! - [`object`]: object kinds and schema objects
//! - [`function`]: the function kind and its typed view
//! - [`schema`]: immutable snapshots
//! - [`delta`]: command trees and their application
//!
//! # Example
//!
//! ```
//! use ddlc_core::{QualifiedName, TypeRef};
//! use ddlc_schema::delta::{ObjectCommand, ObjectOp};
//! use ddlc_schema::function::fields;
//! use ddlc_schema::{ObjectKind, Schema, Value};
//!
//! let name = QualifiedName::new("default", "double_int64");
//! let mut create = ObjectCommand::builder(ObjectOp::Create, ObjectKind::Function, name.clone());
//! create
//!     .set(fields::PARAMNAMES, Value::Seq(vec!["x".into()]))
//!     .set(fields::PARAMTYPES, Value::Seq(vec![TypeRef::scalar("int64").into()]))
//!     .set(fields::PARAMTYPEMODS, Value::Seq(vec!["SINGLETON".into()]))
//!     .set(fields::PARAMKINDS, Value::Seq(vec!["POSITIONAL".into()]));
//!
//! let schema = Schema::new().apply(&create.build()).unwrap();
//! assert_eq!(schema.get_function(&name).unwrap().arity(), 1);
//! ```

pub mod delta;
pub mod field;
pub mod function;
pub mod object;
pub mod schema;

pub use delta::{apply, AlterObjectProperty, Command, ObjectCommand, ObjectCommandBuilder, ObjectOp};
pub use field::{ExpressionText, FieldDecl, FieldType, ListKind, TypedList, Value};
pub use function::{Function, FUNCTION_SCHEMA, SIGNATURE_FIELDS};
pub use object::{ObjectKind, ObjectSchema, SchemaObject};
pub use schema::Schema;
