//! Core types shared by every ddlc crate.
//!
//! - [`Span`]: source locations for diagnostics
//! - [`QualifiedName`]: module-qualified identity of schema objects
//! - [`TypeRef`]: resolved type references used in function signatures
//! - Error types for each phase (object model, compilation, delta application)

mod error;
mod qualified_name;
mod span;
mod type_ref;

pub use error::{CompileError, DdlError, DeltaError, FieldError};
pub use qualified_name::QualifiedName;
pub use span::Span;
pub use type_ref::{POLYMORPHIC_TYPE, TypeRef};
