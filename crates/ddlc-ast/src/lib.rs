//! ddlc syntax tree crate.
//!
//! This crate provides the syntax tree consumed by the schema compiler:
//! - DDL statement nodes (create / alter / rename / drop function)
//! - Expression nodes used for parameter defaults and seed values
//! - An arena-backed [`AstBuilder`] for constructing trees
//! - [`generate_source`] for turning expressions back into replayable text
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use ddlc_ast::{AstBuilder, generate_source};
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//!
//! let default = b.binary(b.int(40), ddlc_ast::ast::BinaryOp::Add, b.int(2));
//! let param = b.param("x", b.type_name("int64")).with_default(b.expr(default));
//! let stmt = b.create_function("default::answer", &[param], b.type_name("int64"));
//!
//! assert_eq!(stmt.params.len(), 1);
//! assert_eq!(generate_source(&default), "40 + 2");
//! ```

pub mod ast;
pub mod builder;
pub mod codegen;

pub use builder::AstBuilder;
pub use codegen::generate_source;
pub use ddlc_core::Span;
