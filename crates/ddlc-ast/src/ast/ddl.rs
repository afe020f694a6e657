//! Function DDL statement nodes.
//!
//! Examples of the statements these nodes represent:
//! - `CREATE FUNCTION default::len(s: str) -> int64 FROM SQL FUNCTION 'length'`
//! - `ALTER FUNCTION default::len(s: str) { SET code := 'SELECT length($1)' }`
//! - `ALTER FUNCTION default::len(s: str) RENAME TO util::len`
//! - `DROP FUNCTION default::len(s: str)`

use crate::Span;
use crate::ast::{Expr, Ident, Language, ObjectRef, ParameterKind, TypeModifier, TypeName};

/// A function parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuncParam<'ast> {
    pub name: Ident<'ast>,
    pub ty: TypeName<'ast>,
    /// Cardinality modifier (`OPTIONAL`, `SET OF`)
    pub typemod: TypeModifier,
    /// Passing kind (`VARIADIC`, `NAMED ONLY`)
    pub kind: ParameterKind,
    /// Default value expression
    pub default: Option<&'ast Expr<'ast>>,
    pub span: Span,
}

impl<'ast> FuncParam<'ast> {
    pub fn with_default(self, default: &'ast Expr<'ast>) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub fn with_kind(self, kind: ParameterKind) -> Self {
        Self { kind, ..self }
    }

    pub fn with_typemod(self, typemod: TypeModifier) -> Self {
        Self { typemod, ..self }
    }
}

/// Implementation block of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionCode<'ast> {
    pub language: Language,
    /// Delegate function name (`FROM SQL FUNCTION 'name'`)
    pub from_name: Option<&'ast str>,
    /// Inline source code
    pub code: Option<&'ast str>,
    pub span: Span,
}

/// `CREATE [AGGREGATE] FUNCTION name(params) -> [modifier] type [INITIAL VALUE expr] FROM ...`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreateFunction<'ast> {
    pub name: ObjectRef<'ast>,
    pub params: &'ast [FuncParam<'ast>],
    pub returning: TypeName<'ast>,
    pub returning_typemod: TypeModifier,
    pub aggregate: bool,
    /// Seed value for aggregates
    pub initial_value: Option<&'ast Expr<'ast>>,
    pub code: Option<FunctionCode<'ast>>,
    pub span: Span,
}

/// `SET field := value` inside an alter block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetField<'ast> {
    pub name: Ident<'ast>,
    pub value: &'ast Expr<'ast>,
    pub span: Span,
}

/// `ALTER FUNCTION name(params) { SET ...; }`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlterFunction<'ast> {
    pub name: ObjectRef<'ast>,
    pub params: &'ast [FuncParam<'ast>],
    pub commands: &'ast [SetField<'ast>],
    pub span: Span,
}

/// `ALTER FUNCTION name(params) RENAME TO new_name`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenameFunction<'ast> {
    pub name: ObjectRef<'ast>,
    pub params: &'ast [FuncParam<'ast>],
    pub new_name: ObjectRef<'ast>,
    pub span: Span,
}

/// `DROP FUNCTION name(params)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropFunction<'ast> {
    pub name: ObjectRef<'ast>,
    pub params: &'ast [FuncParam<'ast>],
    pub span: Span,
}

/// A statement that names a function by base name and parameter list.
pub trait SignatureNode<'ast> {
    fn name(&self) -> ObjectRef<'ast>;
    fn params(&self) -> &'ast [FuncParam<'ast>];
    fn span(&self) -> Span;
}

macro_rules! impl_signature_node {
    ($($node:ident),* $(,)?) => {
        $(
            impl<'ast> SignatureNode<'ast> for $node<'ast> {
                fn name(&self) -> ObjectRef<'ast> {
                    self.name
                }

                fn params(&self) -> &'ast [FuncParam<'ast>] {
                    self.params
                }

                fn span(&self) -> Span {
                    self.span
                }
            }
        )*
    };
}

impl_signature_node!(CreateFunction, AlterFunction, RenameFunction, DropFunction);

/// Any function DDL statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DdlStatement<'ast> {
    CreateFunction(CreateFunction<'ast>),
    AlterFunction(AlterFunction<'ast>),
    RenameFunction(RenameFunction<'ast>),
    DropFunction(DropFunction<'ast>),
}

impl<'ast> DdlStatement<'ast> {
    /// Get the span of this statement.
    pub fn span(&self) -> Span {
        match self {
            Self::CreateFunction(s) => s.span,
            Self::AlterFunction(s) => s.span,
            Self::RenameFunction(s) => s.span,
            Self::DropFunction(s) => s.span,
        }
    }
}
