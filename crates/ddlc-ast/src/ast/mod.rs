//! Syntax tree node definitions.
//!
//! Nodes are `Copy` and borrow their children from an arena (`'ast`). Every node
//! that can be reported in a diagnostic carries a [`Span`].

mod ddl;
mod expr;
mod ops;

pub use ddl::{
    AlterFunction, CreateFunction, DdlStatement, DropFunction, FuncParam, FunctionCode,
    RenameFunction, SetField, SignatureNode,
};
pub use expr::{
    ArrayExpr, BinaryExpr, CallExpr, CastExpr, Expr, Literal, LiteralKind, ParenExpr, SetExpr,
    UnaryExpr,
};
pub use ops::{BinaryOp, UnaryOp};

use std::fmt;

use crate::Span;

/// An identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ident<'ast> {
    pub name: &'ast str,
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }
}

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A possibly module-qualified reference to a schema object (`module::name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectRef<'ast> {
    /// Module or module alias as written, if any.
    pub module: Option<&'ast str>,
    pub name: &'ast str,
    pub span: Span,
}

impl fmt::Display for ObjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.module {
            Some(module) => write!(f, "{}::{}", module, self.name),
            None => f.write_str(self.name),
        }
    }
}

/// A syntactic type, e.g. `int64`, `default::User` or `array<str>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeName<'ast> {
    pub maintype: ObjectRef<'ast>,
    /// Type arguments for container types.
    pub subtypes: &'ast [TypeName<'ast>],
    pub span: Span,
}

impl fmt::Display for TypeName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.maintype)?;
        if !self.subtypes.is_empty() {
            f.write_str("<")?;
            for (i, sub) in self.subtypes.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", sub)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// Cardinality modifier on a parameter or return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeModifier {
    #[default]
    Singleton,
    Optional,
    SetOf,
}

impl TypeModifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeModifier::Singleton => "SINGLETON",
            TypeModifier::Optional => "OPTIONAL",
            TypeModifier::SetOf => "SET OF",
        }
    }

    /// Parse the keyword form (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SINGLETON" => Some(TypeModifier::Singleton),
            "OPTIONAL" => Some(TypeModifier::Optional),
            "SET OF" => Some(TypeModifier::SetOf),
            _ => None,
        }
    }
}

impl fmt::Display for TypeModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an argument is passed to a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterKind {
    #[default]
    Positional,
    NamedOnly,
    Variadic,
}

impl ParameterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::Positional => "POSITIONAL",
            ParameterKind::NamedOnly => "NAMED ONLY",
            ParameterKind::Variadic => "VARIADIC",
        }
    }

    /// Parse the keyword form (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "POSITIONAL" => Some(ParameterKind::Positional),
            "NAMED ONLY" => Some(ParameterKind::NamedOnly),
            "VARIADIC" => Some(ParameterKind::Variadic),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implementation language of a function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// The database's own query language.
    Ql,
    Sql,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ql => "ql",
            Language::Sql => "sql",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ql" => Some(Language::Ql),
            "sql" => Some(Language::Sql),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
