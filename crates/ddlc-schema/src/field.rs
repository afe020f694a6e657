//! Typed field values and field declarations.
//!
//! Field values form a closed set of variants ([`Value`]). A field declares the
//! type it stores ([`FieldType`]); assigning a raw value runs it through
//! [`FieldDecl::coerce`], which either accepts it unchanged, converts it (when the
//! field opts into coercion), or rejects it with [`FieldError::TypeCoercion`].
//!
//! | declared type | accepted with `coerce`                         |
//! |---------------|------------------------------------------------|
//! | `List(k)`     | `Seq` whose elements convert to `k`            |
//! | `Expr`        | `Str` (wrapped as expression text)             |
//! | `Language`    | `Str` naming a language (`"sql"`, `"ql"`)      |
//! | `TypeMod`     | `Str` keyword (`"OPTIONAL"`, `"SET OF"`, ...)  |
//! | `Kind`        | `Str` keyword (`"VARIADIC"`, ...)              |
//!
//! `Null` is accepted by every field and an already-typed value always passes.

use std::fmt;

use ddlc_ast::ast::{Language, ParameterKind, TypeModifier};
use ddlc_ast::codegen::quote_string;
use ddlc_core::{FieldError, TypeRef};
use ordered_float::OrderedFloat;

/// Source text of an expression, stored so it can be replayed later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpressionText(String);

impl ExpressionText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpressionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element type of a typed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Str,
    Type,
    TypeMod,
    Kind,
    /// Nullable expression text
    Expr,
}

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    Str,
    Expr,
    Type,
    TypeMod,
    Kind,
    Language,
    List(ListKind),
}

impl FieldType {
    /// Whether `value` already has exactly this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldType::Bool, Value::Bool(_))
            | (FieldType::Str, Value::Str(_))
            | (FieldType::Expr, Value::Expr(_))
            | (FieldType::Type, Value::Type(_))
            | (FieldType::TypeMod, Value::TypeMod(_))
            | (FieldType::Kind, Value::Kind(_))
            | (FieldType::Language, Value::Language(_)) => true,
            (FieldType::List(kind), Value::List(list)) => list.kind() == *kind,
            _ => false,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldType::Bool => "bool",
            FieldType::Str => "str",
            FieldType::Expr => "expression",
            FieldType::Type => "type",
            FieldType::TypeMod => "type modifier",
            FieldType::Kind => "parameter kind",
            FieldType::Language => "language",
            FieldType::List(ListKind::Str) => "list<str>",
            FieldType::List(ListKind::Type) => "list<type>",
            FieldType::List(ListKind::TypeMod) => "list<type modifier>",
            FieldType::List(ListKind::Kind) => "list<parameter kind>",
            FieldType::List(ListKind::Expr) => "list<expression>",
        };
        f.write_str(s)
    }
}

/// A typed, homogeneous list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypedList {
    Str(Vec<String>),
    Type(Vec<TypeRef>),
    TypeMod(Vec<TypeModifier>),
    Kind(Vec<ParameterKind>),
    Expr(Vec<Option<ExpressionText>>),
}

impl TypedList {
    pub fn kind(&self) -> ListKind {
        match self {
            TypedList::Str(_) => ListKind::Str,
            TypedList::Type(_) => ListKind::Type,
            TypedList::TypeMod(_) => ListKind::TypeMod,
            TypedList::Kind(_) => ListKind::Kind,
            TypedList::Expr(_) => ListKind::Expr,
        }
    }

    /// An empty list of the given element kind.
    pub fn empty(kind: ListKind) -> Self {
        match kind {
            ListKind::Str => TypedList::Str(Vec::new()),
            ListKind::Type => TypedList::Type(Vec::new()),
            ListKind::TypeMod => TypedList::TypeMod(Vec::new()),
            ListKind::Kind => TypedList::Kind(Vec::new()),
            ListKind::Expr => TypedList::Expr(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TypedList::Str(v) => v.len(),
            TypedList::Type(v) => v.len(),
            TypedList::TypeMod(v) => v.len(),
            TypedList::Kind(v) => v.len(),
            TypedList::Expr(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Null,
    Bool(bool),
    Str(String),
    Expr(ExpressionText),
    Type(TypeRef),
    TypeMod(TypeModifier),
    Kind(ParameterKind),
    Language(Language),
    /// Raw ordered sequence, not yet coerced into a typed list.
    Seq(Vec<Value>),
    List(TypedList),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short description used in coercion errors.
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".into(),
            Value::Bool(_) => "bool".into(),
            Value::Str(_) => "str".into(),
            Value::Expr(_) => "expression".into(),
            Value::Type(_) => "type".into(),
            Value::TypeMod(_) => "type modifier".into(),
            Value::Kind(_) => "parameter kind".into(),
            Value::Language(_) => "language".into(),
            Value::Seq(items) => format!("sequence of {} items", items.len()),
            Value::List(list) => FieldType::List(list.kind()).to_string(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<TypeRef> for Value {
    fn from(ty: TypeRef) -> Self {
        Value::Type(ty)
    }
}

impl From<TypeModifier> for Value {
    fn from(m: TypeModifier) -> Self {
        Value::TypeMod(m)
    }
}

impl From<Language> for Value {
    fn from(l: Language) -> Self {
        Value::Language(l)
    }
}

impl From<ExpressionText> for Value {
    fn from(e: ExpressionText) -> Self {
        Value::Expr(e)
    }
}

impl From<TypedList> for Value {
    fn from(list: TypedList) -> Self {
        Value::List(list)
    }
}

fn write_seq<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, it) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item(f, it)?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("{}"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => f.write_str(&quote_string(s)),
            Value::Expr(e) => write!(f, "{}", e),
            Value::Type(t) => write!(f, "{}", t),
            Value::TypeMod(m) => write!(f, "{}", m),
            Value::Kind(k) => write!(f, "{}", k),
            Value::Language(l) => write!(f, "{}", l),
            Value::Seq(items) => write_seq(f, items, |f, v| write!(f, "{}", v)),
            Value::List(TypedList::Str(v)) => write_seq(f, v, |f, s| f.write_str(&quote_string(s))),
            Value::List(TypedList::Type(v)) => write_seq(f, v, |f, t| write!(f, "{}", t)),
            Value::List(TypedList::TypeMod(v)) => write_seq(f, v, |f, m| write!(f, "{}", m)),
            Value::List(TypedList::Kind(v)) => write_seq(f, v, |f, k| write!(f, "{}", k)),
            Value::List(TypedList::Expr(v)) => write_seq(f, v, |f, e| match e {
                Some(e) => write!(f, "{}", e),
                None => f.write_str("{}"),
            }),
        }
    }
}

/// Declaration of a field on an object kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDecl {
    pub name: &'static str,
    pub ty: FieldType,
    pub default: Value,
    /// Whether raw input is converted into `ty` on assignment.
    pub coerce: bool,
    /// Similarity credited to two versions whose values differ, in `[0, 1]`.
    pub compcoef: OrderedFloat<f64>,
}

impl FieldDecl {
    /// Check or convert `value` for assignment to this field.
    pub fn coerce(&self, value: Value) -> Result<Value, FieldError> {
        if value.is_null() || self.ty.accepts(&value) {
            return Ok(value);
        }
        let found = value.describe();
        let converted = if self.coerce {
            coerce_value(self.ty, value)
        } else {
            None
        };
        converted.ok_or_else(|| FieldError::TypeCoercion {
            field: self.name.to_string(),
            expected: self.ty.to_string(),
            found,
        })
    }
}

fn coerce_value(ty: FieldType, value: Value) -> Option<Value> {
    match ty {
        FieldType::Bool | FieldType::Str | FieldType::Type => None,
        FieldType::Expr => match value {
            Value::Str(s) => Some(Value::Expr(ExpressionText::new(s))),
            _ => None,
        },
        FieldType::Language => match value {
            Value::Str(s) => Language::from_name(&s).map(Value::Language),
            _ => None,
        },
        FieldType::TypeMod => match value {
            Value::Str(s) => TypeModifier::from_name(&s).map(Value::TypeMod),
            _ => None,
        },
        FieldType::Kind => match value {
            Value::Str(s) => ParameterKind::from_name(&s).map(Value::Kind),
            _ => None,
        },
        FieldType::List(kind) => match value {
            Value::Seq(items) => coerce_list(kind, items).map(Value::List),
            _ => None,
        },
    }
}

fn coerce_list(kind: ListKind, items: Vec<Value>) -> Option<TypedList> {
    let items = items.into_iter();
    match kind {
        ListKind::Str => items
            .map(|v| match v {
                Value::Str(s) => Some(s),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(TypedList::Str),
        ListKind::Type => items
            .map(|v| match v {
                Value::Type(t) => Some(t),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(TypedList::Type),
        ListKind::TypeMod => items
            .map(|v| match v {
                Value::TypeMod(m) => Some(m),
                Value::Str(s) => TypeModifier::from_name(&s),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(TypedList::TypeMod),
        ListKind::Kind => items
            .map(|v| match v {
                Value::Kind(k) => Some(k),
                Value::Str(s) => ParameterKind::from_name(&s),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(TypedList::Kind),
        ListKind::Expr => items
            .map(|v| match v {
                Value::Null => Some(None),
                Value::Expr(e) => Some(Some(e)),
                Value::Str(s) => Some(Some(ExpressionText::new(s))),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(TypedList::Expr),
    }
}
