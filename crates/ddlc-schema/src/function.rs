//! The `function` object kind.
//!
//! Declares the function fields and provides [`Function`], a typed read-only
//! view over a function object. Signature invariants are checked here whenever
//! a command leaves a function in the snapshot.

use std::sync::LazyLock;

use ddlc_ast::ast::{Language, ParameterKind, TypeModifier};
use ddlc_core::{DeltaError, Span, TypeRef};

use crate::field::{ExpressionText, FieldType, ListKind, TypedList, Value};
use crate::object::{ObjectKind, ObjectSchema, SchemaObject};

/// Field names of the function kind.
pub mod fields {
    pub const PARAMNAMES: &str = "paramnames";
    pub const PARAMTYPES: &str = "paramtypes";
    pub const PARAMTYPEMODS: &str = "paramtypemods";
    pub const PARAMKINDS: &str = "paramkinds";
    pub const PARAMDEFAULTS: &str = "paramdefaults";
    pub const RETURN_TYPE: &str = "return_type";
    pub const AGGREGATE: &str = "aggregate";
    pub const CODE: &str = "code";
    pub const LANGUAGE: &str = "language";
    pub const FROM_FUNCTION: &str = "from_function";
    pub const INITIAL_VALUE: &str = "initial_value";
    pub const RETURN_TYPEMOD: &str = "return_typemod";
}

/// Fields that make up the overload signature and cannot be altered in place.
pub const SIGNATURE_FIELDS: &[&str] = &[
    fields::PARAMNAMES,
    fields::PARAMTYPES,
    fields::PARAMTYPEMODS,
    fields::PARAMKINDS,
];

pub static FUNCTION_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    use fields::*;

    let mut schema = ObjectSchema::new("function");
    schema
        .declare_field(PARAMNAMES, FieldType::List(ListKind::Str), empty(ListKind::Str), true, 0.4)
        .declare_field(PARAMTYPES, FieldType::List(ListKind::Type), empty(ListKind::Type), true, 0.4)
        .declare_field(
            PARAMTYPEMODS,
            FieldType::List(ListKind::TypeMod),
            empty(ListKind::TypeMod),
            true,
            0.4,
        )
        .declare_field(PARAMKINDS, FieldType::List(ListKind::Kind), empty(ListKind::Kind), true, 0.4)
        .declare_field(PARAMDEFAULTS, FieldType::List(ListKind::Expr), empty(ListKind::Expr), true, 0.0)
        .declare_field(RETURN_TYPE, FieldType::Type, Value::Null, false, 0.2)
        .declare_field(AGGREGATE, FieldType::Bool, Value::Bool(false), false, 0.4)
        .declare_field(CODE, FieldType::Str, Value::Null, false, 0.4)
        .declare_field(LANGUAGE, FieldType::Language, Value::Null, true, 0.4)
        .declare_field(FROM_FUNCTION, FieldType::Str, Value::Null, false, 0.4)
        .declare_field(INITIAL_VALUE, FieldType::Expr, Value::Null, true, 0.4)
        .declare_field(
            RETURN_TYPEMOD,
            FieldType::TypeMod,
            Value::TypeMod(TypeModifier::Singleton),
            true,
            0.4,
        );
    schema
});

fn empty(kind: ListKind) -> Value {
    Value::List(TypedList::empty(kind))
}

/// Typed view over a function object.
#[derive(Debug, Clone, Copy)]
pub struct Function<'a> {
    object: &'a SchemaObject,
}

impl<'a> Function<'a> {
    /// View `object` as a function, if it is one.
    pub fn new(object: &'a SchemaObject) -> Option<Self> {
        (object.kind() == ObjectKind::Function).then_some(Self { object })
    }

    pub fn object(&self) -> &'a SchemaObject {
        self.object
    }

    pub fn name(&self) -> &'a ddlc_core::QualifiedName {
        self.object.name()
    }

    fn value(&self, field: &str) -> Option<&'a Value> {
        self.object.get(field).ok()
    }

    fn list(&self, field: &str) -> Option<&'a TypedList> {
        match self.value(field) {
            Some(Value::List(list)) => Some(list),
            _ => None,
        }
    }

    pub fn param_names(&self) -> &'a [String] {
        match self.list(fields::PARAMNAMES) {
            Some(TypedList::Str(v)) => v,
            _ => &[],
        }
    }

    pub fn param_types(&self) -> &'a [TypeRef] {
        match self.list(fields::PARAMTYPES) {
            Some(TypedList::Type(v)) => v,
            _ => &[],
        }
    }

    pub fn param_typemods(&self) -> &'a [TypeModifier] {
        match self.list(fields::PARAMTYPEMODS) {
            Some(TypedList::TypeMod(v)) => v,
            _ => &[],
        }
    }

    pub fn param_kinds(&self) -> &'a [ParameterKind] {
        match self.list(fields::PARAMKINDS) {
            Some(TypedList::Kind(v)) => v,
            _ => &[],
        }
    }

    /// Default expression per parameter; empty when no parameter has one.
    pub fn param_defaults(&self) -> &'a [Option<ExpressionText>] {
        match self.list(fields::PARAMDEFAULTS) {
            Some(TypedList::Expr(v)) => v,
            _ => &[],
        }
    }

    pub fn return_type(&self) -> Option<&'a TypeRef> {
        match self.value(fields::RETURN_TYPE) {
            Some(Value::Type(t)) => Some(t),
            _ => None,
        }
    }

    pub fn return_typemod(&self) -> TypeModifier {
        match self.value(fields::RETURN_TYPEMOD) {
            Some(Value::TypeMod(m)) => *m,
            _ => TypeModifier::default(),
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self.value(fields::AGGREGATE), Some(Value::Bool(true)))
    }

    pub fn language(&self) -> Option<Language> {
        match self.value(fields::LANGUAGE) {
            Some(Value::Language(l)) => Some(*l),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&'a str> {
        match self.value(fields::CODE) {
            Some(Value::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn from_function(&self) -> Option<&'a str> {
        match self.value(fields::FROM_FUNCTION) {
            Some(Value::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn initial_value(&self) -> Option<&'a ExpressionText> {
        match self.value(fields::INITIAL_VALUE) {
            Some(Value::Expr(e)) => Some(e),
            _ => None,
        }
    }

    /// Index of the variadic parameter, if any.
    pub fn variadic_index(&self) -> Option<usize> {
        self.param_kinds()
            .iter()
            .position(|k| *k == ParameterKind::Variadic)
    }

    pub fn arity(&self) -> usize {
        self.param_names().len()
    }
}

pub(crate) fn validate(object: &SchemaObject, span: Option<Span>) -> Result<(), DeltaError> {
    let Some(func) = Function::new(object) else {
        return Ok(());
    };
    let malformed = |detail: String| DeltaError::MalformedSignature {
        name: object.name().to_string(),
        detail,
        span,
    };

    let arity = func.arity();
    let lengths = [
        (fields::PARAMTYPES, func.param_types().len()),
        (fields::PARAMTYPEMODS, func.param_typemods().len()),
        (fields::PARAMKINDS, func.param_kinds().len()),
    ];
    for (field, len) in lengths {
        if len != arity {
            return Err(malformed(format!(
                "{} has {} entries but there are {} parameter names",
                field, len, arity
            )));
        }
    }

    let defaults = func.param_defaults();
    if !defaults.is_empty() && defaults.len() != arity {
        return Err(malformed(format!(
            "{} has {} entries but there are {} parameters",
            fields::PARAMDEFAULTS,
            defaults.len(),
            arity
        )));
    }

    let variadic = func
        .param_kinds()
        .iter()
        .filter(|k| **k == ParameterKind::Variadic)
        .count();
    if variadic > 1 {
        return Err(malformed(format!(
            "{} parameters are VARIADIC, at most one is allowed",
            variadic
        )));
    }

    for (i, ty) in func.param_types().iter().enumerate() {
        if ty.is_polymorphic() && defaults.get(i).is_some_and(Option::is_some) {
            return Err(malformed(format!(
                "polymorphic parameter '{}' cannot have a default value",
                func.param_names()[i]
            )));
        }
    }

    if func.code().is_some() && func.from_function().is_some() {
        return Err(malformed(
            "code and from_function cannot both be set".to_string(),
        ));
    }

    Ok(())
}
