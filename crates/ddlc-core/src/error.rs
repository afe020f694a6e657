//! Error types for ddlc.
//!
//! Each phase has its own error type so callers can match precisely, and
//! [`DdlError`] wraps them for unified handling.
//!
//! ```text
//! DdlError (top-level wrapper)
//! ├── FieldError   - object model: field lookup and value coercion
//! ├── CompileError - building command trees from syntax nodes
//! └── DeltaError   - applying command trees to a schema snapshot
//! ```

use thiserror::Error;

use crate::Span;

fn at(span: &Option<Span>) -> String {
    match span {
        Some(span) => format!(" at {}", span),
        None => String::new(),
    }
}

// ============================================================================
// Field Errors
// ============================================================================

/// Errors raised by the object model when reading or writing fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A value cannot be coerced into the field's declared type.
    #[error("cannot assign {found} to field '{field}' of type {expected}")]
    TypeCoercion {
        /// The field being assigned.
        field: String,
        /// The declared field type.
        expected: String,
        /// Description of the rejected value.
        found: String,
    },

    /// The object kind declares no field with this name.
    #[error("{kind} has no field '{field}'")]
    UnknownField {
        /// Object kind name (e.g., "function").
        kind: &'static str,
        /// The requested field.
        field: String,
    },
}

// ============================================================================
// Compilation Errors
// ============================================================================

/// Errors raised while compiling a DDL statement into a command tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A parameter of the polymorphic type declares a default value.
    #[error(
        "cannot create function {function}: polymorphic parameter '{param}' of type {ty} cannot have a default value at {span}"
    )]
    PolymorphicDefault {
        /// The function being created.
        function: String,
        /// The offending parameter.
        param: String,
        /// The parameter's type.
        ty: String,
        span: Span,
    },

    /// A function with the same overload-qualified name already exists.
    #[error(
        "cannot create function {function}: a function with the same signature is already defined at {span}"
    )]
    DuplicateSignature {
        /// The function being created (base name).
        function: String,
        span: Span,
    },

    /// A parameter kind is not allowed in this context.
    #[error("{message} at {span}")]
    InvalidParameterKind { message: String, span: Span },

    /// A syntactic type cannot be resolved to a type reference.
    #[error("invalid type '{name}': {message} at {span}")]
    InvalidType {
        name: String,
        message: String,
        span: Span,
    },

    /// An alter statement tries to change part of the signature.
    #[error(
        "cannot alter function {function}: field '{field}' is part of the signature and cannot be changed at {span}"
    )]
    ImmutableSignatureField {
        function: String,
        field: String,
        span: Span,
    },

    /// An alter statement names a field the object kind does not declare.
    #[error("{kind} has no field '{field}' at {span}")]
    UnknownField {
        kind: &'static str,
        field: String,
        span: Span,
    },
}

impl CompileError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            CompileError::PolymorphicDefault { span, .. } => *span,
            CompileError::DuplicateSignature { span, .. } => *span,
            CompileError::InvalidParameterKind { span, .. } => *span,
            CompileError::InvalidType { span, .. } => *span,
            CompileError::ImmutableSignatureField { span, .. } => *span,
            CompileError::UnknownField { span, .. } => *span,
        }
    }
}

// ============================================================================
// Delta Errors
// ============================================================================

/// Errors raised while applying a command tree to a schema snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeltaError {
    /// The command targets an object that is not in the snapshot.
    #[error("{kind} '{name}' does not exist{}", at(.span))]
    ObjectNotFound {
        kind: &'static str,
        name: String,
        span: Option<Span>,
    },

    /// The command would create a second object under an existing name.
    #[error("{kind} '{name}' already exists{}", at(.span))]
    DuplicateObject {
        kind: &'static str,
        name: String,
        span: Option<Span>,
    },

    /// The resulting function violates a signature invariant.
    #[error("malformed signature for function '{name}': {detail}{}", at(.span))]
    MalformedSignature {
        name: String,
        detail: String,
        span: Option<Span>,
    },

    /// The command tree is not meaningful (e.g. property commands under a delete).
    #[error("invalid command: {detail}{}", at(.span))]
    InvalidCommand { detail: String, span: Option<Span> },

    /// A property command failed at the object model level.
    #[error("{source}{}", at(.span))]
    Field {
        #[source]
        source: FieldError,
        /// Span of the object command holding the property.
        span: Option<Span>,
    },
}

impl DeltaError {
    /// Attach the location of the command a field error came from.
    pub fn field(source: FieldError, span: Option<Span>) -> Self {
        DeltaError::Field { source, span }
    }
}

impl From<FieldError> for DeltaError {
    fn from(source: FieldError) -> Self {
        DeltaError::Field { source, span: None }
    }
}

impl DeltaError {
    /// Get the span of the command that failed, if it carried one.
    pub fn span(&self) -> Option<Span> {
        match self {
            DeltaError::ObjectNotFound { span, .. } => *span,
            DeltaError::DuplicateObject { span, .. } => *span,
            DeltaError::MalformedSignature { span, .. } => *span,
            DeltaError::InvalidCommand { span, .. } => *span,
            DeltaError::Field { span, .. } => *span,
        }
    }
}

// ============================================================================
// Unified Error
// ============================================================================

/// Top-level error covering every phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DdlError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Delta(#[from] DeltaError),
}

impl DdlError {
    /// Source location of the error, when known.
    pub fn span(&self) -> Option<Span> {
        match self {
            DdlError::Field(_) => None,
            DdlError::Compile(e) => Some(e.span()),
            DdlError::Delta(e) => e.span(),
        }
    }
}
