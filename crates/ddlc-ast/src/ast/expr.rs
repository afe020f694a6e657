//! Expression nodes.
//!
//! Only the expression forms that appear in parameter defaults and aggregate seed
//! values are modelled. Source text is regenerated from them by
//! [`crate::codegen`].

use crate::Span;
use crate::ast::{BinaryOp, ObjectRef, TypeName, UnaryOp};

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    /// Literal value
    Literal(Literal<'ast>),
    /// Path to a schema object or variable (`module::name`)
    Path(ObjectRef<'ast>),
    /// Prefix operation
    Unary(&'ast UnaryExpr<'ast>),
    /// Binary operation
    Binary(&'ast BinaryExpr<'ast>),
    /// Function call
    Call(&'ast CallExpr<'ast>),
    /// Type cast (`<type>expr`)
    Cast(&'ast CastExpr<'ast>),
    /// Array literal (`[a, b]`)
    Array(ArrayExpr<'ast>),
    /// Set literal (`{a, b}`; `{}` is the empty set)
    Set(SetExpr<'ast>),
    /// Parenthesized expression
    Paren(&'ast ParenExpr<'ast>),
}

impl<'ast> Expr<'ast> {
    /// Get the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(e) => e.span,
            Self::Path(e) => e.span,
            Self::Unary(e) => e.span,
            Self::Binary(e) => e.span,
            Self::Call(e) => e.span,
            Self::Cast(e) => e.span,
            Self::Array(e) => e.span,
            Self::Set(e) => e.span,
            Self::Paren(e) => e.span,
        }
    }

    /// Whether this is the empty set literal `{}`.
    pub fn is_empty_set(&self) -> bool {
        matches!(self, Self::Set(set) if set.elements.is_empty())
    }
}

/// A literal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Literal<'ast> {
    pub kind: LiteralKind<'ast>,
    pub span: Span,
}

/// The kind of literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralKind<'ast> {
    Int(i64),
    Float(f64),
    Str(&'ast str),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryExpr<'ast> {
    pub op: UnaryOp,
    pub operand: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    pub left: &'ast Expr<'ast>,
    pub op: BinaryOp,
    pub right: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    pub func: ObjectRef<'ast>,
    pub args: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastExpr<'ast> {
    pub ty: TypeName<'ast>,
    pub expr: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayExpr<'ast> {
    pub elements: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetExpr<'ast> {
    pub elements: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParenExpr<'ast> {
    pub expr: &'ast Expr<'ast>,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_detection() {
        let empty = Expr::Set(SetExpr {
            elements: &[],
            span: Span::new(1, 1, 2),
        });
        assert!(empty.is_empty_set());
        assert_eq!(empty.span(), Span::new(1, 1, 2));

        let one = [Expr::Literal(Literal {
            kind: LiteralKind::Int(1),
            span: Span::new(1, 2, 1),
        })];
        let set = Expr::Set(SetExpr {
            elements: &one,
            span: Span::new(1, 1, 3),
        });
        assert!(!set.is_empty_set());
    }
}
