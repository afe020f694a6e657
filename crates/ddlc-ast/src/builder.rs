//! Arena-backed construction of syntax trees.
//!
//! [`AstBuilder`] plays the role of the parser for programmatic callers: it
//! allocates nodes in a [`Bump`] arena and stamps them with the current source
//! position, which can be moved with [`AstBuilder::at`].

use std::cell::Cell;

use bumpalo::Bump;

use crate::Span;
use crate::ast::{
    AlterFunction, ArrayExpr, BinaryExpr, BinaryOp, CallExpr, CastExpr, CreateFunction,
    DropFunction, Expr, FuncParam, FunctionCode, Ident, Language, Literal, LiteralKind,
    ObjectRef, ParameterKind, ParenExpr, RenameFunction, SetExpr, SetField, TypeModifier,
    TypeName, UnaryExpr, UnaryOp,
};

/// Builds syntax nodes inside an arena.
pub struct AstBuilder<'ast> {
    arena: &'ast Bump,
    pos: Cell<(u32, u32)>,
}

impl<'ast> AstBuilder<'ast> {
    pub fn new(arena: &'ast Bump) -> Self {
        Self {
            arena,
            pos: Cell::new((1, 1)),
        }
    }

    /// Set the source position stamped on subsequently built nodes.
    pub fn at(&self, line: u32, col: u32) -> &Self {
        self.pos.set((line, col));
        self
    }

    fn span(&self, len: usize) -> Span {
        let (line, col) = self.pos.get();
        Span::new(line, col, len as u32)
    }

    fn alloc_str(&self, s: &str) -> &'ast str {
        self.arena.alloc_str(s)
    }

    // ==========================================================================
    // Names and types
    // ==========================================================================

    pub fn ident(&self, name: &str) -> Ident<'ast> {
        Ident::new(self.alloc_str(name), self.span(name.len()))
    }

    /// Build an object reference from `name` or `module::name`.
    pub fn object_ref(&self, qualified: &str) -> ObjectRef<'ast> {
        let span = self.span(qualified.len());
        match qualified.rfind("::") {
            Some(pos) => ObjectRef {
                module: Some(self.alloc_str(&qualified[..pos])),
                name: self.alloc_str(&qualified[pos + 2..]),
                span,
            },
            None => ObjectRef {
                module: None,
                name: self.alloc_str(qualified),
                span,
            },
        }
    }

    pub fn type_name(&self, qualified: &str) -> TypeName<'ast> {
        TypeName {
            maintype: self.object_ref(qualified),
            subtypes: &[],
            span: self.span(qualified.len()),
        }
    }

    /// Build a parameterized type such as `array<T>`.
    pub fn generic_type(&self, qualified: &str, subtypes: &[TypeName<'ast>]) -> TypeName<'ast> {
        TypeName {
            maintype: self.object_ref(qualified),
            subtypes: self.arena.alloc_slice_copy(subtypes),
            span: self.span(qualified.len()),
        }
    }

    pub fn array_of(&self, element: TypeName<'ast>) -> TypeName<'ast> {
        self.generic_type("array", &[element])
    }

    // ==========================================================================
    // Expressions
    // ==========================================================================

    /// Move an expression into the arena.
    pub fn expr(&self, expr: Expr<'ast>) -> &'ast Expr<'ast> {
        self.arena.alloc(expr)
    }

    fn literal(&self, kind: LiteralKind<'ast>, len: usize) -> Expr<'ast> {
        Expr::Literal(Literal {
            kind,
            span: self.span(len),
        })
    }

    pub fn int(&self, value: i64) -> Expr<'ast> {
        self.literal(LiteralKind::Int(value), value.to_string().len())
    }

    pub fn float(&self, value: f64) -> Expr<'ast> {
        self.literal(LiteralKind::Float(value), format!("{:?}", value).len())
    }

    pub fn string(&self, value: &str) -> Expr<'ast> {
        self.literal(LiteralKind::Str(self.alloc_str(value)), value.len() + 2)
    }

    pub fn boolean(&self, value: bool) -> Expr<'ast> {
        self.literal(LiteralKind::Bool(value), if value { 4 } else { 5 })
    }

    pub fn path(&self, qualified: &str) -> Expr<'ast> {
        Expr::Path(self.object_ref(qualified))
    }

    pub fn unary(&self, op: UnaryOp, operand: Expr<'ast>) -> Expr<'ast> {
        let operand = self.expr(operand);
        Expr::Unary(self.arena.alloc(UnaryExpr {
            op,
            span: self.span(0).merge(operand.span()),
            operand,
        }))
    }

    pub fn binary(&self, left: Expr<'ast>, op: BinaryOp, right: Expr<'ast>) -> Expr<'ast> {
        let span = left.span().merge(right.span());
        Expr::Binary(self.arena.alloc(BinaryExpr {
            left: self.expr(left),
            op,
            right: self.expr(right),
            span,
        }))
    }

    pub fn call(&self, func: &str, args: &[Expr<'ast>]) -> Expr<'ast> {
        Expr::Call(self.arena.alloc(CallExpr {
            func: self.object_ref(func),
            args: self.arena.alloc_slice_copy(args),
            span: self.span(func.len() + 2),
        }))
    }

    pub fn cast(&self, ty: TypeName<'ast>, expr: Expr<'ast>) -> Expr<'ast> {
        Expr::Cast(self.arena.alloc(CastExpr {
            span: ty.span.merge(expr.span()),
            ty,
            expr: self.expr(expr),
        }))
    }

    pub fn array(&self, elements: &[Expr<'ast>]) -> Expr<'ast> {
        Expr::Array(ArrayExpr {
            elements: self.arena.alloc_slice_copy(elements),
            span: self.span(2),
        })
    }

    pub fn set(&self, elements: &[Expr<'ast>]) -> Expr<'ast> {
        Expr::Set(SetExpr {
            elements: self.arena.alloc_slice_copy(elements),
            span: self.span(2),
        })
    }

    pub fn paren(&self, expr: Expr<'ast>) -> Expr<'ast> {
        Expr::Paren(self.arena.alloc(ParenExpr {
            span: expr.span(),
            expr: self.expr(expr),
        }))
    }

    // ==========================================================================
    // Statements
    // ==========================================================================

    /// A positional, singleton parameter without a default.
    pub fn param(&self, name: &str, ty: TypeName<'ast>) -> FuncParam<'ast> {
        let name = self.ident(name);
        FuncParam {
            span: name.span.merge(ty.span),
            name,
            ty,
            typemod: TypeModifier::Singleton,
            kind: ParameterKind::Positional,
            default: None,
        }
    }

    /// Implementation delegating to an existing function.
    pub fn from_function(&self, language: Language, name: &str) -> FunctionCode<'ast> {
        FunctionCode {
            language,
            from_name: Some(self.alloc_str(name)),
            code: None,
            span: self.span(name.len()),
        }
    }

    /// Inline implementation.
    pub fn code(&self, language: Language, source: &str) -> FunctionCode<'ast> {
        FunctionCode {
            language,
            from_name: None,
            code: Some(self.alloc_str(source)),
            span: self.span(source.len()),
        }
    }

    /// A non-aggregate function without an implementation block.
    pub fn create_function(
        &self,
        name: &str,
        params: &[FuncParam<'ast>],
        returning: TypeName<'ast>,
    ) -> CreateFunction<'ast> {
        CreateFunction {
            name: self.object_ref(name),
            params: self.arena.alloc_slice_copy(params),
            returning,
            returning_typemod: TypeModifier::Singleton,
            aggregate: false,
            initial_value: None,
            code: None,
            span: self.span(name.len()),
        }
    }

    pub fn set_field(&self, name: &str, value: Expr<'ast>) -> SetField<'ast> {
        let name = self.ident(name);
        SetField {
            span: name.span.merge(value.span()),
            name,
            value: self.expr(value),
        }
    }

    pub fn alter_function(
        &self,
        name: &str,
        params: &[FuncParam<'ast>],
        commands: &[SetField<'ast>],
    ) -> AlterFunction<'ast> {
        AlterFunction {
            name: self.object_ref(name),
            params: self.arena.alloc_slice_copy(params),
            commands: self.arena.alloc_slice_copy(commands),
            span: self.span(name.len()),
        }
    }

    pub fn rename_function(
        &self,
        name: &str,
        params: &[FuncParam<'ast>],
        new_name: &str,
    ) -> RenameFunction<'ast> {
        RenameFunction {
            name: self.object_ref(name),
            params: self.arena.alloc_slice_copy(params),
            new_name: self.object_ref(new_name),
            span: self.span(name.len()),
        }
    }

    pub fn drop_function(&self, name: &str, params: &[FuncParam<'ast>]) -> DropFunction<'ast> {
        DropFunction {
            name: self.object_ref(name),
            params: self.arena.alloc_slice_copy(params),
            span: self.span(name.len()),
        }
    }
}
