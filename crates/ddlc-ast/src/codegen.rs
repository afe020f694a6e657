//! Source generation for expressions.
//!
//! Default values and aggregate seed values are stored on schema objects as
//! source text, so they can be replayed against a later schema. The generator
//! inserts parentheses wherever the tree shape differs from what operator
//! precedence would parse back.

use std::fmt;

use crate::ast::{BinaryOp, Expr, LiteralKind};

/// Render an expression back into source text.
pub fn generate_source(expr: &Expr<'_>) -> String {
    expr.to_string()
}

/// Quote a string literal, escaping backslashes and single quotes.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr<'_>]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Write an operand of `parent`, parenthesizing when it binds looser.
///
/// At equal precedence the operand on the side opposite to the operator's
/// associativity is parenthesized. Prefix operands of `^` and keyword prefix
/// operands are always parenthesized, since both bind looser than `^`.
fn write_operand(
    f: &mut fmt::Formatter<'_>,
    operand: &Expr<'_>,
    parent: BinaryOp,
    right_side: bool,
) -> fmt::Result {
    let needs_parens = match operand {
        Expr::Binary(child) => {
            let (child_prec, parent_prec) = (child.op.precedence(), parent.precedence());
            child_prec < parent_prec
                || (child_prec == parent_prec && right_side != parent.is_right_assoc())
        }
        Expr::Unary(child) => parent == BinaryOp::Pow || child.op.is_keyword(),
        _ => false,
    };
    if needs_parens {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit) => match lit.kind {
                LiteralKind::Int(n) => write!(f, "{}", n),
                // Debug keeps the fractional part ("1.0", not "1")
                LiteralKind::Float(x) => write!(f, "{:?}", x),
                LiteralKind::Str(s) => f.write_str(&quote_string(s)),
                LiteralKind::Bool(b) => f.write_str(if b { "true" } else { "false" }),
            },
            Expr::Path(path) => write!(f, "{}", path),
            Expr::Unary(unary) => {
                let operand = match unary.operand {
                    Expr::Binary(_) => format!("({})", unary.operand),
                    other => other.to_string(),
                };
                if unary.op.is_keyword() {
                    write!(f, "{} {}", unary.op, operand)
                } else {
                    write!(f, "{}{}", unary.op, operand)
                }
            }
            Expr::Binary(binary) => {
                write_operand(f, binary.left, binary.op, false)?;
                write!(f, " {} ", binary.op)?;
                write_operand(f, binary.right, binary.op, true)
            }
            Expr::Call(call) => {
                write!(f, "{}(", call.func)?;
                write_list(f, call.args)?;
                f.write_str(")")
            }
            Expr::Cast(cast) => match cast.expr {
                Expr::Binary(_) => write!(f, "<{}>({})", cast.ty, cast.expr),
                inner => write!(f, "<{}>{}", cast.ty, inner),
            },
            Expr::Array(array) => {
                f.write_str("[")?;
                write_list(f, array.elements)?;
                f.write_str("]")
            }
            Expr::Set(set) => {
                f.write_str("{")?;
                write_list(f, set.elements)?;
                f.write_str("}")
            }
            Expr::Paren(paren) => write!(f, "({})", paren.expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AstBuilder;
    use crate::ast::UnaryOp;
    use bumpalo::Bump;

    #[test]
    fn literals() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        assert_eq!(generate_source(&b.int(42)), "42");
        assert_eq!(generate_source(&b.float(1.0)), "1.0");
        assert_eq!(generate_source(&b.boolean(true)), "true");
        assert_eq!(generate_source(&b.string("it's")), "'it\\'s'");
    }

    #[test]
    fn precedence_parentheses() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let sum = b.binary(b.int(1), BinaryOp::Add, b.int(2));
        let product = b.binary(sum, BinaryOp::Mul, b.int(3));
        assert_eq!(generate_source(&product), "(1 + 2) * 3");

        let right_nested = b.binary(b.int(10), BinaryOp::Sub, b.binary(b.int(4), BinaryOp::Sub, b.int(3)));
        assert_eq!(generate_source(&right_nested), "10 - (4 - 3)");

        let left_nested = b.binary(b.binary(b.int(10), BinaryOp::Sub, b.int(4)), BinaryOp::Sub, b.int(3));
        assert_eq!(generate_source(&left_nested), "10 - 4 - 3");
    }

    #[test]
    fn power_is_right_associative() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let left_nested = b.binary(b.binary(b.int(2), BinaryOp::Pow, b.int(3)), BinaryOp::Pow, b.int(2));
        assert_eq!(generate_source(&left_nested), "(2 ^ 3) ^ 2");

        let right_nested = b.binary(b.int(2), BinaryOp::Pow, b.binary(b.int(3), BinaryOp::Pow, b.int(2)));
        assert_eq!(generate_source(&right_nested), "2 ^ 3 ^ 2");
    }

    #[test]
    fn prefix_operand_of_power_keeps_parentheses() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let negated_base = b.binary(b.unary(UnaryOp::Neg, b.int(2)), BinaryOp::Pow, b.int(2));
        assert_eq!(generate_source(&negated_base), "(-2) ^ 2");

        let negated_power = b.unary(UnaryOp::Neg, b.binary(b.int(2), BinaryOp::Pow, b.int(2)));
        assert_eq!(generate_source(&negated_power), "-(2 ^ 2)");

        let negated_exponent = b.binary(b.int(2), BinaryOp::Pow, b.unary(UnaryOp::Neg, b.int(1)));
        assert_eq!(generate_source(&negated_exponent), "2 ^ (-1)");

        let sum = b.binary(b.unary(UnaryOp::Neg, b.int(1)), BinaryOp::Add, b.int(2));
        assert_eq!(generate_source(&sum), "-1 + 2");
    }

    #[test]
    fn calls_casts_and_collections() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let call = b.call("std::len", &[b.string("abc")]);
        assert_eq!(generate_source(&call), "std::len('abc')");

        let cast = b.cast(b.type_name("int64"), b.string("1"));
        assert_eq!(generate_source(&cast), "<int64>'1'");

        let array = b.array(&[b.int(1), b.int(2)]);
        assert_eq!(generate_source(&array), "[1, 2]");

        assert_eq!(generate_source(&b.set(&[])), "{}");
        assert_eq!(generate_source(&b.path("default::User")), "default::User");
    }

    #[test]
    fn unary_operators() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        assert_eq!(generate_source(&b.unary(UnaryOp::Neg, b.int(1))), "-1");
        let exists = b.unary(UnaryOp::Exists, b.path("x"));
        assert_eq!(generate_source(&exists), "EXISTS x");
        let not = b.unary(UnaryOp::Not, b.binary(b.path("a"), BinaryOp::And, b.path("b")));
        assert_eq!(generate_source(&not), "NOT (a AND b)");
    }
}
