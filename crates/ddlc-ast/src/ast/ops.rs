//! Operators appearing in default-value and seed-value expressions.

use std::fmt;

/// Binary operators, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `OR`
    Or,
    /// `AND`
    And,
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `IN`
    In,
    /// `NOT IN`
    NotIn,
    /// `LIKE`
    Like,
    /// `ILIKE`
    ILike,
    /// `??`
    Coalesce,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `++`
    Concat,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `//`
    FloorDiv,
    /// `%`
    Mod,
    /// `^`
    Pow,
}

impl BinaryOp {
    /// Binding power; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        use BinaryOp::*;
        match self {
            Or => 1,
            And => 2,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 3,
            In | NotIn | Like | ILike => 4,
            Coalesce => 5,
            Add | Sub | Concat => 6,
            Mul | Div | FloorDiv | Mod => 7,
            Pow => 8,
        }
    }

    /// Whether chains of this operator group to the right (`a ^ b ^ c` is `a ^ (b ^ c)`).
    pub fn is_right_assoc(&self) -> bool {
        matches!(self, BinaryOp::Pow)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOp::*;
        let s = match self {
            Or => "OR",
            And => "AND",
            Equal => "=",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            In => "IN",
            NotIn => "NOT IN",
            Like => "LIKE",
            ILike => "ILIKE",
            Coalesce => "??",
            Add => "+",
            Sub => "-",
            Concat => "++",
            Mul => "*",
            Div => "/",
            FloorDiv => "//",
            Mod => "%",
            Pow => "^",
        };
        write!(f, "{}", s)
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `+`
    Plus,
    /// `NOT`
    Not,
    /// `EXISTS`
    Exists,
    /// `DISTINCT`
    Distinct,
}

impl UnaryOp {
    /// Keyword operators need a space before their operand.
    pub fn is_keyword(&self) -> bool {
        matches!(self, UnaryOp::Not | UnaryOp::Exists | UnaryOp::Distinct)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "NOT",
            UnaryOp::Exists => "EXISTS",
            UnaryOp::Distinct => "DISTINCT",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
    }

    #[test]
    fn keyword_operators() {
        assert!(UnaryOp::Not.is_keyword());
        assert!(!UnaryOp::Neg.is_keyword());
        assert_eq!(BinaryOp::NotIn.to_string(), "NOT IN");
    }

    #[test]
    fn only_power_groups_right() {
        assert!(BinaryOp::Pow.is_right_assoc());
        assert!(!BinaryOp::Sub.is_right_assoc());
        assert!(!BinaryOp::Concat.is_right_assoc());
    }
}
