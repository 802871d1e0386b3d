//! The operator table.
//!
//! Spellings and precedence classes are part of the formula format: existing
//! formulas depend on them bit-for-bit, including the unusual placement of
//! the bitwise classes above arithmetic.
//!
//! | Class | Operators            |
//! |-------|----------------------|
//! | 1     | `\|\|`               |
//! | 2     | `&&`                 |
//! | 3     | `==` `!=`            |
//! | 4     | `<` `<=` `>` `>=`    |
//! | 5     | `+` `-`              |
//! | 6     | `*` `/` `%`          |
//! | 7     | `<<` `>>`            |
//! | 8     | `\|`                 |
//! | 9     | `&`                  |
//! | 10    | `^` `~`              |
//!
//! Higher classes bind tighter. Assignment operators have no class; the
//! parser handles them (and the ternary) above the binary levels.

use std::fmt;

/// Every operator spelling the lexer recognizes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperationType {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Equality and relational
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Logical
    And,
    Or,
    Not,

    // Bitwise
    ShiftLeft,
    ShiftRight,
    BitwiseAnd,
    BitwiseOr,
    BitwiseNot,
    Xor,

    // Assignment
    Assignment,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
}

impl OperationType {
    /// All operators, in declaration order.
    pub const ALL: [OperationType; 31] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Equal,
        Self::NotEqual,
        Self::Greater,
        Self::GreaterEqual,
        Self::Less,
        Self::LessEqual,
        Self::And,
        Self::Or,
        Self::Not,
        Self::ShiftLeft,
        Self::ShiftRight,
        Self::BitwiseAnd,
        Self::BitwiseOr,
        Self::BitwiseNot,
        Self::Xor,
        Self::Assignment,
        Self::AddAssign,
        Self::SubAssign,
        Self::MulAssign,
        Self::DivAssign,
        Self::ModAssign,
        Self::AndAssign,
        Self::OrAssign,
        Self::XorAssign,
        Self::ShiftLeftAssign,
        Self::ShiftRightAssign,
    ];

    /// Longest operator spelling, in bytes.
    pub const MAX_SYMBOL_LEN: usize = 3;

    /// Returns the source-level spelling of this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Not => "!",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseNot => "~",
            Self::Xor => "^",
            Self::Assignment => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::AndAssign => "&=",
            Self::OrAssign => "|=",
            Self::XorAssign => "^=",
            Self::ShiftLeftAssign => "<<=",
            Self::ShiftRightAssign => ">>=",
        }
    }

    /// Look up an operator by its exact spelling.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_symbol() == symbol)
    }

    /// Precedence class; higher binds tighter.
    ///
    /// `None` for the prefix-only `!` and for every assignment spelling.
    pub const fn precedence(self) -> Option<u8> {
        match self {
            Self::Or => Some(1),
            Self::And => Some(2),
            Self::Equal | Self::NotEqual => Some(3),
            Self::Greater | Self::GreaterEqual | Self::Less | Self::LessEqual => Some(4),
            Self::Add | Self::Sub => Some(5),
            Self::Mul | Self::Div | Self::Mod => Some(6),
            Self::ShiftLeft | Self::ShiftRight => Some(7),
            Self::BitwiseOr => Some(8),
            Self::BitwiseAnd => Some(9),
            Self::BitwiseNot | Self::Xor => Some(10),
            Self::Not
            | Self::Assignment
            | Self::AddAssign
            | Self::SubAssign
            | Self::MulAssign
            | Self::DivAssign
            | Self::ModAssign
            | Self::AndAssign
            | Self::OrAssign
            | Self::XorAssign
            | Self::ShiftLeftAssign
            | Self::ShiftRightAssign => None,
        }
    }

    /// Whether this operator can appear between two operands.
    pub const fn is_binary(self) -> bool {
        !matches!(self, Self::BitwiseNot) && self.precedence().is_some()
    }

    /// Whether this is `=` or one of the compound assignment spellings.
    pub const fn is_assignment(self) -> bool {
        matches!(self, Self::Assignment) || self.compound_base().is_some()
    }

    /// The binary operator a compound assignment desugars to (`+=` → `+`).
    pub const fn compound_base(self) -> Option<Self> {
        match self {
            Self::AddAssign => Some(Self::Add),
            Self::SubAssign => Some(Self::Sub),
            Self::MulAssign => Some(Self::Mul),
            Self::DivAssign => Some(Self::Div),
            Self::ModAssign => Some(Self::Mod),
            Self::AndAssign => Some(Self::BitwiseAnd),
            Self::OrAssign => Some(Self::BitwiseOr),
            Self::XorAssign => Some(Self::Xor),
            Self::ShiftLeftAssign => Some(Self::ShiftLeft),
            Self::ShiftRightAssign => Some(Self::ShiftRight),
            _ => None,
        }
    }

    /// Whether booleans are coerced to `0`/`1` before applying this operator.
    pub const fn coerces_booleans(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod
        )
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
