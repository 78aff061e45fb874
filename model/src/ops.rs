//! Small enums shared by several element kinds.

use core::fmt;

/// Operators of binary, unary and branch elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorType {
    Plus,
    Ne,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Eq,
    Not,
    Ge,
    Lt,
    Gt,
    Le,
    And,
    Or,
    LShift,
    RShift,
    UnsignedRShift,
    BitwiseAnd,
    BitwiseOr,
    Xor,
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatorType::Plus => "PLUS",
            OperatorType::Ne => "NE",
            OperatorType::Minus => "MINUS",
            OperatorType::Multiply => "MULTIPLY",
            OperatorType::Divide => "DIVIDE",
            OperatorType::Modulo => "MODULO",
            OperatorType::Eq => "EQ",
            OperatorType::Not => "NOT",
            OperatorType::Ge => "GE",
            OperatorType::Lt => "LT",
            OperatorType::Gt => "GT",
            OperatorType::Le => "LE",
            OperatorType::And => "AND",
            OperatorType::Or => "OR",
            OperatorType::LShift => "LSHIFT",
            OperatorType::RShift => "RSHIFT",
            OperatorType::UnsignedRShift => "UNSIGNED_RSHIFT",
            OperatorType::BitwiseAnd => "BITWISE_AND",
            OperatorType::BitwiseOr => "BITWISE_OR",
            OperatorType::Xor => "XOR",
        };
        f.write_str(name)
    }
}

/// Method handle kinds (JVMS 4.4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    GetField,
    GetStatic,
    PutField,
    PutStatic,
    InvokeVirtual,
    InvokeStatic,
    InvokeSpecial,
    NewInvokeSpecial,
    InvokeInterface,
}

impl ReferenceKind {
    /// The `reference_kind` value stored in a `CONSTANT_MethodHandle`.
    pub fn value(self) -> u8 {
        match self {
            ReferenceKind::GetField => 1,
            ReferenceKind::GetStatic => 2,
            ReferenceKind::PutField => 3,
            ReferenceKind::PutStatic => 4,
            ReferenceKind::InvokeVirtual => 5,
            ReferenceKind::InvokeStatic => 6,
            ReferenceKind::InvokeSpecial => 7,
            ReferenceKind::NewInvokeSpecial => 8,
            ReferenceKind::InvokeInterface => 9,
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Some(match value {
            1 => ReferenceKind::GetField,
            2 => ReferenceKind::GetStatic,
            3 => ReferenceKind::PutField,
            4 => ReferenceKind::PutStatic,
            5 => ReferenceKind::InvokeVirtual,
            6 => ReferenceKind::InvokeStatic,
            7 => ReferenceKind::InvokeSpecial,
            8 => ReferenceKind::NewInvokeSpecial,
            9 => ReferenceKind::InvokeInterface,
            _ => return None,
        })
    }
}

/// Placement of an increment relative to its variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affix {
    Prefix,
    Postfix,
    Undefined,
}
