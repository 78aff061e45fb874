//! Constant values carried by `Constant` elements.

use core::fmt;

use crate::types::JavaType;

/// The value of a constant, as loaded by `ldc`/`iconst`/`bipush` and friends.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    Class(JavaType),
}

impl ConstantValue {
    /// The type a constant of this value has when no other type is known.
    pub fn natural_type(&self) -> JavaType {
        match self {
            ConstantValue::Null => JavaType::object(),
            ConstantValue::Boolean(_) => JavaType::BOOLEAN,
            ConstantValue::Int(_) => JavaType::INT,
            ConstantValue::Long(_) => JavaType::LONG,
            ConstantValue::Float(_) => JavaType::FLOAT,
            ConstantValue::Double(_) => JavaType::DOUBLE,
            ConstantValue::Char(_) => JavaType::CHAR,
            ConstantValue::String(_) => JavaType::string(),
            ConstantValue::Class(_) => JavaType::class_literal(),
        }
    }

    /// Numeric value, if the constant is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConstantValue::Int(value) => Some(f64::from(*value)),
            ConstantValue::Long(value) => Some(*value as f64),
            ConstantValue::Float(value) => Some(f64::from(*value)),
            ConstantValue::Double(value) => Some(*value),
            ConstantValue::Char(value) => Some(f64::from(u32::from(*value))),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            ConstantValue::Int(value) => Some(*value),
            _ => None,
        }
    }
}

/// Renders the value the way `String.valueOf` would.
impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Null => f.write_str("null"),
            ConstantValue::Boolean(value) => write!(f, "{}", value),
            ConstantValue::Int(value) => write!(f, "{}", value),
            ConstantValue::Long(value) => write!(f, "{}", value),
            ConstantValue::Float(value) => write_floating(f, *value),
            ConstantValue::Double(value) => write_floating(f, *value),
            ConstantValue::Char(value) => write!(f, "{}", value),
            ConstantValue::String(value) => f.write_str(value),
            ConstantValue::Class(ty) => f.write_str(&ty.type_name()),
        }
    }
}

// Plain notation in [1e-3, 1e7), computerized scientific notation outside.
// Both always carry a fractional part.
fn write_floating<T>(f: &mut fmt::Formatter<'_>, value: T) -> fmt::Result
where
    T: Copy + fmt::Display + fmt::LowerExp + Into<f64>,
{
    let wide: f64 = value.into();

    if wide.is_nan() {
        return f.write_str("NaN");
    }

    if wide.is_infinite() {
        return f.write_str(if wide > 0.0 { "Infinity" } else { "-Infinity" });
    }

    let magnitude = wide.abs();

    if magnitude != 0.0 && !(1e-3..1e7).contains(&magnitude) {
        let rendered = format!("{:e}", value);
        let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));

        if mantissa.contains('.') {
            write!(f, "{}E{}", mantissa, exponent)
        } else {
            write!(f, "{}.0E{}", mantissa, exponent)
        }
    } else {
        let rendered = value.to_string();

        if rendered.contains('.') {
            f.write_str(&rendered)
        } else {
            write!(f, "{}.0", rendered)
        }
    }
}

impl From<bool> for ConstantValue {
    fn from(value: bool) -> Self {
        ConstantValue::Boolean(value)
    }
}

impl From<i32> for ConstantValue {
    fn from(value: i32) -> Self {
        ConstantValue::Int(value)
    }
}

impl From<i64> for ConstantValue {
    fn from(value: i64) -> Self {
        ConstantValue::Long(value)
    }
}

impl From<f32> for ConstantValue {
    fn from(value: f32) -> Self {
        ConstantValue::Float(value)
    }
}

impl From<f64> for ConstantValue {
    fn from(value: f64) -> Self {
        ConstantValue::Double(value)
    }
}

impl From<char> for ConstantValue {
    fn from(value: char) -> Self {
        ConstantValue::Char(value)
    }
}

impl From<&str> for ConstantValue {
    fn from(value: &str) -> Self {
        ConstantValue::String(value.to_string())
    }
}

impl From<String> for ConstantValue {
    fn from(value: String) -> Self {
        ConstantValue::String(value)
    }
}
