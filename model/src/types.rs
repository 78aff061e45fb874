//! JVM types as seen by the code generator.
//!
//! Types are identified structurally. A class type carries its binary name
//! (`java.util.Map$Entry`), which is enough to render both qualified and
//! simple names and to produce descriptors.

use core::fmt;

/// Primitive JVM types, including `void` for method return types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Primitive {
    /// The Java keyword for this type.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Void => "void",
        }
    }

    /// The single-character descriptor of this type.
    pub fn descriptor(self) -> char {
        match self {
            Primitive::Boolean => 'Z',
            Primitive::Byte => 'B',
            Primitive::Char => 'C',
            Primitive::Short => 'S',
            Primitive::Int => 'I',
            Primitive::Long => 'J',
            Primitive::Float => 'F',
            Primitive::Double => 'D',
            Primitive::Void => 'V',
        }
    }

    pub fn from_descriptor(descriptor: char) -> Option<Self> {
        Some(match descriptor {
            'Z' => Primitive::Boolean,
            'B' => Primitive::Byte,
            'C' => Primitive::Char,
            'S' => Primitive::Short,
            'I' => Primitive::Int,
            'J' => Primitive::Long,
            'F' => Primitive::Float,
            'D' => Primitive::Double,
            'V' => Primitive::Void,
            _ => return None,
        })
    }
}

/// Binary name of a class, with `.` as package separator and `$` before
/// nested class names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName(String);

impl ClassName {
    /// Accepts both binary (`java.lang.String`) and internal
    /// (`java/lang/String`) forms.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.contains('/') {
            ClassName(name.replace('/', "."))
        } else {
            ClassName(name)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The internal form used inside class files (`java/lang/String`).
    pub fn internal_name(&self) -> String {
        self.0.replace('.', "/")
    }

    /// Name without package and enclosing classes (`Entry` for
    /// `java.util.Map$Entry`).
    pub fn simple_name(&self) -> &str {
        let unqualified = match self.0.rfind('.') {
            Some(n) => &self.0[n + 1..],
            None => &self.0,
        };

        match unqualified.rfind('$') {
            Some(n) if n + 1 < unqualified.len() => &unqualified[n + 1..],
            _ => unqualified,
        }
    }

    pub fn package(&self) -> Option<&str> {
        self.0.rfind('.').map(|n| &self.0[..n])
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        ClassName::new(name)
    }
}

/// A JVM type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    Primitive(Primitive),
    Class(ClassName),
    Array(Box<JavaType>),
}

pub(crate) static VOID: JavaType = JavaType::Primitive(Primitive::Void);
pub(crate) static INT: JavaType = JavaType::Primitive(Primitive::Int);

impl JavaType {
    pub const BOOLEAN: JavaType = JavaType::Primitive(Primitive::Boolean);
    pub const BYTE: JavaType = JavaType::Primitive(Primitive::Byte);
    pub const CHAR: JavaType = JavaType::Primitive(Primitive::Char);
    pub const SHORT: JavaType = JavaType::Primitive(Primitive::Short);
    pub const INT: JavaType = JavaType::Primitive(Primitive::Int);
    pub const LONG: JavaType = JavaType::Primitive(Primitive::Long);
    pub const FLOAT: JavaType = JavaType::Primitive(Primitive::Float);
    pub const DOUBLE: JavaType = JavaType::Primitive(Primitive::Double);
    pub const VOID: JavaType = JavaType::Primitive(Primitive::Void);

    pub fn class(name: impl Into<String>) -> Self {
        JavaType::Class(ClassName::new(name))
    }

    pub fn array(component: JavaType) -> Self {
        JavaType::Array(Box::new(component))
    }

    pub fn object() -> Self {
        JavaType::class("java.lang.Object")
    }

    pub fn string() -> Self {
        JavaType::class("java.lang.String")
    }

    /// `java.lang.Class`, the static type of class literals.
    pub fn class_literal() -> Self {
        JavaType::class("java.lang.Class")
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, JavaType::Primitive(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JavaType::Primitive(Primitive::Void))
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            JavaType::Primitive(primitive) => Some(*primitive),
            _ => None,
        }
    }

    pub fn as_class_name(&self) -> Option<&ClassName> {
        match self {
            JavaType::Class(name) => Some(name),
            _ => None,
        }
    }

    /// Whether this is the class type with the given binary name.
    pub fn is_class(&self, name: &str) -> bool {
        matches!(self, JavaType::Class(class_name) if class_name.as_str() == name)
    }

    pub fn component_type(&self) -> Option<&JavaType> {
        match self {
            JavaType::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Fully qualified name, e.g. `java.lang.String` or `int[]`.
    pub fn type_name(&self) -> String {
        match self {
            JavaType::Primitive(primitive) => primitive.name().to_string(),
            JavaType::Class(name) => name.as_str().to_string(),
            JavaType::Array(component) => format!("{}[]", component.type_name()),
        }
    }

    /// Unqualified name, e.g. `String` or `String[]`.
    pub fn simple_name(&self) -> String {
        match self {
            JavaType::Primitive(primitive) => primitive.name().to_string(),
            JavaType::Class(name) => name.simple_name().to_string(),
            JavaType::Array(component) => format!("{}[]", component.simple_name()),
        }
    }

    /// The field descriptor, e.g. `Ljava/lang/String;` or `[I`.
    pub fn descriptor(&self) -> String {
        match self {
            JavaType::Primitive(primitive) => primitive.descriptor().to_string(),
            JavaType::Class(name) => format!("L{};", name.internal_name()),
            JavaType::Array(component) => format!("[{}", component.descriptor()),
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

impl From<Primitive> for JavaType {
    fn from(primitive: Primitive) -> Self {
        JavaType::Primitive(primitive)
    }
}

impl From<ClassName> for JavaType {
    fn from(name: ClassName) -> Self {
        JavaType::Class(name)
    }
}
