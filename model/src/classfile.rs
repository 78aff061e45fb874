//! The parts of a class file the code generator looks at.
//!
//! Parsing class files is somebody else's job; this is just the resolved view
//! handed to us: the class name, its methods, and for each method its
//! signature, access flags, raw code and local variable table.

use crate::descriptor::MethodSignature;
use crate::types::{ClassName, JavaType};

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_VARARGS: u16 = 0x0080;
pub const ACC_SYNTHETIC: u16 = 0x1000;

/// Name prefix javac gives to synthetic lambda body methods.
pub const LAMBDA_METHOD_PREFIX: &str = "lambda$";

/// Name prefix javac gives to synthetic inner-class accessors.
pub const ACCESSOR_METHOD_PREFIX: &str = "access$";

const LAMBDA_MODIFIERS: u16 = ACC_SYNTHETIC | ACC_PRIVATE;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassFile {
    pub name: ClassName,
    pub access_flags: u16,
    pub methods: Vec<Method>,
}

impl ClassFile {
    pub fn new(name: impl Into<ClassName>, methods: Vec<Method>) -> Self {
        Self {
            name: name.into(),
            access_flags: ACC_PUBLIC,
            methods,
        }
    }

    pub fn ty(&self) -> JavaType {
        JavaType::Class(self.name.clone())
    }

    /// First method with the given name.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|method| method.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub signature: MethodSignature,
    pub access_flags: u16,
    pub code: Vec<u8>,
    pub local_variable_table: Option<LocalVariableTable>,
}

impl Method {
    pub fn new(name: impl Into<String>, signature: MethodSignature, access_flags: u16) -> Self {
        Self {
            name: name.into(),
            signature,
            access_flags,
            code: Vec::new(),
            local_variable_table: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<Vec<u8>>) -> Self {
        self.code = code.into();
        self
    }

    /// A copy of this method with its local variable table replaced.
    pub fn with_local_variable_table(&self, table: LocalVariableTable) -> Method {
        Method {
            local_variable_table: Some(table),
            ..self.clone()
        }
    }

    pub fn is_static(&self) -> bool {
        self.access_flags & ACC_STATIC != 0
    }

    pub fn is_varargs(&self) -> bool {
        self.access_flags & ACC_VARARGS != 0
    }

    /// Private synthetic method named `lambda$...`.
    pub fn is_lambda_backing_method(&self) -> bool {
        self.access_flags & LAMBDA_MODIFIERS == LAMBDA_MODIFIERS
            && self.name.starts_with(LAMBDA_METHOD_PREFIX)
    }

    pub fn local_variables(&self) -> &[LocalVariable] {
        match &self.local_variable_table {
            Some(table) => &table.variables,
            None => &[],
        }
    }

    /// The local variable stored in slot `index`, if the table has one.
    pub fn local_variable_for_index(&self, index: u16) -> Option<&LocalVariable> {
        self.local_variables()
            .iter()
            .find(|variable| variable.index == index)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocalVariableTable {
    pub variables: Vec<LocalVariable>,
}

impl LocalVariableTable {
    pub fn new(variables: Vec<LocalVariable>) -> Self {
        Self { variables }
    }

    pub fn sort_by_index(&mut self) {
        self.variables.sort_by_key(|variable| variable.index);
    }
}

impl FromIterator<LocalVariable> for LocalVariableTable {
    fn from_iter<T: IntoIterator<Item = LocalVariable>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One entry of a local variable table. Entries synthesized after the fact
/// (such as captured lambda variables) have no code range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVariable {
    pub start_pc: Option<u32>,
    pub length: Option<u32>,
    pub name: String,
    pub ty: JavaType,
    pub index: u16,
}

impl LocalVariable {
    pub fn new(
        start_pc: u32,
        length: u32,
        name: impl Into<String>,
        ty: JavaType,
        index: u16,
    ) -> Self {
        Self {
            start_pc: Some(start_pc),
            length: Some(length),
            name: name.into(),
            ty,
            index,
        }
    }

    pub fn synthetic(name: impl Into<String>, ty: JavaType, index: u16) -> Self {
        Self {
            start_pc: None,
            length: None,
            name: name.into(),
            ty,
            index,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.start_pc.is_none()
    }
}
