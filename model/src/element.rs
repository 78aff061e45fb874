//! The decompiled syntax tree.
//!
//! An [`Element`] is one node of the tree. Each variant wraps a payload
//! struct so that handlers can work with a single kind through
//! [`Element::kind`] without matching on the whole enum. Elements are never
//! mutated once built; consumers only read them and visit their children.

use core::fmt;

use crate::constant::ConstantValue;
use crate::descriptor::MethodSignature;
use crate::ops::{Affix, OperatorType, ReferenceKind};
use crate::types::{self, JavaType};

/// Tag identifying the kind of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    Return,
    ReturnValue,
    Constant,
    VariableReference,
    VariableAssignment,
    FieldReference,
    FieldAssignment,
    BinaryOperator,
    UnaryOperator,
    Compare,
    Branch,
    Goto,
    Cast,
    ArrayLoad,
    ArrayStore,
    NewArray,
    New,
    Allocate,
    Increment,
    Lambda,
    MethodCall,
}

impl ElementType {
    pub const ALL: [ElementType; 21] = [
        ElementType::Return,
        ElementType::ReturnValue,
        ElementType::Constant,
        ElementType::VariableReference,
        ElementType::VariableAssignment,
        ElementType::FieldReference,
        ElementType::FieldAssignment,
        ElementType::BinaryOperator,
        ElementType::UnaryOperator,
        ElementType::Compare,
        ElementType::Branch,
        ElementType::Goto,
        ElementType::Cast,
        ElementType::ArrayLoad,
        ElementType::ArrayStore,
        ElementType::NewArray,
        ElementType::New,
        ElementType::Allocate,
        ElementType::Increment,
        ElementType::Lambda,
        ElementType::MethodCall,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementType::Return => "RETURN",
            ElementType::ReturnValue => "RETURN_VALUE",
            ElementType::Constant => "CONSTANT",
            ElementType::VariableReference => "VARIABLE_REFERENCE",
            ElementType::VariableAssignment => "VARIABLE_ASSIGNMENT",
            ElementType::FieldReference => "FIELD_REFERENCE",
            ElementType::FieldAssignment => "FIELD_ASSIGNMENT",
            ElementType::BinaryOperator => "BINARY_OPERATOR",
            ElementType::UnaryOperator => "UNARY_OPERATOR",
            ElementType::Compare => "COMPARE",
            ElementType::Branch => "BRANCH",
            ElementType::Goto => "GOTO",
            ElementType::Cast => "CAST",
            ElementType::ArrayLoad => "ARRAY_LOAD",
            ElementType::ArrayStore => "ARRAY_STORE",
            ElementType::NewArray => "NEW_ARRAY",
            ElementType::New => "NEW",
            ElementType::Allocate => "ALLOCATE",
            ElementType::Increment => "INCREMENT",
            ElementType::Lambda => "LAMBDA",
            ElementType::MethodCall => "METHOD_CALL",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the decompiled syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Return(Return),
    ReturnValue(ReturnValue),
    Constant(Constant),
    VariableReference(LocalVariableReference),
    VariableAssignment(VariableAssignment),
    FieldReference(FieldReference),
    FieldAssignment(FieldAssignment),
    BinaryOperator(BinaryOperator),
    UnaryOperator(UnaryOperator),
    Compare(Compare),
    Branch(Branch),
    Goto(Goto),
    Cast(TypeCast),
    ArrayLoad(ArrayLoad),
    ArrayStore(ArrayStore),
    NewArray(NewArray),
    New(NewInstance),
    Allocate(InstanceAllocation),
    Increment(Increment),
    Lambda(Lambda),
    MethodCall(MethodCall),
}

impl Element {
    pub fn element_type(&self) -> ElementType {
        match self {
            Element::Return(_) => ElementType::Return,
            Element::ReturnValue(_) => ElementType::ReturnValue,
            Element::Constant(_) => ElementType::Constant,
            Element::VariableReference(_) => ElementType::VariableReference,
            Element::VariableAssignment(_) => ElementType::VariableAssignment,
            Element::FieldReference(_) => ElementType::FieldReference,
            Element::FieldAssignment(_) => ElementType::FieldAssignment,
            Element::BinaryOperator(_) => ElementType::BinaryOperator,
            Element::UnaryOperator(_) => ElementType::UnaryOperator,
            Element::Compare(_) => ElementType::Compare,
            Element::Branch(_) => ElementType::Branch,
            Element::Goto(_) => ElementType::Goto,
            Element::Cast(_) => ElementType::Cast,
            Element::ArrayLoad(_) => ElementType::ArrayLoad,
            Element::ArrayStore(_) => ElementType::ArrayStore,
            Element::NewArray(_) => ElementType::NewArray,
            Element::New(_) => ElementType::New,
            Element::Allocate(_) => ElementType::Allocate,
            Element::Increment(_) => ElementType::Increment,
            Element::Lambda(_) => ElementType::Lambda,
            Element::MethodCall(_) => ElementType::MethodCall,
        }
    }

    /// The static type of the element. Pure statements have type `void`.
    pub fn ty(&self) -> &JavaType {
        match self {
            Element::Constant(constant) => &constant.ty,
            Element::ReturnValue(ret) => ret.value.ty(),
            Element::VariableReference(variable) => &variable.ty,
            Element::FieldReference(field) => &field.field_type,
            Element::BinaryOperator(op) => &op.ty,
            Element::UnaryOperator(op) => &op.ty,
            Element::Compare(_) => &types::INT,
            Element::Cast(cast) => &cast.ty,
            Element::ArrayLoad(load) => &load.ty,
            Element::NewArray(array) => &array.ty,
            Element::New(instance) => &instance.ty,
            Element::Allocate(allocation) => &allocation.ty,
            Element::Increment(increment) => &increment.ty,
            Element::Lambda(lambda) => &lambda.functional_interface,
            Element::MethodCall(call) => call.signature.return_type(),
            Element::Return(_)
            | Element::VariableAssignment(_)
            | Element::FieldAssignment(_)
            | Element::Branch(_)
            | Element::Goto(_)
            | Element::ArrayStore(_) => &types::VOID,
        }
    }

    /// View this element as a specific kind.
    pub fn kind<E: ElementKind>(&self) -> Option<&E> {
        E::from_element(self)
    }

    /// Whether this element is a reference to the local variable `this`.
    pub fn is_this_reference(&self) -> bool {
        matches!(self, Element::VariableReference(variable) if variable.name == "this")
    }

    pub fn as_constant_value(&self) -> Option<&ConstantValue> {
        match self {
            Element::Constant(constant) => Some(&constant.value),
            _ => None,
        }
    }
}

/// Payload types that can be viewed out of an [`Element`].
pub trait ElementKind: Sized {
    const ELEMENT_TYPE: ElementType;

    fn from_element(element: &Element) -> Option<&Self>;
}

macro_rules! element_kinds {
    ($($variant:ident($payload:ty)),* $(,)?) => {
        $(
            impl ElementKind for $payload {
                const ELEMENT_TYPE: ElementType = ElementType::$variant;

                fn from_element(element: &Element) -> Option<&Self> {
                    match element {
                        Element::$variant(payload) => Some(payload),
                        _ => None,
                    }
                }
            }

            impl From<$payload> for Element {
                fn from(payload: $payload) -> Self {
                    Element::$variant(payload)
                }
            }
        )*
    };
}

element_kinds!(
    Return(Return),
    ReturnValue(ReturnValue),
    Constant(Constant),
    VariableReference(LocalVariableReference),
    VariableAssignment(VariableAssignment),
    FieldReference(FieldReference),
    FieldAssignment(FieldAssignment),
    BinaryOperator(BinaryOperator),
    UnaryOperator(UnaryOperator),
    Compare(Compare),
    Branch(Branch),
    Goto(Goto),
    Cast(TypeCast),
    ArrayLoad(ArrayLoad),
    ArrayStore(ArrayStore),
    NewArray(NewArray),
    New(NewInstance),
    Allocate(InstanceAllocation),
    Increment(Increment),
    Lambda(Lambda),
    MethodCall(MethodCall),
);

/// `return` from a void method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Return;

/// `return value`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnValue {
    pub value: Box<Element>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub value: ConstantValue,
    pub ty: JavaType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalVariableReference {
    pub name: String,
    pub ty: JavaType,
    pub index: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableAssignment {
    pub value: Box<Element>,
    pub variable_index: u16,
    pub variable_name: String,
    pub variable_type: JavaType,
}

/// Read of an instance or static field. A static field has no target.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReference {
    pub target_instance: Option<Box<Element>>,
    pub declaring_type: JavaType,
    pub field_type: JavaType,
    pub field_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldAssignment {
    pub field_reference: FieldReference,
    pub value: Box<Element>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperator {
    pub left: Box<Element>,
    pub operator: OperatorType,
    pub right: Box<Element>,
    pub ty: JavaType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperator {
    pub operand: Box<Element>,
    pub operator: OperatorType,
    pub ty: JavaType,
}

/// `lcmp`/`fcmpl`/`dcmpg` style comparison producing an int.
#[derive(Debug, Clone, PartialEq)]
pub struct Compare {
    pub left: Box<Element>,
    pub right: Box<Element>,
}

/// Conditional jump to `target_pc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub left: Box<Element>,
    pub operator: OperatorType,
    pub right: Box<Element>,
    pub target_pc: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goto {
    pub target_pc: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeCast {
    pub value: Box<Element>,
    pub ty: JavaType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLoad {
    pub array: Box<Element>,
    pub index: Box<Element>,
    pub ty: JavaType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayStore {
    pub array: Box<Element>,
    pub index: Box<Element>,
    pub value: Box<Element>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayInitializer {
    pub index: u32,
    pub value: Element,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewArray {
    pub ty: JavaType,
    pub component_type: JavaType,
    pub length: Box<Element>,
    pub initializers: Vec<ArrayInitializer>,
}

/// A constructor invocation, `new T(args)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInstance {
    pub ty: JavaType,
    pub constructor_signature: MethodSignature,
    pub parameters: Vec<Element>,
}

/// A bare `new` instruction whose constructor call has not been folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceAllocation {
    pub ty: JavaType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Increment {
    /// Always a `VariableReference`.
    pub local_variable: Box<Element>,
    pub value: Box<Element>,
    pub affix: Affix,
    pub ty: JavaType,
}

/// An `invokedynamic` lambda or method reference.
///
/// `receiver` is the bound instance (captured `this` or the target of a
/// bound method reference). `enclosed_variables` are the captured locals in
/// capture order.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub receiver: Option<Box<Element>>,
    pub reference_kind: ReferenceKind,
    pub functional_interface: JavaType,
    pub functional_method_name: String,
    pub interface_method_signature: MethodSignature,
    pub declaring_class: JavaType,
    pub backing_method_name: String,
    pub backing_method_signature: MethodSignature,
    pub enclosed_variables: Vec<LocalVariableReference>,
}

/// A method invocation. Static calls have no target instance.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub target_type: JavaType,
    pub method_name: String,
    pub signature: MethodSignature,
    pub target_instance: Option<Box<Element>>,
    pub parameters: Vec<Element>,
}

impl MethodCall {
    pub fn is_static(&self) -> bool {
        self.target_instance.is_none()
    }
}
