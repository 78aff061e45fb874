//! Shorthand constructors for element trees.
//!
//! ```
//! use resyntax_model::ast::{constant, local, plus, return_value};
//! use resyntax_model::JavaType;
//!
//! let tree = return_value(plus(local("x", JavaType::INT, 1), constant(1)));
//! assert_eq!(tree.ty(), &JavaType::INT);
//! ```

use crate::constant::ConstantValue;
use crate::descriptor::MethodSignature;
use crate::element::*;
use crate::ops::{Affix, OperatorType, ReferenceKind};
use crate::types::JavaType;

/// A constant typed by its value.
pub fn constant(value: impl Into<ConstantValue>) -> Element {
    let value = value.into();
    let ty = value.natural_type();
    Element::Constant(Constant { value, ty })
}

pub fn typed_constant(value: impl Into<ConstantValue>, ty: JavaType) -> Element {
    Element::Constant(Constant {
        value: value.into(),
        ty,
    })
}

/// A class literal such as `String.class`.
pub fn class_constant(ty: JavaType) -> Element {
    constant(ConstantValue::Class(ty))
}

pub fn null() -> Element {
    constant(ConstantValue::Null)
}

pub fn ret() -> Element {
    Element::Return(Return)
}

pub fn return_value(value: Element) -> Element {
    Element::ReturnValue(ReturnValue {
        value: Box::new(value),
    })
}

pub fn local_variable(name: impl Into<String>, ty: JavaType, index: u16) -> LocalVariableReference {
    LocalVariableReference {
        name: name.into(),
        ty,
        index,
    }
}

pub fn local(name: impl Into<String>, ty: JavaType, index: u16) -> Element {
    Element::VariableReference(local_variable(name, ty, index))
}

pub fn this(ty: JavaType) -> Element {
    local("this", ty, 0)
}

pub fn assign(variable: LocalVariableReference, value: Element) -> Element {
    Element::VariableAssignment(VariableAssignment {
        value: Box::new(value),
        variable_index: variable.index,
        variable_name: variable.name,
        variable_type: variable.ty,
    })
}

pub fn field_reference(
    target: Option<Element>,
    declaring_type: JavaType,
    field_type: JavaType,
    field_name: impl Into<String>,
) -> FieldReference {
    FieldReference {
        target_instance: target.map(Box::new),
        declaring_type,
        field_type,
        field_name: field_name.into(),
    }
}

/// An instance field read. The declaring type is the target's type.
pub fn field(target: Element, field_type: JavaType, field_name: impl Into<String>) -> Element {
    let declaring_type = target.ty().clone();
    Element::FieldReference(field_reference(Some(target), declaring_type, field_type, field_name))
}

pub fn static_field(
    declaring_type: JavaType,
    field_type: JavaType,
    field_name: impl Into<String>,
) -> Element {
    Element::FieldReference(field_reference(None, declaring_type, field_type, field_name))
}

pub fn put_field(field_reference: FieldReference, value: Element) -> Element {
    Element::FieldAssignment(FieldAssignment {
        field_reference,
        value: Box::new(value),
    })
}

pub fn binary(left: Element, operator: OperatorType, right: Element, ty: JavaType) -> Element {
    Element::BinaryOperator(BinaryOperator {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        ty,
    })
}

/// Arithmetic operator typed by its left operand.
fn arithmetic(left: Element, operator: OperatorType, right: Element) -> Element {
    let ty = left.ty().clone();
    binary(left, operator, right, ty)
}

fn relational(left: Element, operator: OperatorType, right: Element) -> Element {
    binary(left, operator, right, JavaType::BOOLEAN)
}

pub fn plus(left: Element, right: Element) -> Element {
    arithmetic(left, OperatorType::Plus, right)
}

pub fn minus(left: Element, right: Element) -> Element {
    arithmetic(left, OperatorType::Minus, right)
}

pub fn mul(left: Element, right: Element) -> Element {
    arithmetic(left, OperatorType::Multiply, right)
}

pub fn div(left: Element, right: Element) -> Element {
    arithmetic(left, OperatorType::Divide, right)
}

pub fn eq(left: Element, right: Element) -> Element {
    relational(left, OperatorType::Eq, right)
}

pub fn ne(left: Element, right: Element) -> Element {
    relational(left, OperatorType::Ne, right)
}

pub fn lt(left: Element, right: Element) -> Element {
    relational(left, OperatorType::Lt, right)
}

pub fn and(left: Element, right: Element) -> Element {
    relational(left, OperatorType::And, right)
}

pub fn not(operand: Element) -> Element {
    Element::UnaryOperator(UnaryOperator {
        operand: Box::new(operand),
        operator: OperatorType::Not,
        ty: JavaType::BOOLEAN,
    })
}

pub fn compare(left: Element, right: Element) -> Element {
    Element::Compare(Compare {
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn branch(left: Element, operator: OperatorType, right: Element, target_pc: u32) -> Element {
    Element::Branch(Branch {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        target_pc,
    })
}

pub fn goto(target_pc: u32) -> Element {
    Element::Goto(Goto { target_pc })
}

pub fn cast(value: Element, ty: JavaType) -> Element {
    Element::Cast(TypeCast {
        value: Box::new(value),
        ty,
    })
}

/// `array[index]`, typed by the array's component type.
pub fn array_load(array: Element, index: Element) -> Element {
    let ty = array.ty().component_type().cloned().unwrap_or_else(JavaType::object);
    Element::ArrayLoad(ArrayLoad {
        array: Box::new(array),
        index: Box::new(index),
        ty,
    })
}

pub fn array_store(array: Element, index: Element, value: Element) -> Element {
    Element::ArrayStore(ArrayStore {
        array: Box::new(array),
        index: Box::new(index),
        value: Box::new(value),
    })
}

/// `new T[length]`.
pub fn new_array(component_type: JavaType, length: Element) -> Element {
    Element::NewArray(NewArray {
        ty: JavaType::array(component_type.clone()),
        component_type,
        length: Box::new(length),
        initializers: Vec::new(),
    })
}

/// `new T[] { values... }`, the shape javac produces for array initializers
/// and varargs calls.
pub fn new_array_with(component_type: JavaType, values: Vec<Element>) -> Element {
    let length = i32::try_from(values.len()).unwrap_or(i32::MAX);
    let initializers = values
        .into_iter()
        .zip(0u32..)
        .map(|(value, index)| ArrayInitializer { index, value })
        .collect();

    Element::NewArray(NewArray {
        ty: JavaType::array(component_type.clone()),
        component_type,
        length: Box::new(constant(length)),
        initializers,
    })
}

pub fn new_instance(
    ty: JavaType,
    constructor_signature: MethodSignature,
    parameters: Vec<Element>,
) -> Element {
    Element::New(NewInstance {
        ty,
        constructor_signature,
        parameters,
    })
}

pub fn allocate(ty: JavaType) -> Element {
    Element::Allocate(InstanceAllocation { ty })
}

pub fn increment(local_variable: LocalVariableReference, value: Element, affix: Affix) -> Element {
    let ty = local_variable.ty.clone();
    Element::Increment(Increment {
        local_variable: Box::new(Element::VariableReference(local_variable)),
        value: Box::new(value),
        affix,
        ty,
    })
}

/// An instance call. The target type is the target's static type.
pub fn call(
    target: Element,
    method_name: impl Into<String>,
    signature: MethodSignature,
    parameters: Vec<Element>,
) -> Element {
    Element::MethodCall(MethodCall {
        target_type: target.ty().clone(),
        method_name: method_name.into(),
        signature,
        target_instance: Some(Box::new(target)),
        parameters,
    })
}

pub fn static_call(
    target_type: JavaType,
    method_name: impl Into<String>,
    signature: MethodSignature,
    parameters: Vec<Element>,
) -> Element {
    Element::MethodCall(MethodCall {
        target_type,
        method_name: method_name.into(),
        signature,
        target_instance: None,
        parameters,
    })
}

/// A lambda implementing `java.lang.Runnable`. Adjust with the `with_*`
/// methods and convert with `Element::from`.
pub fn lambda(
    reference_kind: ReferenceKind,
    declaring_class: JavaType,
    backing_method_name: impl Into<String>,
    backing_method_signature: MethodSignature,
) -> Lambda {
    Lambda {
        receiver: None,
        reference_kind,
        functional_interface: JavaType::class("java.lang.Runnable"),
        functional_method_name: "run".to_string(),
        interface_method_signature: MethodSignature::new(Vec::new(), JavaType::VOID),
        declaring_class,
        backing_method_name: backing_method_name.into(),
        backing_method_signature,
        enclosed_variables: Vec::new(),
    }
}

impl Lambda {
    pub fn with_receiver(mut self, receiver: Element) -> Self {
        self.receiver = Some(Box::new(receiver));
        self
    }

    pub fn with_enclosed_variables(
        mut self,
        enclosed_variables: Vec<LocalVariableReference>,
    ) -> Self {
        self.enclosed_variables = enclosed_variables;
        self
    }

    pub fn with_functional_interface(
        mut self,
        functional_interface: JavaType,
        functional_method_name: impl Into<String>,
        interface_method_signature: MethodSignature,
    ) -> Self {
        self.functional_interface = functional_interface;
        self.functional_method_name = functional_method_name.into();
        self.interface_method_signature = interface_method_signature;
        self
    }
}
