//! Java surface syntax: the rule catalog and lambda reconstruction.

pub mod lambda;
pub mod syntax;

#[cfg(test)]
mod syntax_test;

use std::sync::Arc;

use lazy_static::lazy_static;
use resyntax_model::OperatorType;

use crate::configuration::{CodeGeneratorConfiguration, CodeGeneratorConfigurer, ElementSelector};

pub use syntax::*;

lazy_static! {
    static ref SHARED_CONFIGURATION: Arc<CodeGeneratorConfiguration> =
        Arc::new(JavaSyntaxCodeGeneration::configuration());
}

/// The rules rendering elements as Java source.
///
/// Registration order matters where selectors overlap: boxing and DSL calls
/// are tried before the generic instance and static call rules.
pub struct JavaSyntaxCodeGeneration;

impl JavaSyntaxCodeGeneration {
    /// Register every Java rule on `configurer`.
    pub fn configure(configurer: &mut CodeGeneratorConfigurer) {
        use resyntax_model::{
            ArrayLoad, ArrayStore, BinaryOperator, Constant, Increment, InstanceAllocation,
            LocalVariableReference, Return, ReturnValue, TypeCast,
        };

        configurer.on(ElementSelector::of::<Return>()).then(ret);
        configurer.on(ElementSelector::of::<Constant>()).then(constant);
        configurer.on(ElementSelector::of::<ReturnValue>()).then(return_value);
        configurer
            .on(ElementSelector::of::<LocalVariableReference>())
            .then(variable_reference);
        configurer.on(ElementSelector::of::<ArrayStore>()).then(array_store);
        configurer.on(ElementSelector::of::<TypeCast>()).then(type_cast);
        configurer.on(ElementSelector::of::<ArrayLoad>()).then(array_load);
        configurer
            .on(ElementSelector::of::<InstanceAllocation>())
            .then(allocate_instance);
        configurer.on(ElementSelector::of::<Increment>()).then(increment);
        configurer.on(ElementSelector::of::<BinaryOperator>()).then(binary_operator);
        configurer.on(select_boolean_box_call()).then(box_boolean);
        configurer.on(select_primitive_box_call()).then(primitive_box_call);
        configurer.on(select_dsl_method_call()).then(dsl_method_call);
        configurer
            .on(select_inner_class_field_access())
            .then(inner_class_field_access);
        configurer.on(select_instance_method_call()).then(instance_method_call);
        configurer.on(select_static_method_call()).then(static_method_call);
        configurer
            .on(select_uninitialized_new_array())
            .then(new_uninitialized_array);
        configurer.on(select_initialized_new_array()).then(new_initialized_array);
    }

    /// A fresh configuration holding only the Java rules.
    pub fn configuration() -> CodeGeneratorConfiguration {
        CodeGeneratorConfiguration::build(Self::configure)
    }

    /// The Java rules, built once per process.
    pub fn shared_configuration() -> Arc<CodeGeneratorConfiguration> {
        SHARED_CONFIGURATION.clone()
    }
}

/// The Java spelling of a binary or branch operator. `Not` is unary and
/// has none.
pub fn operator_symbol(operator: OperatorType) -> Option<&'static str> {
    Some(match operator {
        OperatorType::Plus => "+",
        OperatorType::Minus => "-",
        OperatorType::Multiply => "*",
        OperatorType::Divide => "/",
        OperatorType::Modulo => "%",
        OperatorType::Eq => "==",
        OperatorType::Ne => "!=",
        OperatorType::Ge => ">=",
        OperatorType::Lt => "<",
        OperatorType::Le => "<=",
        OperatorType::Gt => ">",
        OperatorType::And => "&&",
        OperatorType::Or => "||",
        OperatorType::LShift => "<<",
        OperatorType::RShift => ">>",
        OperatorType::UnsignedRShift => ">>>",
        OperatorType::BitwiseAnd => "&",
        OperatorType::BitwiseOr => "|",
        OperatorType::Xor => "^",
        OperatorType::Not => return None,
    })
}
