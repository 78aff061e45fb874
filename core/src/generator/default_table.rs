//! Built-in rendering for element types no delegate claimed.

use core::fmt::Write;

use resyntax_model::{
    Branch, CodePointer, Compare, Element, FieldReference, JavaType, NewInstance, OperatorType,
    UnaryOperator, VariableAssignment,
};

use crate::context::GenerationContext;
use crate::error::{CodeGenError, Result};
use crate::java::{lambda, operator_symbol};

pub fn generate(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let element = code_pointer.element();

    match element {
        Element::UnaryOperator(unary) => unary_operator(context, code_pointer, unary, out),
        Element::FieldReference(field) => field_reference(context, code_pointer, field, out),
        Element::VariableAssignment(assignment) => {
            variable_assignment(context, code_pointer, assignment, out)
        }
        Element::Lambda(element) => lambda::generate(context, code_pointer, element, out),
        Element::New(instance) => new_instance(context, code_pointer, instance, out),
        Element::Compare(compare) => self::compare(context, code_pointer, compare, out),
        Element::Branch(branch) => self::branch(context, code_pointer, branch, out),
        Element::Goto(goto) => Ok(write!(out, "goto {}", goto.target_pc)?),

        Element::Return(_)
        | Element::ReturnValue(_)
        | Element::Constant(_)
        | Element::VariableReference(_)
        | Element::FieldAssignment(_)
        | Element::BinaryOperator(_)
        | Element::Cast(_)
        | Element::ArrayLoad(_)
        | Element::ArrayStore(_)
        | Element::NewArray(_)
        | Element::Allocate(_)
        | Element::Increment(_)
        | Element::MethodCall(_) => Err(CodeGenError::unsupported_element(element)),
    }
}

/// The type name with its package stripped. Nested classes keep their
/// `Outer$Inner` form.
pub(crate) fn unqualified_name(ty: &JavaType) -> String {
    let type_name = ty.type_name();
    match type_name.rfind('.') {
        Some(n) => type_name[n + 1..].to_string(),
        None => type_name,
    }
}

fn unary_operator(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    unary: &UnaryOperator,
    out: &mut dyn Write,
) -> Result<()> {
    match unary.operator {
        OperatorType::Not => {
            out.write_char('!')?;
            context.delegate(code_pointer.for_element(&unary.operand), out)
        }
        operator => Err(CodeGenError::UnsupportedOperator { operator }),
    }
}

fn field_reference(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    field: &FieldReference,
    out: &mut dyn Write,
) -> Result<()> {
    match &field.target_instance {
        None => {
            write!(out, "{}.", unqualified_name(&field.declaring_type))?;
        }
        Some(target) if target.is_this_reference() => {}
        Some(target) => {
            context.delegate(code_pointer.for_element(target), out)?;
            out.write_char('.')?;
        }
    }

    out.write_str(&field.field_name)?;
    Ok(())
}

fn variable_assignment(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    assignment: &VariableAssignment,
    out: &mut dyn Write,
) -> Result<()> {
    write!(
        out,
        "{} {} = ",
        assignment.variable_type.simple_name(),
        assignment.variable_name
    )?;
    context.delegate(code_pointer.for_element(&assignment.value), out)
}

fn new_instance(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    instance: &NewInstance,
    out: &mut dyn Write,
) -> Result<()> {
    write!(out, "new {}(", unqualified_name(&instance.ty))?;

    for (n, parameter) in instance.parameters.iter().enumerate() {
        if n > 0 {
            out.write_str(", ")?;
        }
        context.delegate(code_pointer.for_element(parameter), out)?;
    }

    out.write_char(')')?;
    Ok(())
}

fn compare(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    compare: &Compare,
    out: &mut dyn Write,
) -> Result<()> {
    context.delegate(code_pointer.for_element(&compare.left), out)?;
    out.write_str(" ::= ")?;
    context.delegate(code_pointer.for_element(&compare.right), out)
}

fn branch(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    branch: &Branch,
    out: &mut dyn Write,
) -> Result<()> {
    let symbol = operator_symbol(branch.operator).ok_or(CodeGenError::UnsupportedOperator {
        operator: branch.operator,
    })?;

    context.delegate(code_pointer.for_element(&branch.left), out)?;
    write!(out, " {} ", symbol)?;
    context.delegate(code_pointer.for_element(&branch.right), out)?;
    write!(out, " ? goto {}", branch.target_pc)?;
    Ok(())
}
