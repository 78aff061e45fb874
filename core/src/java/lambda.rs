//! Lambda and method reference reconstruction.
//!
//! A lambda element either refers to an ordinary method, which renders as
//! a method reference (`this::run`, `String::valueOf`), or to a synthetic
//! `lambda$` method javac moved the lambda body into. The latter is
//! decompiled and inlined: `x -> x + 1`, `() -> {}` or a block.

use core::fmt::Write;
use std::borrow::Cow;

use resyntax_model::{
    CodePointer, Element, ElementCounter, ElementVisitor, LAMBDA_METHOD_PREFIX, Lambda,
    LocalVariable, LocalVariableTable, Method, ReferenceKind,
};
use tracing::debug;

use crate::context::GenerationContext;
use crate::error::{CodeGenError, Result};
use crate::generator::default_table::unqualified_name;

pub fn generate(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    lambda: &Lambda,
    out: &mut dyn Write,
) -> Result<()> {
    let inlined = lambda.backing_method_name.starts_with(LAMBDA_METHOD_PREFIX);

    match lambda.reference_kind {
        ReferenceKind::InvokeVirtual | ReferenceKind::InvokeInterface => {
            return method_reference(context, code_pointer, lambda, out);
        }
        ReferenceKind::InvokeSpecial | ReferenceKind::InvokeStatic if !inlined => {
            return method_reference(context, code_pointer, lambda, out);
        }
        ReferenceKind::NewInvokeSpecial => {
            write!(out, "{}::new", unqualified_name(&lambda.declaring_class))?;
            return Ok(());
        }
        _ => {}
    }

    let class_file = code_pointer.class_file();
    let declared = class_file
        .method(&lambda.backing_method_name)
        .ok_or_else(|| CodeGenError::AccessorResolution {
            role: "lambda backing",
            class: class_file.name.to_string(),
            method: lambda.backing_method_name.clone(),
        })?;
    let backing = with_enclosed_variables(declared, lambda);

    let body = context
        .decompiler()
        .decompile(&backing, &backing.code)
        .map_err(|source| CodeGenError::Decompile {
            method: backing.name.clone(),
            class: class_file.name.to_string(),
            source,
        })?;

    debug!(
        method = %backing.name,
        statements = body.len(),
        nodes = count_nodes(&body),
        captured = lambda.enclosed_variables.len(),
        "Inlining lambda body"
    );

    match body.as_slice() {
        [Element::ReturnValue(return_value)] => {
            write_parameters(code_pointer, lambda, &backing, out)?;
            context.delegate(code_pointer.for_element(&return_value.value), out)
        }
        [Element::Return(_)] => {
            write_parameters(code_pointer, lambda, &backing, out)?;
            out.write_str("{}")?;
            Ok(())
        }
        [statement] => context.delegate(code_pointer.for_element(statement), out),
        [statement, Element::Return(_)] => {
            out.write_str("() -> ")?;
            context.delegate(code_pointer.for_element(statement), out)
        }
        statements => {
            let statements = match statements {
                [init @ .., Element::Return(_)] => init,
                all => all,
            };
            let block = context.sub_section();

            out.write_str("() -> {\n")?;
            for statement in statements {
                block.write_indentation(out)?;
                block.delegate(code_pointer.for_element(statement), out)?;
                out.write_str(";\n")?;
            }
            Ok(())
        }
    }
}

/// `receiver::name`, or `Type::name` when there is no receiver.
fn method_reference(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    lambda: &Lambda,
    out: &mut dyn Write,
) -> Result<()> {
    match (&lambda.receiver, lambda.reference_kind) {
        (Some(receiver), kind) if kind != ReferenceKind::InvokeStatic => {
            context.delegate(code_pointer.for_element(receiver), out)?;
        }
        _ => out.write_str(&unqualified_name(&lambda.declaring_class))?,
    }

    write!(out, "::{}", lambda.backing_method_name)?;
    Ok(())
}

/// Captured variables are passed to the backing method as leading
/// arguments. Giving them entries in its local variable table lets the
/// body refer to them by name.
fn with_enclosed_variables<'m>(method: &'m Method, lambda: &Lambda) -> Cow<'m, Method> {
    if lambda.enclosed_variables.is_empty() {
        return Cow::Borrowed(method);
    }

    let first_index = u16::from(lambda.receiver.is_some());
    let captured = lambda
        .enclosed_variables
        .iter()
        .zip(first_index..)
        .map(|(variable, index)| {
            LocalVariable::synthetic(variable.name.clone(), variable.ty.clone(), index)
        });

    let mut table: LocalVariableTable =
        method.local_variables().iter().cloned().chain(captured).collect();
    table.sort_by_index();

    Cow::Owned(method.with_local_variable_table(table))
}

/// `() -> `, `x -> ` or `(x, y) -> `, named after the backing method's
/// local variables. Instance backing methods skip the `this` slot.
fn write_parameters(
    code_pointer: CodePointer<'_>,
    lambda: &Lambda,
    backing: &Method,
    out: &mut dyn Write,
) -> Result<()> {
    let count = backing.signature.parameter_types().len();
    let first = usize::from(lambda.reference_kind == ReferenceKind::InvokeSpecial);
    let locals = backing.local_variables();

    let name = |position: usize| {
        locals
            .get(first + position)
            .map(|variable| variable.name.as_str())
            .ok_or_else(|| CodeGenError::LocalVariableNotAvailable {
                index: first + position,
                class: code_pointer.class_file().name.to_string(),
                method: backing.name.clone(),
            })
    };

    match count {
        0 => out.write_str("() -> ")?,
        1 => write!(out, "{} -> ", name(0)?)?,
        _ => {
            out.write_char('(')?;
            for position in 0..count {
                if position > 0 {
                    out.write_str(", ")?;
                }
                out.write_str(name(position)?)?;
            }
            out.write_str(") -> ")?;
        }
    }

    Ok(())
}

fn count_nodes(body: &[Element]) -> usize {
    let mut counter = ElementCounter::default();
    for element in body {
        counter.visit_element(element);
    }
    counter.counts.values().sum()
}
