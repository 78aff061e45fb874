//! The Java syntax rules.
//!
//! Every rule is a plain function usable as a delegate; the `select_*`
//! functions build the selectors they are registered under.

use core::fmt::Write;

use hashbrown::HashSet;
use lazy_static::lazy_static;
use resyntax_model::{
    ACCESSOR_METHOD_PREFIX, Affix, ArrayLoad, ArrayStore, BinaryOperator, CodePointer, Constant,
    ConstantValue, Element, ElementKind, Increment, InstanceAllocation, JavaType,
    LocalVariableReference, MethodCall, MethodSignature, NewArray, ReturnValue, TypeCast,
};
use tracing::debug;

use super::operator_symbol;
use crate::collaborators::DSL_ANNOTATION;
use crate::configuration::ElementSelector;
use crate::context::GenerationContext;
use crate::error::{CodeGenError, Result};

lazy_static! {
    /// `valueOf` overloads the compiler emits when boxing a primitive,
    /// keyed by wrapper type and signature.
    static ref PRIMITIVE_BOX_METHODS: HashSet<(JavaType, MethodSignature)> = [
        ("java.lang.Byte", JavaType::BYTE),
        ("java.lang.Short", JavaType::SHORT),
        ("java.lang.Character", JavaType::CHAR),
        ("java.lang.Integer", JavaType::INT),
        ("java.lang.Long", JavaType::LONG),
        ("java.lang.Float", JavaType::FLOAT),
        ("java.lang.Double", JavaType::DOUBLE),
    ]
    .into_iter()
    .map(|(wrapper, primitive)| {
        let wrapper = JavaType::class(wrapper);
        (wrapper.clone(), MethodSignature::new(vec![primitive], wrapper))
    })
    .collect();
}

const BOOLEAN_BOX_SIGNATURE: &str = "(Z)Ljava/lang/Boolean;";

fn element_of<'a, E: ElementKind>(code_pointer: &CodePointer<'a>) -> Result<&'a E> {
    code_pointer
        .kind::<E>()
        .ok_or_else(|| CodeGenError::unsupported_element(code_pointer.element()))
}

pub fn ret(
    _context: &GenerationContext<'_>,
    _code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    out.write_str("return")?;
    Ok(())
}

/// Literal syntax depends on the declared type of the constant, not on the
/// value: strings are quoted, `long` and `float` get their suffix and class
/// constants render as class literals.
pub fn constant(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let constant = element_of::<Constant>(&code_pointer)?;

    if constant.ty.is_class("java.lang.String") {
        write!(out, "\"{}\"", constant.value)?;
    } else if constant.ty == JavaType::LONG {
        write!(out, "{}L", constant.value)?;
    } else if constant.ty == JavaType::FLOAT {
        write!(out, "{}f", constant.value)?;
    } else if constant.ty.is_class("java.lang.Class") {
        match &constant.value {
            ConstantValue::Class(ty) => {
                write!(out, "{}.class", context.code_style().type_name(ty))?
            }
            _ => return Err(CodeGenError::unsupported_element(constant)),
        }
    } else {
        write!(out, "{}", constant.value)?;
    }

    Ok(())
}

pub fn return_value(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let return_value = element_of::<ReturnValue>(&code_pointer)?;
    out.write_str("return ")?;
    context.delegate(code_pointer.for_element(&return_value.value), out)
}

pub fn variable_reference(
    _context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let variable = element_of::<LocalVariableReference>(&code_pointer)?;
    out.write_str(&variable.name)?;
    Ok(())
}

pub fn array_store(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let store = element_of::<ArrayStore>(&code_pointer)?;

    context.delegate(code_pointer.for_element(&store.array), out)?;
    out.write_char('[')?;
    context.delegate(code_pointer.for_element(&store.index), out)?;
    out.write_str("] = ")?;
    context.delegate(code_pointer.for_element(&store.value), out)
}

pub fn type_cast(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let cast = element_of::<TypeCast>(&code_pointer)?;

    write!(out, "({})", context.code_style().type_name(&cast.ty))?;
    context.delegate(code_pointer.for_element(&cast.value), out)
}

pub fn array_load(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let load = element_of::<ArrayLoad>(&code_pointer)?;

    context.delegate(code_pointer.for_element(&load.array), out)?;
    out.write_char('[')?;
    context.delegate(code_pointer.for_element(&load.index), out)?;
    out.write_char(']')?;
    Ok(())
}

/// An object allocated with `new` whose constructor has not run yet.
pub fn allocate_instance(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let allocation = element_of::<InstanceAllocation>(&code_pointer)?;
    write!(out, "new {}<uninitialized>", context.code_style().type_name(&allocation.ty))?;
    Ok(())
}

/// `++x`, `x--` and so on. The operator follows the sign of the increment
/// value; without an affix only the variable is written.
pub fn increment(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let increment = element_of::<Increment>(&code_pointer)?;
    let amount = increment
        .value
        .as_constant_value()
        .and_then(ConstantValue::as_f64)
        .ok_or_else(|| CodeGenError::unsupported_element(&*increment.value))?;
    let operator = if amount > 0.0 { "++" } else { "--" };

    if increment.affix == Affix::Prefix {
        out.write_str(operator)?;
    }

    context.delegate(code_pointer.for_element(&increment.local_variable), out)?;

    if increment.affix == Affix::Postfix {
        out.write_str(operator)?;
    }

    Ok(())
}

pub fn binary_operator(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let binary = element_of::<BinaryOperator>(&code_pointer)?;
    let symbol = operator_symbol(binary.operator).ok_or(CodeGenError::UnsupportedOperator {
        operator: binary.operator,
    })?;

    context.delegate(code_pointer.for_element(&binary.left), out)?;
    write!(out, " {} ", symbol)?;
    context.delegate(code_pointer.for_element(&binary.right), out)
}

pub fn select_boolean_box_call() -> ElementSelector {
    ElementSelector::of::<MethodCall>().filter_kind(|_, call: &MethodCall| {
        call.is_static()
            && call.target_type.is_class("java.lang.Boolean")
            && call.method_name == "valueOf"
            && call.signature.to_string() == BOOLEAN_BOX_SIGNATURE
            && call
                .parameters
                .first()
                .is_some_and(|parameter| {
                    *parameter.ty() == JavaType::INT || *parameter.ty() == JavaType::BOOLEAN
                })
    })
}

/// `Boolean.valueOf(b)` renders as `b`. Booleans loaded as `int` constants
/// become `true` or `false` again.
pub fn box_boolean(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let call = element_of::<MethodCall>(&code_pointer)?;
    let parameter = call
        .parameters
        .first()
        .ok_or_else(|| CodeGenError::unsupported_element(call))?;

    match parameter {
        Element::Constant(constant) if constant.ty == JavaType::INT => {
            let value = constant
                .value
                .as_int()
                .ok_or_else(|| CodeGenError::unsupported_element(constant))?;
            out.write_str(if value == 0 { "false" } else { "true" })?;
            Ok(())
        }
        _ => context.delegate(code_pointer.for_element(parameter), out),
    }
}

pub fn is_primitive_box_call(call: &MethodCall) -> bool {
    call.is_static()
        && call.method_name == "valueOf"
        && PRIMITIVE_BOX_METHODS.contains(&(call.target_type.clone(), call.signature.clone()))
}

pub fn select_primitive_box_call() -> ElementSelector {
    ElementSelector::of::<MethodCall>()
        .filter_kind(|_, call: &MethodCall| is_primitive_box_call(call))
}

/// Autoboxing: `Integer.valueOf(x)` renders as `x`.
pub fn primitive_box_call(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let call = element_of::<MethodCall>(&code_pointer)?;
    let parameter = call
        .parameters
        .first()
        .ok_or_else(|| CodeGenError::unsupported_element(call))?;

    context.delegate(code_pointer.for_element(parameter), out)
}

pub fn is_static_method_call(call: &MethodCall) -> bool {
    call.is_static()
}

pub fn is_instance_method_call(call: &MethodCall) -> bool {
    !call.is_static()
}

/// Static calls on a type carrying the DSL annotation.
pub fn is_dsl_method_call(context: &GenerationContext<'_>, call: &MethodCall) -> bool {
    call.is_static()
        && context
            .type_resolver()
            .resolve_type(&call.target_type)
            .is_some_and(|metadata| metadata.has_annotation(DSL_ANNOTATION))
}

pub fn select_dsl_method_call() -> ElementSelector {
    ElementSelector::of::<MethodCall>().filter_kind(is_dsl_method_call)
}

/// DSL calls drop their type qualifier: `expect(x)` rather than
/// `Expectations.expect(x)`.
pub fn dsl_method_call(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let call = element_of::<MethodCall>(&code_pointer)?;
    append_method_call(context, code_pointer, call, out)
}

/// Static `access$NNN` calls javac generates so an outer class can reach
/// private fields of an inner one (and the other way around). One argument
/// reads the field, two write it.
pub fn select_inner_class_field_access() -> ElementSelector {
    ElementSelector::of::<MethodCall>().filter_kind(|_, call: &MethodCall| {
        call.is_static()
            && call.method_name.starts_with(ACCESSOR_METHOD_PREFIX)
            && matches!(call.parameters.len(), 1 | 2)
            && *call.parameters[0].ty() == call.target_type
    })
}

/// Replace an accessor call with the field access it performs.
///
/// The accessor is looked up in the class file of the call's target type
/// and decompiled to find the field name.
pub fn inner_class_field_access(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let call = element_of::<MethodCall>(&code_pointer)?;
    let class_file = context.class_file_resolver().resolve_class_file(&call.target_type)?;
    let accessor = class_file
        .method(&call.method_name)
        .ok_or_else(|| CodeGenError::AccessorResolution {
            role: "accessor",
            class: call.target_type.type_name(),
            method: call.method_name.clone(),
        })?;

    let body = context
        .decompiler()
        .decompile(accessor, &accessor.code)
        .map_err(|source| CodeGenError::Decompile {
            method: accessor.name.clone(),
            class: class_file.name.to_string(),
            source,
        })?;

    debug!(
        accessor = %accessor.name,
        class = %class_file.name,
        statements = body.len(),
        "Resolved synthetic accessor"
    );

    let field_name = match (call.parameters.len(), body.first()) {
        (1, Some(Element::ReturnValue(ReturnValue { value }))) => match &**value {
            Element::FieldReference(field) => &field.field_name,
            other => return Err(CodeGenError::unsupported_element(other)),
        },
        (2, Some(Element::FieldAssignment(assignment))) => &assignment.field_reference.field_name,
        (_, Some(other)) => return Err(CodeGenError::unsupported_element(other)),
        (_, None) => return Err(CodeGenError::unsupported_element(call)),
    };

    context.delegate(code_pointer.for_element(&call.parameters[0]), out)?;
    write!(out, ".{}", field_name)?;

    if let Some(value) = call.parameters.get(1) {
        out.write_str(" = ")?;
        context.delegate(code_pointer.for_element(value), out)?;
    }

    Ok(())
}

pub fn select_instance_method_call() -> ElementSelector {
    ElementSelector::of::<MethodCall>()
        .filter_kind(|_, call: &MethodCall| is_instance_method_call(call))
}

/// `target.method(args)`, with `this.` left out when the code style says
/// so.
pub fn instance_method_call(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let call = element_of::<MethodCall>(&code_pointer)?;

    if let Some(target) = &call.target_instance {
        if !(context.code_style().should_omit_this() && target.is_this_reference()) {
            context.delegate(code_pointer.for_element(target), out)?;
            out.write_char('.')?;
        }
    }

    append_method_call(context, code_pointer, call, out)
}

pub fn select_static_method_call() -> ElementSelector {
    ElementSelector::of::<MethodCall>()
        .filter_kind(|_, call: &MethodCall| is_static_method_call(call))
}

pub fn static_method_call(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let call = element_of::<MethodCall>(&code_pointer)?;

    write!(out, "{}.", context.code_style().type_name(&call.target_type))?;
    append_method_call(context, code_pointer, call, out)
}

pub fn select_uninitialized_new_array() -> ElementSelector {
    ElementSelector::of::<NewArray>()
        .filter_kind(|_, array: &NewArray| array.initializers.is_empty())
}

pub fn new_uninitialized_array(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let array = element_of::<NewArray>(&code_pointer)?;

    write!(out, "new {}[", context.code_style().type_name(&array.component_type))?;
    context.delegate(code_pointer.for_element(&array.length), out)?;
    out.write_char(']')?;
    Ok(())
}

pub fn select_initialized_new_array() -> ElementSelector {
    ElementSelector::of::<NewArray>()
        .filter_kind(|_, array: &NewArray| !array.initializers.is_empty())
}

pub fn new_initialized_array(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let array = element_of::<NewArray>(&code_pointer)?;

    write!(out, "new {}[] {{ ", context.code_style().type_name(&array.component_type))?;
    for (n, initializer) in array.initializers.iter().enumerate() {
        if n > 0 {
            out.write_str(", ")?;
        }
        context.delegate(code_pointer.for_element(&initializer.value), out)?;
    }
    out.write_str(" }")?;
    Ok(())
}

/// Whether the type resolver knows `call` to target a varargs method.
fn is_varargs_call(context: &GenerationContext<'_>, call: &MethodCall) -> bool {
    context
        .type_resolver()
        .resolve_type(&call.target_type)
        .and_then(|metadata| {
            metadata
                .method(&call.method_name, &call.signature)
                .map(|method| method.varargs)
        })
        .unwrap_or(false)
}

/// The array javac built for the varargs of `call`, if any: a trailing
/// `new T[] { .. }` or an empty `new T[0]`.
fn varargs_array<'c>(
    context: &GenerationContext<'_>,
    call: &'c MethodCall,
) -> Option<&'c NewArray> {
    let array = match call.parameters.last()? {
        Element::NewArray(array) => array,
        _ => return None,
    };

    let implicit = !array.initializers.is_empty()
        || array.length.as_constant_value().and_then(ConstantValue::as_int) == Some(0);

    (implicit && is_varargs_call(context, call)).then_some(array)
}

/// `name(a, b)`. The array a varargs call was compiled into is spread
/// back into the argument list.
pub fn append_method_call(
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    call: &MethodCall,
    out: &mut dyn Write,
) -> Result<()> {
    let varargs = varargs_array(context, call);
    let fixed = match varargs {
        Some(_) => &call.parameters[..call.parameters.len() - 1],
        None => &call.parameters[..],
    };
    let spread = varargs
        .into_iter()
        .flat_map(|array| array.initializers.iter().map(|init| &init.value));
    let arguments = fixed.iter().chain(spread);

    write!(out, "{}(", call.method_name)?;
    for (n, argument) in arguments.enumerate() {
        if n > 0 {
            out.write_str(", ")?;
        }
        context.delegate(code_pointer.for_element(argument), out)?;
    }
    out.write_char(')')?;
    Ok(())
}
