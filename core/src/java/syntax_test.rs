use super::{JavaSyntaxCodeGeneration, operator_symbol};
use crate::code_style::ConfigurableCodeStyle;
use crate::collaborators::{DSL_ANNOTATION, MapClassFileResolver, MapTypeResolver, TypeMetadata};
use crate::error::CodeGenError;
use crate::generator::CodeGenerator;
use crate::test_utils::{ScriptedDecompiler, init_test_logging, java_generator, render};
use pretty_assertions::assert_eq;
use resyntax_model::ast::*;
use resyntax_model::{
    ACC_STATIC, ACC_SYNTHETIC, Affix, ClassFile, Element, JavaType, Method, MethodSignature,
    OperatorType,
};

fn signature(descriptor: &str) -> MethodSignature {
    MethodSignature::parse(descriptor).unwrap()
}

fn java() -> CodeGenerator {
    java_generator(ScriptedDecompiler::new(), MapClassFileResolver::new(), MapTypeResolver::new())
}

fn java_with_types(types: MapTypeResolver) -> CodeGenerator {
    java_generator(ScriptedDecompiler::new(), MapClassFileResolver::new(), types)
}

fn java_with_style(style: ConfigurableCodeStyle) -> CodeGenerator {
    CodeGenerator::builder()
        .configuration(JavaSyntaxCodeGeneration::shared_configuration())
        .decompiler(ScriptedDecompiler::new())
        .class_file_resolver(MapClassFileResolver::new())
        .code_style(style)
        .build()
        .unwrap()
}

fn generate(element: &Element) -> String {
    render(&java(), element).unwrap()
}

// ============================================================================
// Statements and literals
// ============================================================================

#[test]
fn test_return() {
    assert_eq!(generate(&ret()), "return");
    assert_eq!(generate(&return_value(constant(1))), "return 1");
}

#[test]
fn test_constants_by_declared_type() {
    assert_eq!(generate(&constant("foo")), "\"foo\"");
    assert_eq!(generate(&constant(100i64)), "100L");
    assert_eq!(generate(&constant(1.5f32)), "1.5f");
    assert_eq!(generate(&constant(2.5f64)), "2.5");
    assert_eq!(generate(&constant(1234)), "1234");
    assert_eq!(generate(&constant(true)), "true");
    assert_eq!(generate(&null()), "null");
    assert_eq!(generate(&class_constant(JavaType::string())), "String.class");
    assert_eq!(generate(&class_constant(JavaType::array(JavaType::INT))), "int[].class");
}

#[test]
fn test_class_constant_honors_code_style() {
    let generator =
        java_with_style(ConfigurableCodeStyle::builder().use_simple_class_names(false).build());

    assert_eq!(
        render(&generator, &class_constant(JavaType::string())).unwrap(),
        "java.lang.String.class"
    );
}

#[test]
fn test_int_typed_char_constant_renders_as_number() {
    assert_eq!(generate(&typed_constant(65, JavaType::CHAR)), "65");
}

#[test]
fn test_variable_reference() {
    assert_eq!(generate(&local("myVar", JavaType::string(), 1)), "myVar");
}

// ============================================================================
// Arrays, casts and allocation
// ============================================================================

#[test]
fn test_array_access() {
    let array = || local("numbers", JavaType::array(JavaType::INT), 1);

    assert_eq!(generate(&array_store(array(), constant(0), constant(7))), "numbers[0] = 7");
    assert_eq!(generate(&array_load(array(), constant(2))), "numbers[2]");
}

#[test]
fn test_type_cast() {
    let value = local("value", JavaType::object(), 1);
    assert_eq!(generate(&cast(value, JavaType::string())), "(String)value");
}

#[test]
fn test_allocate_instance() {
    assert_eq!(
        generate(&allocate(JavaType::class("java.util.ArrayList"))),
        "new ArrayList<uninitialized>"
    );
}

#[test]
fn test_new_arrays() {
    assert_eq!(generate(&new_array(JavaType::INT, constant(3))), "new int[3]");
    assert_eq!(
        generate(&new_array(JavaType::string(), local("size", JavaType::INT, 1))),
        "new String[size]"
    );
    assert_eq!(
        generate(&new_array_with(JavaType::string(), vec![constant("a"), constant("b")])),
        "new String[] { \"a\", \"b\" }"
    );
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_increment() {
    let i = || local_variable("i", JavaType::INT, 1);

    assert_eq!(generate(&increment(i(), constant(1), Affix::Prefix)), "++i");
    assert_eq!(generate(&increment(i(), constant(1), Affix::Postfix)), "i++");
    assert_eq!(generate(&increment(i(), constant(-1), Affix::Prefix)), "--i");
    assert_eq!(generate(&increment(i(), constant(-1), Affix::Postfix)), "i--");
    assert_eq!(generate(&increment(i(), constant(1), Affix::Undefined)), "i");
}

#[test]
fn test_increment_by_non_constant_is_unsupported() {
    let element = increment(
        local_variable("i", JavaType::INT, 1),
        local("step", JavaType::INT, 2),
        Affix::Prefix,
    );

    let err = render(&java(), &element).unwrap_err();
    assert!(matches!(err, CodeGenError::UnsupportedElement { .. }));
}

#[test]
fn test_binary_operators() {
    let cases = [
        (OperatorType::Plus, "+"),
        (OperatorType::Minus, "-"),
        (OperatorType::Multiply, "*"),
        (OperatorType::Divide, "/"),
        (OperatorType::Modulo, "%"),
        (OperatorType::Eq, "=="),
        (OperatorType::Ne, "!="),
        (OperatorType::Ge, ">="),
        (OperatorType::Gt, ">"),
        (OperatorType::Le, "<="),
        (OperatorType::Lt, "<"),
        (OperatorType::And, "&&"),
        (OperatorType::Or, "||"),
        (OperatorType::LShift, "<<"),
        (OperatorType::RShift, ">>"),
        (OperatorType::UnsignedRShift, ">>>"),
        (OperatorType::BitwiseAnd, "&"),
        (OperatorType::BitwiseOr, "|"),
        (OperatorType::Xor, "^"),
    ];

    for (operator, symbol) in cases {
        let element = binary(local("a", JavaType::INT, 1), operator, constant(2), JavaType::INT);
        assert_eq!(generate(&element), format!("a {} 2", symbol), "operator {}", operator);
    }
}

#[test]
fn test_binary_not_is_unsupported_and_writes_nothing() {
    let element = binary(constant(1), OperatorType::Not, constant(2), JavaType::INT);
    let class_file = crate::test_utils::class_file(vec![]);

    let mut out = String::new();
    let err = java()
        .generate(crate::test_utils::pointer(&class_file, &element), &mut out)
        .unwrap_err();

    assert_eq!(err.to_string(), "Operator type is not supported: NOT");
    assert_eq!(out, "");
    assert_eq!(operator_symbol(OperatorType::Not), None);
}

// ============================================================================
// Boxing
// ============================================================================

#[test]
fn test_boolean_box_of_int_constant() {
    let boolean = JavaType::class("java.lang.Boolean");
    let box_of = |value: Element| {
        static_call(boolean.clone(), "valueOf", signature("(Z)Ljava/lang/Boolean;"), vec![value])
    };

    assert_eq!(generate(&box_of(constant(0))), "false");
    assert_eq!(generate(&box_of(constant(1))), "true");
    assert_eq!(generate(&box_of(constant(7))), "true");
    assert_eq!(generate(&box_of(local("flag", JavaType::BOOLEAN, 1))), "flag");
}

#[test]
fn test_boolean_box_of_int_typed_non_int_value() {
    let element = static_call(
        JavaType::class("java.lang.Boolean"),
        "valueOf",
        signature("(Z)Ljava/lang/Boolean;"),
        vec![typed_constant("1", JavaType::INT)],
    );

    let err = render(&java(), &element).unwrap_err();
    assert!(matches!(err, CodeGenError::UnsupportedElement { .. }));
}

#[test]
fn test_boolean_value_of_string_is_a_plain_static_call() {
    let element = static_call(
        JavaType::class("java.lang.Boolean"),
        "valueOf",
        signature("(Ljava/lang/String;)Ljava/lang/Boolean;"),
        vec![constant("true")],
    );

    assert_eq!(generate(&element), "Boolean.valueOf(\"true\")");
}

#[test]
fn test_primitive_box_calls_render_their_argument() {
    let cases = [
        ("java.lang.Byte", "(B)Ljava/lang/Byte;", typed_constant(1, JavaType::BYTE), "1"),
        ("java.lang.Short", "(S)Ljava/lang/Short;", typed_constant(2, JavaType::SHORT), "2"),
        ("java.lang.Character", "(C)Ljava/lang/Character;", local("c", JavaType::CHAR, 1), "c"),
        ("java.lang.Integer", "(I)Ljava/lang/Integer;", constant(3), "3"),
        ("java.lang.Long", "(J)Ljava/lang/Long;", constant(4i64), "4L"),
        ("java.lang.Float", "(F)Ljava/lang/Float;", constant(5.5f32), "5.5f"),
        ("java.lang.Double", "(D)Ljava/lang/Double;", constant(6.5f64), "6.5"),
    ];

    for (wrapper, descriptor, argument, expected) in cases {
        let element =
            static_call(JavaType::class(wrapper), "valueOf", signature(descriptor), vec![argument]);
        assert_eq!(generate(&element), expected, "{}", wrapper);
    }
}

#[test]
fn test_value_of_with_other_signature_is_not_boxing() {
    let element = static_call(
        JavaType::class("java.lang.Integer"),
        "valueOf",
        signature("(Ljava/lang/String;)Ljava/lang/Integer;"),
        vec![constant("42")],
    );

    assert_eq!(generate(&element), "Integer.valueOf(\"42\")");
}

// ============================================================================
// Method calls
// ============================================================================

#[test]
fn test_instance_method_call() {
    let element = call(
        local("text", JavaType::string(), 1),
        "substring",
        signature("(II)Ljava/lang/String;"),
        vec![constant(1), constant(3)],
    );

    assert_eq!(generate(&element), "text.substring(1, 3)");
}

#[test]
fn test_call_on_this_honors_code_style() {
    let element =
        call(this(JavaType::class("com.example.Example")), "run", signature("()V"), vec![]);

    assert_eq!(generate(&element), "run()");

    let verbose = java_with_style(ConfigurableCodeStyle::builder().omit_this(false).build());
    assert_eq!(render(&verbose, &element).unwrap(), "this.run()");
}

#[test]
fn test_static_method_call() {
    let element = static_call(JavaType::class("java.lang.Math"), "max", signature("(II)I"), vec![
        constant(1),
        constant(2),
    ]);

    assert_eq!(generate(&element), "Math.max(1, 2)");

    let qualified =
        java_with_style(ConfigurableCodeStyle::builder().use_simple_class_names(false).build());
    assert_eq!(render(&qualified, &element).unwrap(), "java.lang.Math.max(1, 2)");
}

#[test]
fn test_dsl_method_call_drops_qualifier() {
    let expectations = JavaType::class("com.example.Expectations");
    let element =
        static_call(expectations.clone(), "expect", signature("(Z)V"), vec![constant(true)]);

    assert_eq!(generate(&element), "Expectations.expect(true)");

    let mut types = MapTypeResolver::new();
    types.register(expectations, TypeMetadata::default().with_annotation(DSL_ANNOTATION));
    assert_eq!(render(&java_with_types(types), &element).unwrap(), "expect(true)");
}

fn arrays_with_varargs() -> MapTypeResolver {
    let mut types = MapTypeResolver::new();
    types.register(
        JavaType::class("java.util.Arrays"),
        TypeMetadata::default().with_method(
            "asList",
            signature("([Ljava/lang/Object;)Ljava/util/List;"),
            true,
        ),
    );
    types.register(
        JavaType::string(),
        TypeMetadata::default().with_method(
            "format",
            signature("(Ljava/lang/String;[Ljava/lang/Object;)Ljava/lang/String;"),
            true,
        ),
    );
    types
}

fn as_list(argument: Element) -> Element {
    static_call(
        JavaType::class("java.util.Arrays"),
        "asList",
        signature("([Ljava/lang/Object;)Ljava/util/List;"),
        vec![argument],
    )
}

#[test]
fn test_varargs_array_is_spread() {
    let generator = java_with_types(arrays_with_varargs());
    let element = as_list(new_array_with(JavaType::object(), vec![constant("a"), constant("b")]));

    assert_eq!(render(&generator, &element).unwrap(), "Arrays.asList(\"a\", \"b\")");
}

#[test]
fn test_empty_varargs_array_is_dropped() {
    let generator = java_with_types(arrays_with_varargs());

    assert_eq!(
        render(&generator, &as_list(new_array(JavaType::object(), constant(0)))).unwrap(),
        "Arrays.asList()"
    );

    let format = static_call(
        JavaType::string(),
        "format",
        signature("(Ljava/lang/String;[Ljava/lang/Object;)Ljava/lang/String;"),
        vec![constant("none"), new_array(JavaType::object(), constant(0))],
    );
    assert_eq!(render(&generator, &format).unwrap(), "String.format(\"none\")");
}

#[test]
fn test_varargs_follow_fixed_parameters() {
    let generator = java_with_types(arrays_with_varargs());
    let element = static_call(
        JavaType::string(),
        "format",
        signature("(Ljava/lang/String;[Ljava/lang/Object;)Ljava/lang/String;"),
        vec![constant("%s-%s"), new_array_with(JavaType::object(), vec![constant(1), constant(2)])],
    );

    assert_eq!(render(&generator, &element).unwrap(), "String.format(\"%s-%s\", 1, 2)");
}

#[test]
fn test_array_argument_of_non_varargs_method_is_kept() {
    let element = as_list(new_array_with(JavaType::object(), vec![constant("a")]));

    assert_eq!(generate(&element), "Arrays.asList(new Object[] { \"a\" })");
}

#[test]
fn test_sized_array_argument_of_varargs_method_is_kept() {
    let generator = java_with_types(arrays_with_varargs());
    let element = as_list(new_array(JavaType::object(), local("n", JavaType::INT, 1)));

    assert_eq!(render(&generator, &element).unwrap(), "Arrays.asList(new Object[n])");
}

// ============================================================================
// Inner class accessors
// ============================================================================

fn inner() -> JavaType {
    JavaType::class("com.example.Outer$Inner")
}

fn accessor(name: &str, descriptor: &str) -> Method {
    Method::new(name, signature(descriptor), ACC_STATIC | ACC_SYNTHETIC)
        .with_code([0x2a, 0xb4, 0x00, 0x02, 0xb0])
}

fn inner_class_files() -> MapClassFileResolver {
    [ClassFile::new("com.example.Outer$Inner", vec![
        accessor("access$000", "(Lcom/example/Outer$Inner;)Ljava/lang/String;"),
        accessor("access$102", "(Lcom/example/Outer$Inner;I)I"),
    ])]
    .into_iter()
    .collect()
}

fn accessor_decompiler() -> ScriptedDecompiler {
    let receiver = || local("x0", inner(), 0);

    ScriptedDecompiler::new()
        .with_body(
            "access$000",
            vec![return_value(field(receiver(), JavaType::string(), "secret"))],
        )
        .with_body("access$102", vec![
            put_field(
                field_reference(Some(receiver()), inner(), JavaType::INT, "count"),
                local("x1", JavaType::INT, 1),
            ),
            return_value(local("x1", JavaType::INT, 1)),
        ])
}

#[test]
fn test_inner_class_field_read() {
    init_test_logging();

    let generator =
        java_generator(accessor_decompiler(), inner_class_files(), MapTypeResolver::new());
    let element = static_call(
        inner(),
        "access$000",
        signature("(Lcom/example/Outer$Inner;)Ljava/lang/String;"),
        vec![local("myInner", inner(), 1)],
    );

    assert_eq!(render(&generator, &element).unwrap(), "myInner.secret");
}

#[test]
fn test_inner_class_field_write() {
    let generator =
        java_generator(accessor_decompiler(), inner_class_files(), MapTypeResolver::new());
    let element = static_call(
        inner(),
        "access$102",
        signature("(Lcom/example/Outer$Inner;I)I"),
        vec![local("myInner", inner(), 1), constant(3)],
    );

    assert_eq!(render(&generator, &element).unwrap(), "myInner.count = 3");
}

#[test]
fn test_inner_class_accessor_missing_from_class_file() {
    let generator =
        java_generator(accessor_decompiler(), inner_class_files(), MapTypeResolver::new());
    let element = static_call(
        inner(),
        "access$200",
        signature("(Lcom/example/Outer$Inner;)I"),
        vec![local("myInner", inner(), 1)],
    );

    let err = render(&generator, &element).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not find accessor method com.example.Outer$Inner.access$200 in class file"
    );
}

#[test]
fn test_inner_class_accessor_that_fails_to_decompile() {
    let generator =
        java_generator(ScriptedDecompiler::new(), inner_class_files(), MapTypeResolver::new());
    let element = static_call(
        inner(),
        "access$000",
        signature("(Lcom/example/Outer$Inner;)Ljava/lang/String;"),
        vec![local("myInner", inner(), 1)],
    );

    let err = render(&generator, &element).unwrap_err();
    assert!(matches!(err, CodeGenError::Decompile { .. }));
    assert_eq!(
        err.to_string(),
        "Failed to decompile method 'access$000' in class 'com.example.Outer$Inner'"
    );
}

#[test]
fn test_inner_class_without_class_file() {
    let generator =
        java_generator(accessor_decompiler(), MapClassFileResolver::new(), MapTypeResolver::new());
    let element = static_call(
        inner(),
        "access$000",
        signature("(Lcom/example/Outer$Inner;)Ljava/lang/String;"),
        vec![local("myInner", inner(), 1)],
    );

    let err = render(&generator, &element).unwrap_err();
    assert_eq!(err.to_string(), "Class file not found for type com.example.Outer$Inner");
}

#[test]
fn test_accessor_lookalikes_are_plain_static_calls() {
    let generator =
        java_generator(accessor_decompiler(), inner_class_files(), MapTypeResolver::new());
    let wrong_argument = static_call(
        inner(),
        "access$000",
        signature("(I)Ljava/lang/String;"),
        vec![constant(1234)],
    );
    let no_arguments =
        static_call(inner(), "access$000", signature("()Ljava/lang/String;"), vec![]);

    assert_eq!(render(&generator, &wrong_argument).unwrap(), "Inner.access$000(1234)");
    assert_eq!(render(&generator, &no_arguments).unwrap(), "Inner.access$000()");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_configuration_registers_every_rule() {
    use resyntax_model::ElementType;

    let configuration = JavaSyntaxCodeGeneration::configuration();
    let counts: Vec<(ElementType, usize)> = ElementType::ALL
        .into_iter()
        .map(|element_type| (element_type, configuration.delegate_count(element_type)))
        .filter(|(_, count)| *count > 0)
        .collect();

    assert_eq!(counts, vec![
        (ElementType::Return, 1),
        (ElementType::ReturnValue, 1),
        (ElementType::Constant, 1),
        (ElementType::VariableReference, 1),
        (ElementType::BinaryOperator, 1),
        (ElementType::Cast, 1),
        (ElementType::ArrayLoad, 1),
        (ElementType::ArrayStore, 1),
        (ElementType::NewArray, 2),
        (ElementType::Allocate, 1),
        (ElementType::Increment, 1),
        (ElementType::MethodCall, 6),
    ]);
}
