#[macro_use]
mod cases;

use cases::{example, signature, synthetic_method};
use indoc::indoc;
use resyntax::model::ast::*;
use resyntax::model::{Element, JavaType, LocalVariable, LocalVariableTable, ReferenceKind};

fn inlined(name: &str, descriptor: &str) -> Element {
    lambda(ReferenceKind::InvokeStatic, example(), name, signature(descriptor)).into()
}

fn println(argument: Element) -> Element {
    call(
        static_field(
            JavaType::class("java.lang.System"),
            JavaType::class("java.io.PrintStream"),
            "out",
        ),
        "println",
        signature("(Ljava/lang/String;)V"),
        vec![argument],
    )
}

test_case!(
    method_reference_on_this,
    element: lambda(ReferenceKind::InvokeVirtual, example(), "validate", signature("()V"))
        .with_receiver(this(example()))
        .into(),
    generated: Ok("this::validate"),
);

test_case!(
    static_method_reference,
    element: lambda(
        ReferenceKind::InvokeStatic,
        JavaType::class("java.lang.Integer"),
        "parseInt",
        signature("(Ljava/lang/String;)I"),
    )
    .into(),
    generated: Ok("Integer::parseInt"),
);

test_case!(
    constructor_reference,
    element: lambda(
        ReferenceKind::NewInvokeSpecial,
        JavaType::class("java.util.HashSet"),
        "<init>",
        signature("()V"),
    )
    .into(),
    generated: Ok("HashSet::new"),
);

test_case!(
    predicate_lambda,
    methods: vec![synthetic_method(
        "lambda$test$0",
        "(Ljava/lang/String;)Z",
        &[("name", JavaType::string())],
    )],
    bodies: vec![(
        "lambda$test$0",
        vec![return_value(call(
            local("name", JavaType::string(), 0),
            "startsWith",
            signature("(Ljava/lang/String;)Z"),
            vec![constant("a")],
        ))],
    )],
    element: inlined("lambda$test$0", "(Ljava/lang/String;)Z"),
    generated: Ok("name -> name.startsWith(\"a\")"),
);

test_case!(
    lambda_capturing_a_local,
    methods: vec![{
        // The captured variable takes slot 0, ahead of the parameter.
        let mut method = synthetic_method("lambda$test$1", "(II)I", &[]);
        method.local_variable_table =
            Some(LocalVariableTable::new(vec![LocalVariable::new(0, 10, "x", JavaType::INT, 1)]));
        method
    }],
    bodies: vec![(
        "lambda$test$1",
        vec![return_value(mul(local("factor", JavaType::INT, 0), local("x", JavaType::INT, 1)))],
    )],
    element: lambda(ReferenceKind::InvokeStatic, example(), "lambda$test$1", signature("(II)I"))
        .with_enclosed_variables(vec![local_variable("factor", JavaType::INT, 3)])
        .into(),
    generated: Ok("(factor, x) -> factor * x"),
);

test_case!(
    lambda_capturing_a_local_with_two_parameters,
    methods: vec![{
        let mut method = synthetic_method("lambda$test$8", "(III)I", &[]);
        method.local_variable_table = Some(LocalVariableTable::new(vec![
            LocalVariable::new(0, 10, "a", JavaType::INT, 1),
            LocalVariable::new(0, 10, "b", JavaType::INT, 2),
        ]));
        method
    }],
    bodies: vec![(
        "lambda$test$8",
        vec![return_value(plus(
            local("offset", JavaType::INT, 0),
            mul(local("a", JavaType::INT, 1), local("b", JavaType::INT, 2)),
        ))],
    )],
    element: lambda(ReferenceKind::InvokeStatic, example(), "lambda$test$8", signature("(III)I"))
        .with_enclosed_variables(vec![local_variable("offset", JavaType::INT, 4)])
        .into(),
    generated: Ok("(offset, a, b) -> offset + a * b"),
);

test_case!(
    nested_lambda,
    methods: vec![
        synthetic_method("lambda$test$2", "()Ljava/util/function/Supplier;", &[]),
        synthetic_method("lambda$null$3", "()I", &[]),
    ],
    bodies: vec![
        ("lambda$test$2", vec![return_value(inlined("lambda$null$3", "()I"))]),
        ("lambda$null$3", vec![return_value(constant(7))]),
    ],
    element: inlined("lambda$test$2", "()Ljava/util/function/Supplier;"),
    generated: Ok("() -> () -> 7"),
);

test_case!(
    statement_lambda,
    methods: vec![synthetic_method("lambda$test$4", "()V", &[])],
    bodies: vec![("lambda$test$4", vec![println(constant("done")), ret()])],
    element: inlined("lambda$test$4", "()V"),
    generated: Ok("() -> System.out.println(\"done\")"),
);

test_case!(
    block_lambda,
    methods: vec![synthetic_method("lambda$test$5", "()V", &[])],
    bodies: vec![(
        "lambda$test$5",
        vec![println(constant("one")), println(constant("two")), ret()],
    )],
    element: inlined("lambda$test$5", "()V"),
    generated: Ok(indoc! {"
        () -> {
           System.out.println(\"one\");
           System.out.println(\"two\");
"}),
);

test_case!(
    missing_backing_method,
    element: inlined("lambda$test$6", "()V"),
    generated: Err(
        "Could not find lambda backing method com.example.Example.lambda$test$6 in class file"
    ),
);

test_case!(
    backing_method_without_body,
    methods: vec![synthetic_method("lambda$test$7", "()V", &[])],
    element: inlined("lambda$test$7", "()V"),
    generated: Err("Failed to decompile method 'lambda$test$7' in class 'com.example.Example'"),
);
