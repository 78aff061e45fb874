mod cases;

use cases::{Fixture, signature};
use pretty_assertions::assert_eq;
use resyntax::model::ast::*;
use resyntax::model::JavaType;
use resyntax::{CodeGenError, render_error_to, render_error_to_string_no_color};

fn counter() -> JavaType {
    JavaType::class("com.example.Counter")
}

#[test]
fn test_failure_keeps_partial_output_and_location() {
    let count =
        field_reference(Some(local("counter", counter(), 1)), counter(), JavaType::INT, "count");
    let element = plus(constant(1), put_field(count, constant(2)));

    let failure = Fixture::new().generate(&element).unwrap_err();

    assert!(matches!(failure.error, CodeGenError::UnsupportedElement { .. }));
    assert_eq!(failure.partial_output, "1 + ");
    assert_eq!(failure.location, "com.example.Example.test");
}

#[test]
fn test_rendered_failure_shows_generated_prefix() {
    let element = call(
        local("counter", counter(), 1),
        "add",
        signature("(I)V"),
        vec![binary(constant(1), resyntax::model::OperatorType::Not, constant(2), JavaType::INT)],
    );

    let failure = Fixture::new().generate(&element).unwrap_err();
    let rendered = render_error_to_string_no_color(&failure);

    assert_eq!(failure.partial_output, "counter.add(");
    assert!(rendered.contains("Operator type is not supported: NOT"));
    assert!(rendered.contains("counter.add(<?>"));
    assert!(rendered.contains("resyntax::unsupported_operator"));
}

#[test]
fn test_render_to_writer() {
    let element = static_call(
        counter(),
        "access$000",
        signature("(Lcom/example/Counter;)I"),
        vec![local("counter", counter(), 1)],
    );
    let failure = Fixture::new().generate(&element).unwrap_err();

    let mut buf = Vec::new();
    render_error_to(&failure, &mut buf).unwrap();

    assert_eq!(failure.error.to_string(), "Class file not found for type com.example.Counter");
    assert!(
        String::from_utf8_lossy(&buf).contains("Class file not found for type com.example.Counter")
    );
}
