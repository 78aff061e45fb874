//! Error rendering using ariadne
//!
//! A failed generation is shown against the code written before the
//! failure, with a label where generation stopped.

use crate::GenerationFailure;
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use miette::Diagnostic;
use resyntax_core::CodeGenError;
use std::error::Error as _;
use std::io::Write;

/// Stands in for the element that could not be generated.
const STOP_MARKER: &str = "<?>";

/// Render a generation failure with formatting to stderr
///
/// # Example
/// ```no_run
/// use resyntax::model::ast::{constant, plus};
/// use resyntax::model::{ACC_PUBLIC, ClassFile, CodePointer, Element, Method, MethodSignature};
/// use resyntax::{
///     CodeGenerator, DecompileError, MapClassFileResolver, generate_source, render_error,
/// };
///
/// let decompiler = |_: &Method, _: &[u8]| -> Result<Vec<Element>, DecompileError> { Ok(vec![]) };
/// let generator = CodeGenerator::java(decompiler, MapClassFileResolver::new());
/// let method = Method::new("test", MethodSignature::parse("()I").unwrap(), ACC_PUBLIC);
/// let class_file = ClassFile::new("com.example.Example", vec![method]);
/// let element = plus(constant(1), constant(2));
///
/// let pointer = CodePointer::new(&class_file, &class_file.methods[0], &element);
/// if let Err(failure) = generate_source(&generator, pointer) {
///     render_error(&failure);
/// }
/// ```
pub fn render_error(failure: &GenerationFailure) {
    render_error_to_writer(failure, &mut std::io::stderr(), true).ok();
}

/// Render a generation failure to a specific writer
pub fn render_error_to(failure: &GenerationFailure, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(failure, writer, true)
}

/// Render a generation failure to a String (useful for logs, assertion messages, etc.)
pub fn render_error_to_string(failure: &GenerationFailure) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(failure, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render a generation failure to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(failure: &GenerationFailure) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(failure, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    failure: &GenerationFailure,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match &failure.error {
        // Nothing was generated, so there is no code to point into.
        CodeGenError::Precondition(message) => {
            writeln!(writer, "Invalid generator setup: {}", message)
        }
        CodeGenError::Write(_) => {
            writeln!(writer, "Output error in {}: {}", failure.location, failure.error)
        }
        error => render_report(failure, error, writer, use_color),
    }
}

fn render_report(
    failure: &GenerationFailure,
    error: &CodeGenError,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let source = format!("{}{}", failure.partial_output, STOP_MARKER);
    let start = failure.partial_output.chars().count();
    let span = start..start + STOP_MARKER.len();
    let name = failure.location.as_str();

    let mut report = Report::build(ReportKind::Error, (name, span.clone()))
        .with_message(error.to_string())
        .with_config(ariadne::Config::default().with_color(use_color));

    if let Some(code) = error.code() {
        report = report.with_code(code);
    }

    report = report.with_label(
        Label::new((name, span))
            .with_message("generation stopped here")
            .with_color(colors.next()),
    );

    if let Some(help) = error.help() {
        report = report.with_help(help.to_string());
    }

    if let Some(cause) = error.source() {
        report = report.with_note(cause.to_string());
    }

    report.finish().write((name, Source::from(source)), &mut *writer)
}
