//! Resyntax - Java source reconstruction from decompiled byte code
//!
//! # Overview
//!
//! Resyntax turns the element trees produced by a byte-code decompiler back
//! into Java source text. Typical uses include:
//!
//! - Showing the code behind a lambda in assertion failure messages
//! - Rendering captured expressions in test and DSL tooling
//! - Debug views of decompiled methods
//!
//! # Quick Start
//!
//! ```
//! use resyntax::model::ast::{constant, plus};
//! use resyntax::model::{ACC_PUBLIC, ClassFile, CodePointer, Element, Method, MethodSignature};
//! use resyntax::{CodeGenerator, DecompileError, MapClassFileResolver};
//!
//! // Nothing to decompile for a plain expression.
//! let decompiler = |_: &Method, _: &[u8]| -> Result<Vec<Element>, DecompileError> { Ok(vec![]) };
//! let generator = CodeGenerator::java(decompiler, MapClassFileResolver::new());
//!
//! let method = Method::new("test", MethodSignature::parse("()I").unwrap(), ACC_PUBLIC);
//! let class_file = ClassFile::new("com.example.Example", vec![method]);
//! let element = plus(constant(1), constant(2));
//!
//! let pointer = CodePointer::new(&class_file, &class_file.methods[0], &element);
//! let source = resyntax::generate_source(&generator, pointer);
//! assert_eq!(source.unwrap(), "1 + 2");
//! ```
//!
//! # Rules
//!
//! Every element type is rendered by the first matching delegate registered
//! in a [`CodeGeneratorConfiguration`], wrapped by the matching advices. The
//! Java rules live in [`JavaSyntaxCodeGeneration`]; hosts can build their
//! own configuration on top of them:
//!
//! ```
//! use resyntax::{CodeGeneratorConfiguration, ElementSelector, JavaSyntaxCodeGeneration};
//! use resyntax::model::Constant;
//! use std::fmt::Write as _;
//!
//! let configuration = CodeGeneratorConfiguration::build(|configurer| {
//!     configurer
//!         .on(ElementSelector::of::<Constant>())
//!         .then(|_, _, out| Ok(out.write_str("?")?));
//!     JavaSyntaxCodeGeneration::configure(configurer);
//! });
//! ```

use resyntax_model::CodePointer;
use thiserror::Error;

// Re-export the generator API from resyntax_core
pub use resyntax_core::{
    Advice, AroundContinuation, ClassFileResolver, CodeGenError, CodeGenerationDelegate,
    CodeGenerator, CodeGeneratorBuilder, CodeGeneratorConfiguration, CodeGeneratorConfigurer,
    CodeStyle, Collaborators, ConfigurableCodeStyle, ConfigurableCodeStyleBuilder, DSL_ANNOTATION,
    DecompileError, Decompiler, Delegate, ElementSelector, GenerationContext, INDENTATION,
    JavaSyntaxCodeGeneration, MapClassFileResolver, MapTypeResolver, MethodMetadata, OnContinuation,
    Pointcut, Predicate, TypeMetadata, TypeResolver, operator_symbol,
};

// Re-export the element model
pub use resyntax_model as model;

pub mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

/// A failed generation together with the code written before the failure.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct GenerationFailure {
    pub error: CodeGenError,
    /// `Class.method` the element was decompiled from.
    pub location: String,
    pub partial_output: String,
}

/// Generate source for `code_pointer`, keeping the partial output on failure.
pub fn generate_source(
    generator: &CodeGenerator,
    code_pointer: CodePointer<'_>,
) -> Result<String, GenerationFailure> {
    let mut out = String::new();
    match generator.generate(code_pointer, &mut out) {
        Ok(()) => Ok(out),
        Err(error) => Err(GenerationFailure {
            error,
            location: format!("{}.{}", code_pointer.class_file().name, code_pointer.method().name),
            partial_output: out,
        }),
    }
}
