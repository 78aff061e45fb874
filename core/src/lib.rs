//! Java source reconstruction from decompiled element trees.
//!
//! A [`CodeGenerator`] walks an element tree through a set of rules. Each
//! element type is rendered by the first registered delegate whose
//! [`ElementSelector`] matches it, wrapped by every matching advice, and
//! falls back to a small built-in table when no delegate claims it.
//! [`JavaSyntaxCodeGeneration`] registers the rules producing Java syntax.

pub mod code_style;
pub mod collaborators;
pub mod configuration;
pub mod context;
pub mod error;
pub mod generator;
pub mod java;

pub use code_style::{CodeStyle, ConfigurableCodeStyle, ConfigurableCodeStyleBuilder};
pub use collaborators::{
    ClassFileResolver, Collaborators, DSL_ANNOTATION, Decompiler, MapClassFileResolver,
    MapTypeResolver, MethodMetadata, TypeMetadata, TypeResolver,
};
pub use configuration::{
    Advice, AroundContinuation, CodeGeneratorConfiguration, CodeGeneratorConfigurer, Delegate,
    ElementSelector, OnContinuation, Predicate,
};
pub use context::{CodeGenerationDelegate, GenerationContext, INDENTATION};
pub use error::{CodeGenError, DecompileError, Result};
pub use generator::{CodeGenerator, CodeGeneratorBuilder, Pointcut, dispatch};
pub use java::{JavaSyntaxCodeGeneration, operator_symbol};
