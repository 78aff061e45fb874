//! Errors raised while generating code.
//!
//! Generation is fail-fast: the first error aborts the whole call and
//! whatever was already written to the output stays there.

use core::fmt;

use miette::Diagnostic;
use resyntax_model::OperatorType;
use thiserror::Error;

/// Failure reported by a [`Decompiler`](crate::Decompiler).
#[derive(Debug, Error)]
pub enum DecompileError {
    #[error("I/O error while reading byte code")]
    Io(#[from] std::io::Error),

    #[error("malformed byte code: {0}")]
    Malformed(String),
}

/// Public error type for all code generation operations.
#[derive(Debug, Error, Diagnostic)]
pub enum CodeGenError {
    /// Invalid setup, such as a generator built without a decompiler.
    #[error("{0}")]
    #[diagnostic(code(resyntax::precondition))]
    Precondition(String),

    #[error("Unsupported element: {element}")]
    #[diagnostic(
        code(resyntax::unsupported_element),
        help("register a delegate for this element type")
    )]
    UnsupportedElement { element: String },

    #[error("Operator type is not supported: {operator}")]
    #[diagnostic(code(resyntax::unsupported_operator))]
    UnsupportedOperator { operator: OperatorType },

    /// A synthetic method (accessor or lambda body) is missing from its class.
    #[error("Could not find {role} method {class}.{method} in class file")]
    #[diagnostic(code(resyntax::accessor_resolution))]
    AccessorResolution {
        role: &'static str,
        class: String,
        method: String,
    },

    #[error("Class file not found for type {type_name}")]
    #[diagnostic(code(resyntax::class_file_not_found))]
    ClassFileNotFound { type_name: String },

    #[error("No local variable exists for index {index} in method {class}.{method}")]
    #[diagnostic(code(resyntax::local_variable_not_available))]
    LocalVariableNotAvailable {
        index: usize,
        class: String,
        method: String,
    },

    #[error("Failed to decompile method '{method}' in class '{class}'")]
    #[diagnostic(code(resyntax::decompile))]
    Decompile {
        method: String,
        class: String,
        #[source]
        source: DecompileError,
    },

    #[error("failed to write generated code")]
    #[diagnostic(code(resyntax::write))]
    Write(#[from] fmt::Error),
}

impl CodeGenError {
    pub fn unsupported_element(element: &impl fmt::Debug) -> Self {
        CodeGenError::UnsupportedElement {
            element: format!("{:?}", element),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        CodeGenError::Precondition(message.into())
    }
}

pub type Result<T, E = CodeGenError> = core::result::Result<T, E>;
