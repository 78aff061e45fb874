//! Decompiled element trees and the class-file view they come from.
//!
//! This crate is the input side of code generation: a closed [`Element`]
//! tree produced by a decompiler, the [`JavaType`]s and
//! [`MethodSignature`]s it refers to, and the [`CodePointer`] that ties an
//! element to its enclosing method.
//!
//! # Example
//!
//! ```
//! use resyntax_model::ast::{constant, static_call};
//! use resyntax_model::{ElementType, JavaType, MethodSignature};
//!
//! let signature = MethodSignature::parse("(I)Ljava/lang/Integer;").unwrap();
//! let integer = JavaType::class("java.lang.Integer");
//! let call = static_call(integer, "valueOf", signature, vec![constant(1)]);
//!
//! assert_eq!(call.element_type(), ElementType::MethodCall);
//! assert_eq!(call.ty().simple_name(), "Integer");
//! ```

pub mod ast;
pub mod classfile;
pub mod constant;
pub mod descriptor;
pub mod element;
pub mod ops;
pub mod pointer;
pub mod types;
pub mod visit;

pub use classfile::{
    ACC_PRIVATE, ACC_PUBLIC, ACC_STATIC, ACC_SYNTHETIC, ACC_VARARGS, ACCESSOR_METHOD_PREFIX,
    ClassFile, LAMBDA_METHOD_PREFIX, LocalVariable, LocalVariableTable, Method,
};
pub use constant::ConstantValue;
pub use descriptor::{DescriptorError, MethodSignature, parse_field_descriptor};
pub use element::*;
pub use ops::{Affix, OperatorType, ReferenceKind};
pub use pointer::CodePointer;
pub use types::{ClassName, JavaType, Primitive};
pub use visit::{ElementCounter, ElementVisitor};
