//! The dispatch engine.

pub mod default_table;
pub mod generator;


pub use generator::{CodeGenerator, CodeGeneratorBuilder, Pointcut, dispatch};
