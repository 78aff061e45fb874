//! Rule registration: selectors, delegates and advices.

pub mod registry;
pub mod selector;


pub use registry::{
    Advice, AroundContinuation, CodeGeneratorConfiguration, CodeGeneratorConfigurer, Delegate,
    OnContinuation,
};
pub use selector::{ElementSelector, Predicate};
