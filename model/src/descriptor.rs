//! Method and field descriptors.
//!
//! Descriptors are parsed with a small pest grammar (`descriptor.pest`) and
//! rendered back through `Display`, so a parsed signature round-trips to the
//! exact descriptor text found in the class file.

use core::fmt;
use core::str::FromStr;

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use thiserror::Error;

use crate::types::{JavaType, Primitive};

#[derive(Parser)]
#[grammar = "descriptor.pest"]
pub struct DescriptorParser;

/// Errors produced while parsing a descriptor.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("invalid descriptor `{descriptor}`")]
    Syntax {
        descriptor: String,
        #[source]
        source: Box<pest::error::Error<Rule>>,
    },

    #[error("invalid descriptor `{descriptor}`: {reason}")]
    Malformed {
        descriptor: String,
        reason: &'static str,
    },
}

impl DescriptorError {
    fn malformed(descriptor: &str, reason: &'static str) -> Self {
        DescriptorError::Malformed {
            descriptor: descriptor.to_string(),
            reason,
        }
    }
}

/// Parameter and return types of a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    parameter_types: Vec<JavaType>,
    return_type: JavaType,
}

impl MethodSignature {
    pub fn new(parameter_types: Vec<JavaType>, return_type: JavaType) -> Self {
        Self {
            parameter_types,
            return_type,
        }
    }

    /// Parse a method descriptor such as `(Z)Ljava/lang/Boolean;`.
    pub fn parse(descriptor: &str) -> Result<Self, DescriptorError> {
        let root = DescriptorParser::parse(Rule::method_descriptor, descriptor)
            .map_err(|err| DescriptorError::Syntax {
                descriptor: descriptor.to_string(),
                source: Box::new(err),
            })?
            .next()
            .ok_or_else(|| DescriptorError::malformed(descriptor, "empty parse"))?;

        let mut parameter_types = Vec::new();
        let mut return_type = None;

        for pair in root.into_inner() {
            match pair.as_rule() {
                Rule::parameters => {
                    for parameter in pair.into_inner() {
                        parameter_types.push(field_type(parameter, descriptor)?);
                    }
                }
                Rule::return_type => {
                    let inner = pair.into_inner().next().ok_or_else(|| {
                        DescriptorError::malformed(descriptor, "missing return type")
                    })?;
                    return_type = Some(field_type(inner, descriptor)?);
                }
                _ => {}
            }
        }

        let return_type = return_type
            .ok_or_else(|| DescriptorError::malformed(descriptor, "missing return type"))?;

        Ok(Self::new(parameter_types, return_type))
    }

    pub fn parameter_types(&self) -> &[JavaType] {
        &self.parameter_types
    }

    pub fn return_type(&self) -> &JavaType {
        &self.return_type
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for parameter in &self.parameter_types {
            f.write_str(&parameter.descriptor())?;
        }
        write!(f, "){}", self.return_type.descriptor())
    }
}

impl FromStr for MethodSignature {
    type Err = DescriptorError;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        MethodSignature::parse(descriptor)
    }
}

/// Parse a single field descriptor such as `[Ljava/lang/String;`.
pub fn parse_field_descriptor(descriptor: &str) -> Result<JavaType, DescriptorError> {
    let root = DescriptorParser::parse(Rule::field_descriptor, descriptor)
        .map_err(|err| DescriptorError::Syntax {
            descriptor: descriptor.to_string(),
            source: Box::new(err),
        })?
        .next()
        .ok_or_else(|| DescriptorError::malformed(descriptor, "empty parse"))?;

    let inner = root
        .into_inner()
        .next()
        .ok_or_else(|| DescriptorError::malformed(descriptor, "missing field type"))?;

    field_type(inner, descriptor)
}

fn field_type(pair: Pair<Rule>, descriptor: &str) -> Result<JavaType, DescriptorError> {
    match pair.as_rule() {
        Rule::base_type | Rule::void_type => pair
            .as_str()
            .chars()
            .next()
            .and_then(Primitive::from_descriptor)
            .map(JavaType::Primitive)
            .ok_or_else(|| DescriptorError::malformed(descriptor, "unknown base type")),
        Rule::object_type => {
            let class_name = pair
                .into_inner()
                .next()
                .ok_or_else(|| DescriptorError::malformed(descriptor, "missing class name"))?;
            Ok(JavaType::class(class_name.as_str()))
        }
        Rule::array_type => {
            let component = pair
                .into_inner()
                .next()
                .ok_or_else(|| DescriptorError::malformed(descriptor, "missing component type"))?;
            Ok(JavaType::array(field_type(component, descriptor)?))
        }
        _ => Err(DescriptorError::malformed(descriptor, "unexpected token")),
    }
}
