//! Shared fixtures for the end-to-end tests.

#![allow(dead_code)]

use std::collections::HashMap;

use resyntax::model::{
    ACC_PRIVATE, ACC_PUBLIC, ACC_STATIC, ACC_SYNTHETIC, ClassFile, CodePointer, Element, JavaType,
    LocalVariable, LocalVariableTable, Method, MethodSignature,
};
use resyntax::{
    CodeGenerator, DecompileError, GenerationFailure, JavaSyntaxCodeGeneration,
    MapClassFileResolver, MapTypeResolver, generate_source,
};

pub fn signature(descriptor: &str) -> MethodSignature {
    MethodSignature::parse(descriptor).unwrap()
}

pub fn example() -> JavaType {
    JavaType::class("com.example.Example")
}

/// A `private static synthetic` method with a code attribute and one local
/// variable per `(name, type)` pair.
pub fn synthetic_method(name: &str, descriptor: &str, locals: &[(&str, JavaType)]) -> Method {
    let method = Method::new(name, signature(descriptor), ACC_PRIVATE | ACC_STATIC | ACC_SYNTHETIC)
        .with_code([0xb1]);
    if locals.is_empty() {
        return method;
    }

    let table = locals
        .iter()
        .zip(0u16..)
        .map(|((name, ty), index)| LocalVariable::new(0, 10, *name, ty.clone(), index))
        .collect::<LocalVariableTable>();
    method.with_local_variable_table(table)
}

/// Everything a generation needs besides the element: the methods of
/// `com.example.Example`, canned decompiler output, other classes and
/// type metadata.
#[derive(Default)]
pub struct Fixture {
    methods: Vec<Method>,
    bodies: HashMap<String, Vec<Element>>,
    class_files: Vec<ClassFile>,
    types: MapTypeResolver,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn methods(mut self, methods: Vec<Method>) -> Self {
        self.methods.extend(methods);
        self
    }

    pub fn bodies(mut self, bodies: Vec<(&str, Vec<Element>)>) -> Self {
        self.bodies
            .extend(bodies.into_iter().map(|(name, body)| (name.to_string(), body)));
        self
    }

    pub fn class_files(mut self, class_files: Vec<ClassFile>) -> Self {
        self.class_files.extend(class_files);
        self
    }

    pub fn types(mut self, types: MapTypeResolver) -> Self {
        self.types = types;
        self
    }

    /// Generate `element` as if it appeared in `Example.test()`.
    pub fn generate(self, element: &Element) -> Result<String, GenerationFailure> {
        let test = Method::new("test", signature("()V"), ACC_PUBLIC);
        let methods = std::iter::once(test).chain(self.methods).collect();
        let class_file = ClassFile::new("com.example.Example", methods);

        let bodies = self.bodies;
        let decompiler = move |method: &Method, _: &[u8]| -> Result<Vec<Element>, DecompileError> {
            bodies
                .get(&method.name)
                .cloned()
                .ok_or_else(|| DecompileError::Malformed(format!("no body for {}", method.name)))
        };

        let generator = CodeGenerator::builder()
            .configuration(JavaSyntaxCodeGeneration::shared_configuration())
            .decompiler(decompiler)
            .class_file_resolver(self.class_files.into_iter().collect::<MapClassFileResolver>())
            .type_resolver(self.types)
            .build()
            .unwrap();

        generate_source(&generator, CodePointer::new(&class_file, &class_file.methods[0], element))
    }
}

#[macro_export]
macro_rules! test_case {
    (
        $name:ident,
        $(methods: $methods:expr,)?
        $(bodies: $bodies:expr,)?
        $(class_files: $class_files:expr,)?
        $(types: $types:expr,)?
        element: $element:expr,
        generated: $expected:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let fixture = $crate::cases::Fixture::new()
                $(.methods($methods))?
                $(.bodies($bodies))?
                $(.class_files($class_files))?
                $(.types($types))?;
            let expected: Result<&str, &str> = $expected;

            let generated = fixture
                .generate(&$element)
                .map_err(|failure| failure.error.to_string());

            pretty_assertions::assert_eq!(
                generated.as_ref().map(String::as_str).map_err(String::as_str),
                expected
            );
        }
    };
}
