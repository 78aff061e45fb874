use core::fmt::Write;
use std::sync::Arc;

use resyntax_model::CodePointer;
use tracing::trace;

use super::default_table;
use crate::code_style::{CodeStyle, ConfigurableCodeStyle};
use crate::collaborators::{
    ClassFileResolver, Collaborators, Decompiler, MapTypeResolver, TypeResolver,
};
use crate::configuration::{Advice, CodeGeneratorConfiguration, Delegate};
use crate::context::{CodeGenerationDelegate, GenerationContext};
use crate::error::{CodeGenError, Result};
use crate::java::JavaSyntaxCodeGeneration;

/// The continuation handed to an advice.
///
/// `proceed` runs the next matching advice, or once there are none left,
/// the selected delegate (falling back to the built-in rules). It may be
/// called any number of times, including zero.
pub struct Pointcut<'p> {
    advices: &'p [&'p Advice],
    index: usize,
    delegate: Option<&'p Delegate>,
}

impl Pointcut<'_> {
    pub fn proceed(
        &self,
        context: &GenerationContext<'_>,
        code_pointer: CodePointer<'_>,
        out: &mut dyn Write,
    ) -> Result<()> {
        match self.advices.get(self.index) {
            Some(advice) => {
                let next = Pointcut {
                    advices: self.advices,
                    index: self.index + 1,
                    delegate: self.delegate,
                };
                advice(context, code_pointer, out, &next)
            }
            None => match self.delegate {
                Some(delegate) => delegate(context, code_pointer, out),
                None => default_table::generate(context, code_pointer, out),
            },
        }
    }
}

/// Generate code for one element with the rules in `configuration`.
///
/// The first matching delegate wins; without one the built-in rules apply.
/// Matching advices wrap it in registration order.
pub fn dispatch(
    configuration: &CodeGeneratorConfiguration,
    context: &GenerationContext<'_>,
    code_pointer: CodePointer<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let delegate = configuration.delegate(context, &code_pointer);
    let advices: Vec<&Advice> = configuration.advices(context, code_pointer).collect();

    trace!(
        element_type = %code_pointer.element().element_type(),
        level = context.indentation_level(),
        delegated = delegate.is_some(),
        advices = advices.len(),
        "Dispatching element"
    );

    let pointcut = Pointcut {
        advices: &advices,
        index: 0,
        delegate,
    };

    pointcut.proceed(context, code_pointer, out)
}

/// Generates source code from code pointers.
///
/// A generator owns a frozen rule configuration and the collaborators rules
/// may call on. Generating does not mutate it, so one generator can serve
/// many calls, also from several threads.
///
/// # Example
///
/// ```
/// use resyntax_core::{CodeGenerator, DecompileError, MapClassFileResolver};
/// use resyntax_model::ast::{constant, plus};
/// use resyntax_model::{ClassFile, CodePointer, Element, Method, MethodSignature, ACC_PUBLIC};
///
/// fn no_decompiler(_: &Method, _: &[u8]) -> Result<Vec<Element>, DecompileError> {
///     Ok(Vec::new())
/// }
///
/// let generator = CodeGenerator::java(no_decompiler, MapClassFileResolver::new());
///
/// let method = Method::new("run", MethodSignature::parse("()V").unwrap(), ACC_PUBLIC);
/// let class_file = ClassFile::new("com.example.Example", vec![method]);
/// let element = plus(constant(1), constant(2));
/// let code_pointer = CodePointer::new(&class_file, &class_file.methods[0], &element);
///
/// assert_eq!(generator.generate_to_string(code_pointer).unwrap(), "1 + 2");
/// ```
pub struct CodeGenerator {
    configuration: Arc<CodeGeneratorConfiguration>,
    collaborators: Collaborators,
}

impl CodeGenerator {
    pub fn builder() -> CodeGeneratorBuilder {
        CodeGeneratorBuilder::default()
    }

    /// A generator with the Java syntax rules and the default code style.
    pub fn java(
        decompiler: impl Decompiler + 'static,
        class_file_resolver: impl ClassFileResolver + 'static,
    ) -> CodeGenerator {
        CodeGenerator {
            configuration: JavaSyntaxCodeGeneration::shared_configuration(),
            collaborators: Collaborators {
                type_resolver: Arc::new(MapTypeResolver::new()),
                class_file_resolver: Arc::new(class_file_resolver),
                decompiler: Arc::new(decompiler),
                code_style: Arc::new(ConfigurableCodeStyle::default()),
            },
        }
    }

    pub fn configuration(&self) -> &Arc<CodeGeneratorConfiguration> {
        &self.configuration
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// Write code for `code_pointer` to `out`.
    ///
    /// On error, whatever was written before the failure stays in `out`.
    pub fn generate(&self, code_pointer: CodePointer<'_>, out: &mut dyn Write) -> Result<()> {
        let context = GenerationContext::new(&self.collaborators, self);
        context.delegate(code_pointer, out)
    }

    pub fn generate_to_string(&self, code_pointer: CodePointer<'_>) -> Result<String> {
        let mut out = String::new();
        self.generate(code_pointer, &mut out)?;
        Ok(out)
    }
}

impl CodeGenerationDelegate for CodeGenerator {
    fn delegate(
        &self,
        context: &GenerationContext<'_>,
        code_pointer: CodePointer<'_>,
        out: &mut dyn Write,
    ) -> Result<()> {
        dispatch(&self.configuration, context, code_pointer, out)
    }
}

/// Assembles a [`CodeGenerator`].
///
/// The configuration, decompiler and class file resolver are required. The
/// type resolver defaults to an empty [`MapTypeResolver`] and the code style
/// to [`ConfigurableCodeStyle::default`].
#[derive(Default)]
pub struct CodeGeneratorBuilder {
    configuration: Option<Arc<CodeGeneratorConfiguration>>,
    type_resolver: Option<Arc<dyn TypeResolver>>,
    class_file_resolver: Option<Arc<dyn ClassFileResolver>>,
    decompiler: Option<Arc<dyn Decompiler>>,
    code_style: Option<Arc<dyn CodeStyle>>,
}

impl CodeGeneratorBuilder {
    pub fn configuration(
        mut self,
        configuration: impl Into<Arc<CodeGeneratorConfiguration>>,
    ) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    pub fn type_resolver(mut self, type_resolver: impl TypeResolver + 'static) -> Self {
        self.type_resolver = Some(Arc::new(type_resolver));
        self
    }

    pub fn class_file_resolver(
        mut self,
        class_file_resolver: impl ClassFileResolver + 'static,
    ) -> Self {
        self.class_file_resolver = Some(Arc::new(class_file_resolver));
        self
    }

    pub fn decompiler(mut self, decompiler: impl Decompiler + 'static) -> Self {
        self.decompiler = Some(Arc::new(decompiler));
        self
    }

    /// Share a decompiler with other generators.
    pub fn shared_decompiler(mut self, decompiler: Arc<dyn Decompiler>) -> Self {
        self.decompiler = Some(decompiler);
        self
    }

    pub fn code_style(mut self, code_style: impl CodeStyle + 'static) -> Self {
        self.code_style = Some(Arc::new(code_style));
        self
    }

    pub fn build(self) -> Result<CodeGenerator> {
        let configuration = self
            .configuration
            .ok_or_else(|| CodeGenError::precondition("Configuration can't be missing"))?;
        let decompiler = self
            .decompiler
            .ok_or_else(|| CodeGenError::precondition("Decompiler can't be missing"))?;
        let class_file_resolver = self
            .class_file_resolver
            .ok_or_else(|| CodeGenError::precondition("Class file resolver can't be missing"))?;

        Ok(CodeGenerator {
            configuration,
            collaborators: Collaborators {
                type_resolver: self
                    .type_resolver
                    .unwrap_or_else(|| Arc::new(MapTypeResolver::new())),
                class_file_resolver,
                decompiler,
                code_style: self
                    .code_style
                    .unwrap_or_else(|| Arc::new(ConfigurableCodeStyle::default())),
            },
        })
    }
}
