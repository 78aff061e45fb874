//! Services the generator calls out to.
//!
//! None of these are implemented here for real: class-file parsing,
//! decompilation and type reflection belong to the host. The map-backed
//! resolvers are enough for embedding pre-parsed classes and for tests.

use std::sync::Arc;

use hashbrown::HashMap;
use resyntax_model::{ClassFile, Element, JavaType, Method, MethodSignature};

use crate::code_style::CodeStyle;
use crate::error::{CodeGenError, DecompileError};

/// Annotation marking a type whose static methods render without
/// qualification.
pub const DSL_ANNOTATION: &str = "resyntax.annotations.DSL";

/// Turns method byte code into element trees.
pub trait Decompiler: Send + Sync {
    fn decompile(&self, method: &Method, code: &[u8]) -> Result<Vec<Element>, DecompileError>;
}

impl<F> Decompiler for F
where
    F: Fn(&Method, &[u8]) -> Result<Vec<Element>, DecompileError> + Send + Sync,
{
    fn decompile(&self, method: &Method, code: &[u8]) -> Result<Vec<Element>, DecompileError> {
        self(method, code)
    }
}

pub trait ClassFileResolver: Send + Sync {
    fn resolve_class_file(&self, ty: &JavaType) -> Result<Arc<ClassFile>, CodeGenError>;
}

/// Reflective information about types.
pub trait TypeResolver: Send + Sync {
    fn resolve_type(&self, ty: &JavaType) -> Option<Arc<TypeMetadata>>;
}

/// What the generator needs to know about a type beyond its name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMetadata {
    /// Qualified names of the type's annotations.
    pub annotations: Vec<String>,
    pub methods: Vec<MethodMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMetadata {
    pub name: String,
    pub signature: MethodSignature,
    pub varargs: bool,
}

impl TypeMetadata {
    pub fn has_annotation(&self, annotation: &str) -> bool {
        self.annotations.iter().any(|a| a == annotation)
    }

    pub fn method(&self, name: &str, signature: &MethodSignature) -> Option<&MethodMetadata> {
        self.methods
            .iter()
            .find(|method| method.name == name && &method.signature == signature)
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn with_method(
        mut self,
        name: impl Into<String>,
        signature: MethodSignature,
        varargs: bool,
    ) -> Self {
        self.methods.push(MethodMetadata {
            name: name.into(),
            signature,
            varargs,
        });
        self
    }
}

/// Class files known up front, keyed by type.
#[derive(Debug, Default, Clone)]
pub struct MapClassFileResolver {
    class_files: HashMap<JavaType, Arc<ClassFile>>,
}

impl MapClassFileResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, class_file: ClassFile) -> &mut Self {
        self.class_files.insert(class_file.ty(), Arc::new(class_file));
        self
    }
}

impl FromIterator<ClassFile> for MapClassFileResolver {
    fn from_iter<T: IntoIterator<Item = ClassFile>>(iter: T) -> Self {
        let mut resolver = Self::new();
        for class_file in iter {
            resolver.register(class_file);
        }
        resolver
    }
}

impl ClassFileResolver for MapClassFileResolver {
    fn resolve_class_file(&self, ty: &JavaType) -> Result<Arc<ClassFile>, CodeGenError> {
        self.class_files
            .get(ty)
            .cloned()
            .ok_or_else(|| CodeGenError::ClassFileNotFound {
                type_name: ty.type_name(),
            })
    }
}

/// Type metadata known up front, keyed by type.
#[derive(Debug, Default, Clone)]
pub struct MapTypeResolver {
    types: HashMap<JavaType, Arc<TypeMetadata>>,
}

impl MapTypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, ty: JavaType, metadata: TypeMetadata) -> &mut Self {
        self.types.insert(ty, Arc::new(metadata));
        self
    }
}

impl TypeResolver for MapTypeResolver {
    fn resolve_type(&self, ty: &JavaType) -> Option<Arc<TypeMetadata>> {
        self.types.get(ty).cloned()
    }
}

/// The services available to every rule during one generation.
#[derive(Clone)]
pub struct Collaborators {
    pub type_resolver: Arc<dyn TypeResolver>,
    pub class_file_resolver: Arc<dyn ClassFileResolver>,
    pub decompiler: Arc<dyn Decompiler>,
    pub code_style: Arc<dyn CodeStyle>,
}

impl core::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
