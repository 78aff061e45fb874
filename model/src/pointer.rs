use crate::classfile::{ClassFile, Method};
use crate::element::{Element, ElementKind};

/// An element together with the method and class it was decompiled from.
///
/// Pointers are cheap to copy. Moving to a sub-element with
/// [`for_element`](CodePointer::for_element) keeps the enclosing method and
/// class, so nested generation always knows where it is.
#[derive(Debug, Clone, Copy)]
pub struct CodePointer<'a> {
    class_file: &'a ClassFile,
    method: &'a Method,
    element: &'a Element,
}

impl<'a> CodePointer<'a> {
    pub fn new(class_file: &'a ClassFile, method: &'a Method, element: &'a Element) -> Self {
        Self {
            class_file,
            method,
            element,
        }
    }

    pub fn class_file(&self) -> &'a ClassFile {
        self.class_file
    }

    pub fn method(&self) -> &'a Method {
        self.method
    }

    pub fn element(&self) -> &'a Element {
        self.element
    }

    /// View the focused element as a specific kind.
    pub fn kind<E: ElementKind>(&self) -> Option<&'a E> {
        E::from_element(self.element)
    }

    /// A pointer to `element` inside the same method.
    pub fn for_element<'b>(&self, element: &'b Element) -> CodePointer<'b>
    where
        'a: 'b,
    {
        CodePointer {
            class_file: self.class_file,
            method: self.method,
            element,
        }
    }
}
