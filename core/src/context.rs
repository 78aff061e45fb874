//! The generation context handed to every rule.

use core::fmt::Write;

use resyntax_model::CodePointer;

use crate::code_style::CodeStyle;
use crate::collaborators::{ClassFileResolver, Collaborators, Decompiler, TypeResolver};
use crate::error::Result;

/// Written once per indentation level in front of block statements.
pub const INDENTATION: &str = "   ";

/// Routes a code pointer through the full rule set.
///
/// [`CodeGenerator`](crate::CodeGenerator) is the implementation used in
/// practice; rules only ever see it through a context.
pub trait CodeGenerationDelegate {
    fn delegate(
        &self,
        context: &GenerationContext<'_>,
        code_pointer: CodePointer<'_>,
        out: &mut dyn Write,
    ) -> Result<()>;
}

/// Indentation level plus the collaborators of one generation call.
///
/// Contexts are immutable values. [`sub_section`](Self::sub_section) makes
/// a new one a level deeper and leaves the original untouched.
#[derive(Clone, Copy)]
pub struct GenerationContext<'g> {
    indentation_level: usize,
    collaborators: &'g Collaborators,
    dispatcher: &'g dyn CodeGenerationDelegate,
}

impl<'g> GenerationContext<'g> {
    pub fn new(
        collaborators: &'g Collaborators,
        dispatcher: &'g dyn CodeGenerationDelegate,
    ) -> Self {
        Self {
            indentation_level: 0,
            collaborators,
            dispatcher,
        }
    }

    pub fn indentation_level(&self) -> usize {
        self.indentation_level
    }

    pub fn sub_section(&self) -> GenerationContext<'g> {
        GenerationContext {
            indentation_level: self.indentation_level + 1,
            ..*self
        }
    }

    /// Generate code for `code_pointer` with every registered rule applied.
    pub fn delegate(&self, code_pointer: CodePointer<'_>, out: &mut dyn Write) -> Result<()> {
        self.dispatcher.delegate(self, code_pointer, out)
    }

    pub fn write_indentation(&self, out: &mut dyn Write) -> Result<()> {
        for _ in 0..self.indentation_level {
            out.write_str(INDENTATION)?;
        }
        Ok(())
    }

    pub fn collaborators(&self) -> &'g Collaborators {
        self.collaborators
    }

    pub fn code_style(&self) -> &'g dyn CodeStyle {
        &*self.collaborators.code_style
    }

    pub fn decompiler(&self) -> &'g dyn Decompiler {
        &*self.collaborators.decompiler
    }

    pub fn class_file_resolver(&self) -> &'g dyn ClassFileResolver {
        &*self.collaborators.class_file_resolver
    }

    pub fn type_resolver(&self) -> &'g dyn TypeResolver {
        &*self.collaborators.type_resolver
    }
}

impl core::fmt::Debug for GenerationContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GenerationContext")
            .field("indentation_level", &self.indentation_level)
            .finish_non_exhaustive()
    }
}
