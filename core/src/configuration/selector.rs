use core::fmt;
use std::sync::Arc;

use resyntax_model::{CodePointer, ElementKind, ElementType};

use crate::context::GenerationContext;

/// Refinement applied after the element type matched.
pub type Predicate = Arc<dyn Fn(&GenerationContext<'_>, &CodePointer<'_>) -> bool + Send + Sync>;

/// Picks the elements a rule applies to.
///
/// Matching is two-staged: the element type must be exactly
/// [`element_type`](Self::element_type), then every predicate added with
/// [`filter`](Self::filter) must accept the pointer.
///
/// # Example
///
/// ```
/// use resyntax_core::ElementSelector;
/// use resyntax_model::{ElementType, MethodCall};
///
/// let static_calls = ElementSelector::of::<MethodCall>()
///     .filter_kind(|_, call: &MethodCall| call.is_static());
///
/// assert_eq!(static_calls.element_type(), ElementType::MethodCall);
/// ```
#[derive(Clone)]
pub struct ElementSelector {
    element_type: ElementType,
    predicates: Vec<Predicate>,
}

impl ElementSelector {
    pub fn for_type(element_type: ElementType) -> Self {
        Self {
            element_type,
            predicates: Vec::new(),
        }
    }

    /// Selects every element of kind `E`.
    pub fn of<E: ElementKind>() -> Self {
        Self::for_type(E::ELEMENT_TYPE)
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Narrow the selector with another predicate.
    pub fn filter(
        mut self,
        predicate: impl Fn(&GenerationContext<'_>, &CodePointer<'_>) -> bool
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.predicates.push(Arc::new(predicate));
        self
    }

    /// Narrow the selector with a predicate over the typed element.
    ///
    /// Elements that are not of kind `E` are rejected.
    pub fn filter_kind<E: ElementKind + 'static>(
        self,
        predicate: impl Fn(&GenerationContext<'_>, &E) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter(move |context, code_pointer| match code_pointer.kind::<E>() {
            Some(element) => predicate(context, element),
            None => false,
        })
    }

    pub fn matches(&self, context: &GenerationContext<'_>, code_pointer: &CodePointer<'_>) -> bool {
        code_pointer.element().element_type() == self.element_type
            && self.predicates.iter().all(|predicate| predicate(context, code_pointer))
    }
}

impl fmt::Debug for ElementSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementSelector")
            .field("element_type", &self.element_type)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}
