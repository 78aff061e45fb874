use crate::element::Element;

/// Trait for visiting element trees.
///
/// Implement this trait to traverse elements without mutation.
/// The default implementation handles recursion automatically.
///
/// # Example
///
/// ```
/// use resyntax_model::ast::{constant, plus};
/// use resyntax_model::{Element, ElementVisitor};
///
/// struct ConstantCounter {
///     count: usize,
/// }
///
/// impl ElementVisitor for ConstantCounter {
///     fn visit_element(&mut self, element: &Element) {
///         if matches!(element, Element::Constant(_)) {
///             self.count += 1;
///         }
///         self.super_visit_element(element);
///     }
/// }
///
/// let mut counter = ConstantCounter { count: 0 };
/// counter.visit_element(&plus(constant(1), plus(constant(2), constant(3))));
/// assert_eq!(counter.count, 3);
/// ```
pub trait ElementVisitor {
    /// Visit an element.
    ///
    /// Override this to customize behavior for all elements.
    /// Call `super_visit_element` to recurse into sub-elements.
    fn visit_element(&mut self, element: &Element) {
        self.super_visit_element(element)
    }

    /// Default recursion into sub-elements, in source order.
    ///
    /// Override `visit_element` instead of this method.
    fn super_visit_element(&mut self, element: &Element) {
        match element {
            // Leaves
            Element::Return(_)
            | Element::Constant(_)
            | Element::VariableReference(_)
            | Element::Goto(_)
            | Element::Allocate(_) => {}

            Element::ReturnValue(ret) => self.visit_element(&ret.value),
            Element::VariableAssignment(assignment) => self.visit_element(&assignment.value),
            Element::Cast(cast) => self.visit_element(&cast.value),
            Element::UnaryOperator(op) => self.visit_element(&op.operand),

            Element::Increment(increment) => {
                self.visit_element(&increment.local_variable);
                self.visit_element(&increment.value);
            }

            Element::FieldReference(field) => {
                if let Some(target) = &field.target_instance {
                    self.visit_element(target);
                }
            }

            Element::FieldAssignment(assignment) => {
                if let Some(target) = &assignment.field_reference.target_instance {
                    self.visit_element(target);
                }
                self.visit_element(&assignment.value);
            }

            Element::BinaryOperator(op) => {
                self.visit_element(&op.left);
                self.visit_element(&op.right);
            }

            Element::Compare(compare) => {
                self.visit_element(&compare.left);
                self.visit_element(&compare.right);
            }

            Element::Branch(branch) => {
                self.visit_element(&branch.left);
                self.visit_element(&branch.right);
            }

            Element::ArrayLoad(load) => {
                self.visit_element(&load.array);
                self.visit_element(&load.index);
            }

            Element::ArrayStore(store) => {
                self.visit_element(&store.array);
                self.visit_element(&store.index);
                self.visit_element(&store.value);
            }

            Element::NewArray(array) => {
                self.visit_element(&array.length);
                for initializer in &array.initializers {
                    self.visit_element(&initializer.value);
                }
            }

            Element::New(instance) => {
                for parameter in &instance.parameters {
                    self.visit_element(parameter);
                }
            }

            // Captured variables are references, not sub-elements.
            Element::Lambda(lambda) => {
                if let Some(receiver) = &lambda.receiver {
                    self.visit_element(receiver);
                }
            }

            Element::MethodCall(call) => {
                if let Some(target) = &call.target_instance {
                    self.visit_element(target);
                }
                for parameter in &call.parameters {
                    self.visit_element(parameter);
                }
            }
        }
    }
}

/// Counts elements of each kind in a tree.
#[derive(Debug, Default)]
pub struct ElementCounter {
    pub counts: std::collections::BTreeMap<crate::ElementType, usize>,
}

impl ElementVisitor for ElementCounter {
    fn visit_element(&mut self, element: &Element) {
        *self.counts.entry(element.element_type()).or_default() += 1;
        self.super_visit_element(element);
    }
}

impl ElementCounter {
    pub fn count(&self, element_type: crate::ElementType) -> usize {
        self.counts.get(&element_type).copied().unwrap_or(0)
    }
}
