use core::fmt::{self, Write};
use std::sync::Arc;

use hashbrown::HashMap;
use resyntax_model::{CodePointer, ElementType};

use super::selector::ElementSelector;
use crate::context::GenerationContext;
use crate::error::Result;
use crate::generator::Pointcut;

/// Renders one element completely.
pub type Delegate = Arc<
    dyn Fn(&GenerationContext<'_>, CodePointer<'_>, &mut dyn Write) -> Result<()> + Send + Sync,
>;

/// Wraps the next stage of generation. Calling
/// [`Pointcut::proceed`] runs the next advice, or the delegate once the
/// advices are exhausted. Not calling it skips everything after.
pub type Advice = Arc<
    dyn Fn(&GenerationContext<'_>, CodePointer<'_>, &mut dyn Write, &Pointcut<'_>) -> Result<()>
        + Send
        + Sync,
>;

struct Candidate<H> {
    selector: ElementSelector,
    handler: H,
}

type Buckets<H> = HashMap<ElementType, Vec<Candidate<H>>>;

fn insert<H>(buckets: &mut Buckets<H>, selector: ElementSelector, handler: H) {
    buckets
        .entry(selector.element_type())
        .or_default()
        .push(Candidate { selector, handler });
}

/// Collects rules before they are frozen into a
/// [`CodeGeneratorConfiguration`].
///
/// Rules are kept per element type in registration order, which is also
/// their priority.
///
/// # Example
///
/// ```
/// use resyntax_core::{CodeGeneratorConfiguration, ElementSelector};
/// use resyntax_model::ElementType;
///
/// let mut configurer = CodeGeneratorConfiguration::configurer();
/// configurer
///     .on(ElementSelector::for_type(ElementType::Return))
///     .then(|_context, _code_pointer, out| Ok(out.write_str("return")?));
///
/// let configuration = configurer.configuration();
/// assert_eq!(configuration.delegate_count(ElementType::Return), 1);
/// ```
#[derive(Default)]
pub struct CodeGeneratorConfigurer {
    delegates: Buckets<Delegate>,
    advices: Buckets<Advice>,
}

impl CodeGeneratorConfigurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a delegate for elements matching `selector`.
    pub fn on(&mut self, selector: ElementSelector) -> OnContinuation<'_> {
        OnContinuation {
            configurer: self,
            selector,
        }
    }

    /// Register an advice around elements matching `selector`.
    pub fn around(&mut self, selector: ElementSelector) -> AroundContinuation<'_> {
        AroundContinuation {
            configurer: self,
            selector,
        }
    }

    /// Freeze the registered rules.
    pub fn configuration(self) -> CodeGeneratorConfiguration {
        CodeGeneratorConfiguration {
            delegates: self.delegates,
            advices: self.advices,
        }
    }
}

#[must_use = "a selector does nothing until `then` is called"]
pub struct OnContinuation<'c> {
    configurer: &'c mut CodeGeneratorConfigurer,
    selector: ElementSelector,
}

impl<'c> OnContinuation<'c> {
    pub fn then(
        self,
        delegate: impl Fn(&GenerationContext<'_>, CodePointer<'_>, &mut dyn Write) -> Result<()>
        + Send
        + Sync
        + 'static,
    ) -> &'c mut CodeGeneratorConfigurer {
        self.then_shared(Arc::new(delegate))
    }

    pub fn then_shared(self, delegate: Delegate) -> &'c mut CodeGeneratorConfigurer {
        insert(&mut self.configurer.delegates, self.selector, delegate);
        self.configurer
    }
}

#[must_use = "a selector does nothing until `then` is called"]
pub struct AroundContinuation<'c> {
    configurer: &'c mut CodeGeneratorConfigurer,
    selector: ElementSelector,
}

impl<'c> AroundContinuation<'c> {
    pub fn then(
        self,
        advice: impl Fn(
            &GenerationContext<'_>,
            CodePointer<'_>,
            &mut dyn Write,
            &Pointcut<'_>,
        ) -> Result<()>
        + Send
        + Sync
        + 'static,
    ) -> &'c mut CodeGeneratorConfigurer {
        self.then_shared(Arc::new(advice))
    }

    pub fn then_shared(self, advice: Advice) -> &'c mut CodeGeneratorConfigurer {
        insert(&mut self.configurer.advices, self.selector, advice);
        self.configurer
    }
}

/// Frozen rule set.
///
/// Read-only after construction, so one configuration can be shared
/// (through an `Arc`) by any number of generators and threads.
#[derive(Default)]
pub struct CodeGeneratorConfiguration {
    delegates: Buckets<Delegate>,
    advices: Buckets<Advice>,
}

impl CodeGeneratorConfiguration {
    pub fn configurer() -> CodeGeneratorConfigurer {
        CodeGeneratorConfigurer::new()
    }

    /// Build a configuration by registering rules in `init`.
    pub fn build(init: impl FnOnce(&mut CodeGeneratorConfigurer)) -> Self {
        let mut configurer = CodeGeneratorConfigurer::new();
        init(&mut configurer);
        configurer.configuration()
    }

    /// The first delegate, in registration order, whose selector matches.
    pub fn delegate(
        &self,
        context: &GenerationContext<'_>,
        code_pointer: &CodePointer<'_>,
    ) -> Option<&Delegate> {
        self.delegates
            .get(&code_pointer.element().element_type())?
            .iter()
            .find(|candidate| candidate.selector.matches(context, code_pointer))
            .map(|candidate| &candidate.handler)
    }

    /// Every matching advice, lazily, in registration order.
    pub fn advices<'s>(
        &'s self,
        context: &'s GenerationContext<'s>,
        code_pointer: CodePointer<'s>,
    ) -> impl Iterator<Item = &'s Advice> + use<'s> {
        self.advices
            .get(&code_pointer.element().element_type())
            .into_iter()
            .flatten()
            .filter(move |candidate| candidate.selector.matches(context, &code_pointer))
            .map(|candidate| &candidate.handler)
    }

    pub fn delegate_count(&self, element_type: ElementType) -> usize {
        self.delegates.get(&element_type).map_or(0, Vec::len)
    }

    pub fn advice_count(&self, element_type: ElementType) -> usize {
        self.advices.get(&element_type).map_or(0, Vec::len)
    }
}

impl fmt::Debug for CodeGeneratorConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for element_type in ElementType::ALL {
            let delegates = self.delegate_count(element_type);
            let advices = self.advice_count(element_type);
            if delegates + advices > 0 {
                map.entry(&element_type, &(delegates, advices));
            }
        }
        map.finish()
    }
}
