//! Code style options.

use resyntax_model::JavaType;
use serde::{Deserialize, Serialize};

/// Controls how type names and `this` qualifiers are rendered.
pub trait CodeStyle: Send + Sync {
    fn type_name(&self, ty: &JavaType) -> String;

    fn should_omit_this(&self) -> bool;
}

/// A [`CodeStyle`] driven by two options.
///
/// # Example
///
/// ```
/// use resyntax_core::{CodeStyle, ConfigurableCodeStyle};
/// use resyntax_model::JavaType;
///
/// let style = ConfigurableCodeStyle::builder()
///     .use_simple_class_names(false)
///     .build();
///
/// assert_eq!(style.type_name(&JavaType::string()), "java.lang.String");
/// assert!(style.should_omit_this());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurableCodeStyle {
    /// Render `String` instead of `java.lang.String`.
    ///
    /// Default: true
    pub use_simple_class_names: bool,

    /// Render `foo()` instead of `this.foo()`.
    ///
    /// Default: true
    pub omit_this: bool,
}

impl Default for ConfigurableCodeStyle {
    fn default() -> Self {
        Self {
            use_simple_class_names: true,
            omit_this: true,
        }
    }
}

impl ConfigurableCodeStyle {
    pub fn builder() -> ConfigurableCodeStyleBuilder {
        ConfigurableCodeStyleBuilder {
            style: ConfigurableCodeStyle::default(),
        }
    }
}

impl CodeStyle for ConfigurableCodeStyle {
    fn type_name(&self, ty: &JavaType) -> String {
        if self.use_simple_class_names {
            ty.simple_name()
        } else {
            ty.type_name()
        }
    }

    fn should_omit_this(&self) -> bool {
        self.omit_this
    }
}

#[derive(Debug, Clone)]
pub struct ConfigurableCodeStyleBuilder {
    style: ConfigurableCodeStyle,
}

impl ConfigurableCodeStyleBuilder {
    pub fn use_simple_class_names(mut self, use_simple_class_names: bool) -> Self {
        self.style.use_simple_class_names = use_simple_class_names;
        self
    }

    pub fn omit_this(mut self, omit_this: bool) -> Self {
        self.style.omit_this = omit_this;
        self
    }

    pub fn build(self) -> ConfigurableCodeStyle {
        self.style
    }
}
