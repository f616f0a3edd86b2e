//! Template rendering with MiniJinja.
//!
//! The core pipeline decides inclusion, rename and transforms; token
//! substitution inside file contents is delegated to this collaborator
//! behind the [`TemplateRenderer`] trait.

use minijinja::Environment;

use crate::error::Result;
use crate::validate;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine with the naming filters the
/// template tree relies on (`slug`, `camelcase`, `pascalcase`).
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_filter("slug", |value: String| validate::slug(&value));
        env.add_filter("camelcase", |value: String| validate::camel_case(&value));
        env.add_filter("pascalcase", |value: String| validate::pascal_case(&value));
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let mut env = self.env.clone();
        env.add_template("temp", template)?;
        let tmpl = env.get_template("temp")?;
        Ok(tmpl.render(context)?)
    }
}
