//! Template registry for storing and compiling fragment templates

use std::collections::HashMap;
use std::fmt;

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
};
use serde::Serialize;
use thiserror::Error;

use super::builtin::BUILTIN_TEMPLATES;

/// Errors that can occur during template operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TemplateError {
    /// Template not found in registry
    #[error("template not found: {name}")]
    NotFound { name: String },

    /// Template text could not be compiled
    #[error("malformed template {template}: {message}")]
    Malformed { template: String, message: String },

    /// Rendering failed, usually because a placeholder had no bound value
    #[error("cannot render template {template}: {message}")]
    Render { template: String, message: String },
}

/// Wrap text in a CDATA section without altering it.
///
/// A literal `]]>` inside the text is split across two sections so it
/// cannot close the first one early.
pub fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

fn cdata_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let text = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("cdata", 0))?;
    out.write(&cdata(text))?;
    Ok(())
}

/// Registry of fragment templates, compiled on first use
pub struct TemplateRegistry {
    sources: HashMap<String, String>,
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);
        handlebars.register_helper("cdata", Box::new(cdata_helper));
        Self {
            sources: HashMap::new(),
            handlebars,
        }
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.sources.keys().collect();
        names.sort();
        f.debug_struct("TemplateRegistry")
            .field("templates", &names)
            .finish()
    }
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the fmxmlsnippet fragment templates
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, source) in BUILTIN_TEMPLATES {
            registry.sources.insert(name.to_string(), source.to_string());
        }
        registry
    }

    /// Add or replace a template source
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        let name = name.into();
        self.handlebars.unregister_template(&name);
        self.sources.insert(name, source.into());
    }

    /// Compile a template if it has not been compiled yet
    pub fn compile(&mut self, name: &str) -> Result<(), TemplateError> {
        if self.handlebars.has_template(name) {
            return Ok(());
        }
        let source = self
            .sources
            .get(name)
            .ok_or_else(|| TemplateError::NotFound {
                name: name.to_string(),
            })?;
        self.handlebars
            .register_template_string(name, source)
            .map_err(|e| TemplateError::Malformed {
                template: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Render a named template against serializable data
    pub fn render<T: Serialize>(&mut self, name: &str, data: &T) -> Result<String, TemplateError> {
        self.compile(name)?;
        self.handlebars
            .render(name, data)
            .map_err(|e| TemplateError::Render {
                template: name.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Bindings;
    use pretty_assertions::assert_eq;

    fn render(source: &str, bindings: &Bindings) -> String {
        let mut registry = TemplateRegistry::new();
        registry.insert("test", source);
        registry.render("test", bindings).unwrap()
    }

    #[test]
    fn test_value_substitution() {
        let b = Bindings::new().with("top", 10).with("left", 0);
        assert_eq!(render(r#"<Bounds top="{{top}}" left="{{ left }}"/>"#, &b), r#"<Bounds top="10" left="0"/>"#);
    }

    #[test]
    fn test_values_are_not_html_escaped() {
        let b = Bindings::new().with("field", "<Object>\"a\" & 'b'</Object>");
        assert_eq!(render("{{field}}", &b), "<Object>\"a\" & 'b'</Object>");
    }

    #[test]
    fn test_block_omitted_when_unbound() {
        let source = "<A>\n  {{#if tip}}\n  <Tip>{{tip}}</Tip>\n  {{/if}}\n</A>\n";
        assert_eq!(render(source, &Bindings::new().with_opt::<&str>("tip", None)), "<A>\n</A>\n");
        assert_eq!(
            render(source, &Bindings::new().with("tip", "hi")),
            "<A>\n  <Tip>hi</Tip>\n</A>\n"
        );
    }

    #[test]
    fn test_block_omitted_when_empty() {
        let b = Bindings::new().with("tip", "");
        assert_eq!(render("x{{#if tip}}[{{tip}}]{{/if}}y", &b), "xy");
    }

    #[test]
    fn test_inline_block_kept_inline() {
        let b = Bindings::new().with("pad", "1em");
        assert_eq!(render("a {{#if pad}}p={{pad}}{{/if}} b", &b), "a p=1em b");
    }

    #[test]
    fn test_cdata_passes_text_verbatim() {
        let b = Bindings::new().with("calc", r#""a" & <b> & 'c'"#);
        assert_eq!(
            render("{{cdata calc}}", &b),
            r#"<![CDATA["a" & <b> & 'c']]>"#
        );
    }

    #[test]
    fn test_cdata_splits_terminator() {
        assert_eq!(cdata("x]]>y"), "<![CDATA[x]]]]><![CDATA[>y]]>");
    }

    #[test]
    fn test_unbound_value_is_error() {
        let mut registry = TemplateRegistry::new();
        registry.insert("t", "{{missing}}");
        let err = registry.render("t", &Bindings::new()).unwrap_err();
        assert!(matches!(err, TemplateError::Render { ref template, .. } if template == "t"));
    }

    #[test]
    fn test_malformed_template_is_error() {
        let mut registry = TemplateRegistry::new();
        for source in ["{{#if a}}x", "{{#if a}}x{{/each}}", "{{a"] {
            registry.insert("t", source);
            assert!(
                matches!(registry.compile("t"), Err(TemplateError::Malformed { .. })),
                "{} should not compile",
                source
            );
        }
    }

    #[test]
    fn test_registry_unknown_template() {
        let mut registry = TemplateRegistry::new();
        assert!(matches!(
            registry.render("nope", &Bindings::new()),
            Err(TemplateError::NotFound { .. })
        ));
    }

    #[test]
    fn test_registry_insert_replaces() {
        let mut registry = TemplateRegistry::new();
        registry.insert("greet", "hi {{who}}");
        let b = Bindings::new().with("who", "there");
        assert_eq!(registry.render("greet", &b).unwrap(), "hi there");
        registry.insert("greet", "bye {{who}}");
        assert_eq!(registry.render("greet", &b).unwrap(), "bye there");
    }

    #[test]
    fn test_builtins_compile() {
        let mut registry = TemplateRegistry::builtin();
        for (name, _) in BUILTIN_TEMPLATES {
            assert!(registry.compile(name).is_ok(), "template {} failed to compile", name);
        }
    }
}
