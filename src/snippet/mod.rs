//! The snippet document and its builder operations
//!
//! A [`Snippet`] is an ordered list of rendered XML fragments that all belong
//! to one [`ElementType`]. The type is fixed by the constructor or by the
//! first append; anything else appended afterwards is rejected.
//!
//! # Example
//!
//! ```rust
//! use fmsnippet::snippet::{FieldRef, LayoutFieldOptions, Snippet};
//!
//! let mut doc = Snippet::new();
//! let field = FieldRef::parse("Contacts::Company").unwrap();
//! doc.layout_field(&LayoutFieldOptions::new(field)).unwrap();
//!
//! let xml = doc.to_xml();
//! assert!(xml.starts_with(r#"<fmxmlsnippet type="LayoutObjectList">"#));
//! assert!(xml.contains("<Name>Contacts::Company</Name>"));
//! ```

pub mod extract;
mod field;
mod layout;
mod script;
pub mod types;

use std::fmt;

use thiserror::Error;

use crate::layout::{GridError, LayoutConfig, LayoutEngine};
use crate::template::{TemplateError, TemplateRegistry};

pub use extract::{extract_object_css, extract_object_names, ExtractError};
pub use types::*;

/// The kind of objects a snippet holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    FieldDefinitionList,
    LayoutObjectList,
    ScriptStepList,
}

impl ElementType {
    /// Value of the root element's `type` attribute
    pub fn snippet_type(&self) -> &'static str {
        match self {
            ElementType::LayoutObjectList => "LayoutObjectList",
            ElementType::FieldDefinitionList | ElementType::ScriptStepList => "FMObjectList",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::FieldDefinitionList => f.write_str("field definitions"),
            ElementType::LayoutObjectList => f.write_str("layout objects"),
            ElementType::ScriptStepList => f.write_str("script steps"),
        }
    }
}

/// Errors raised while building a snippet
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SnippetError {
    /// A required value is missing or malformed
    #[error("{}", format_input_error(.row, .column, .message))]
    InputFormat {
        row: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    /// An element of a different kind than the snippet already holds
    #[error("cannot add {found} to a snippet of {expected}")]
    TypeMismatch {
        expected: ElementType,
        found: ElementType,
    },

    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Grid dimensions whose repetitions or geometry overflow
    #[error(transparent)]
    Grid(#[from] GridError),
}

fn format_input_error(row: &Option<usize>, column: &Option<usize>, message: &str) -> String {
    match (row, column) {
        (Some(r), Some(c)) => format!("row {}, column {}: {}", r, c, message),
        (Some(r), None) => format!("row {}: {}", r, message),
        (None, Some(c)) => format!("column {}: {}", c, message),
        (None, None) => message.to_string(),
    }
}

impl SnippetError {
    /// Create an input format error with no location yet
    pub fn input(message: impl Into<String>) -> Self {
        Self::InputFormat {
            row: None,
            column: None,
            message: message.into(),
        }
    }

    /// Create an input format error pointing at a row and column (both 1-based)
    pub fn input_at(row: usize, column: usize, message: impl Into<String>) -> Self {
        Self::InputFormat {
            row: Some(row),
            column: Some(column),
            message: message.into(),
        }
    }

    /// Fill in the row of an input format error that does not have one yet
    pub fn at_row(self, row: usize) -> Self {
        match self {
            Self::InputFormat {
                row: None,
                column,
                message,
            } => Self::InputFormat {
                row: Some(row),
                column,
                message,
            },
            other => other,
        }
    }

    /// Fill in the column of an input format error that does not have one yet
    pub fn at_column(self, column: usize) -> Self {
        match self {
            Self::InputFormat {
                row,
                column: None,
                message,
            } => Self::InputFormat {
                row,
                column: Some(column),
                message,
            },
            other => other,
        }
    }
}

/// An fmxmlsnippet under construction
#[derive(Debug)]
pub struct Snippet {
    element_type: Option<ElementType>,
    fragments: Vec<String>,
    layout: LayoutEngine,
    config: LayoutConfig,
    templates: TemplateRegistry,
}

impl Default for Snippet {
    fn default() -> Self {
        Self::new()
    }
}

impl Snippet {
    /// Create an untyped snippet with default layout settings
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// Create an untyped snippet with custom layout defaults
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            element_type: None,
            fragments: Vec::new(),
            layout: LayoutEngine::new(),
            config,
            templates: TemplateRegistry::builtin(),
        }
    }

    /// Create a snippet that only accepts one kind of element
    pub fn typed(element_type: ElementType, config: LayoutConfig) -> Self {
        Self {
            element_type: Some(element_type),
            ..Self::with_config(config)
        }
    }

    pub fn element_type(&self) -> Option<ElementType> {
        self.element_type
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    /// Fix the element type on first use, reject a different one afterwards
    fn expect_type(&mut self, found: ElementType) -> Result<(), SnippetError> {
        match self.element_type {
            None => {
                self.element_type = Some(found);
                Ok(())
            }
            Some(expected) if expected == found => Ok(()),
            Some(expected) => Err(SnippetError::TypeMismatch { expected, found }),
        }
    }

    fn append(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }

    /// Serialize the whole snippet
    pub fn to_xml(&self) -> String {
        let element_type = self.element_type.unwrap_or(ElementType::FieldDefinitionList);
        let mut xml = format!(
            "<fmxmlsnippet type=\"{}\">\n",
            element_type.snippet_type()
        );
        let body: String = self.fragments.concat();
        if element_type == ElementType::LayoutObjectList {
            match self.layout.extent() {
                Some(rect) => xml.push_str(&format!(
                    "  <Layout enclosingRectTop=\"{}\" enclosingRectLeft=\"{}\" enclosingRectBottom=\"{}\" enclosingRectRight=\"{}\">\n",
                    rect.top, rect.left, rect.bottom, rect.right
                )),
                None => xml.push_str("  <Layout>\n"),
            }
            xml.push_str(&body);
            xml.push_str("  </Layout>\n");
        } else {
            xml.push_str(&body);
        }
        xml.push_str("</fmxmlsnippet>");
        xml
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snippet_xml() {
        let doc = Snippet::new();
        assert!(doc.is_empty());
        assert_eq!(
            doc.to_xml(),
            "<fmxmlsnippet type=\"FMObjectList\">\n</fmxmlsnippet>"
        );
    }

    #[test]
    fn test_first_append_fixes_type() {
        let mut doc = Snippet::new();
        doc.step_end_if().unwrap();
        assert_eq!(doc.element_type(), Some(ElementType::ScriptStepList));
    }

    #[test]
    fn test_type_mismatch() {
        let mut doc = Snippet::new();
        doc.field("Name", &FieldOptions::default()).unwrap();
        let err = doc.step_end_if().unwrap_err();
        assert_eq!(
            err,
            SnippetError::TypeMismatch {
                expected: ElementType::FieldDefinitionList,
                found: ElementType::ScriptStepList,
            }
        );
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_typed_snippet_rejects_other_kinds() {
        let mut doc = Snippet::typed(ElementType::LayoutObjectList, LayoutConfig::default());
        assert!(doc.field("Name", &FieldOptions::default()).is_err());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_input_error_locations() {
        let err = SnippetError::input("missing field").at_row(3).at_column(1);
        assert_eq!(err.to_string(), "row 3, column 1: missing field");
        // An existing location is kept
        let err = SnippetError::input_at(2, 4, "bad").at_row(9);
        assert_eq!(err.to_string(), "row 2, column 4: bad");
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = SnippetError::TypeMismatch {
            expected: ElementType::LayoutObjectList,
            found: ElementType::FieldDefinitionList,
        };
        assert_eq!(
            err.to_string(),
            "cannot add field definitions to a snippet of layout objects"
        );
    }
}
