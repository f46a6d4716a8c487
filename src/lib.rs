//! fmsnippet - FileMaker clipboard snippets from tab-delimited text
//!
//! This library builds `fmxmlsnippet` documents (field definitions, layout
//! objects, and script steps) and moves them to and from FileMaker's
//! clipboard.
//!
//! # Example
//!
//! ```rust
//! use fmsnippet::{build, Command};
//!
//! let xml = build(Command::Sort, "Contacts::Company\tdescending").unwrap();
//! assert!(xml.starts_with(r#"<fmxmlsnippet type="FMObjectList">"#));
//! assert!(xml.contains(r#"<Sort type="Descending">"#));
//! ```

pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod interpolate;
pub mod layout;
pub mod snippet;
pub mod template;

pub use clipboard::{Automation, ClipboardBridge, ClipboardConfig, ClipboardError};
pub use commands::{run, Command};
pub use config::{ConfigError, SnippetConfig};
pub use error::Error;
pub use interpolate::{Interpolation, InterpolationError};
pub use layout::LayoutConfig;
pub use snippet::{ElementType, Snippet, SnippetError};

/// Run a command with default layout settings and serialize the result
///
/// # Example
///
/// ```rust
/// use fmsnippet::{build, Command};
///
/// let xml = build(Command::Fields, "Name_First\nName_Last").unwrap();
/// assert_eq!(xml.matches("<Field ").count(), 2);
/// ```
pub fn build(command: Command, input: &str) -> Result<String, Error> {
    build_with_config(command, input, &SnippetConfig::default())
}

/// Run a command with custom configuration and serialize the result
pub fn build_with_config(
    command: Command,
    input: &str,
    config: &SnippetConfig,
) -> Result<String, Error> {
    Ok(run(command, input, &config.layout)?.to_xml())
}
