//! Fragment templates for fmxmlsnippet output
//!
//! Every element appended to a snippet is produced by rendering a named
//! handlebars template against a set of bound attributes. Values are
//! inserted verbatim (no HTML escaping) and the registry runs in strict
//! mode, so a placeholder without a binding is an error.
//!
//! ```text
//! {{name}}                      bound value, inserted verbatim
//! {{cdata name}}                bound value inside a CDATA section
//! {{#if name}} ... {{/if}}      block emitted only when `name` is non-empty
//! ```

pub mod builtin;
mod registry;
mod resolver;

pub use registry::{cdata, TemplateError, TemplateRegistry};
pub use resolver::Bindings;
