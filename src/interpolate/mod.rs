//! Per-repetition text interpolation
//!
//! Grid commands attach a tooltip, object name, and script parameter to every
//! generated repetition. Those values are written in a deliberately tiny
//! language rather than evaluated as code:
//!
//! ```text
//! expr := term ('&' term)*
//! term := "double-quoted text" | rep
//! ```
//!
//! # Example
//!
//! ```rust
//! use fmsnippet::interpolate::Interpolation;
//!
//! let name = Interpolation::parse(r#""cell_" & rep"#).unwrap();
//! assert_eq!(name.evaluate(3), "cell_3");
//! ```

pub mod ast;
pub mod error;
mod grammar;
pub mod lexer;

pub use ast::{Expr, Term};
pub use error::InterpolationError;
pub use grammar::parse;

/// A compiled interpolation, ready to evaluate for any repetition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolation {
    source: String,
    expr: Expr,
}

impl Interpolation {
    /// Compile an expression, keeping the first syntax error
    pub fn parse(source: &str) -> Result<Self, InterpolationError> {
        let expr = parse(source).map_err(|mut errs| errs.remove(0))?;
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// Compile an optional column value; blank input means "no value"
    pub fn parse_optional(source: Option<&str>) -> Result<Option<Self>, InterpolationError> {
        match source.map(str::trim) {
            Some(s) if !s.is_empty() => Self::parse(s).map(Some),
            _ => Ok(None),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn evaluate(&self, rep: u32) -> String {
        self.expr.evaluate(rep)
    }
}

/// Parse and evaluate in one step
pub fn evaluate(source: &str, rep: u32) -> Result<String, InterpolationError> {
    Interpolation::parse(source).map(|i| i.evaluate(rep))
}
