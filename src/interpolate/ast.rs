//! Syntax tree for interpolation expressions

/// One operand of a concatenation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Double-quoted text, escapes already resolved
    Literal(String),
    /// The `rep` variable
    Rep,
}

/// A parsed expression: one or more terms joined by `&`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub terms: Vec<Term>,
}

impl Expr {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Produce the text for a given repetition
    pub fn evaluate(&self, rep: u32) -> String {
        let mut out = String::new();
        for term in &self.terms {
            match term {
                Term::Literal(s) => out.push_str(s),
                Term::Rep => out.push_str(&rep.to_string()),
            }
        }
        out
    }
}
