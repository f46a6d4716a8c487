//! Error type for interpolation expressions

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use super::lexer::{Span, Token};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    #[error("invalid expression at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl InterpolationError {
    pub fn span(&self) -> &Span {
        match self {
            InterpolationError::Syntax { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            InterpolationError::Syntax {
                span,
                message,
                expected,
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };

                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(format!("{}{}", message, expected_str))
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for InterpolationError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match found {
                Some(tok) => format!("Unexpected {}", format_token(tok)),
                None => "Unexpected end of expression".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        InterpolationError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

fn format_token(tok: &Token) -> String {
    match tok {
        Token::Rep => "'rep'".to_string(),
        Token::Amp => "'&'".to_string(),
        Token::Ident(s) => format!("identifier '{}' (only 'rep' is defined)", s),
        Token::String(s) => format!("string \"{}\"", s),
        Token::Unknown(s) => format!("'{}'", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_message() {
        let err = InterpolationError::Syntax {
            span: 4..5,
            message: "Unexpected '+'".to_string(),
            expected: vec!["'&'".to_string()],
        };
        assert!(err.to_string().contains("Unexpected '+'"));
        assert_eq!(err.span(), &(4..5));
    }

    #[test]
    fn test_format_renders_report() {
        let err = InterpolationError::Syntax {
            span: 4..5,
            message: "Unexpected '+'".to_string(),
            expected: vec![],
        };
        let report = err.format("rep + 1", "tooltip");
        assert!(report.contains("Unexpected '+'"));
    }
}
