//! Lexer for per-repetition interpolation expressions using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    /// The current repetition number
    #[token("rep")]
    Rep,

    /// Concatenation operator
    #[token("&")]
    Amp,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    String(String),

    /// Anything the grammar has no place for (digits, operators, stray quotes).
    /// Kept as a token so the parser can report it with a span.
    Unknown(String),
}

/// Strip the surrounding quotes and resolve `\"` and `\\`
fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped @ ('"' | '\\')) => out.push(escaped),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Lex input string into tokens with spans.
///
/// Unrecognized input becomes [`Token::Unknown`] rather than being dropped.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input).spanned().map(move |(tok, span)| match tok {
        Ok(t) => (t, span),
        Err(()) => (Token::Unknown(input[span.clone()].to_string()), span),
    })
}
