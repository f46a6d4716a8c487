//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use super::ast::{Expr, Term};
use super::error::InterpolationError;
use super::lexer::{lex, Token};

/// Parse an interpolation expression into an [`Expr`]
pub fn parse(input: &str) -> Result<Expr, Vec<InterpolationError>> {
    let len = input.len();

    let token_iter = lex(input).map(|(tok, span)| (tok, span.into()));

    let token_stream = Stream::from_iter(token_iter)
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    expr_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

fn expr_parser<'a, I>() -> impl Parser<'a, I, Expr, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let term = select! {
        Token::String(s) => Term::Literal(s),
        Token::Rep => Term::Rep,
    };

    term.separated_by(just(Token::Amp))
        .at_least(1)
        .collect::<Vec<_>>()
        .map(Expr::new)
        .then_ignore(end())
}
