//! Splitting of raw query values into operator prefix and list items.

use winnow::combinator::separated;
use winnow::prelude::*;
use winnow::token::{rest, take_till};

// winnow's own result alias has moved between releases
type PResult<T> = Result<T, winnow::error::ErrMode<winnow::error::ContextError>>;

/// `prefix:operand`, split on the first colon. The operand may hold more colons.
fn lex_operator<'a>(input: &mut &'a str) -> PResult<(&'a str, &'a str)> {
    let prefix = take_till(0.., ':').parse_next(input)?;
    ':'.parse_next(input)?;
    let operand = rest.parse_next(input)?;
    Ok((prefix, operand))
}

/// `item ("," item)*`. Items may be empty.
fn lex_list<'a>(input: &mut &'a str) -> PResult<Vec<&'a str>> {
    separated(1.., take_till(0.., ','), ',').parse_next(input)
}

/// Split `value` into `(prefix, operand)` at its first colon.
///
/// Returns `None` when the value has no colon. Whether the prefix is a
/// comparator token is the caller's decision.
pub fn split_operator(value: &str) -> Option<(&str, &str)> {
    let mut input = value;
    lex_operator(&mut input).ok()
}

/// Split `value` on every comma, keeping empty items.
///
/// Returns `None` when the value has no comma.
pub fn split_list(value: &str) -> Option<Vec<&str>> {
    if !value.contains(',') {
        return None;
    }
    let mut input = value;
    let items = lex_list(&mut input).ok()?;
    input.is_empty().then_some(items)
}
