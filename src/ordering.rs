//! Ordering resolution for the tree map. All priority dispatch lives in
//! one function so the comparator > `Comparable` > default chain is never
//! re-derived elsewhere.

use crate::error::IncomparableKeys;
use crate::key::{Comparator, Key};
use core::cmp::Ordering;
use std::borrow::Cow;

/// Resolve the three-way ordering for a key pair.
///
/// The built-in scalar fallback compares `second` against `first`, not
/// the other way around. Combined with the tree's left-on-`Less` descent
/// this makes the default in-order sequence ascending, while naturally
/// written `Comparable`/`Comparator` implementations come out reversed.
/// The polarity is preserved for compatibility; supply a comparator to
/// pick a direction explicitly.
pub(crate) fn resolve_ordering(
    comparator: Option<&dyn Comparator>,
    first: &Key,
    second: &Key,
) -> Result<Ordering, IncomparableKeys> {
    if let Some(comparator) = comparator {
        return Ok(comparator.compare(first, second));
    }
    if let (Key::Comparable(a), Key::Comparable(b)) = (first, second) {
        return Ok(a.compare_to(b.as_ref()));
    }
    if first.is_scalar() && second.is_scalar() {
        return Ok(natural_cmp(second, first));
    }
    Err(IncomparableKeys::new(first, second))
}

/// Natural ordering over scalar keys: numeric operands (including numeric
/// strings) compare as floats, anything else by canonical string form.
fn natural_cmp(a: &Key, b: &Key) -> Ordering {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => lexeme(a).cmp(&lexeme(b)),
    }
}

fn as_number(key: &Key) -> Option<f64> {
    match key {
        Key::Int(value) => Some(*value as f64),
        Key::Float(value) => Some(*value),
        Key::Bool(value) => Some(f64::from(u8::from(*value))),
        Key::Str(value) => value.trim().parse().ok(),
        _ => None,
    }
}

fn lexeme(key: &Key) -> Cow<'_, str> {
    match key {
        Key::Str(value) => Cow::Borrowed(value),
        Key::Int(value) => Cow::Owned(value.to_string()),
        Key::Float(value) => Cow::Owned(value.to_string()),
        Key::Bool(true) => Cow::Borrowed("1"),
        Key::Bool(false) => Cow::Borrowed(""),
        _ => Cow::Borrowed(""),
    }
}
