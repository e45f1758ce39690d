use std::borrow::Cow;

use crate::value::Value;

/// Best-effort conversion of a raw attribute string into a typed [`Value`].
///
/// Trial order is integer, float, then case-insensitive `true` / `false`.
/// Anything else comes back as the original string. Input is not trimmed.
/// Numbers may group digits with single underscores (`1_000`).
pub fn coerce(raw: &str) -> Value {
    if let Some(number) = without_digit_separators(raw) {
        if let Ok(i) = number.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = number.parse::<f64>() {
            return Value::Float(f);
        }
    }
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::Str(raw.to_string())
}

/// Drop `_` separators, each of which must sit between two ASCII digits.
fn without_digit_separators(raw: &str) -> Option<Cow<'_, str>> {
    if !raw.contains('_') {
        return Some(Cow::Borrowed(raw));
    }
    let bytes = raw.as_bytes();
    let digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);
    let grouped = bytes
        .iter()
        .enumerate()
        .all(|(i, &b)| b != b'_' || (i > 0 && digit_at(i - 1) && digit_at(i + 1)));
    grouped.then(|| Cow::Owned(raw.replace('_', "")))
}
