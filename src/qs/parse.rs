use std::borrow::Cow;

use super::decode::decode_component;

/// Ordered `(key, raw value)` pairs as they appear in the input.
///
/// Keys are unescaped. Values are left exactly as they were written, since
/// only the field handler knows how to read them.
pub type Pairs<'qs> = Vec<(Cow<'qs, str>, &'qs str)>;

/// Splits a querystring into its pairs.
///
/// - a leading `?` is ignored
/// - empty segments (`a=1&&b=2`) are skipped
/// - a key without `=` gets an empty value
/// - the value runs from the first `=` to the next `&`, so it may itself
///   contain `=`
pub fn parse(input: &str) -> Pairs<'_> {
    let input = input.strip_prefix('?').unwrap_or(input);
    input
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (decode_component(key), value),
            None => (decode_component(segment), ""),
        })
        .collect()
}

/// Returns the raw value of the first pair named `key`.
pub fn get<'qs>(pairs: &[(Cow<'qs, str>, &'qs str)], key: &str) -> Option<&'qs str> {
    pairs
        .iter()
        .find(|(candidate, _)| candidate == key)
        .map(|(_, value)| *value)
}
