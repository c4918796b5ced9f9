//! The flat wire format underneath the codec.
//!
//! A querystring here is a sequence of `key=value` pairs joined by `&`.
//! Keys are plain names and get escaped on the way out; values arrive
//! already escaped by their [`FieldHandler`](crate::FieldHandler), so the
//! serializer writes them untouched and the parser hands them back raw.

mod decode;
mod encode;
mod parse;

pub use decode::decode_component;
pub use encode::{encode_component, encode_key};
pub use parse::{Pairs, get, parse};

/// Writes `pairs` as `key=value&...`, escaping each key.
///
/// ```
/// use indexmap::IndexMap;
/// use schema_qs::{Config, qs};
///
/// let mut pairs = IndexMap::new();
/// pairs.insert("page size".to_string(), "20".to_string());
/// pairs.insert("sort".to_string(), "name%2Cdesc".to_string());
/// assert_eq!(
///     qs::serialize(&pairs, Config::new()),
///     "page+size=20&sort=name%2Cdesc"
/// );
/// ```
pub fn serialize<K, V, I>(pairs: I, config: crate::Config) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    // a guess at the common case, as `serde_json` does
    let mut buffer = String::with_capacity(128);
    let mut first_kv = true;
    for (key, value) in pairs {
        if first_kv {
            first_kv = false;
        } else {
            buffer.push('&');
        }
        buffer.push_str(&encode_key(key.as_ref(), config.use_form_encoding));
        buffer.push('=');
        buffer.push_str(value.as_ref());
    }
    buffer
}
