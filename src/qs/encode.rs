use std::borrow::Cow;

use percent_encoding::AsciiSet;

/// The set escaped by JavaScript's `encodeURIComponent`: everything but
/// ASCII alphanumerics and `- _ . ! ~ * ' ( )`.
///
/// Field values go through this set. It escapes `%`, `&`, `=` and `+`
/// so a value can always be written into a pair as-is.
const COMPONENT_SET: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// As defined in https://url.spec.whatwg.org/#query-percent-encode-set
///
/// - CONTROL characters
/// - SPACE (but we'll separately encode it as `+`)
/// - U+0022 ("), U+0023 (#), U+003C (<), and U+003E (>).
///
/// plus the characters that are structural in a flat querystring.
const MINIMAL_QS_SET: &AsciiSet = &percent_encoding::CONTROLS
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    // `+` is used to represent a space in query strings
    .add(b'+')
    // keys are decoded on parse, so a literal `%` must survive
    .add(b'%')
    // key, value separator
    .add(b'=')
    // denote key-value pairs
    .add(b'&');

/// As defined in https://url.spec.whatwg.org/#application-x-www-form-urlencoded-percent-encode-set
///
/// The application/x-www-form-urlencoded percent-encode set contains all code points, except the ASCII alphanumeric,
/// U+002A (*), U+002D (-), U+002E (.), and U+005F (_).
const FORM_URLENCODED_SET: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Escapes a single field value.
pub fn encode_component(input: &str) -> String {
    percent_encoding::utf8_percent_encode(input, COMPONENT_SET).to_string()
}

/// Escapes a query key for the serializer.
///
/// ## Query-String Encoding (default)
/// Uses the minimal WHATWG query percent-encode set. Spaces are encoded
/// as `+` for better readability.
///
/// ## Form Encoding
/// Uses the stricter `application/x-www-form-urlencoded` encoding.
/// Spaces are percent-encoded as `%20`.
///
/// Borrows the input when nothing needs escaping.
pub fn encode_key(input: &str, use_form_encoding: bool) -> Cow<'_, str> {
    let set = if use_form_encoding {
        FORM_URLENCODED_SET
    } else {
        MINIMAL_QS_SET
    };
    let encoded: Cow<'_, str> = percent_encoding::utf8_percent_encode(input, set).into();
    // when using form encoding, spaces are already percent-encoded
    if !use_form_encoding && encoded.contains(' ') {
        Cow::Owned(encoded.replace(' ', "+"))
    } else {
        encoded
    }
}

#[cfg(test)]
mod test {
    use super::{encode_component, encode_key};

    #[test]
    fn component_escapes_structural_characters() {
        assert_eq!(encode_component("a&b=c+d%"), "a%26b%3Dc%2Bd%25");
        assert_eq!(encode_component("Mists of Tirna"), "Mists%20of%20Tirna");
        assert_eq!(encode_component("it's-(ok)_!~*."), "it's-(ok)_!~*.");
        assert_eq!(encode_component("a,b"), "a%2Cb");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn key_encoding_modes() {
        assert_eq!(encode_key("page size", false), "page+size");
        assert_eq!(encode_key("page size", true), "page%20size");
        assert_eq!(encode_key("a[b]", false), "a[b]");
        assert_eq!(encode_key("a[b]", true), "a%5Bb%5D");
        assert_eq!(encode_key("100%", false), "100%25");
    }
}
