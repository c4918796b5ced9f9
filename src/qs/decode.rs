use std::borrow::Cow;

#[inline(always)]
fn char_to_digit(c: u8) -> Option<u32> {
    char::from(c).to_digit(16)
}

/// Decodes the input bytes, applying the following:
/// - Replaces `+` with a space
/// - Decodes percent-encoded characters
///
/// Malformed escapes (a `%` not followed by two hex digits) are kept
/// verbatim.
fn decode(input: &[u8]) -> Cow<'_, [u8]> {
    if !input.iter().any(|&b| b == b'+' || b == b'%') {
        return Cow::Borrowed(input);
    }

    let mut bytes_iter = input.iter().enumerate();

    let mut decoded = Vec::with_capacity(input.len());
    let mut last_segment = 0;

    while let Some((idx, &b)) = bytes_iter.next() {
        if b == b'+' {
            decoded.extend_from_slice(&input[last_segment..idx]);
            decoded.push(b' ');
            last_segment = idx + 1;
        } else if b == b'%' {
            // if either of the next two bytes is not a hex digit
            // we skip over the invalid escape and leave it in place
            let Some(h) = bytes_iter.next().and_then(|(_, b)| char_to_digit(*b)) else {
                continue;
            };
            let Some(l) = bytes_iter.next().and_then(|(_, b)| char_to_digit(*b)) else {
                continue;
            };

            decoded.extend_from_slice(&input[last_segment..idx]);

            let decoded_byte = h as u8 * 0x10 + l as u8;
            decoded.push(decoded_byte);
            last_segment = idx + 3;
        }
    }

    decoded.extend_from_slice(&input[last_segment..]);
    Cow::Owned(decoded)
}

/// Unescapes a key or a field value.
///
/// Invalid UTF-8 produced by the escapes is replaced with U+FFFD.
pub fn decode_component(input: &str) -> Cow<'_, str> {
    match decode(input.as_bytes()) {
        Cow::Borrowed(_) => Cow::Borrowed(input),
        Cow::Owned(bytes) => match String::from_utf8(bytes) {
            Ok(string) => Cow::Owned(string),
            Err(err) => Cow::Owned(String::from_utf8_lossy(err.as_bytes()).into_owned()),
        },
    }
}
