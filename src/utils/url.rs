use percent_encoding::{percent_decode, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{EncodingError, Result};

/// Bytes left as-is by form encoding, besides ASCII letters and digits.
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*');

/// Form-encode a string (`application/x-www-form-urlencoded`).
///
/// ALPHA / DIGIT / '-' / '.' / '_' / '*' are left as-is, space becomes `+`.
/// Every other character is written as `%HH` per UTF-8 byte (uppercase hex).
pub fn url_encode(value: &str) -> String {
    // A literal "%20" in the input is escaped to "%2520", so only spaces match.
    utf8_percent_encode(value, FORM).to_string().replace("%20", "+")
}

/// Decode a form-encoded string.
///
/// `+` becomes a space and `%HH` escapes are decoded as raw bytes, then the
/// whole buffer is read as UTF-8 with invalid sequences replaced by U+FFFD.
/// A `%` that is not followed by two hex digits is an error.
pub fn try_url_decode(value: &str) -> Result<String> {
    check_escapes(value.as_bytes())?;

    let plus_as_space: Vec<u8> = value
        .bytes()
        .map(|b| if b == b'+' { b' ' } else { b })
        .collect();
    Ok(percent_decode(&plus_as_space).decode_utf8_lossy().into_owned())
}

fn check_escapes(bytes: &[u8]) -> Result<()> {
    for position in (0..bytes.len()).filter(|&i| bytes[i] == b'%') {
        let well_formed = bytes
            .get(position + 1..position + 3)
            .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(EncodingError::MalformedEscape { position });
        }
    }
    Ok(())
}
