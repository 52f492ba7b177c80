/// Extension trait returning the UTF-8 encoding of a string as an owned buffer.
pub trait Utf8BytesExt {
    fn to_utf8_bytes(&self) -> Vec<u8>;
}

/// Extension trait turning raw bytes back into text.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD instead of failing, so the
/// result is always a best-effort reading of the input.
pub trait LossyStringExt {
    fn to_lossy_string(&self) -> String;
}

impl Utf8BytesExt for str {
    fn to_utf8_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl LossyStringExt for [u8] {
    fn to_lossy_string(&self) -> String {
        String::from_utf8_lossy(self).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_letter_is_single_byte() {
        assert_eq!("A".to_utf8_bytes(), vec![0x41]);
    }

    #[test]
    fn multibyte_chars_keep_full_encoding() {
        assert_eq!("é€".to_utf8_bytes(), vec![0xC3, 0xA9, 0xE2, 0x82, 0xAC]);
    }

    #[test]
    fn empty_string_has_no_bytes() {
        assert!("".to_utf8_bytes().is_empty());
    }

    #[test]
    fn lossy_string_substitutes_invalid_bytes() {
        let bytes = [b'o', b'k', 0xFF];
        assert_eq!(bytes.to_lossy_string(), "ok\u{FFFD}");
    }
}
