use base64::alphabet::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{DecodeError, Engine};

/// Standard alphabet, no line wrapping. Encoding pads with `=`; decoding
/// accepts input with or without padding and ignores non-zero trailing bits.
const BASE64_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Base64-encode arbitrary bytes.
#[inline]
pub fn base64_encode(data: impl AsRef<[u8]>) -> String {
    BASE64_ENGINE.encode(data)
}

/// Decode standard Base64.
///
/// Whitespace, characters outside the alphabet and misplaced padding are all
/// rejected with a [`DecodeError`].
#[inline]
pub fn base64_decode(data: impl AsRef<[u8]>) -> Result<Vec<u8>, DecodeError> {
    BASE64_ENGINE.decode(data)
}
