use tracing::{debug, warn};

use crate::config::{EncoderConfig, Strategy, DEFAULT_CHARSET};
use crate::error::{EncodingError, Result};
use crate::utils::{self, LossyStringExt, Utf8BytesExt};

/// Encoding operations the Cells client relies on.
///
/// Base64 helpers use the standard alphabet without line wrapping. The
/// `utf8_*` pair is form encoding (`URLEncoder`/`URLDecoder` style), named
/// after the charset it works in.
pub trait CustomEncoder {
    fn base64_encode(&self, data: &[u8]) -> String;

    fn base64_encode_str(&self, value: &str) -> String {
        self.base64_encode(&self.get_utf8_bytes(value))
    }

    fn base64_decode(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Base64-decode the UTF-8 bytes of `value` and read the result as UTF-8.
    ///
    /// Decoded bytes that are not valid UTF-8 are replaced, never reported.
    fn base64_decode_str(&self, value: &str) -> Result<String> {
        let decoded = self.base64_decode(&self.get_utf8_bytes(value))?;
        Ok(decoded.to_lossy_string())
    }

    fn utf8_encode(&self, value: &str) -> String;

    /// Malformed `%` escapes are reported; only an unsupported charset makes
    /// this return `value` unchanged.
    fn utf8_decode(&self, value: &str) -> Result<String>;

    fn get_utf8_bytes(&self, value: &str) -> Vec<u8>;
}

/// Charsets the `Named` strategy can resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
}

pub fn lookup_charset(label: &str) -> Result<Charset> {
    let normalized = label.trim().to_ascii_uppercase();
    match normalized.as_str() {
        "UTF-8" | "UTF8" => Ok(Charset::Utf8),
        _ => Err(EncodingError::UnsupportedCharset {
            charset: label.to_string(),
        }),
    }
}

/// Resolve `Strategy::Auto` against the configured charset.
///
/// Returns `Native` when the label names UTF-8, `Named` otherwise. Explicit
/// strategies are returned as-is.
pub fn detect_strategy(config: &EncoderConfig) -> Strategy {
    match config.strategy {
        Strategy::Auto => match lookup_charset(&config.charset) {
            Ok(Charset::Utf8) => Strategy::Native,
            Err(_) => Strategy::Named,
        },
        explicit => explicit,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Native,
    Named {
        label: String,
        charset: Option<Charset>,
    },
}

/// [`CustomEncoder`] backed by the crate's codecs.
///
/// The strategy is fixed at construction; calls never re-check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellsEncoder {
    mode: Mode,
}

impl Default for CellsEncoder {
    fn default() -> Self {
        Self { mode: Mode::Native }
    }
}

impl CellsEncoder {
    pub fn new(strategy: Strategy, charset: &str) -> Self {
        Self::from_config(&EncoderConfig {
            strategy,
            charset: charset.to_string(),
        })
    }

    pub fn from_config(config: &EncoderConfig) -> Self {
        let mode = match detect_strategy(config) {
            Strategy::Named => {
                let charset = lookup_charset(&config.charset)
                    .map_err(|err| warn!("{err}, URL encoding will return values unchanged"))
                    .ok();
                Mode::Named {
                    label: config.charset.clone(),
                    charset,
                }
            }
            _ => Mode::Native,
        };
        debug!(?mode, "encoder strategy resolved");
        Self { mode }
    }

    /// The resolved strategy, never `Auto`.
    pub fn strategy(&self) -> Strategy {
        match self.mode {
            Mode::Native => Strategy::Native,
            Mode::Named { .. } => Strategy::Named,
        }
    }

    pub fn charset_label(&self) -> &str {
        match &self.mode {
            Mode::Native => DEFAULT_CHARSET,
            Mode::Named { label, .. } => label,
        }
    }

    /// `None` when the `Named` strategy could not resolve its label.
    fn charset(&self) -> Option<Charset> {
        match &self.mode {
            Mode::Native => Some(Charset::Utf8),
            Mode::Named { charset, .. } => *charset,
        }
    }
}

impl CustomEncoder for CellsEncoder {
    fn base64_encode(&self, data: &[u8]) -> String {
        utils::base64_encode(data)
    }

    fn base64_decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(utils::base64_decode(data)?)
    }

    fn utf8_encode(&self, value: &str) -> String {
        match self.charset() {
            Some(Charset::Utf8) => utils::url_encode(value),
            None => {
                warn!(charset = self.charset_label(), "unsupported charset, value left unencoded");
                value.to_string()
            }
        }
    }

    fn utf8_decode(&self, value: &str) -> Result<String> {
        match self.charset() {
            Some(Charset::Utf8) => utils::try_url_decode(value),
            None => {
                warn!(charset = self.charset_label(), "unsupported charset, value left undecoded");
                Ok(value.to_string())
            }
        }
    }

    fn get_utf8_bytes(&self, value: &str) -> Vec<u8> {
        value.to_utf8_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin1_encoder() -> CellsEncoder {
        CellsEncoder::new(Strategy::Named, "ISO-8859-1")
    }

    #[test]
    fn auto_with_utf8_label_is_native() {
        let encoder = CellsEncoder::new(Strategy::Auto, "utf8");
        assert_eq!(encoder.strategy(), Strategy::Native);
        assert_eq!(encoder.charset_label(), "UTF-8");
    }

    #[test]
    fn auto_with_unknown_label_is_named() {
        let encoder = CellsEncoder::new(Strategy::Auto, "ISO-8859-1");
        assert_eq!(encoder.strategy(), Strategy::Named);
        assert_eq!(encoder.charset_label(), "ISO-8859-1");
    }

    #[test]
    fn explicit_native_ignores_label() {
        let encoder = CellsEncoder::new(Strategy::Native, "ISO-8859-1");
        assert_eq!(encoder.utf8_encode("a b"), "a+b");
    }

    #[test]
    fn named_utf8_encodes_like_native() {
        let named = CellsEncoder::new(Strategy::Named, "UTF-8");
        let native = CellsEncoder::default();
        let value = "dossier partagé/2024 (v2)";
        assert_eq!(named.utf8_encode(value), native.utf8_encode(value));
        assert_eq!(named.strategy(), Strategy::Named);
    }

    #[test]
    fn unsupported_charset_returns_input_unchanged() {
        let encoder = latin1_encoder();
        assert_eq!(encoder.utf8_encode("a b/é"), "a b/é");
        assert_eq!(encoder.utf8_decode("a+b%2F").unwrap(), "a+b%2F");
        assert_eq!(encoder.utf8_decode("100%").unwrap(), "100%");
    }

    #[test]
    fn unsupported_charset_keeps_base64_working() {
        let encoder = latin1_encoder();
        assert_eq!(encoder.base64_decode_str("SGVsbG8=").unwrap(), "Hello");
    }

    #[test]
    fn malformed_escape_is_reported() {
        let encoder = CellsEncoder::default();
        assert!(matches!(
            encoder.utf8_decode("50%+off"),
            Err(EncodingError::MalformedEscape { position: 2 })
        ));
        assert!(matches!(
            encoder.utf8_decode("a+b%zz"),
            Err(EncodingError::MalformedEscape { position: 3 })
        ));
    }

    #[test]
    fn named_utf8_reports_malformed_escape() {
        let encoder = CellsEncoder::new(Strategy::Named, "UTF-8");
        assert!(encoder.utf8_decode("100%").is_err());
        assert_eq!(encoder.utf8_decode("a+b%2F").unwrap(), "a b/");
    }

    #[test]
    fn base64_decode_str_is_lossy_on_invalid_utf8() {
        let encoder = CellsEncoder::default();
        // "/w==" decodes to the single byte 0xFF
        assert_eq!(encoder.base64_decode_str("/w==").unwrap(), "\u{FFFD}");
    }

    #[test]
    fn base64_decode_str_propagates_malformed_input() {
        let encoder = CellsEncoder::default();
        assert!(matches!(
            encoder.base64_decode_str("%%%"),
            Err(EncodingError::Base64(_))
        ));
    }

    #[test]
    fn base64_encode_str_uses_utf8_bytes() {
        let encoder = CellsEncoder::default();
        assert_eq!(encoder.base64_encode_str("é"), "w6k=");
    }

    #[test]
    fn lookup_charset_rejects_unknown_labels() {
        assert_eq!(lookup_charset(" utf-8 ").unwrap(), Charset::Utf8);
        assert!(matches!(
            lookup_charset("UTF-16"),
            Err(EncodingError::UnsupportedCharset { .. })
        ));
    }
}
