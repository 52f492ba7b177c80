use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{EncodingError, Result};

pub const STRATEGY_ENV: &str = "CELLS_ENCODER_STRATEGY";
pub const CHARSET_ENV: &str = "CELLS_ENCODER_CHARSET";
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// How the encoder reaches its charset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Pick `Native` or `Named` once, when the encoder is built.
    #[default]
    Auto,
    /// Built-in UTF-8, the URL codec never falls back.
    Native,
    /// Charset looked up by its configured label; an unknown label makes the
    /// URL codec return its input unchanged.
    Named,
}

impl FromStr for Strategy {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Strategy::Auto),
            "native" => Ok(Strategy::Native),
            "named" => Ok(Strategy::Named),
            other => Err(EncodingError::Config {
                message: format!("unknown strategy '{other}', expected auto, native or named"),
            }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Auto => "auto",
            Strategy::Native => "native",
            Strategy::Named => "named",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub strategy: Strategy,
    /// Charset label used by the `Named` strategy.
    pub charset: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

impl EncoderConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: EncoderConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), strategy = %config.strategy, "loaded encoder config");
        Ok(config)
    }

    /// Apply `CELLS_ENCODER_STRATEGY` and `CELLS_ENCODER_CHARSET` when set.
    pub fn apply_env(&mut self) -> Result<()> {
        let strategy = std::env::var(STRATEGY_ENV).ok();
        let charset = std::env::var(CHARSET_ENV).ok();
        self.apply_overrides(strategy.as_deref(), charset.as_deref())
    }

    pub fn apply_overrides(&mut self, strategy: Option<&str>, charset: Option<&str>) -> Result<()> {
        if let Some(strategy) = strategy {
            self.strategy = strategy.parse()?;
        }
        if let Some(charset) = charset {
            if charset.trim().is_empty() {
                return Err(EncodingError::Config {
                    message: "charset must not be empty".to_string(),
                });
            }
            self.charset = charset.trim().to_string();
        }
        Ok(())
    }
}
