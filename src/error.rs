use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Invalid base64 input: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Malformed percent escape at byte {position}")]
    MalformedEscape { position: usize },

    #[error("Unsupported charset: {charset}")]
    UnsupportedCharset { charset: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EncodingError>;
