pub mod config;
pub mod encoder;
pub mod error;
pub mod utils;

pub use config::{EncoderConfig, Strategy};
pub use encoder::{detect_strategy, CellsEncoder, CustomEncoder};
pub use error::{EncodingError, Result};
