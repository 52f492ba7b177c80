pub mod bytes;
pub mod encoding;
pub mod log;
pub mod url;

pub use bytes::{LossyStringExt, Utf8BytesExt};
pub use encoding::{base64_decode, base64_encode};
pub use log::init_cli_logger;
pub use url::{try_url_decode, url_encode};
