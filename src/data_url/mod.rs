//! Data URL Parsing Domain
//!
//! Validates `data:` URLs carrying base64 audio payloads and decodes them
//! into raw bytes, tolerating producers that omit trailing padding.

pub mod parser;

pub use parser::{DataUrlParser, DATA_URL_PREFIX, PAYLOAD_PREVIEW_LIMIT};

use crate::Result;

/// Convenience function to validate and decode a data URL payload
pub fn decode_data_url(input: &str) -> Result<Vec<u8>> {
    DataUrlParser::decode(input)
}
