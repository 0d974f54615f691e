//! Data URL Parser
//!
//! Splits `data:<metadata>,<payload>` strings, validates the payload against
//! the standard base64 alphabet and decodes it into raw bytes. Validation is
//! fail-fast with a distinct error per failure mode.

use crate::{DataClipError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::borrow::Cow;

/// Scheme prefix every accepted input must start with
pub const DATA_URL_PREFIX: &str = "data:";

/// Maximum number of payload characters echoed back in decode errors
pub const PAYLOAD_PREVIEW_LIMIT: usize = 50;

/// Parses `data:` URLs and decodes their base64 payloads
pub struct DataUrlParser;

impl DataUrlParser {
    /// Extract the payload substring from a data URL.
    ///
    /// The metadata between the scheme prefix and the separator comma
    /// (e.g. `audio/ogg;base64`) is accepted but not interpreted.
    pub fn extract_payload(input: &str) -> Result<&str> {
        if input.is_empty() {
            return Err(DataClipError::InvalidDataUrl("input is empty".to_string()));
        }

        if !input.starts_with(DATA_URL_PREFIX) {
            return Err(DataClipError::InvalidDataUrl(format!(
                "missing '{DATA_URL_PREFIX}' prefix"
            )));
        }

        let comma = match input.find(',') {
            Some(pos) => pos,
            None => {
                return Err(DataClipError::InvalidDataUrl(
                    "no ',' separator after the metadata".to_string(),
                ))
            }
        };

        let payload = &input[comma + 1..];
        if payload.is_empty() {
            return Err(DataClipError::InvalidDataUrl(
                "payload after ',' is empty".to_string(),
            ));
        }

        Ok(payload)
    }

    /// Check that a payload uses only the standard base64 alphabet.
    ///
    /// Trailing `=` padding is stripped before the alphabet check; at most
    /// two padding characters are allowed.
    pub fn validate_payload(payload: &str) -> Result<()> {
        let stripped = payload.trim_end_matches('=');
        let padding = payload.len() - stripped.len();
        if padding > 2 {
            return Err(DataClipError::InvalidPayload(format!(
                "{padding} trailing padding characters (at most 2 allowed)"
            )));
        }

        for (pos, ch) in stripped.char_indices() {
            if !ch.is_ascii_alphanumeric() && ch != '+' && ch != '/' {
                return Err(DataClipError::InvalidPayload(format!(
                    "character {ch:?} at offset {pos} is outside the base64 alphabet"
                )));
            }
        }

        Ok(())
    }

    /// Append `=` padding until the payload length is a multiple of four.
    ///
    /// Data-URL producers commonly omit trailing padding; already aligned
    /// payloads are returned unchanged, so repairing twice is a no-op.
    pub fn repair_padding(payload: &str) -> Cow<'_, str> {
        match payload.len() % 4 {
            0 => Cow::Borrowed(payload),
            rem => {
                let missing = 4 - rem;
                let mut repaired = String::with_capacity(payload.len() + missing);
                repaired.push_str(payload);
                for _ in 0..missing {
                    repaired.push('=');
                }
                Cow::Owned(repaired)
            }
        }
    }

    /// Decode a validated payload into raw bytes.
    ///
    /// An engine rejection despite the alphabet check passing (a residual
    /// character group that cannot encode bytes) is reported as
    /// [`DataClipError::DecodeFailed`] with a bounded preview of the payload.
    pub fn decode_payload(payload: &str) -> Result<Vec<u8>> {
        let repaired = Self::repair_padding(payload);

        BASE64.decode(repaired.as_ref()).map_err(|e| {
            let preview: String = payload.chars().take(PAYLOAD_PREVIEW_LIMIT).collect();
            DataClipError::DecodeFailed(format!(
                "{e} (payload starts {preview:?}, {} characters)",
                payload.len()
            ))
        })
    }

    /// Run the full validation and decoding sequence on a data URL.
    pub fn decode(input: &str) -> Result<Vec<u8>> {
        let payload = Self::extract_payload(input)?;
        Self::validate_payload(payload)?;
        Self::decode_payload(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    #[test]
    fn test_empty_input_rejected() {
        let result = DataUrlParser::extract_payload("");
        assert!(matches!(result, Err(DataClipError::InvalidDataUrl(_))));
    }

    #[test]
    fn test_missing_prefix_rejected() {
        let result = DataUrlParser::extract_payload("audio/ogg;base64,QUJD");
        assert!(matches!(result, Err(DataClipError::InvalidDataUrl(_))));
    }

    #[test]
    fn test_missing_comma_rejected() {
        let result = DataUrlParser::extract_payload("data:audio/ogg;base64");
        assert!(matches!(result, Err(DataClipError::InvalidDataUrl(_))));
    }

    #[test]
    fn test_trailing_comma_rejected() {
        let result = DataUrlParser::extract_payload("data:audio/ogg;base64,");
        assert!(matches!(result, Err(DataClipError::InvalidDataUrl(_))));
    }

    #[test]
    fn test_metadata_is_ignored() {
        let payload = DataUrlParser::extract_payload("data:anything at all,QUJD").unwrap();
        assert_eq!(payload, "QUJD");
    }

    #[test]
    fn test_validate_accepts_full_alphabet() {
        let payload = "ABCXYZabcxyz0189+/";
        assert!(DataUrlParser::validate_payload(payload).is_ok());
    }

    #[test]
    fn test_validate_accepts_up_to_two_pads() {
        assert!(DataUrlParser::validate_payload("QUJD").is_ok());
        assert!(DataUrlParser::validate_payload("QUI=").is_ok());
        assert!(DataUrlParser::validate_payload("QQ==").is_ok());
    }

    #[test]
    fn test_validate_rejects_three_pads() {
        let result = DataUrlParser::validate_payload("Q===");
        assert!(matches!(result, Err(DataClipError::InvalidPayload(_))));
    }

    #[test]
    fn test_validate_rejects_foreign_characters() {
        for payload in ["QU JD", "QU-JD", "QU_JD", "QU\nJD", "QUJD!"] {
            let result = DataUrlParser::validate_payload(payload);
            assert!(
                matches!(result, Err(DataClipError::InvalidPayload(_))),
                "payload {payload:?} should have been rejected"
            );
        }
    }

    #[test]
    fn test_validate_rejects_interior_padding() {
        // '=' is only legal as trailing padding
        let result = DataUrlParser::validate_payload("QQ==QQ==");
        assert!(matches!(result, Err(DataClipError::InvalidPayload(_))));
    }

    #[test]
    fn test_repair_padding_lengths() {
        assert_eq!(DataUrlParser::repair_padding("QUJD"), "QUJD");
        assert_eq!(DataUrlParser::repair_padding("QUJDR"), "QUJDR===");
        assert_eq!(DataUrlParser::repair_padding("QUJDRU"), "QUJDRU==");
        assert_eq!(DataUrlParser::repair_padding("QUJDRUY"), "QUJDRUY=");
    }

    #[test]
    fn test_repair_padding_is_idempotent() {
        for payload in ["QQ", "QUI", "QUJD", "QUI="] {
            let once = DataUrlParser::repair_padding(payload).into_owned();
            let twice = DataUrlParser::repair_padding(&once).into_owned();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_decode_round_trip() {
        let original: Vec<u8> = (0u8..=255).collect();
        let payload = BASE64.encode(&original);
        let url = format!("data:audio/ogg;base64,{payload}");
        assert_eq!(DataUrlParser::decode(&url).unwrap(), original);
    }

    #[test]
    fn test_decode_round_trip_without_padding() {
        let original = b"clipped audio payload!".to_vec();
        let payload = BASE64.encode(&original);
        let bare = payload.trim_end_matches('=');
        assert!(bare.len() < payload.len());
        let url = format!("data:audio/ogg;base64,{bare}");
        assert_eq!(DataUrlParser::decode(&url).unwrap(), original);
    }

    #[test]
    fn test_residual_group_fails_decode() {
        // A lone character passes the alphabet check but cannot encode
        // any bytes once repaired to "Q===".
        let result = DataUrlParser::decode("data:audio/ogg;base64,Q");
        assert!(matches!(result, Err(DataClipError::DecodeFailed(_))));
    }

    #[test]
    fn test_decode_error_preview_is_bounded() {
        let payload: String = std::iter::repeat('Q').take(4 * 40 + 1).collect();
        let url = format!("data:audio/ogg;base64,{payload}");
        let err = DataUrlParser::decode(&url).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(&payload[..PAYLOAD_PREVIEW_LIMIT]));
        assert!(!message.contains(&payload));
        assert!(message.contains("161 characters"));
    }
}
