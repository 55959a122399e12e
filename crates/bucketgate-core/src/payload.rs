//! Base64 payload decoding for uploads.

use base64::Engine;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use bytes::Bytes;

use crate::error::{HandlerError, HandlerResult};

/// Standard alphabet with required padding that tolerates non-zero bits in
/// the last symbol.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decode a standard, padded Base64 payload into raw bytes.
///
/// ASCII whitespace (line wrapping added by many encoders) is ignored, and
/// so are unused bits in the final symbol. Padding is still required.
///
/// # Errors
///
/// Returns [`HandlerError::InvalidEncoding`] when the input is not valid
/// Base64.
///
/// # Examples
///
/// ```
/// use bucketgate_core::payload::decode_base64;
///
/// assert_eq!(decode_base64("aGVsbG8=").unwrap().as_ref(), b"hello");
/// assert!(decode_base64("not base64!").is_err());
/// ```
pub fn decode_base64(encoded: &str) -> HandlerResult<Bytes> {
    let compact: String;
    let input = if encoded.bytes().any(|b| b.is_ascii_whitespace()) {
        compact = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        compact.as_str()
    } else {
        encoded
    };

    LENIENT_STANDARD
        .decode(input)
        .map(Bytes::from)
        .map_err(|e| HandlerError::InvalidEncoding(e.to_string()))
}
