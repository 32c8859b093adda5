//! Base64 payload decoding

use std::borrow::Cow;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::validator::ItemError;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// Standard alphabet; trailing `=` padding optional.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// URL-safe alphabet (`-` and `_`), padding optional.
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Decode an image payload.
///
/// Accepts bare base64 or a `data:<mime>;base64,<payload>` URL, in the standard or the
/// URL-safe alphabet. ASCII whitespace (line wrapping from some clients) is ignored. An
/// empty result is an error.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, ItemError> {
    let payload = strip_data_url(encoded);

    let compact: Cow<'_, str> = if payload.bytes().any(|b| b.is_ascii_whitespace()) {
        Cow::Owned(payload.chars().filter(|c| !c.is_ascii_whitespace()).collect())
    } else {
        Cow::Borrowed(payload)
    };

    // Errors report the standard alphabet's failure
    let bytes = LENIENT_STANDARD
        .decode(compact.as_bytes())
        .or_else(|e| LENIENT_URL_SAFE.decode(compact.as_bytes()).map_err(|_| e))
        .map_err(|e| ItemError::InvalidBase64(e.to_string()))?;

    if bytes.is_empty() {
        return Err(ItemError::EmptyImage);
    }

    Ok(bytes)
}

fn strip_data_url(encoded: &str) -> &str {
    if !encoded.starts_with("data:") {
        return encoded;
    }
    match encoded.split_once(";base64,") {
        Some((_, payload)) => payload,
        None => encoded,
    }
}
