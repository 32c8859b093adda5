//! Identifier sanitization
//!
//! Caller-supplied identifiers become path segments of storage keys, so they are reduced
//! to a small safe alphabet before use. Neither function ever fails; the "is this usable"
//! decision belongs to the caller.

use crate::constants::UNKNOWN_MOBILE_TOKEN;

/// Normalize a mobile number into a key-safe token.
///
/// Every character outside `[a-zA-Z0-9+]` becomes `_`, runs of `_` collapse to one, and
/// leading/trailing `_` are stripped. Absent or fully-stripped input yields `"unknown"`,
/// so the result is never empty.
pub fn sanitize_mobile_number(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return UNKNOWN_MOBILE_TOKEN.to_string();
    };

    let mut token = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || c == '+' {
            token.push(c);
        } else if !token.ends_with('_') {
            token.push('_');
        }
    }

    let token = token.trim_matches('_');
    if token.is_empty() {
        UNKNOWN_MOBILE_TOKEN.to_string()
    } else {
        token.to_string()
    }
}

/// Strip a UUID-like identifier down to `[a-zA-Z0-9\-_ ]` and trim surrounding spaces.
///
/// Returns `None` for absent or empty input. May return `Some("")` when every character
/// was disallowed; callers treat that the same as `None` for required identifiers.
pub fn sanitize_uuid(raw: Option<&str>) -> Option<String> {
    let raw = raw.filter(|s| !s.is_empty())?;

    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .collect();

    Some(kept.trim().to_string())
}

/// Sanitized caller identity for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedIdentity {
    pub mobile_token: String,
    pub inspection_token: Option<String>,
    pub prdp_token: Option<String>,
}

impl SanitizedIdentity {
    pub fn from_raw(
        mobile_number: Option<&str>,
        inspection_uuid: Option<&str>,
        prdp_uuid: Option<&str>,
    ) -> Self {
        Self {
            mobile_token: sanitize_mobile_number(mobile_number),
            inspection_token: sanitize_uuid(inspection_uuid),
            prdp_token: sanitize_uuid(prdp_uuid),
        }
    }

    /// Inspection token, only if it survived sanitization non-empty.
    pub fn inspection(&self) -> Option<&str> {
        self.inspection_token.as_deref().filter(|s| !s.is_empty())
    }

    /// PRDP token, only if it survived sanitization non-empty.
    pub fn prdp(&self) -> Option<&str> {
        self.prdp_token.as_deref().filter(|s| !s.is_empty())
    }
}
