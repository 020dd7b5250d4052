//! Opaque continuation tokens
//!
//! A token is the URL-safe, unpadded base64 form of a small JSON object
//! holding both key fields. The format carries no process state, so a
//! token issued by one request can be redeemed by any later one.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;
use serde_json::json;

use crate::model::{DecodeError, TransactionKey, MAX_TIMESTAMP_LEN, MAX_USER_ID_LEN};

/// Length of `{"ts":"","user_id":""}`
const PAYLOAD_OVERHEAD: usize = 22;

/// serde_json writes a control byte as `\u00XX`
const MAX_ESCAPED_WIDTH: usize = 6;

/// Upper bound on accepted token length: the token of the longest
/// encodable key, with every key byte escaped at full width
pub const MAX_CURSOR_LEN: usize =
    base64_len(PAYLOAD_OVERHEAD + MAX_ESCAPED_WIDTH * (MAX_USER_ID_LEN + MAX_TIMESTAMP_LEN));

/// Unpadded base64 length of `bytes` input bytes
const fn base64_len(bytes: usize) -> usize {
    (bytes * 4 + 2) / 3
}

/// Exactly the two key fields, nothing else
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CursorPayload {
    user_id: String,
    ts: String,
}

/// Encodes and decodes pagination cursors
pub struct CursorCodec;

impl CursorCodec {
    /// Encodes a key. The empty key encodes to the empty string.
    pub fn encode(key: &TransactionKey) -> String {
        if key.is_empty() {
            return String::new();
        }
        let payload = json!({
            "user_id": key.user_id,
            "ts": key.timestamp,
        });
        URL_SAFE_NO_PAD.encode(payload.to_string())
    }

    /// Decodes a token. The empty string decodes to the empty key.
    pub fn decode(token: &str) -> Result<TransactionKey, DecodeError> {
        if token.is_empty() {
            return Ok(TransactionKey::empty());
        }

        if token.len() > MAX_CURSOR_LEN {
            return Err(DecodeError::CursorTooLong {
                len: token.len(),
                max: MAX_CURSOR_LEN,
            });
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| DecodeError::InvalidEncoding(e.to_string()))?;

        let payload: CursorPayload = serde_json::from_slice(&bytes)
            .map_err(|e| DecodeError::MalformedCursor(e.to_string()))?;

        Ok(TransactionKey::new(payload.user_id, payload.ts))
    }
}
