//! The `{ok, error, ...}` response envelope.
//!
//! A response counts as successful only when its body is a JSON object with
//! `ok: true`. Anything else is a failure: the server's `error` message when
//! one is present and non-empty, otherwise a generic status-coded message.
//! A body that is not JSON at all is treated as an empty object.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::KhError;

/// Decode a raw response into `T`, enforcing the envelope rules.
///
/// `T` is deserialized from the whole body, so its fields sit next to `ok`.
///
/// # Errors
///
/// - [`KhError::Server`] when `ok` is not `true` and `error` is set
/// - [`KhError::Status`] when `ok` is not `true` and there is no `error`
/// - [`KhError::Decode`] when `ok` is `true` but the payload doesn't match `T`
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, KhError> {
    let value = serde_json::from_slice::<Value>(body)
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

    if value.get("ok") == Some(&Value::Bool(true)) {
        return serde_json::from_value(value).map_err(KhError::Decode);
    }

    match value.get("error").and_then(Value::as_str) {
        Some(message) if !message.is_empty() => Err(KhError::Server {
            message: message.to_string(),
        }),
        _ => Err(KhError::Status { status }),
    }
}
