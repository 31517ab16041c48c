use crate::{config::Charset, error::Error};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Serialize;
use tracing::warn;

/// Serialize `payload` to compact JSON.
///
/// Returns `None` when the payload is JSON `null`, which callers treat the
/// same as an absent payload.
pub(crate) fn to_json<T: Serialize + ?Sized>(payload: &T) -> Result<Option<String>, Error> {
    let json = serde_json::to_string(payload)?;
    Ok((json != "null").then_some(json))
}

/// URL-safe, unpadded Base64 of `json` under `charset`.
pub(crate) fn base64(json: &str, charset: Charset, key: &'static str) -> Result<String, Error> {
    let bytes = charset.bytes(json).map_err(|position| {
        warn!(key, position, "Payload is not representable in {charset:?}");
        Error::Encoding { key, position }
    })?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Decode a URL-safe, unpadded Base64 value back to its JSON text.
pub fn decode_base64(encoded: &str) -> Result<String, Error> {
    let bytes = URL_SAFE_NO_PAD.decode(encoded)?;
    Ok(String::from_utf8(bytes)?)
}

/// Render a timestamp the way it is written under `dtm`.
pub(crate) fn timestamp(value: f64) -> String {
    value.to_string()
}
