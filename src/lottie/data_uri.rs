use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::foundation::error::{LottieSeqError, LottieSeqResult};

/// MIME type of embedded frames.
pub const SVG_MIME: &str = "image/svg+xml";

/// `data:image/svg+xml;base64,...` for the exact bytes of `svg`.
pub fn encode_svg_data_uri(svg: &str) -> String {
    format!(
        "data:{SVG_MIME};base64,{}",
        BASE64_STANDARD.encode(svg.as_bytes())
    )
}

/// A decoded base64 `data:` URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedDataUri {
    /// Media type, e.g. `image/svg+xml`.
    pub mime: String,
    /// Decoded payload.
    pub bytes: Vec<u8>,
}

/// Decode a base64 `data:` URI. Non-base64 URIs are rejected.
pub fn decode_data_uri(uri: &str) -> LottieSeqResult<DecodedDataUri> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| LottieSeqError::validation("not a data URI"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| LottieSeqError::validation("data URI has no payload separator"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| LottieSeqError::validation("data URI is not base64-encoded"))?;
    let bytes = BASE64_STANDARD
        .decode(payload)
        .map_err(|e| LottieSeqError::validation(format!("invalid base64 payload: {e}")))?;
    Ok(DecodedDataUri {
        mime: mime.to_string(),
        bytes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/lottie/data_uri.rs"]
mod tests;
