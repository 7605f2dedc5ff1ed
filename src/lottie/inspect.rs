use std::collections::HashMap;

use sha2::Digest as _;

use crate::{
    foundation::error::{LottieSeqError, LottieSeqResult},
    lottie::{data_uri::decode_data_uri, model::LottieDocument},
    svg::dimensions::Dimensions,
};

/// Per-frame view of a produced document.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameSummary {
    /// Layer display name.
    pub layer: String,
    /// Referenced asset id.
    pub asset_id: String,
    /// Layer in point.
    pub in_point: u64,
    /// Layer out point.
    pub out_point: u64,
    /// Layer start time in seconds.
    pub start_time: f64,
    /// Declared asset size.
    pub size: Dimensions,
    /// Payload media type.
    pub mime: String,
    /// Decoded payload length in bytes.
    pub payload_bytes: usize,
    /// SHA-256 of the decoded payload, lowercase hex.
    pub payload_sha256: String,
}

/// Structural summary of a [`LottieDocument`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DocumentSummary {
    /// Format version.
    pub version: String,
    /// Frames per second.
    pub frame_rate: u32,
    /// Play range.
    pub in_point: u64,
    /// Play range end.
    pub out_point: u64,
    /// Canvas size.
    pub canvas: Dimensions,
    /// One entry per layer, in layer order.
    pub frames: Vec<FrameSummary>,
}

/// Decode every payload and check that each layer references an existing asset.
pub fn summarize(doc: &LottieDocument) -> LottieSeqResult<DocumentSummary> {
    let assets: HashMap<&str, _> = doc.assets.iter().map(|a| (a.id.as_str(), a)).collect();

    let mut frames = Vec::with_capacity(doc.layers.len());
    for layer in &doc.layers {
        let asset = assets.get(layer.ref_id.as_str()).ok_or_else(|| {
            LottieSeqError::validation(format!(
                "layer '{}' references missing asset '{}'",
                layer.name, layer.ref_id
            ))
        })?;
        let decoded = decode_data_uri(&asset.path).map_err(|e| {
            LottieSeqError::validation(format!("asset '{}': {e}", asset.id))
        })?;

        frames.push(FrameSummary {
            layer: layer.name.clone(),
            asset_id: asset.id.clone(),
            in_point: layer.in_point,
            out_point: layer.out_point,
            start_time: layer.start_time,
            size: Dimensions::new(asset.width, asset.height),
            mime: decoded.mime,
            payload_bytes: decoded.bytes.len(),
            payload_sha256: sha256_hex(&decoded.bytes),
        });
    }

    Ok(DocumentSummary {
        version: doc.version.clone(),
        frame_rate: doc.frame_rate,
        in_point: doc.in_point,
        out_point: doc.out_point,
        canvas: doc.canvas(),
        frames,
    })
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/lottie/inspect.rs"]
mod tests;
