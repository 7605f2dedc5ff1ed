use crate::{
    foundation::{
        core::{ExportRange, FrameIndex},
        error::{LottieSeqError, LottieSeqResult},
    },
    lottie::data_uri::encode_svg_data_uri,
    svg::dimensions::Dimensions,
};

/// Lottie format version written to `v`.
pub const LOTTIE_VERSION: &str = "5.5.2";
/// Lottie layer type code for image layers.
pub const IMAGE_LAYER_TYPE: u8 = 2;
/// Asset kind marker for image-sequence assets.
pub const SEQUENCE_ASSET_KIND: &str = "seq";

/// A Lottie animation made of one embedded image per frame.
///
/// Field order matches the serialized key order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LottieDocument {
    /// Format version (`v`).
    #[serde(rename = "v")]
    pub version: String,
    /// Frames per second (`fr`).
    #[serde(rename = "fr")]
    pub frame_rate: u32,
    /// Play-in frame (`ip`), always 0.
    #[serde(rename = "ip")]
    pub in_point: u64,
    /// Play-out frame (`op`), `frame_count - 1`.
    #[serde(rename = "op")]
    pub out_point: u64,
    /// Canvas width (`w`).
    #[serde(rename = "w")]
    pub width: f64,
    /// Canvas height (`h`).
    #[serde(rename = "h")]
    pub height: f64,
    /// One asset per frame, in frame order.
    pub assets: Vec<ImageAsset>,
    /// One layer per frame, in frame order.
    pub layers: Vec<ImageLayer>,
}

/// An embedded SVG frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageAsset {
    /// Asset id referenced by layers.
    pub id: String,
    /// Display name.
    #[serde(rename = "nm")]
    pub name: String,
    /// Directory prefix; empty for embedded assets.
    #[serde(rename = "u")]
    pub dir: String,
    /// `data:` URI carrying the SVG text.
    #[serde(rename = "p")]
    pub path: String,
    /// `1` when `p` is embedded.
    #[serde(rename = "e")]
    pub embedded: u8,
    /// Declared frame width.
    #[serde(rename = "w")]
    pub width: f64,
    /// Declared frame height.
    #[serde(rename = "h")]
    pub height: f64,
    /// Asset kind.
    #[serde(rename = "t")]
    pub kind: String,
}

/// An image layer visible for exactly one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageLayer {
    /// Display name.
    #[serde(rename = "nm")]
    pub name: String,
    /// Hidden flag.
    #[serde(rename = "hd")]
    pub hidden: bool,
    /// Layer type code.
    #[serde(rename = "ty")]
    pub layer_type: u8,
    /// First frame the layer is visible (inclusive).
    #[serde(rename = "ip")]
    pub in_point: u64,
    /// Frame the layer stops being visible (exclusive).
    #[serde(rename = "op")]
    pub out_point: u64,
    /// Start time in seconds.
    #[serde(rename = "st")]
    pub start_time: f64,
    /// Transform; always empty.
    #[serde(rename = "ks")]
    pub transform: serde_json::Map<String, serde_json::Value>,
    /// Auto-orient flag.
    #[serde(rename = "ao")]
    pub auto_orient: u8,
    /// Id of the displayed asset.
    #[serde(rename = "refId")]
    pub ref_id: String,
}

impl ImageAsset {
    /// Embed `svg` as the asset `id`.
    pub fn embedded_svg(id: String, svg: &str, dims: Dimensions) -> Self {
        Self {
            name: id.clone(),
            id,
            dir: String::new(),
            path: encode_svg_data_uri(svg),
            embedded: 1,
            width: dims.width,
            height: dims.height,
            kind: SEQUENCE_ASSET_KIND.to_string(),
        }
    }
}

impl ImageLayer {
    /// A layer showing `asset_id` during `[frame, frame + 1)`.
    ///
    /// In/out points keep the host frame numbers; they are not rebased to 0.
    pub fn single_frame(range: ExportRange, frame: FrameIndex, asset_id: String) -> Self {
        Self {
            name: format!("frame_{}", frame.0),
            hidden: false,
            layer_type: IMAGE_LAYER_TYPE,
            in_point: frame.0,
            out_point: frame.0 + 1,
            start_time: range.start_time_secs(frame),
            transform: serde_json::Map::new(),
            auto_orient: 0,
            ref_id: asset_id,
        }
    }
}

impl LottieDocument {
    /// Number of frames (one per layer).
    pub fn frame_count(&self) -> usize {
        self.layers.len()
    }

    /// Canvas size as [`Dimensions`].
    pub fn canvas(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Compact JSON bytes.
    pub fn to_json_vec(&self) -> LottieSeqResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| LottieSeqError::serde(format!("serialize lottie document: {e}")))
    }

    /// Parse a document previously produced by this crate.
    pub fn from_json(bytes: &[u8]) -> LottieSeqResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| LottieSeqError::serde(format!("parse lottie document: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lottie/model.rs"]
mod tests;
