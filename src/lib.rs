//! lottieseq turns a sequence of per-frame SVG drawings into a single Lottie document.
//!
//! Every frame's SVG is embedded as a base64 data-URI image asset and shown by one image layer
//! for exactly one frame. The canvas size of the resulting animation is the per-axis maximum of
//! the sizes declared by the individual frames.
//!
//! # Pipeline overview
//!
//! 1. **Export**: `FrameRenderer + ExportRange -> <output>_seq_dir/<frame>.svg`
//!    (renderer boilerplate stripped, optionally optimized)
//! 2. **Assemble**: `<frame>.svg -> (Dimensions, data URI) -> LottieDocument`
//! 3. **Write**: `LottieDocument -> JSON` at the output path, then the transient directory is
//!    removed
//!
//! Both passes run sequentially on the calling thread. Renderers mutate host state (the host's
//! current frame), so a run never renders two frames at once.
//!
//! On any per-frame failure no document is written and the transient directory is left behind
//! for inspection. [`convert`] is the one-shot entry point.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod export;
mod foundation;
mod lottie;
mod pipeline;
mod render;
mod svg;

/// Conversion parameters and application configuration.
pub mod config;
/// Tracing subscriber setup.
pub mod logging;

pub use config::{AppConfig, ConversionParams, LoggingConfig};
pub use export::sequence::{ExportStats, export_sequence};
pub use export::transient::{TRANSIENT_DIR_SUFFIX, TransientDir};
pub use foundation::cancel::CancelToken;
pub use foundation::core::{ExportRange, FrameIndex, ensure_parent_dir};
pub use foundation::error::{LottieSeqError, LottieSeqResult};
pub use lottie::assemble::{DocumentAssembler, assemble_sequence, asset_id_for};
pub use lottie::canvas::CanvasSize;
pub use lottie::data_uri::{DecodedDataUri, SVG_MIME, decode_data_uri, encode_svg_data_uri};
pub use lottie::inspect::{DocumentSummary, FrameSummary, summarize};
pub use lottie::model::{
    IMAGE_LAYER_TYPE, ImageAsset, ImageLayer, LOTTIE_VERSION, LottieDocument, SEQUENCE_ASSET_KIND,
};
pub use pipeline::{ConversionReport, convert};
pub use render::command::CommandRenderer;
pub use render::directory::{DirectoryRenderer, FramePattern};
pub use render::FrameRenderer;
pub use svg::clean::{RENDERER_BOILERPLATE, strip_renderer_boilerplate};
pub use svg::dimensions::{Dimensions, find_attribute, parse_dimensions};
pub use svg::optimize::{
    OptimizeOptions, OptimizerKind, ScourOptimizer, SvgOptimizer, UsvgOptimizer, is_scour_on_path,
    scour_version,
};
