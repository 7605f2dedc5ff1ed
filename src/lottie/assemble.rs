use anyhow::Context as _;

use crate::{
    export::transient::TransientDir,
    foundation::{
        cancel::CancelToken,
        core::{ExportRange, FrameIndex},
        error::{LottieSeqError, LottieSeqResult},
    },
    lottie::{
        canvas::CanvasSize,
        model::{ImageAsset, ImageLayer, LOTTIE_VERSION, LottieDocument},
    },
    svg::dimensions::{Dimensions, parse_dimensions},
};

/// Asset id (and display name) for `frame`: `svg_<frame>`.
pub fn asset_id_for(frame: FrameIndex) -> String {
    format!("svg_{}", frame.0)
}

/// Builds a [`LottieDocument`] one frame at a time.
///
/// Frames must be pushed in ascending order starting at `range.start`, so the resulting layers
/// tile `[start, end + 1)` without gaps or overlaps.
#[derive(Debug)]
pub struct DocumentAssembler {
    range: ExportRange,
    canvas: CanvasSize,
    assets: Vec<ImageAsset>,
    layers: Vec<ImageLayer>,
}

impl DocumentAssembler {
    /// Start an empty document for `range`.
    pub fn new(range: ExportRange) -> Self {
        let cap = range.frame_count().min(4096) as usize;
        Self {
            range,
            canvas: CanvasSize::unknown(),
            assets: Vec::with_capacity(cap),
            layers: Vec::with_capacity(cap),
        }
    }

    /// Next frame [`DocumentAssembler::push_frame`] expects.
    pub fn next_frame(&self) -> FrameIndex {
        FrameIndex(self.range.start.0 + self.layers.len() as u64)
    }

    /// Canvas accumulated so far.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Embed one frame's final SVG text and return its declared size.
    pub fn push_frame(&mut self, frame: FrameIndex, svg: &str) -> LottieSeqResult<Dimensions> {
        let expected = self.next_frame();
        if frame != expected || frame > self.range.end {
            return Err(LottieSeqError::validation(format!(
                "frame {frame} pushed out of order (expected {expected} within {}..={})",
                self.range.start, self.range.end
            )));
        }
        if svg.trim().is_empty() {
            return Err(LottieSeqError::EmptyFrame { frame });
        }

        let dims = parse_dimensions(frame, svg)?;
        self.canvas.observe(dims);

        let id = asset_id_for(frame);
        self.assets
            .push(ImageAsset::embedded_svg(id.clone(), svg, dims));
        self.layers
            .push(ImageLayer::single_frame(self.range, frame, id));
        Ok(dims)
    }

    /// Freeze the document. Every frame of the range must have been pushed.
    pub fn finish(self) -> LottieSeqResult<LottieDocument> {
        let frame_count = self.range.frame_count();
        if self.layers.len() as u64 != frame_count {
            return Err(LottieSeqError::validation(format!(
                "document incomplete: {} of {frame_count} frames assembled",
                self.layers.len()
            )));
        }
        let canvas = self.canvas.resolve()?;

        Ok(LottieDocument {
            version: LOTTIE_VERSION.to_string(),
            frame_rate: self.range.rate,
            in_point: 0,
            out_point: frame_count - 1,
            width: canvas.width,
            height: canvas.height,
            assets: self.assets,
            layers: self.layers,
        })
    }
}

/// Read back every exported frame of `range` from `dir` and build the document.
///
/// Nothing is written; the caller decides what to do with the document and the directory.
#[tracing::instrument(skip(dir, cancel), fields(dir = %dir.path().display()))]
pub fn assemble_sequence(
    range: ExportRange,
    dir: &TransientDir,
    cancel: &CancelToken,
) -> LottieSeqResult<LottieDocument> {
    let mut assembler = DocumentAssembler::new(range);
    for frame in range.frames() {
        cancel.check(frame)?;

        let path = dir.frame_path(frame);
        let svg = std::fs::read_to_string(&path)
            .with_context(|| format!("read svg for frame {frame} from '{}'", path.display()))?;
        let dims = assembler.push_frame(frame, &svg)?;
        tracing::debug!(%frame, width = dims.width, height = dims.height, "assembled frame");
    }

    let doc = assembler.finish()?;
    tracing::info!(
        frames = doc.frame_count(),
        width = doc.width,
        height = doc.height,
        "assembled lottie document"
    );
    Ok(doc)
}

#[cfg(test)]
#[path = "../../tests/unit/lottie/assemble.rs"]
mod tests;
