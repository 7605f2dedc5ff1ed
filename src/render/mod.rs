use std::path::Path;

use crate::foundation::{core::FrameIndex, error::LottieSeqResult};

pub mod command;
pub mod directory;

/// Produces one SVG document per frame.
///
/// The frame index is explicit: an implementation backed by a stateful host must position the
/// host on `frame` itself before exporting. Calls are never concurrent.
pub trait FrameRenderer {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fail with [`crate::LottieSeqError::RenderUnavailable`] if the renderer cannot be used at
    /// all. Called once before any frame is rendered.
    fn ensure_available(&self, first_frame: FrameIndex) -> LottieSeqResult<()> {
        let _ = first_frame;
        Ok(())
    }

    /// Render `frame` to an SVG file at `target`, silently overwriting any existing file.
    fn render(&mut self, frame: FrameIndex, target: &Path) -> LottieSeqResult<()>;
}
