use anyhow::Context as _;

use crate::{
    export::transient::TransientDir,
    foundation::{
        cancel::CancelToken,
        core::ExportRange,
        error::{LottieSeqError, LottieSeqResult},
    },
    render::FrameRenderer,
    svg::{
        clean::strip_renderer_boilerplate,
        optimize::{OptimizeOptions, SvgOptimizer},
    },
};

/// Counters for one export pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Frames written to the transient directory.
    pub frames_written: u64,
    /// Bytes written across all frames.
    pub bytes_written: u64,
}

/// Render every frame of `range` into `dir`.
///
/// Creates `dir` (it must not exist) before the renderer is consulted, then per frame: render, strip renderer boilerplate,
/// optionally optimize with the fixed [`OptimizeOptions`], and overwrite the frame file.
///
/// When the renderer turns out to be unavailable the directory this call created is removed.
/// Any other failure leaves it in place.
#[tracing::instrument(skip(dir, renderer, optimizer, cancel), fields(dir = %dir.path().display()))]
pub fn export_sequence(
    range: ExportRange,
    dir: &TransientDir,
    renderer: &mut dyn FrameRenderer,
    optimizer: Option<&dyn SvgOptimizer>,
    cancel: &CancelToken,
) -> LottieSeqResult<ExportStats> {
    dir.create()?;

    let exported = renderer
        .ensure_available(range.start)
        .and_then(|()| export_frames(range, dir, renderer, optimizer, cancel));
    match exported {
        Err(err @ LottieSeqError::RenderUnavailable { .. }) => {
            if let Err(cleanup) = dir.remove() {
                tracing::warn!(error = %cleanup, "failed to remove transient directory");
            }
            Err(err)
        }
        other => other,
    }
}

fn export_frames(
    range: ExportRange,
    dir: &TransientDir,
    renderer: &mut dyn FrameRenderer,
    optimizer: Option<&dyn SvgOptimizer>,
    cancel: &CancelToken,
) -> LottieSeqResult<ExportStats> {
    let opts = OptimizeOptions::default();
    let mut stats = ExportStats::default();

    for frame in range.frames() {
        cancel.check(frame)?;

        let path = dir.frame_path(frame);
        renderer.render(frame, &path)?;

        let rendered = std::fs::read_to_string(&path)
            .with_context(|| format!("read rendered frame {frame} from '{}'", path.display()))?;
        let mut svg = strip_renderer_boilerplate(&rendered);
        if let Some(optimizer) = optimizer {
            svg = optimizer
                .optimize(&svg, &opts)
                .map_err(|e| LottieSeqError::Optimize {
                    frame,
                    message: format!("{}: {e}", optimizer.name()),
                })?;
        }

        std::fs::write(&path, &svg)
            .with_context(|| format!("write frame {frame} to '{}'", path.display()))?;

        stats.frames_written += 1;
        stats.bytes_written += svg.len() as u64;
        tracing::debug!(%frame, bytes = svg.len(), renderer = renderer.name(), "exported frame");
    }

    tracing::info!(
        frames = stats.frames_written,
        bytes = stats.bytes_written,
        optimized = optimizer.is_some(),
        "exported frame sequence"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/export/sequence.rs"]
mod tests;
