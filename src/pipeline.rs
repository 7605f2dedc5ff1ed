use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    config::ConversionParams,
    export::{sequence::export_sequence, transient::TransientDir},
    foundation::{
        cancel::CancelToken,
        core::ensure_parent_dir,
        error::{LottieSeqError, LottieSeqResult},
    },
    lottie::assemble::assemble_sequence,
    render::FrameRenderer,
    svg::{dimensions::Dimensions, optimize::SvgOptimizer},
};

/// Outcome of a successful [`convert`] run.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionReport {
    /// Where the document was written.
    pub output: PathBuf,
    /// Number of frames (assets and layers) in the document.
    pub frame_count: u64,
    /// Inferred canvas size.
    pub canvas: Dimensions,
    /// Size of the written JSON.
    pub bytes_written: u64,
    /// Total size of the exported (cleaned, optimized) frame SVGs embedded in the document.
    pub exported_svg_bytes: u64,
}

/// Convert the frames described by `params` into a Lottie document at `output`.
///
/// Runs the export pass to completion, then the assembly pass, then writes the document and
/// removes `<output>_seq_dir`. `optimizer` is only used when `params.optimize` is set.
///
/// Failure behavior:
/// - no document is written and an existing file at `output` is left untouched;
/// - the transient directory stays on disk for inspection, except on cancellation (removed)
///   and when the renderer is unavailable (removed, nothing was exported);
/// - a pre-existing transient directory is never touched.
#[tracing::instrument(skip(output, renderer, optimizer, cancel), fields(output = %output.display()))]
pub fn convert(
    params: &ConversionParams,
    output: &Path,
    renderer: &mut dyn FrameRenderer,
    optimizer: Option<&dyn SvgOptimizer>,
    cancel: &CancelToken,
) -> LottieSeqResult<ConversionReport> {
    let range = params.range()?;
    let optimizer = match (params.optimize, optimizer) {
        (false, _) => None,
        (true, Some(optimizer)) => Some(optimizer),
        (true, None) => {
            return Err(LottieSeqError::validation(
                "optimization requested but no optimizer is available",
            ));
        }
    };

    ensure_parent_dir(output)?;
    let dir = TransientDir::for_output(output);

    tracing::info!(
        start = %range.start,
        end = %range.end,
        rate = range.rate,
        renderer = renderer.name(),
        optimizer = optimizer.map(|o| o.name()).unwrap_or("none"),
        "exporting frames"
    );
    let stats =
        export_sequence(range, &dir, renderer, optimizer, cancel).map_err(|e| abandon(&dir, e))?;

    let doc = assemble_sequence(range, &dir, cancel).map_err(|e| abandon(&dir, e))?;
    let bytes = doc.to_json_vec().map_err(|e| abandon(&dir, e))?;
    write_replacing(output, &bytes).map_err(|e| abandon(&dir, e))?;

    dir.remove()?;

    let report = ConversionReport {
        output: output.to_path_buf(),
        frame_count: stats.frames_written,
        canvas: doc.canvas(),
        bytes_written: bytes.len() as u64,
        exported_svg_bytes: stats.bytes_written,
    };
    tracing::info!(
        frames = report.frame_count,
        bytes = report.bytes_written,
        svg_bytes = report.exported_svg_bytes,
        "wrote lottie document"
    );
    Ok(report)
}

/// Suffix of the sibling file a document is written to before it replaces `output`.
const PARTIAL_SUFFIX: &str = ".partial";

/// Write `bytes` next to `output`, then rename over it, so `output` is either the old file or
/// the complete new one.
fn write_replacing(output: &Path, bytes: &[u8]) -> LottieSeqResult<()> {
    let mut partial = output.as_os_str().to_owned();
    partial.push(PARTIAL_SUFFIX);
    let partial = PathBuf::from(partial);

    let written = std::fs::write(&partial, bytes)
        .with_context(|| format!("write lottie document '{}'", partial.display()))
        .and_then(|()| {
            std::fs::rename(&partial, output).with_context(|| {
                format!("move lottie document into place at '{}'", output.display())
            })
        });
    if let Err(e) = written {
        if partial.is_file() {
            std::fs::remove_file(&partial).ok();
        }
        return Err(e.into());
    }
    Ok(())
}

fn abandon(dir: &TransientDir, err: LottieSeqError) -> LottieSeqError {
    match &err {
        LottieSeqError::DirectoryExists { .. } | LottieSeqError::RenderUnavailable { .. } => {}
        LottieSeqError::Cancelled { .. } => {
            if dir.exists() {
                if let Err(cleanup) = dir.remove() {
                    tracing::warn!(error = %cleanup, "failed to remove transient directory");
                }
            }
        }
        _ => {
            if dir.exists() {
                tracing::warn!(
                    dir = %dir.path().display(),
                    "conversion failed, transient directory kept for inspection"
                );
            }
        }
    }
    err
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
