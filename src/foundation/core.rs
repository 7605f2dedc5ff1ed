use std::{fmt, path::Path};

use anyhow::Context as _;

use crate::foundation::error::{LottieSeqError, LottieSeqResult};

/// A host timeline frame number.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A closed frame range plus the frame rate used for layer start times.
///
/// Unlike a playback range, `end` is inclusive: `start=1, end=3` covers frames 1, 2 and 3.
/// `rate` never resamples frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExportRange {
    /// First frame (inclusive).
    pub start: FrameIndex,
    /// Last frame (inclusive).
    pub end: FrameIndex,
    /// Frames per second.
    pub rate: u32,
}

impl ExportRange {
    /// Build a range, rejecting `rate == 0` and `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex, rate: u32) -> LottieSeqResult<Self> {
        if rate == 0 {
            return Err(LottieSeqError::validation("frame rate must be >= 1"));
        }
        if start.0 > end.0 {
            return Err(LottieSeqError::validation(format!(
                "frame range start ({start}) must be <= end ({end})"
            )));
        }
        Ok(Self { start, end, rate })
    }

    /// Number of frames in the range; always at least 1.
    pub fn frame_count(self) -> u64 {
        self.end.0 - self.start.0 + 1
    }

    /// Frames in ascending order.
    pub fn frames(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..=self.end.0).map(FrameIndex)
    }

    /// Layer start time in seconds (`frame / rate`, real division).
    pub fn start_time_secs(self, frame: FrameIndex) -> f64 {
        frame.0 as f64 / f64::from(self.rate)
    }
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> LottieSeqResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
