use std::path::PathBuf;

use crate::foundation::core::FrameIndex;

/// Convenience result type used across lottieseq.
pub type LottieSeqResult<T> = Result<T, LottieSeqError>;

/// Top-level error taxonomy used by conversion APIs.
///
/// None of these are retried. Frame-level variants carry the offending frame index.
#[derive(thiserror::Error, Debug)]
pub enum LottieSeqError {
    /// The frame renderer could not be located in the host environment.
    #[error("render unavailable (frame {frame}): {message}")]
    RenderUnavailable {
        /// Frame that was about to be rendered.
        frame: FrameIndex,
        /// Why the renderer could not be used.
        message: String,
    },

    /// The renderer was found but did not produce a frame.
    #[error("render failed (frame {frame}): {message}")]
    RenderFailed {
        /// Frame that failed to render.
        frame: FrameIndex,
        /// Renderer diagnostics.
        message: String,
    },

    /// The run-scoped transient directory already exists.
    #[error("transient directory already exists: {}", .path.display())]
    DirectoryExists {
        /// The colliding directory.
        path: PathBuf,
    },

    /// A rendered frame was empty or whitespace-only.
    #[error("empty frame {frame}: rendered SVG has no content")]
    EmptyFrame {
        /// The empty frame.
        frame: FrameIndex,
    },

    /// A rendered frame declares no `width` or `height` attribute.
    #[error("missing dimensions (frame {frame}): no `{attribute}` attribute found")]
    MissingDimensions {
        /// Frame whose SVG lacks the attribute.
        frame: FrameIndex,
        /// `"width"` or `"height"`.
        attribute: &'static str,
    },

    /// A `width`/`height` attribute is present but not a finite non-negative number.
    #[error("invalid dimensions (frame {frame}): `{attribute}` value {value:?} is not a finite non-negative number")]
    InvalidDimensions {
        /// Frame whose SVG carries the bad value.
        frame: FrameIndex,
        /// `"width"` or `"height"`.
        attribute: &'static str,
        /// The raw attribute value.
        value: String,
    },

    /// The SVG optimizer rejected a frame.
    #[error("optimize error (frame {frame}): {message}")]
    Optimize {
        /// Frame being optimized.
        frame: FrameIndex,
        /// Optimizer diagnostics.
        message: String,
    },

    /// The caller cancelled the run.
    #[error("cancelled before frame {frame}")]
    Cancelled {
        /// First frame that was not processed.
        frame: FrameIndex,
    },

    /// Invalid user-provided parameters or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LottieSeqError {
    /// Build a [`LottieSeqError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LottieSeqError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`LottieSeqError::RenderUnavailable`] value.
    pub fn render_unavailable(frame: FrameIndex, msg: impl Into<String>) -> Self {
        Self::RenderUnavailable {
            frame,
            message: msg.into(),
        }
    }

    /// Build a [`LottieSeqError::RenderFailed`] value.
    pub fn render_failed(frame: FrameIndex, msg: impl Into<String>) -> Self {
        Self::RenderFailed {
            frame,
            message: msg.into(),
        }
    }

    /// The frame this error is attributed to, if any.
    pub fn frame(&self) -> Option<FrameIndex> {
        match self {
            Self::RenderUnavailable { frame, .. }
            | Self::RenderFailed { frame, .. }
            | Self::EmptyFrame { frame }
            | Self::MissingDimensions { frame, .. }
            | Self::InvalidDimensions { frame, .. }
            | Self::Optimize { frame, .. }
            | Self::Cancelled { frame } => Some(*frame),
            Self::DirectoryExists { .. }
            | Self::Validation(_)
            | Self::Serde(_)
            | Self::Other(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
