use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::FrameIndex,
        error::{LottieSeqError, LottieSeqResult},
    },
    render::FrameRenderer,
};

/// File name template with a single `{frame}` placeholder.
///
/// `{frame:04}` zero-pads the frame number to four digits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePattern {
    prefix: String,
    suffix: String,
    width: usize,
}

impl FramePattern {
    /// Parse a template such as `"{frame}.svg"` or `"shot_{frame:04}.svg"`.
    pub fn parse(pattern: &str) -> LottieSeqResult<Self> {
        const OPEN: &str = "{frame";
        let start = pattern.find(OPEN).ok_or_else(|| {
            LottieSeqError::validation(format!(
                "frame pattern '{pattern}' has no {{frame}} placeholder"
            ))
        })?;
        let rest = &pattern[start + OPEN.len()..];
        let close = rest.find('}').ok_or_else(|| {
            LottieSeqError::validation(format!("frame pattern '{pattern}' has an unclosed placeholder"))
        })?;

        let placeholder = &rest[..close];
        let width = match placeholder.strip_prefix(':') {
            None if placeholder.is_empty() => 0,
            Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                digits.parse::<usize>().map_err(|e| {
                    LottieSeqError::validation(format!("frame pattern '{pattern}': {e}"))
                })?
            }
            _ => {
                return Err(LottieSeqError::validation(format!(
                    "frame pattern '{pattern}' has an unsupported placeholder '{{frame{placeholder}}}'"
                )));
            }
        };

        let suffix = &rest[close + 1..];
        if suffix.contains(OPEN) {
            return Err(LottieSeqError::validation(format!(
                "frame pattern '{pattern}' has more than one placeholder"
            )));
        }

        Ok(Self {
            prefix: pattern[..start].to_string(),
            suffix: suffix.to_string(),
            width,
        })
    }

    /// File name for `frame`.
    pub fn file_name(&self, frame: FrameIndex) -> String {
        format!(
            "{}{:0width$}{}",
            self.prefix,
            frame.0,
            self.suffix,
            width = self.width
        )
    }
}

impl Default for FramePattern {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: ".svg".to_string(),
            width: 0,
        }
    }
}

/// Serves frames that a host already rendered into a directory.
#[derive(Clone, Debug)]
pub struct DirectoryRenderer {
    source_dir: PathBuf,
    pattern: FramePattern,
}

impl DirectoryRenderer {
    /// Read frames from `source_dir`, named by `pattern`.
    pub fn new(source_dir: impl Into<PathBuf>, pattern: FramePattern) -> Self {
        Self {
            source_dir: source_dir.into(),
            pattern,
        }
    }

    /// Where `frame` is expected on disk.
    pub fn source_path(&self, frame: FrameIndex) -> PathBuf {
        self.source_dir.join(self.pattern.file_name(frame))
    }
}

impl FrameRenderer for DirectoryRenderer {
    fn name(&self) -> &str {
        "directory"
    }

    fn ensure_available(&self, first_frame: FrameIndex) -> LottieSeqResult<()> {
        if !self.source_dir.is_dir() {
            return Err(LottieSeqError::render_unavailable(
                first_frame,
                format!(
                    "frame source directory '{}' does not exist",
                    self.source_dir.display()
                ),
            ));
        }
        Ok(())
    }

    fn render(&mut self, frame: FrameIndex, target: &Path) -> LottieSeqResult<()> {
        let source = self.source_path(frame);
        if !source.is_file() {
            return Err(LottieSeqError::render_failed(
                frame,
                format!("no rendered frame at '{}'", source.display()),
            ));
        }
        std::fs::copy(&source, target).with_context(|| {
            format!(
                "copy frame '{}' to '{}'",
                source.display(),
                target.display()
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/directory.rs"]
mod tests;
