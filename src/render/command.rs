use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{
    foundation::{
        core::FrameIndex,
        error::{LottieSeqError, LottieSeqResult},
    },
    render::FrameRenderer,
};

/// Renders each frame by running an external program, typically a headless host.
///
/// `{frame}` and `{out}` in the arguments are replaced with the frame number and the target
/// path. The program is expected to seek to the frame, export the active drawable with fills
/// kept and stroke sampling disabled, and overwrite `{out}`.
#[derive(Clone, Debug)]
pub struct CommandRenderer {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandRenderer {
    /// Run `program` with `args` once per frame.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Arguments for `frame` with placeholders substituted.
    pub fn args_for(&self, frame: FrameIndex, target: &Path) -> Vec<String> {
        let frame = frame.0.to_string();
        let out = target.to_string_lossy();
        self.args
            .iter()
            .map(|a| a.replace("{frame}", &frame).replace("{out}", &out))
            .collect()
    }
}

impl FrameRenderer for CommandRenderer {
    fn name(&self) -> &str {
        "command"
    }

    fn render(&mut self, frame: FrameIndex, target: &Path) -> LottieSeqResult<()> {
        let output = Command::new(&self.program)
            .args(self.args_for(frame, target))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                let hint = if e.kind() == ErrorKind::NotFound {
                    " (is it installed and on PATH?)"
                } else {
                    ""
                };
                LottieSeqError::render_unavailable(
                    frame,
                    format!("failed to spawn '{}'{hint}: {e}", self.program.display()),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LottieSeqError::render_failed(
                frame,
                format!(
                    "'{}' exited with status {}: {}",
                    self.program.display(),
                    output.status,
                    stderr.trim()
                ),
            ));
        }
        if !target.is_file() {
            return Err(LottieSeqError::render_failed(
                frame,
                format!(
                    "'{}' succeeded but wrote nothing to '{}'",
                    self.program.display(),
                    target.display()
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/command.rs"]
mod tests;
