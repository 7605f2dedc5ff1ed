use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::{
    core::FrameIndex,
    error::{LottieSeqError, LottieSeqResult},
};

/// Appended to the output path to name a run's transient directory.
pub const TRANSIENT_DIR_SUFFIX: &str = "_seq_dir";

/// Run-scoped directory holding one `<frame>.svg` per exported frame.
///
/// The name is derived from the final output path, so runs targeting different outputs never
/// share a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransientDir {
    path: PathBuf,
}

impl TransientDir {
    /// `<output>_seq_dir`.
    pub fn for_output(output: &Path) -> Self {
        let mut name = output.as_os_str().to_owned();
        name.push(TRANSIENT_DIR_SUFFIX);
        Self {
            path: PathBuf::from(name),
        }
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<dir>/<frame>.svg`.
    pub fn frame_path(&self, frame: FrameIndex) -> PathBuf {
        self.path.join(format!("{}.svg", frame.0))
    }

    /// Whether the directory is currently on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the directory; fails with [`LottieSeqError::DirectoryExists`] if it is already there.
    pub fn create(&self) -> LottieSeqResult<()> {
        match std::fs::create_dir(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(LottieSeqError::DirectoryExists {
                path: self.path.clone(),
            }),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!(
                    "create transient directory '{}'",
                    self.path.display()
                ))
                .into()),
        }
    }

    /// Delete the directory and everything in it.
    pub fn remove(&self) -> LottieSeqResult<()> {
        std::fs::remove_dir_all(&self.path).with_context(|| {
            format!("remove transient directory '{}'", self.path.display())
        })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/transient.rs"]
mod tests;
