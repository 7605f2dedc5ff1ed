use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::foundation::{
    core::FrameIndex,
    error::{LottieSeqError, LottieSeqResult},
};

/// Cooperative cancellation flag shared between a caller and a running conversion.
///
/// Both passes check it between frames. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Fail with [`LottieSeqError::Cancelled`] if cancellation was requested before `frame`.
    pub fn check(&self, frame: FrameIndex) -> LottieSeqResult<()> {
        if self.is_cancelled() {
            return Err(LottieSeqError::Cancelled { frame });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/cancel.rs"]
mod tests;
