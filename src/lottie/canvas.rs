use crate::{
    foundation::error::{LottieSeqError, LottieSeqResult},
    svg::dimensions::Dimensions,
};

/// Running per-axis maximum of frame sizes.
///
/// Starts unknown; an unknown extent compares below every real size, so the first observed
/// frame establishes both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasSize {
    extent: Option<Dimensions>,
}

impl CanvasSize {
    /// Canvas with no frames observed.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Grow the canvas to cover `frame`.
    pub fn observe(&mut self, frame: Dimensions) {
        self.extent = Some(match self.extent {
            None => frame,
            Some(cur) => Dimensions {
                width: cur.width.max(frame.width),
                height: cur.height.max(frame.height),
            },
        });
    }

    /// Current extent, if any frame has been observed.
    pub fn get(&self) -> Option<Dimensions> {
        self.extent
    }

    /// Final extent; an unresolved canvas invalidates the run.
    pub fn resolve(&self) -> LottieSeqResult<Dimensions> {
        self.extent.ok_or_else(|| {
            LottieSeqError::validation("canvas size unresolved: no frames were assembled")
        })
    }
}

impl FromIterator<Dimensions> for CanvasSize {
    fn from_iter<I: IntoIterator<Item = Dimensions>>(iter: I) -> Self {
        let mut canvas = Self::unknown();
        for dims in iter {
            canvas.observe(dims);
        }
        canvas
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lottie/canvas.rs"]
mod tests;
