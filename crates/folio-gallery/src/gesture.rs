//! Horizontal swipe/drag detection for the carousel viewport.

/// Minimum horizontal travel, in CSS pixels, for a drag to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Slide step implied by a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Leftward gesture.
    Previous,
    /// Rightward gesture.
    Next,
}

impl SwipeDirection {
    /// Offset to apply to the current slide index.
    pub fn step(self) -> i64 {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

/// Tracks one press/release pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragTracker {
    start_x: Option<f64>,
}

impl DragTracker {
    pub fn press(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finish the drag. Returns a direction only if a press was recorded and
    /// the travel strictly exceeds [`SWIPE_THRESHOLD_PX`].
    pub fn release(&mut self, x: f64) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        let dx = x - start;
        if dx.abs() > SWIPE_THRESHOLD_PX {
            Some(if dx < 0.0 {
                SwipeDirection::Previous
            } else {
                SwipeDirection::Next
            })
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.start_x.is_some()
    }
}
