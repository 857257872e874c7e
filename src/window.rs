//! Displacement frames and the sliding classification window.
//!
//! The window keeps the most recent per-joint displacement frames in
//! most-recent-first order (index 0 = newest) and flattens them into the
//! classifier's input layout. Length stays within [0, capacity]; the only
//! mutators are `push_front`, `evict_oldest`, and `clear`, so the
//! invariant is enforced in one place.

use std::collections::VecDeque;

/// One time-step of motion: per-joint position delta between two
/// consecutive accepted samples.
pub type DisplacementFrame = Vec<[f32; 3]>;

/// Element-wise `current - previous` over a joint position set.
pub fn displacement(current: &[[f32; 3]], previous: &[[f32; 3]]) -> DisplacementFrame {
    debug_assert_eq!(current.len(), previous.len());
    current
        .iter()
        .zip(previous)
        .map(|(c, p)| [c[0] - p[0], c[1] - p[1], c[2] - p[2]])
        .collect()
}

// ── Sliding window ─────────────────────────────────────────

/// Fixed-capacity, most-recent-first buffer of displacement frames.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    frames: VecDeque<DisplacementFrame>,
    capacity: usize,
}

impl SlidingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Window holds `capacity` frames and is ready for classification.
    pub fn is_full(&self) -> bool {
        self.frames.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert the newest frame at index 0.
    ///
    /// Callers must only push while the window is below capacity; the
    /// decision engine always evicts or clears before the next push.
    pub fn push_front(&mut self, frame: DisplacementFrame) {
        assert!(
            self.frames.len() < self.capacity,
            "push_front on a full window (capacity {})",
            self.capacity,
        );
        self.frames.push_front(frame);
    }

    /// Remove the single oldest frame, sliding the window forward by one
    /// sample. Used after a negative classification so only one new sample
    /// is needed to re-attempt.
    pub fn evict_oldest(&mut self) {
        self.frames.pop_back();
    }

    /// Drop all frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Frame at a given age index (0 = newest).
    pub fn frame(&self, index: usize) -> Option<&DisplacementFrame> {
        self.frames.get(index)
    }

    /// Serialize the window into the classifier input layout.
    ///
    /// Frame-major, then joint, then axis: the value for frame `f`, joint
    /// `j`, axis `a` lands at `f * (J * 3) + j * 3 + a`, with frame 0 the
    /// newest. This ordering is a compatibility contract with the model's
    /// expected input and must stay bit-for-bit stable.
    pub fn flatten(&self) -> Vec<f32> {
        let per_frame: usize = self.frames.front().map(|f| f.len() * 3).unwrap_or(0);
        let mut out = Vec::with_capacity(per_frame * self.frames.len());
        for frame in &self.frames {
            for delta in frame {
                out.extend_from_slice(delta);
            }
        }
        out
    }
}

// ── Tests ──────────────────────────────────────────────────
