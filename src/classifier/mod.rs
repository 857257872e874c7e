//! Classifier adapter interface.
//!
//! The model maps one flattened window to a probability per gesture class.
//! Class order is fixed: index 0 is the random-gesture class, index 1 the
//! not-ok class. The ONNX-backed adapter lives in [`onnx`] (feature
//! `onnx`, on by default); the decision engine only sees the trait.

use anyhow::Result;

#[cfg(feature = "onnx")]
pub mod onnx;

#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

/// Number of gesture classes the model outputs.
pub const CLASS_COUNT: usize = 2;

/// Probability per recognized gesture class, in model output order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureProbabilities {
    /// Chance the window is an arbitrary, allowed motion. Observed but
    /// never acted on.
    pub random: f32,
    /// Chance the window is the disallowed not-ok gesture.
    pub not_ok: f32,
}

/// Maps a flattened feature window to class probabilities.
///
/// Invocation is synchronous within the pipeline tick. Any per-call
/// computation resources are scoped to the call and released on every exit
/// path. Failures are fatal for the session's detection capability and
/// must be surfaced, never swallowed.
pub trait GestureClassifier {
    fn predict(&mut self, features: &[f32]) -> Result<GestureProbabilities>;
}
