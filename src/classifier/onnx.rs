//! ONNX-backed gesture classifier.
//!
//! Loading builds the runtime session (the long-lived model handle,
//! released on drop); each predict call builds a 1xN input tensor, runs
//! the session, and extracts the two class probabilities. Tensors are
//! scoped to the call and freed on every exit path.

use std::path::Path;

use anyhow::{bail, Context, Result};
use ndarray::Array2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use tracing::info;

use super::{GestureClassifier, GestureProbabilities, CLASS_COUNT};

pub struct OnnxClassifier {
    session: Session,
    input_name: String,
    output_name: String,
    input_len: usize,
}

impl OnnxClassifier {
    /// Load a gesture model expecting a 1 x `input_len` input and a
    /// [`CLASS_COUNT`]-element output.
    pub fn load(model_path: &Path, input_len: usize) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(model_path)
            .with_context(|| format!("failed to load ONNX model {}", model_path.display()))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .context("gesture model declares no inputs")?;
        // The probabilities come from the model's final output layer.
        let output_name = session
            .outputs
            .last()
            .map(|o| o.name.clone())
            .context("gesture model declares no outputs")?;

        info!(
            "gesture model loaded: {} (input '{}' x{}, output '{}')",
            model_path.display(),
            input_name,
            input_len,
            output_name,
        );

        Ok(Self {
            session,
            input_name,
            output_name,
            input_len,
        })
    }
}

impl GestureClassifier for OnnxClassifier {
    fn predict(&mut self, features: &[f32]) -> Result<GestureProbabilities> {
        if features.len() != self.input_len {
            bail!(
                "feature vector length {} does not match model input length {}",
                features.len(),
                self.input_len,
            );
        }

        let input = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .context("failed to shape feature vector")?;
        let input_tensor = Tensor::from_array(input)?;
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .context("gesture model inference failed")?;

        let probs: ndarray::ArrayViewD<f32> = outputs[self.output_name.as_str()]
            .try_extract_array()
            .context("failed to extract gesture probabilities")?;
        let flat: Vec<f32> = probs.iter().copied().collect();
        if flat.len() != CLASS_COUNT {
            bail!(
                "gesture model produced {} values, expected {}",
                flat.len(),
                CLASS_COUNT,
            );
        }

        Ok(GestureProbabilities {
            random: flat[0],
            not_ok: flat[1],
        })
    }
}
