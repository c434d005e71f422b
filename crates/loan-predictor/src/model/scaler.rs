use serde::Deserialize;

use super::{FeatureScaler, InferenceError};
use crate::scoring::features::FEATURE_COUNT;

/// Serialized form of the fitted standardization parameters.
///
/// `feature_names`, when present, is cross-checked against the pipeline's
/// column order at load time; it is the only runtime defense against an
/// artifact fitted on a different layout.
#[derive(Debug, Clone, Deserialize)]
pub struct ScalerArtifact {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

/// Mean/variance standardization fitted at training time.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// `scale` entries must be finite and non-zero; the loader enforces that
    /// before construction.
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Self {
        Self { mean, scale }
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(
        &self,
        columns: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; FEATURE_COUNT], InferenceError> {
        let mut scaled = [0.0; FEATURE_COUNT];
        for (index, value) in columns.iter().enumerate() {
            scaled[index] = (value - self.mean[index]) / self.scale[index];
            if !scaled[index].is_finite() {
                return Err(InferenceError::Transform(format!(
                    "column {index} produced a non-finite value"
                )));
            }
        }
        Ok(scaled)
    }
}
