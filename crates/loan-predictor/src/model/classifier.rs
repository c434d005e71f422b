use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{InferenceError, LoanClassifier};
use crate::scoring::features::FEATURE_COUNT;

/// Serialized form of the trained classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierArtifact {
    pub model_version: String,
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub family: ClassifierFamily,
}

/// Supported export formats, discriminated by the `family` tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ClassifierFamily {
    Logistic { weights: Vec<f64>, intercept: f64 },
    RandomForest { trees: Vec<TreeArtifact> },
}

/// One decision tree exported as a flat node array rooted at index 0.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeArtifact {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: [f64; 2],
    },
}

/// Logistic regression over the scaled feature columns.
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    weights: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LogisticClassifier {
    pub fn new(weights: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self { weights, intercept }
    }

    fn approval_probability(&self, columns: &[f64; FEATURE_COUNT]) -> Result<f64, InferenceError> {
        let logit = self
            .weights
            .iter()
            .zip(columns.iter())
            .map(|(weight, column)| weight * column)
            .sum::<f64>()
            + self.intercept;

        if !logit.is_finite() {
            return Err(InferenceError::Predict(
                "logit overflowed to a non-finite value".to_string(),
            ));
        }

        Ok(sigmoid(logit))
    }
}

impl LoanClassifier for LogisticClassifier {
    fn predict(&self, columns: &[f64; FEATURE_COUNT]) -> Result<u8, InferenceError> {
        let proba = self.predict_proba(columns)?;
        Ok(positive_label(proba))
    }

    fn predict_proba(&self, columns: &[f64; FEATURE_COUNT]) -> Result<[f64; 2], InferenceError> {
        let approval = self.approval_probability(columns)?;
        Ok([1.0 - approval, approval])
    }
}

/// Ensemble of decision trees voting with averaged leaf distributions.
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    trees: Vec<TreeArtifact>,
}

impl ForestClassifier {
    /// The loader guarantees a non-empty ensemble with in-bounds feature and
    /// child indices; walks still guard against cycles at prediction time.
    pub fn new(trees: Vec<TreeArtifact>) -> Self {
        Self { trees }
    }
}

impl LoanClassifier for ForestClassifier {
    fn predict(&self, columns: &[f64; FEATURE_COUNT]) -> Result<u8, InferenceError> {
        let proba = self.predict_proba(columns)?;
        Ok(positive_label(proba))
    }

    fn predict_proba(&self, columns: &[f64; FEATURE_COUNT]) -> Result<[f64; 2], InferenceError> {
        if self.trees.is_empty() {
            return Err(InferenceError::Predict(
                "forest artifact holds no trees".to_string(),
            ));
        }

        let mut summed = [0.0; 2];
        for tree in &self.trees {
            let distribution = walk_tree(tree, columns)?;
            summed[0] += distribution[0];
            summed[1] += distribution[1];
        }

        let count = self.trees.len() as f64;
        Ok([summed[0] / count, summed[1] / count])
    }
}

fn walk_tree(
    tree: &TreeArtifact,
    columns: &[f64; FEATURE_COUNT],
) -> Result<[f64; 2], InferenceError> {
    let mut index = 0;
    // A well-formed tree visits each node at most once.
    for _ in 0..=tree.nodes.len() {
        match tree.nodes.get(index) {
            None => {
                return Err(InferenceError::Predict(format!(
                    "tree node index {index} out of bounds"
                )));
            }
            Some(TreeNode::Leaf { value }) => {
                let total = value[0] + value[1];
                if !total.is_finite() || total <= 0.0 {
                    return Err(InferenceError::Predict(
                        "tree leaf carries no class weight".to_string(),
                    ));
                }
                return Ok([value[0] / total, value[1] / total]);
            }
            Some(TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            }) => {
                let column = columns.get(*feature).ok_or_else(|| {
                    InferenceError::Predict(format!("split references feature index {feature}"))
                })?;
                index = if *column <= *threshold { *left } else { *right };
            }
        }
    }

    Err(InferenceError::Predict(
        "tree walk exceeded node count, structure is cyclic".to_string(),
    ))
}

fn positive_label(proba: [f64; 2]) -> u8 {
    u8::from(proba[1] > proba[0])
}

fn sigmoid(logit: f64) -> f64 {
    1.0 / (1.0 + (-logit).exp())
}
