use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::info;

use super::classifier::{
    ClassifierArtifact, ClassifierFamily, ForestClassifier, LogisticClassifier, TreeArtifact,
    TreeNode,
};
use super::scaler::{ScalerArtifact, StandardScaler};
use super::{LoanClassifier, ModelFamily, ModelMetadata};
use crate::scoring::features::{FEATURE_COUNT, FEATURE_NAMES};
use crate::scoring::inference::InferenceContext;

pub const SCALER_FILE: &str = "scaler.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";

/// Failure to turn persisted artifacts into a usable inference context.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact {} not found", .path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("artifact {} is not valid JSON: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("artifact {} does not match the fitted feature layout: {detail}", .path.display())]
    Shape { path: PathBuf, detail: String },
}

impl ArtifactError {
    /// Missing files are an expected degraded start; the other variants point
    /// at a broken deployment.
    pub fn is_missing(&self) -> bool {
        matches!(self, ArtifactError::NotFound { .. })
    }
}

/// Read and validate both artifacts, producing the shared inference context.
pub fn load_context(artifact_dir: &Path) -> Result<InferenceContext, ArtifactError> {
    let scaler_path = artifact_dir.join(SCALER_FILE);
    let classifier_path = artifact_dir.join(CLASSIFIER_FILE);

    let scaler = build_scaler(&scaler_path, read_artifact(&scaler_path)?)?;
    let artifact: ClassifierArtifact = read_artifact(&classifier_path)?;
    let (classifier, family) = build_classifier(&classifier_path, &artifact)?;

    let metadata = ModelMetadata {
        model_version: artifact.model_version.clone(),
        family,
        trained_at: artifact.trained_at,
        loaded_at: Utc::now(),
    };

    info!(
        model_version = %metadata.model_version,
        family = metadata.family.label(),
        "loaded scaler and classifier artifacts"
    );

    Ok(InferenceContext::new(Arc::new(scaler), classifier, metadata))
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ArtifactError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&raw).map_err(|source| ArtifactError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn build_scaler(path: &Path, artifact: ScalerArtifact) -> Result<StandardScaler, ArtifactError> {
    let mean = fixed_columns(path, "mean", &artifact.mean)?;
    let scale = fixed_columns(path, "scale", &artifact.scale)?;

    if scale.iter().any(|value| *value == 0.0) {
        return Err(shape(path, "scale holds zero entries"));
    }

    if let Some(names) = &artifact.feature_names {
        if names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(shape(path, "feature_names disagree with the fitted column order"));
        }
    }

    Ok(StandardScaler::new(mean, scale))
}

fn build_classifier(
    path: &Path,
    artifact: &ClassifierArtifact,
) -> Result<(Arc<dyn LoanClassifier>, ModelFamily), ArtifactError> {
    match &artifact.family {
        ClassifierFamily::Logistic { weights, intercept } => {
            let weights = fixed_columns(path, "weights", weights)?;
            if !intercept.is_finite() {
                return Err(shape(path, "intercept is not finite"));
            }
            Ok((
                Arc::new(LogisticClassifier::new(weights, *intercept)),
                ModelFamily::Logistic,
            ))
        }
        ClassifierFamily::RandomForest { trees } => {
            if trees.is_empty() {
                return Err(shape(path, "forest holds no trees"));
            }
            for (tree_index, tree) in trees.iter().enumerate() {
                validate_tree(path, tree_index, tree)?;
            }
            Ok((
                Arc::new(ForestClassifier::new(trees.clone())),
                ModelFamily::RandomForest,
            ))
        }
    }
}

fn validate_tree(path: &Path, tree_index: usize, tree: &TreeArtifact) -> Result<(), ArtifactError> {
    if tree.nodes.is_empty() {
        return Err(shape(path, format!("tree {tree_index} holds no nodes")));
    }

    for (node_index, node) in tree.nodes.iter().enumerate() {
        match node {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= FEATURE_COUNT {
                    return Err(shape(
                        path,
                        format!(
                            "tree {tree_index} node {node_index} splits on feature {feature}, expected < {FEATURE_COUNT}"
                        ),
                    ));
                }
                if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                    return Err(shape(
                        path,
                        format!("tree {tree_index} node {node_index} references a child out of bounds"),
                    ));
                }
                if !threshold.is_finite() {
                    return Err(shape(
                        path,
                        format!("tree {tree_index} node {node_index} threshold is not finite"),
                    ));
                }
            }
            TreeNode::Leaf { value } => {
                let total = value[0] + value[1];
                if value[0] < 0.0 || value[1] < 0.0 || !total.is_finite() || total <= 0.0 {
                    return Err(shape(
                        path,
                        format!("tree {tree_index} node {node_index} leaf carries no class weight"),
                    ));
                }
            }
        }
    }

    Ok(())
}

fn fixed_columns(path: &Path, name: &str, values: &[f64]) -> Result<[f64; FEATURE_COUNT], ArtifactError> {
    if values.len() != FEATURE_COUNT {
        return Err(shape(
            path,
            format!("{name} holds {} columns, expected {FEATURE_COUNT}", values.len()),
        ));
    }
    if values.iter().any(|value| !value.is_finite()) {
        return Err(shape(path, format!("{name} holds non-finite values")));
    }

    let mut columns = [0.0; FEATURE_COUNT];
    columns.copy_from_slice(values);
    Ok(columns)
}

fn shape(path: &Path, detail: impl Into<String>) -> ArtifactError {
    ArtifactError::Shape {
        path: path.to_path_buf(),
        detail: detail.into(),
    }
}
