//! Loan application scoring pipeline.
//!
//! A validated [`LoanApplication`] is encoded into the fixed-order
//! [`FeatureVector`], scaled and classified by the startup-loaded
//! [`InferenceContext`], then banded into a risk tier and paired with
//! recommendation text. Every stage is pure; the only side effects are the
//! lossy-encoding warnings and inference failure logs.

pub mod domain;
pub(crate) mod encoding;
pub mod features;
pub mod import;
pub mod inference;
pub(crate) mod recommendation;
pub(crate) mod risk;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{LoanApplication, LoanAssessment, LoanDecision, RiskLevel, ValidationError};
pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use import::{ApplicationBatchScorer, BatchOutcome, ScoreImportError, ScoredRow};
pub use inference::{Inference, InferenceContext};
pub use recommendation::recommendation;
pub use risk::risk_level;
pub use router::scoring_router;
pub use service::{LoanScoringService, PredictionError};
