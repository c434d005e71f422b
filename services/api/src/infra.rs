use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use loan_predictor::model::{FeatureScaler, InferenceError, LoanClassifier};
use loan_predictor::scoring::FEATURE_COUNT;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Pass-through stand-in for a fitted scaler, paired with
/// [`HeuristicClassifier`] when the demo runs without artifact files.
#[derive(Debug)]
pub(crate) struct PassthroughScaler;

impl FeatureScaler for PassthroughScaler {
    fn transform(
        &self,
        columns: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; FEATURE_COUNT], InferenceError> {
        Ok(*columns)
    }
}

/// Hand-tuned approval odds over the raw feature columns. Not a trained
/// model: credit standing, debt burden, prior defaults, and tenure feed a
/// fixed logit so demo output stays deterministic.
#[derive(Debug)]
pub(crate) struct HeuristicClassifier;

impl HeuristicClassifier {
    fn approval_probability(columns: &[f64; FEATURE_COUNT]) -> f64 {
        let credit_score = columns[8];
        let annual_income = columns[6].max(1.0);
        let debt_ratio = (columns[10] / annual_income).min(2.0);
        let prior_defaults = columns[9];
        let employment_years = columns[5];

        let logit = 0.02 * (credit_score - 650.0) - 2.5 * debt_ratio - 1.5 * prior_defaults
            + 0.1 * employment_years;
        1.0 / (1.0 + (-logit).exp())
    }
}

impl LoanClassifier for HeuristicClassifier {
    fn predict(&self, columns: &[f64; FEATURE_COUNT]) -> Result<u8, InferenceError> {
        let proba = self.predict_proba(columns)?;
        Ok(u8::from(proba[1] > proba[0]))
    }

    fn predict_proba(&self, columns: &[f64; FEATURE_COUNT]) -> Result<[f64; 2], InferenceError> {
        let approval = Self::approval_probability(columns);
        Ok([1.0 - approval, approval])
    }
}
