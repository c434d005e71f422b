use super::domain::{LoanApplication, ValidationError};
use super::encoding::{encode, CategoricalField};

/// Number of columns the fitted scaler and classifier expect.
pub const FEATURE_COUNT: usize = 12;

/// Column order the artifacts were fitted on. Reordering corrupts predictions
/// without any runtime signal, so the order is pinned here and in tests.
///
/// `marital_status` (index 2) and `employment_type` (index 4) exist only to
/// keep the column count compatible with the training data; the intake schema
/// does not collect them and both stay 0.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gender",
    "age",
    "marital_status",
    "education",
    "employment_type",
    "employment_years",
    "annual_income",
    "home_ownership",
    "credit_score",
    "prior_defaults",
    "loan_amount",
    "loan_intent",
];

/// Fixed-order numeric input to the scaler and classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Encode a validated application into the fitted column order.
    ///
    /// Numeric range violations fail fast here; unknown categorical labels do
    /// not (they encode as the logged fallback code).
    pub fn from_application(application: &LoanApplication) -> Result<Self, ValidationError> {
        application.validate()?;

        let mut columns = [0.0; FEATURE_COUNT];
        columns[0] = f64::from(encode(CategoricalField::Gender, &application.gender));
        columns[1] = f64::from(application.age);
        // columns[2] stays 0.0: marital status placeholder
        columns[3] = f64::from(encode(CategoricalField::Education, &application.education));
        // columns[4] stays 0.0: employment type placeholder
        columns[5] = f64::from(application.employment_years);
        columns[6] = application.annual_income;
        columns[7] = f64::from(encode(
            CategoricalField::HomeOwnership,
            &application.home_ownership,
        ));
        columns[8] = f64::from(application.credit_score);
        columns[9] = f64::from(encode(
            CategoricalField::PriorDefaults,
            &application.prior_defaults,
        ));
        columns[10] = application.loan_amount;
        columns[11] = f64::from(encode(CategoricalField::LoanIntent, &application.loan_intent));

        Ok(Self(columns))
    }

    pub fn columns(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(columns: [f64; FEATURE_COUNT]) -> Self {
        Self(columns)
    }
}
