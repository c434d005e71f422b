use serde::{Deserialize, Serialize};

/// Canonical applicant record accepted by the scoring pipeline.
///
/// Two divergent intake schemas circulated historically; this one collapses
/// them into the domain-specific field set plus the `existing_loans` count the
/// risk tiering needs. Categorical values are matched against the fitted
/// encoding vocabularies, never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub age: u8,
    pub gender: String,
    pub education: String,
    pub annual_income: f64,
    pub employment_years: u8,
    pub home_ownership: String,
    pub loan_amount: f64,
    pub loan_intent: String,
    pub credit_score: u16,
    pub existing_loans: u8,
    pub prior_defaults: String,
}

impl LoanApplication {
    /// Range checks on the numeric fields. Categorical values are never
    /// rejected here; unknown labels fall back to code 0 during encoding.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(ValidationError::AgeOutOfRange { age: self.age });
        }
        if !self.annual_income.is_finite() || self.annual_income <= 0.0 {
            return Err(ValidationError::NonPositiveIncome {
                annual_income: self.annual_income,
            });
        }
        if !self.loan_amount.is_finite() || self.loan_amount <= 0.0 {
            return Err(ValidationError::NonPositiveLoanAmount {
                loan_amount: self.loan_amount,
            });
        }
        if self.credit_score > MAX_CREDIT_SCORE {
            return Err(ValidationError::CreditScoreOutOfRange {
                credit_score: self.credit_score,
            });
        }
        Ok(())
    }
}

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 100;
pub const MAX_CREDIT_SCORE: u16 = 850;

/// Rejected numeric input the encoder cannot safely represent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("age {age} outside accepted range {MIN_AGE}-{MAX_AGE}")]
    AgeOutOfRange { age: u8 },
    #[error("annual income must be a positive amount, got {annual_income}")]
    NonPositiveIncome { annual_income: f64 },
    #[error("loan amount must be a positive amount, got {loan_amount}")]
    NonPositiveLoanAmount { loan_amount: f64 },
    #[error("credit score {credit_score} exceeds maximum {MAX_CREDIT_SCORE}")]
    CreditScoreOutOfRange { credit_score: u16 },
}

/// Binary outcome of the classifier, positive class meaning approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanDecision {
    Approved,
    Rejected,
}

impl LoanDecision {
    pub const fn label(self) -> &'static str {
        match self {
            LoanDecision::Approved => "Approved",
            LoanDecision::Rejected => "Rejected",
        }
    }
}

/// Coarse banding of approval risk. Ordering is Low < Medium < High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Response payload for a scored application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanAssessment {
    pub prediction: LoanDecision,
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub recommendation: String,
}

impl LoanAssessment {
    /// Probability is rounded to three decimals at this boundary; risk tiering
    /// upstream works on the unrounded value.
    pub fn new(
        prediction: LoanDecision,
        probability: f64,
        risk_level: RiskLevel,
        recommendation: &str,
    ) -> Self {
        Self {
            prediction,
            probability: round_probability(probability),
            risk_level,
            recommendation: recommendation.to_string(),
        }
    }
}

fn round_probability(probability: f64) -> f64 {
    (probability * 1000.0).round() / 1000.0
}
