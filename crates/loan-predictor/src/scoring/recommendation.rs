use super::domain::{LoanDecision, RiskLevel};

/// Advisory text for the applicant. Wording is a product decision; the five
/// messages are fixed and the selection is a pure lookup.
pub fn recommendation(
    decision: LoanDecision,
    approval_probability: f64,
    risk_level: RiskLevel,
) -> &'static str {
    match (decision, risk_level) {
        (LoanDecision::Approved, RiskLevel::Low) => {
            "Applicant is eligible for the requested loan amount with favorable terms."
        }
        (LoanDecision::Approved, RiskLevel::Medium) => {
            "Applicant is eligible but may be offered loan with standard terms and conditions."
        }
        (LoanDecision::Approved, RiskLevel::High) => {
            "Applicant is eligible but may require additional documentation or higher interest rate."
        }
        (LoanDecision::Rejected, _) if approval_probability > 0.4 => {
            "Applicant was rejected. Consider reapplying after improving credit score or reducing existing debt."
        }
        (LoanDecision::Rejected, _) => {
            "Applicant does not meet current lending criteria. Please reapply when financial situation improves."
        }
    }
}
