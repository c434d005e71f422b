use super::domain::{LoanApplication, RiskLevel};

/// Additive point score summarizing approval risk beyond the raw model
/// probability. Each signal contributes independently; the total maps to a
/// tier with ties breaking toward the lower band.
pub fn risk_level(application: &LoanApplication, approval_probability: f64) -> RiskLevel {
    let total = credit_points(application.credit_score)
        + probability_points(approval_probability)
        + loan_count_points(application.existing_loans)
        + debt_ratio_points(application.loan_amount, application.annual_income);

    if total <= 2 {
        RiskLevel::Low
    } else if total <= 5 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

fn credit_points(credit_score: u16) -> u8 {
    if credit_score < 600 {
        3
    } else if credit_score < 700 {
        2
    } else if credit_score < 750 {
        1
    } else {
        0
    }
}

fn probability_points(approval_probability: f64) -> u8 {
    if approval_probability < 0.3 {
        3
    } else if approval_probability < 0.6 {
        2
    } else if approval_probability < 0.8 {
        1
    } else {
        0
    }
}

fn loan_count_points(existing_loans: u8) -> u8 {
    if existing_loans > 3 {
        2
    } else if existing_loans > 1 {
        1
    } else {
        0
    }
}

fn debt_ratio_points(loan_amount: f64, annual_income: f64) -> u8 {
    let ratio = debt_to_income(loan_amount, annual_income);
    if ratio > 0.5 {
        2
    } else if ratio > 0.3 {
        1
    } else {
        0
    }
}

/// Monthly repayment share of monthly income, treated as maximal when no
/// income is declared.
fn debt_to_income(loan_amount: f64, annual_income: f64) -> f64 {
    let monthly_income = annual_income / 12.0;
    if monthly_income <= 0.0 {
        return 1.0;
    }
    (loan_amount / 12.0) / monthly_income
}
