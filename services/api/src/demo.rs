use crate::infra::{HeuristicClassifier, PassthroughScaler};
use chrono::{Local, Utc};
use clap::Args;
use loan_predictor::config::AppConfig;
use loan_predictor::error::AppError;
use loan_predictor::model::{load_context, ModelFamily, ModelMetadata};
use loan_predictor::scoring::{
    ApplicationBatchScorer, InferenceContext, LoanApplication, LoanScoringService,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV of applications to score, headers matching the intake field names
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Artifact directory holding scaler.json and classifier.json
    /// (defaults to the configured model directory)
    #[arg(long)]
    pub(crate) model_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Score the built-in applicants with persisted artifacts instead of the
    /// rule-based stand-in
    #[arg(long)]
    pub(crate) model_dir: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let model_dir = args.model_dir.unwrap_or(config.model.artifact_dir);

    let context = load_context(&model_dir)?;
    describe_model(context.metadata());
    let service = LoanScoringService::new(context);

    let outcome = ApplicationBatchScorer::from_path(&args.input, &service)?;

    println!(
        "Scored {} applications from {} on {}",
        outcome.rows.len(),
        args.input.display(),
        Local::now().format("%Y-%m-%d %H:%M")
    );
    for scored in &outcome.rows {
        match &scored.outcome {
            Ok(assessment) => println!(
                "- row {}: {} | probability {:.3} | {} risk | {}",
                scored.row,
                assessment.prediction.label(),
                assessment.probability,
                assessment.risk_level.label(),
                assessment.recommendation
            ),
            Err(err) => println!("- row {}: not scored ({err})", scored.row),
        }
    }
    println!(
        "Summary: {} approved, {} rejected, {} failed",
        outcome.approved(),
        outcome.rejected(),
        outcome.failed()
    );

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Loan approval scoring demo");

    let service = match args.model_dir {
        Some(model_dir) => {
            let context = load_context(&model_dir)?;
            describe_model(context.metadata());
            LoanScoringService::new(context)
        }
        None => {
            println!(
                "Model: rule-based stand-in (pass --model-dir to score with persisted artifacts)"
            );
            LoanScoringService::new(stub_context())
        }
    };

    for (label, applicant) in demo_applicants() {
        println!("\n{label}");
        println!(
            "  Age {} | {} | income {:.0} | loan {:.0} ({}) | credit {}",
            applicant.age,
            applicant.education,
            applicant.annual_income,
            applicant.loan_amount,
            applicant.loan_intent,
            applicant.credit_score
        );
        match service.evaluate(&applicant) {
            Ok(assessment) => {
                println!(
                    "  Decision: {} (probability {:.3})",
                    assessment.prediction.label(),
                    assessment.probability
                );
                println!("  Risk tier: {}", assessment.risk_level.label());
                println!("  Recommendation: {}", assessment.recommendation);
            }
            Err(err) => println!("  Scoring unavailable: {err}"),
        }
    }

    Ok(())
}

fn describe_model(metadata: &ModelMetadata) {
    let trained = metadata
        .trained_at
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown date".to_string());
    println!(
        "Model: {} ({} family, trained {trained})",
        metadata.model_version,
        metadata.family.label()
    );
}

fn stub_context() -> InferenceContext {
    InferenceContext::new(
        Arc::new(PassthroughScaler),
        Arc::new(HeuristicClassifier),
        ModelMetadata {
            model_version: "demo-heuristic".to_string(),
            family: ModelFamily::Logistic,
            trained_at: None,
            loaded_at: Utc::now(),
        },
    )
}

/// Profiles chosen so the stand-in model walks through every risk tier and
/// recommendation message.
fn demo_applicants() -> Vec<(&'static str, LoanApplication)> {
    vec![
        (
            "Established professional, modest obligation",
            LoanApplication {
                age: 28,
                gender: "male".to_string(),
                education: "Bachelor".to_string(),
                annual_income: 550_000.0,
                employment_years: 4,
                home_ownership: "RENT".to_string(),
                loan_amount: 120_000.0,
                loan_intent: "EDUCATION".to_string(),
                credit_score: 720,
                existing_loans: 1,
                prior_defaults: "NO".to_string(),
            },
        ),
        (
            "Homeowner with steady tenure",
            LoanApplication {
                age: 41,
                gender: "female".to_string(),
                education: "Master".to_string(),
                annual_income: 75_000.0,
                employment_years: 6,
                home_ownership: "OWN".to_string(),
                loan_amount: 24_000.0,
                loan_intent: "PERSONAL".to_string(),
                credit_score: 690,
                existing_loans: 1,
                prior_defaults: "NO".to_string(),
            },
        ),
        (
            "Venture borrower on a stretched margin",
            LoanApplication {
                age: 35,
                gender: "male".to_string(),
                education: "Bachelor".to_string(),
                annual_income: 60_000.0,
                employment_years: 7,
                home_ownership: "RENT".to_string(),
                loan_amount: 25_000.0,
                loan_intent: "VENTURE".to_string(),
                credit_score: 680,
                existing_loans: 2,
                prior_defaults: "NO".to_string(),
            },
        ),
        (
            "First-time buyer near the approval line",
            LoanApplication {
                age: 30,
                gender: "female".to_string(),
                education: "High School".to_string(),
                annual_income: 80_000.0,
                employment_years: 4,
                home_ownership: "MORTGAGE".to_string(),
                loan_amount: 28_000.0,
                loan_intent: "HOME".to_string(),
                credit_score: 660,
                existing_loans: 2,
                prior_defaults: "NO".to_string(),
            },
        ),
        (
            "Overextended applicant with prior defaults",
            LoanApplication {
                age: 42,
                gender: "female".to_string(),
                education: "High School".to_string(),
                annual_income: 24_000.0,
                employment_years: 1,
                home_ownership: "RENT".to_string(),
                loan_amount: 100_000.0,
                loan_intent: "PERSONAL".to_string(),
                credit_score: 500,
                existing_loans: 4,
                prior_defaults: "YES".to_string(),
            },
        ),
    ]
}
