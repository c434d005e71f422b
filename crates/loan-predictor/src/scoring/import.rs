use std::io::Read;
use std::path::Path;

use super::domain::{LoanApplication, LoanAssessment, LoanDecision};
use super::service::{LoanScoringService, PredictionError};

/// Structural failure reading a batch file; row-level scoring failures are
/// reported per row instead of aborting the batch.
#[derive(Debug)]
pub enum ScoreImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ScoreImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreImportError::Io(err) => write!(f, "failed to read application batch: {}", err),
            ScoreImportError::Csv(err) => write!(f, "invalid application CSV data: {}", err),
        }
    }
}

impl std::error::Error for ScoreImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreImportError::Io(err) => Some(err),
            ScoreImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ScoreImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ScoreImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Scores a CSV of applications through the same pipeline as the endpoint.
///
/// Headers match the canonical intake field names. Unknown categorical labels
/// behave exactly as they do over HTTP: encoded as the logged fallback code,
/// never a rejected row.
pub struct ApplicationBatchScorer;

impl ApplicationBatchScorer {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        service: &LoanScoringService,
    ) -> Result<BatchOutcome, ScoreImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, service)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        service: &LoanScoringService,
    ) -> Result<BatchOutcome, ScoreImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (index, record) in csv_reader.deserialize::<LoanApplication>().enumerate() {
            let application = record?;
            let outcome = service.evaluate(&application);
            rows.push(ScoredRow {
                row: index + 1,
                application,
                outcome,
            });
        }

        Ok(BatchOutcome { rows })
    }
}

/// One data row and its scoring result, numbered from 1.
#[derive(Debug)]
pub struct ScoredRow {
    pub row: usize,
    pub application: LoanApplication,
    pub outcome: Result<LoanAssessment, PredictionError>,
}

/// All scored rows plus summary tallies.
#[derive(Debug)]
pub struct BatchOutcome {
    pub rows: Vec<ScoredRow>,
}

impl BatchOutcome {
    pub fn approved(&self) -> usize {
        self.decided(LoanDecision::Approved)
    }

    pub fn rejected(&self) -> usize {
        self.decided(LoanDecision::Rejected)
    }

    pub fn failed(&self) -> usize {
        self.rows
            .iter()
            .filter(|scored| scored.outcome.is_err())
            .count()
    }

    fn decided(&self, decision: LoanDecision) -> usize {
        self.rows
            .iter()
            .filter(|scored| {
                scored
                    .outcome
                    .as_ref()
                    .map(|assessment| assessment.prediction == decision)
                    .unwrap_or(false)
            })
            .count()
    }
}
