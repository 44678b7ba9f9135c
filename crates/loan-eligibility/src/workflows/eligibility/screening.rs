use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantStageOne, EligibilityDecision, StageOneSubmission};
use super::engine::{EligibilityEngine, PredictionError};

#[derive(Debug)]
pub enum ScreeningImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Prediction(PredictionError),
}

impl std::fmt::Display for ScreeningImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreeningImportError::Io(err) => write!(f, "failed to read screening file: {}", err),
            ScreeningImportError::Csv(err) => write!(f, "invalid screening CSV data: {}", err),
            ScreeningImportError::Prediction(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ScreeningImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScreeningImportError::Io(err) => Some(err),
            ScreeningImportError::Csv(err) => Some(err),
            ScreeningImportError::Prediction(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ScreeningImportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ScreeningImportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<PredictionError> for ScreeningImportError {
    fn from(value: PredictionError) -> Self {
        Self::Prediction(value)
    }
}

#[derive(Debug, Deserialize)]
struct ScreeningCsvRow {
    #[serde(rename = "applicant", default)]
    applicant: Option<String>,
    #[serde(rename = "income", default)]
    income: Option<f64>,
    #[serde(rename = "credit_score", default)]
    credit_score: Option<f64>,
}

/// Outcome of the initial screen for one CSV record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningRow {
    pub line: usize,
    pub applicant: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<EligibilityDecision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScreeningSummary {
    pub rows: Vec<ScreeningRow>,
    pub eligible: usize,
    pub not_eligible: usize,
    pub rejected: usize,
}

/// Runs the initial screen over a CSV export of `applicant,income,credit_score` records.
pub struct InitialScreeningImporter;

impl InitialScreeningImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        engine: &EligibilityEngine,
    ) -> Result<ScreeningSummary, ScreeningImportError> {
        let file = File::open(path)?;
        Self::from_reader(file, engine)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        engine: &EligibilityEngine,
    ) -> Result<ScreeningSummary, ScreeningImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut summary = ScreeningSummary::default();
        for (index, record) in csv_reader.deserialize::<ScreeningCsvRow>().enumerate() {
            let record = record?;
            // Header occupies line 1.
            let line = index + 2;
            let applicant = record
                .applicant
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| format!("row {line}"));
            let submission = StageOneSubmission {
                income: record.income,
                credit_score: record.credit_score,
            };

            let row = match ApplicantStageOne::try_from(&submission) {
                Ok(candidate) => {
                    let decision = engine.initial_decision(&candidate)?;
                    match decision {
                        EligibilityDecision::Eligible => summary.eligible += 1,
                        EligibilityDecision::NotEligible => summary.not_eligible += 1,
                    }
                    ScreeningRow {
                        line,
                        applicant,
                        result: Some(decision),
                        warning: None,
                    }
                }
                Err(err) => {
                    summary.rejected += 1;
                    ScreeningRow {
                        line,
                        applicant,
                        result: None,
                        warning: Some(err.to_string()),
                    }
                }
            };
            summary.rows.push(row);
        }

        Ok(summary)
    }
}
