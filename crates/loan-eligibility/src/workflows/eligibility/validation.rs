use super::domain::{
    ApplicantStageOne, ApplicantStageTwo, OccupationType, OrganizationType, StageOneSubmission,
    StageTwoSubmission,
};

pub const MINIMUM_AGE: i64 = 20;
pub const MINIMUM_DAYS_REGISTRATION: i64 = 365;
pub const MINIMUM_DAYS_ID_PUBLISH: i64 = 180;

// 2^64; whole numbers at or above it cannot be held in a u64.
const WHOLE_NUMBER_CEILING: f64 = u64::MAX as f64;

/// Which form step a rejected submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Initial,
    Final,
}

impl SubmissionStage {
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Initial => "Please enter a valid income and credit score before checking eligibility",
            Self::Final => "Please fill in all fields before confirming",
        }
    }
}

/// One offending form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub problem: String,
}

/// Submission rejected before any decision was computed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {}", .stage.prompt(), summarize(.issues))]
pub struct ValidationError {
    pub stage: SubmissionStage,
    pub issues: Vec<FieldIssue>,
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{} {}", issue.field, issue.problem))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn fields(&self) -> Vec<&'static str> {
        self.issues.iter().map(|issue| issue.field).collect()
    }
}

struct IssueCollector {
    stage: SubmissionStage,
    issues: Vec<FieldIssue>,
}

impl IssueCollector {
    fn new(stage: SubmissionStage) -> Self {
        Self {
            stage,
            issues: Vec::new(),
        }
    }

    fn push(&mut self, field: &'static str, problem: impl Into<String>) {
        self.issues.push(FieldIssue {
            field,
            problem: problem.into(),
        });
    }

    fn decimal(&mut self, field: &'static str, value: Option<f64>) -> Option<f64> {
        match value {
            None => {
                self.push(field, "is required");
                None
            }
            Some(value) if !value.is_finite() => {
                self.push(field, "must be a finite number");
                None
            }
            Some(value) if value < 0.0 => {
                self.push(field, format!("must be at least 0 (found {value})"));
                None
            }
            Some(value) => Some(value),
        }
    }

    /// Whole-number field; `720.0` is accepted as `720`.
    fn integer<T: TryFrom<u64>>(
        &mut self,
        field: &'static str,
        value: Option<f64>,
        minimum: i64,
    ) -> Option<T> {
        match value {
            None => {
                self.push(field, "is required");
                None
            }
            Some(value) if !value.is_finite() => {
                self.push(field, "must be a finite number");
                None
            }
            Some(value) if value.fract() != 0.0 => {
                self.push(field, format!("must be a whole number (found {value})"));
                None
            }
            Some(value) if value < minimum as f64 => {
                self.push(field, format!("must be at least {minimum} (found {value})"));
                None
            }
            Some(value) if value >= WHOLE_NUMBER_CEILING => {
                self.push(field, format!("is out of range (found {value})"));
                None
            }
            Some(value) => match T::try_from(value as u64) {
                Ok(value) => Some(value),
                Err(_) => {
                    self.push(field, format!("is out of range (found {value})"));
                    None
                }
            },
        }
    }

    fn option<T>(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        match value {
            None => {
                self.push(field, "is required");
                None
            }
            Some(raw) => {
                let parsed = parse(raw);
                if parsed.is_none() {
                    self.push(field, format!("'{raw}' is not an available option"));
                }
                parsed
            }
        }
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        match value {
            Some(value) if self.issues.is_empty() => Ok(value),
            _ => Err(ValidationError {
                stage: self.stage,
                issues: self.issues,
            }),
        }
    }
}

impl TryFrom<&StageOneSubmission> for ApplicantStageOne {
    type Error = ValidationError;

    fn try_from(submission: &StageOneSubmission) -> Result<Self, Self::Error> {
        let mut collector = IssueCollector::new(SubmissionStage::Initial);
        let income = collector.decimal("income", submission.income);
        let credit_score = collector.integer("credit_score", submission.credit_score, 0);

        let applicant = income
            .zip(credit_score)
            .map(|(income, credit_score)| ApplicantStageOne {
                income,
                credit_score,
            });
        collector.finish(applicant)
    }
}

impl TryFrom<&StageTwoSubmission> for ApplicantStageTwo {
    type Error = ValidationError;

    fn try_from(submission: &StageTwoSubmission) -> Result<Self, Self::Error> {
        let mut collector = IssueCollector::new(SubmissionStage::Final);
        let age = collector.integer("age", submission.age, MINIMUM_AGE);
        let credit_amount = collector.decimal("credit_amount", submission.credit_amount);
        let organization_type = collector.option(
            "organization_type",
            submission.organization_type.as_deref(),
            OrganizationType::from_label,
        );
        let days_registration = collector.integer(
            "days_registration",
            submission.days_registration,
            MINIMUM_DAYS_REGISTRATION,
        );
        let days_id_publish = collector.integer(
            "days_id_publish",
            submission.days_id_publish,
            MINIMUM_DAYS_ID_PUBLISH,
        );
        let occupation_type = collector.option(
            "occupation_type",
            submission.occupation_type.as_deref(),
            OccupationType::from_label,
        );
        let loan_annuity = collector.decimal("loan_annuity", submission.loan_annuity);

        let applicant = match (
            age,
            credit_amount,
            organization_type,
            days_registration,
            days_id_publish,
            occupation_type,
            loan_annuity,
        ) {
            (
                Some(age),
                Some(credit_amount),
                Some(organization_type),
                Some(days_registration),
                Some(days_id_publish),
                Some(occupation_type),
                Some(loan_annuity),
            ) => Some(ApplicantStageTwo {
                age,
                credit_amount,
                organization_type,
                days_registration,
                days_id_publish,
                occupation_type,
                loan_annuity,
            }),
            _ => None,
        };
        collector.finish(applicant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_one_rejects_negative_and_missing_inputs() {
        let submission = StageOneSubmission {
            income: Some(-1.0),
            credit_score: None,
        };
        let err = ApplicantStageOne::try_from(&submission).expect_err("invalid submission");
        assert_eq!(err.fields(), vec!["income", "credit_score"]);
        assert_eq!(err.stage, SubmissionStage::Initial);
        assert!(!err.to_string().contains("before confirming"));
    }

    #[test]
    fn stage_one_rejects_non_finite_income() {
        let submission = StageOneSubmission {
            income: Some(f64::NAN),
            credit_score: Some(720.0),
        };
        let err = ApplicantStageOne::try_from(&submission).expect_err("nan income");
        assert_eq!(err.fields(), vec!["income"]);
    }

    #[test]
    fn stage_two_reports_every_offending_field() {
        let submission = StageTwoSubmission {
            age: Some(19.0),
            credit_amount: Some(20_000.0),
            organization_type: Some("Startup".to_string()),
            days_registration: Some(364.0),
            days_id_publish: Some(180.0),
            occupation_type: None,
            loan_annuity: Some(0.0),
        };
        let err = ApplicantStageTwo::try_from(&submission).expect_err("invalid submission");
        assert_eq!(
            err.fields(),
            vec![
                "age",
                "organization_type",
                "days_registration",
                "occupation_type"
            ]
        );
        assert!(err
            .to_string()
            .starts_with("Please fill in all fields before confirming"));
    }

    #[test]
    fn stage_two_accepts_form_minimums() {
        let submission = StageTwoSubmission {
            age: Some(20.0),
            credit_amount: Some(0.0),
            organization_type: Some("School".to_string()),
            days_registration: Some(365.0),
            days_id_publish: Some(180.0),
            occupation_type: Some("Drivers".to_string()),
            loan_annuity: Some(0.0),
        };
        let applicant = ApplicantStageTwo::try_from(&submission).expect("valid submission");
        assert_eq!(applicant.age, 20);
        assert_eq!(applicant.organization_type, OrganizationType::School);
        assert_eq!(applicant.occupation_type, OccupationType::Drivers);
    }

    #[test]
    fn whole_number_fields_accept_integral_floats_only() {
        let submission = StageOneSubmission {
            income: Some(60_000.0),
            credit_score: Some(720.0),
        };
        let applicant = ApplicantStageOne::try_from(&submission).expect("integral score");
        assert_eq!(applicant.credit_score, 720);

        let submission = StageOneSubmission {
            income: Some(60_000.0),
            credit_score: Some(720.5),
        };
        let err = ApplicantStageOne::try_from(&submission).expect_err("fractional score");
        assert_eq!(err.fields(), vec!["credit_score"]);
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn credit_score_has_no_practical_upper_bound() {
        let submission = StageOneSubmission {
            income: Some(60_000.0),
            credit_score: Some(5_000_000_000.0),
        };
        let applicant = ApplicantStageOne::try_from(&submission).expect("large score");
        assert_eq!(applicant.credit_score, 5_000_000_000);
    }

    #[test]
    fn narrow_fields_reject_values_beyond_their_range() {
        let submission = StageTwoSubmission {
            age: Some(5_000_000_000.0),
            credit_amount: Some(20_000.0),
            organization_type: Some("School".to_string()),
            days_registration: Some(365.0),
            days_id_publish: Some(180.0),
            occupation_type: Some("Drivers".to_string()),
            loan_annuity: Some(1_000.0),
        };
        let err = ApplicantStageTwo::try_from(&submission).expect_err("age overflow");
        assert_eq!(err.fields(), vec!["age"]);
        assert_eq!(err.stage, SubmissionStage::Final);
        assert!(err.to_string().contains("out of range"));
    }
}
