use super::domain::{ApplicantStageTwo, EligibilityDecision, OccupationType, OrganizationType};

pub const MINIMUM_INCOME: f64 = 50_000.0;
pub const MINIMUM_CREDIT_SCORE: u64 = 700;

const TARGET_ORGANIZATION: OrganizationType = OrganizationType::BusinessEntityType3;
const PRIORITY_OCCUPATIONS: [OccupationType; 2] =
    [OccupationType::Managers, OccupationType::HighSkillTechStaff];

/// Initial screen: income and credit score must both clear their floor.
pub fn decide_stage_one(income: f64, credit_score: u64) -> EligibilityDecision {
    if income >= MINIMUM_INCOME && credit_score >= MINIMUM_CREDIT_SCORE {
        EligibilityDecision::Eligible
    } else {
        EligibilityDecision::NotEligible
    }
}

/// Independently sufficient clauses of the final confirmation, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageTwoDisjunct {
    WorkingAgeModestAnnuity,
    EstablishedSmallLoan,
    RecentRegistrationPriorityOccupation,
}

impl StageTwoDisjunct {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::WorkingAgeModestAnnuity,
            Self::EstablishedSmallLoan,
            Self::RecentRegistrationPriorityOccupation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::WorkingAgeModestAnnuity => {
                "age 25-60, loan above 10000, Business Entity Type 3, annuity below 5000"
            }
            Self::EstablishedSmallLoan => "age above 30, loan below 50000, Business Entity Type 3",
            Self::RecentRegistrationPriorityOccupation => {
                "recent registration and ID change in a managerial or high skill tech role"
            }
        }
    }

    pub fn holds(self, applicant: &ApplicantStageTwo) -> bool {
        match self {
            Self::WorkingAgeModestAnnuity => working_age_modest_annuity(applicant),
            Self::EstablishedSmallLoan => {
                applicant.age > 30
                    && applicant.credit_amount < 50_000.0
                    && applicant.organization_type == TARGET_ORGANIZATION
            }
            // Strict subset of the first clause and unreachable behind the form minimums
            // (registration >= 365, id publish >= 180). Kept until its intent is confirmed.
            Self::RecentRegistrationPriorityOccupation => {
                working_age_modest_annuity(applicant)
                    && applicant.days_registration < 365
                    && applicant.days_id_publish < 180
                    && PRIORITY_OCCUPATIONS.contains(&applicant.occupation_type)
            }
        }
    }
}

fn working_age_modest_annuity(applicant: &ApplicantStageTwo) -> bool {
    (25..=60).contains(&applicant.age)
        && applicant.credit_amount > 10_000.0
        && applicant.organization_type == TARGET_ORGANIZATION
        && applicant.loan_annuity < 5_000.0
}

/// First clause that admits the applicant, if any.
pub fn matching_disjunct(applicant: &ApplicantStageTwo) -> Option<StageTwoDisjunct> {
    StageTwoDisjunct::ordered()
        .into_iter()
        .find(|disjunct| disjunct.holds(applicant))
}

pub fn decide_stage_two(applicant: &ApplicantStageTwo) -> EligibilityDecision {
    match matching_disjunct(applicant) {
        Some(_) => EligibilityDecision::Eligible,
        None => EligibilityDecision::NotEligible,
    }
}
