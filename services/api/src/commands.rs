use crate::infra::build_engine;
use clap::Args;
use loan_eligibility::config::AppConfig;
use loan_eligibility::error::AppError;
use loan_eligibility::telemetry;
use loan_eligibility::workflows::eligibility::form::{
    CHECK_INITIAL_BUTTON, CONFIRM_FINAL_BUTTON,
};
use loan_eligibility::workflows::eligibility::{
    ApplicantStageTwo, EligibilityFormLayout, EligibilityWizard, InitialScreeningImporter,
    SessionId, StageOneSubmission, StageTwoSubmission, WizardError, WizardSession,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct WizardArgs {
    /// Monthly income (£)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) income: Option<f64>,
    /// Credit score
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) credit_score: Option<f64>,
    /// Age (at least 20)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) age: Option<f64>,
    /// Amount of loan (£)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) credit_amount: Option<f64>,
    /// Organization type, as listed by the `form` command
    #[arg(long)]
    pub(crate) organization_type: Option<String>,
    /// Days since registration (at least 365)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) days_registration: Option<f64>,
    /// Days since ID publication (at least 180)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) days_id_publish: Option<f64>,
    /// Occupation type, as listed by the `form` command
    #[arg(long)]
    pub(crate) occupation_type: Option<String>,
    /// Loan annuity
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) loan_annuity: Option<f64>,
}

impl WizardArgs {
    fn stage_one(&self) -> StageOneSubmission {
        StageOneSubmission {
            income: self.income,
            credit_score: self.credit_score,
        }
    }

    fn stage_two(&self) -> StageTwoSubmission {
        StageTwoSubmission {
            age: self.age,
            credit_amount: self.credit_amount,
            organization_type: self.organization_type.clone(),
            days_registration: self.days_registration,
            days_id_publish: self.days_id_publish,
            occupation_type: self.occupation_type.clone(),
            loan_annuity: self.loan_annuity,
        }
    }

    fn has_stage_two_input(&self) -> bool {
        self.age.is_some()
            || self.credit_amount.is_some()
            || self.organization_type.is_some()
            || self.days_registration.is_some()
            || self.days_id_publish.is_some()
            || self.occupation_type.is_some()
            || self.loan_annuity.is_some()
    }
}

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// CSV with `applicant,income,credit_score` columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

fn cli_wizard() -> Result<EligibilityWizard, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(EligibilityWizard::new(build_engine(&config.eligibility)))
}

pub(crate) fn run_wizard(args: WizardArgs) -> Result<(), AppError> {
    let wizard = cli_wizard()?;
    let session = WizardSession::new(SessionId("cli".to_string()));

    println!("Loan Eligibility Checker");
    println!("[{CHECK_INITIAL_BUTTON}]");
    let session = match wizard.check_initial(&session, &args.stage_one()) {
        Ok(session) => session,
        Err(WizardError::Validation(warning)) => {
            println!("Warning: {warning}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(result) = session.initial_eligibility_result {
        println!("Initial Loan Eligibility Result: {result}");
    }

    if !session.stage_two_unlocked() {
        return Ok(());
    }

    println!("\nFinal Eligibility Confirmation");
    if !args.has_stage_two_input() {
        println!("Provide the final form flags (see `form`) to confirm final eligibility.");
        return Ok(());
    }

    println!("[{CONFIRM_FINAL_BUTTON}]");
    let submission = args.stage_two();
    let assessment = match wizard.confirm_final(&session, &submission) {
        Ok(assessment) => assessment,
        Err(WizardError::Validation(warning)) => {
            println!("Warning: {warning}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(warning) = &assessment.artifact_warning {
        println!("Error: {warning}");
    }
    println!("Final Loan Eligibility Result: {}", assessment.decision);

    if let Ok(applicant) = ApplicantStageTwo::try_from(&submission) {
        if let Some(disjunct) = wizard.engine().explain_final(&applicant) {
            println!("Matched rule: {}", disjunct.label());
        }
    }

    Ok(())
}

pub(crate) fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let wizard = cli_wizard()?;
    let summary = InitialScreeningImporter::from_path(&args.csv, wizard.engine())?;

    println!("Initial eligibility screening: {}", args.csv.display());
    for row in &summary.rows {
        match (&row.result, &row.warning) {
            (Some(result), _) => println!("- line {} | {} | {}", row.line, row.applicant, result),
            (None, Some(warning)) => {
                println!("- line {} | {} | skipped: {}", row.line, row.applicant, warning)
            }
            (None, None) => println!("- line {} | {} | no result", row.line, row.applicant),
        }
    }
    println!(
        "\n{} eligible, {} not eligible, {} rejected",
        summary.eligible, summary.not_eligible, summary.rejected
    );

    Ok(())
}

pub(crate) fn run_form() {
    let layout = EligibilityFormLayout::standard();
    println!("{}", layout.confirmation.title);
    for field in &layout.confirmation.fields {
        match field.min_value {
            Some(min) => println!("- {} (--{}, min {})", field.label, field.name.replace('_', "-"), min),
            None => println!("- {} (--{})", field.label, field.name.replace('_', "-")),
        }
        for option in &field.options {
            println!("    {}", option);
        }
    }
}
