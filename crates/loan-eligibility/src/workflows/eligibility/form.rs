use serde::Serialize;

use super::domain::{OccupationType, OrganizationType};
use super::validation::{MINIMUM_AGE, MINIMUM_DAYS_ID_PUBLISH, MINIMUM_DAYS_REGISTRATION};

pub const APP_TITLE: &str = "Loan Prediction App";
pub const HOME_MESSAGE: &str = "Welcome to the Loan Prediction App. Use the menu to navigate.";
pub const PAGES: [&str; 2] = ["Home", "Loan Eligibility"];

pub const CHECK_INITIAL_BUTTON: &str = "Check Initial Eligibility";
pub const CONFIRM_FINAL_BUTTON: &str = "Confirm Final Eligibility";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Number,
    Select,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
}

impl FormField {
    fn number(name: &'static str, label: &'static str, min_value: Option<i64>) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Number,
            min_value,
            options: Vec::new(),
        }
    }

    fn select(name: &'static str, label: &'static str, options: Vec<&'static str>) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Select,
            min_value: None,
            options,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormStep {
    pub title: &'static str,
    pub description: &'static str,
    pub fields: Vec<FormField>,
    pub submit_label: &'static str,
}

/// Everything a front end needs to render the Loan Eligibility page.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityFormLayout {
    pub title: &'static str,
    pub initial: FormStep,
    pub confirmation: FormStep,
}

impl EligibilityFormLayout {
    pub fn standard() -> Self {
        Self {
            title: "Loan Eligibility Checker",
            initial: FormStep {
                title: "Loan Eligibility Checker",
                description: "Enter the required details to check your initial loan eligibility.",
                fields: vec![
                    FormField::number("income", "Monthly Income (£)", None),
                    FormField::number("credit_score", "Credit Score", None),
                ],
                submit_label: CHECK_INITIAL_BUTTON,
            },
            confirmation: FormStep {
                title: "Final Eligibility Confirmation",
                description:
                    "Please provide additional information for final eligibility confirmation.",
                fields: vec![
                    FormField::number("age", "Age", Some(MINIMUM_AGE)),
                    FormField::number("credit_amount", "Amount of Loan (£)", Some(0)),
                    FormField::select(
                        "organization_type",
                        "Select your Organization Type",
                        OrganizationType::labels(),
                    ),
                    FormField::number(
                        "days_registration",
                        "Days Since Registration",
                        Some(MINIMUM_DAYS_REGISTRATION),
                    ),
                    FormField::number(
                        "days_id_publish",
                        "Days Since ID Publication",
                        Some(MINIMUM_DAYS_ID_PUBLISH),
                    ),
                    FormField::select(
                        "occupation_type",
                        "Select your Occupation Type",
                        OccupationType::labels(),
                    ),
                    FormField::number("loan_annuity", "Loan Annuity", Some(0)),
                ],
                submit_label: CONFIRM_FINAL_BUTTON,
            },
        }
    }
}
