use serde::{Deserialize, Serialize};

/// Binary outcome of either wizard stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EligibilityDecision {
    #[serde(rename = "Eligible")]
    Eligible,
    #[serde(rename = "Not Eligible")]
    NotEligible,
}

impl EligibilityDecision {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Eligible => "Eligible",
            Self::NotEligible => "Not Eligible",
        }
    }

    pub const fn is_eligible(self) -> bool {
        matches!(self, Self::Eligible)
    }
}

impl std::fmt::Display for EligibilityDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated inputs for the initial screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplicantStageOne {
    pub income: f64,
    pub credit_score: u64,
}

/// Validated inputs for the final confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplicantStageTwo {
    pub age: u32,
    pub credit_amount: f64,
    pub organization_type: OrganizationType,
    pub days_registration: u32,
    pub days_id_publish: u32,
    pub occupation_type: OccupationType,
    pub loan_annuity: f64,
}

/// Raw "Check Initial Eligibility" payload as the form delivers it.
///
/// Number inputs may send whole-number fields as `720` or `720.0`, so every numeric field is
/// read as `f64` and checked for integrality during validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageOneSubmission {
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub credit_score: Option<f64>,
}

/// Raw "Confirm Final Eligibility" payload; dropdowns arrive as their labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTwoSubmission {
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub credit_amount: Option<f64>,
    #[serde(default)]
    pub organization_type: Option<String>,
    #[serde(default)]
    pub days_registration: Option<f64>,
    #[serde(default)]
    pub days_id_publish: Option<f64>,
    #[serde(default)]
    pub occupation_type: Option<String>,
    #[serde(default)]
    pub loan_annuity: Option<f64>,
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every option in dropdown order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            pub fn from_label(raw: &str) -> Option<Self> {
                let trimmed = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.label() == trimmed)
            }

            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|option| option.label()).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// Employer organization categories offered on the final form.
    OrganizationType {
        BusinessEntityType3 => "Business Entity Type 3",
        School => "School",
        Government => "Government",
        Religion => "Religion",
        Other => "Other",
        Xna => "XNA",
        Electricity => "Electricity",
        BusinessEntityType2 => "Business Entity Type 2",
        SelfEmployed => "Self-employed",
        TransportType2 => "Transport: type 2",
        Construction => "Construction",
        Housing => "Housing",
        Kindergarten => "Kindergarten",
        TradeType7 => "Trade: type 7",
        IndustryType11 => "Industry: type 11",
        Services => "Services",
        TransportType4 => "Transport: type 4",
        IndustryType1 => "Industry: type 1",
        Emergency => "Emergency",
        Medicine => "Medicine",
        TradeType2 => "Trade: type 2",
        University => "University",
        Police => "Police",
        BusinessEntityType1 => "Business Entity Type 1",
        Postal => "Postal",
        TransportType3 => "Transport: type 3",
        IndustryType4 => "Industry: type 4",
        Agriculture => "Agriculture",
        Restaurant => "Restaurant",
        Culture => "Culture",
        Hotel => "Hotel",
        IndustryType7 => "Industry: type 7",
        IndustryType3 => "Industry: type 3",
        Bank => "Bank",
        Military => "Military",
        TradeType3 => "Trade: type 3",
        IndustryType9 => "Industry: type 9",
    }
}

labelled_enum! {
    /// Applicant occupation categories offered on the final form.
    OccupationType {
        Laborers => "Laborers",
        CoreStaff => "Core staff",
        Accountants => "Accountants",
        Unknown => "Unknown",
        Drivers => "Drivers",
        SalesStaff => "Sales staff",
        CleaningStaff => "Cleaning staff",
        PrivateServiceStaff => "Private service staff",
        Managers => "Managers",
        MedicineStaff => "Medicine staff",
        CookingStaff => "Cooking staff",
        HighSkillTechStaff => "High skill tech staff",
        LowSkillLaborers => "Low-skill Laborers",
        SecurityStaff => "Security staff",
        RealtyAgents => "Realty agents",
        Secretaries => "Secretaries",
        WaitersBarmenStaff => "Waiters/barmen staff",
    }
}
