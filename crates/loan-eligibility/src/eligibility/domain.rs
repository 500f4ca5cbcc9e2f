use std::fmt;

use serde::{Deserialize, Serialize};

use super::lenient;

/// Borrower attributes collected by the calculator form.
///
/// Values are taken as entered; out-of-range, blank, or malformed fields are absorbed by
/// the scoring rules rather than rejected here. Field names are camelCase, with the
/// stored-slot names (`debts`, `credit`, `residency`) and snake_case accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerProfile {
    #[serde(default, deserialize_with = "lenient::age")]
    pub age: i32,
    /// Gross annual income in NZD.
    #[serde(
        default = "lenient::unknown_amount",
        deserialize_with = "lenient::amount"
    )]
    pub income: f64,
    /// Total monthly debt repayments in NZD.
    #[serde(
        alias = "monthly_debt",
        alias = "debts",
        default = "lenient::unknown_amount",
        deserialize_with = "lenient::amount"
    )]
    pub monthly_debt: f64,
    #[serde(
        alias = "credit_rating",
        alias = "credit",
        default,
        deserialize_with = "lenient::credit"
    )]
    pub credit_rating: CreditRating,
    #[serde(
        alias = "residency_status",
        alias = "residency",
        default,
        deserialize_with = "lenient::residency"
    )]
    pub residency_status: ResidencyStatus,
}

impl BorrowerProfile {
    pub fn new(
        age: i32,
        income: f64,
        monthly_debt: f64,
        credit_rating: impl Into<CreditRating>,
        residency_status: impl Into<ResidencyStatus>,
    ) -> Self {
        Self {
            age,
            income,
            monthly_debt,
            credit_rating: credit_rating.into(),
            residency_status: residency_status.into(),
        }
    }
}

/// Self-reported credit history bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CreditRating {
    Excellent,
    Good,
    Average,
    Poor,
    /// Anything outside the known set, kept verbatim for display.
    Unrecognized(String),
}

impl CreditRating {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "excellent" => Self::Excellent,
            "good" => Self::Good,
            "average" => Self::Average,
            "poor" => Self::Poor,
            _ => Self::Unrecognized(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Poor => "Poor",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// True when the rating scores below "Good".
    pub fn needs_repair(&self) -> bool {
        matches!(self, Self::Average | Self::Poor | Self::Unrecognized(_))
    }
}

impl Default for CreditRating {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl From<&str> for CreditRating {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for CreditRating {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<CreditRating> for String {
    fn from(value: CreditRating) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for CreditRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// NZ residency standing as declared on the form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResidencyStatus {
    Citizen,
    Resident,
    WorkVisa,
    Other(String),
}

impl ResidencyStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "citizen" | "nz citizen" => Self::Citizen,
            "resident" | "permanent" | "permanent resident" => Self::Resident,
            "work visa" | "work_visa" | "temporary" => Self::WorkVisa,
            _ => Self::Other(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Citizen => "Citizen",
            Self::Resident => "Resident",
            Self::WorkVisa => "Work Visa",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl Default for ResidencyStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<&str> for ResidencyStatus {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for ResidencyStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ResidencyStatus> for String {
    fn from(value: ResidencyStatus) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for ResidencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The five independent factors that make up the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Factor {
    Age,
    Income,
    Debt,
    Credit,
    Residency,
}

impl Factor {
    pub fn label(&self) -> &'static str {
        match self {
            Factor::Age => "Age",
            Factor::Income => "Income",
            Factor::Debt => "Debt",
            Factor::Credit => "Credit",
            Factor::Residency => "Residency",
        }
    }

    /// Ceiling for the factor's sub-score; the five maxima sum to 100.
    pub fn max_points(&self) -> u8 {
        match self {
            Factor::Age => 15,
            Factor::Income => 25,
            Factor::Debt => 20,
            Factor::Credit => 25,
            Factor::Residency => 15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactLevel {
    High,
    Medium,
    Low,
}

impl ImpactLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ImpactLevel::High => "High",
            ImpactLevel::Medium => "Medium",
            ImpactLevel::Low => "Low",
        }
    }
}

/// Advice emitted whenever a factor scores below its maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementSuggestion {
    pub category: Factor,
    pub suggestion: String,
    pub impact: ImpactLevel,
}
