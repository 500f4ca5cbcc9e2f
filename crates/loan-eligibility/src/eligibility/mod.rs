//! Weighted-points eligibility scoring.
//!
//! Five independent factors contribute a bounded number of points each; the clamped sum
//! selects a [`Tier`], which in turn fixes the message and indicative loan ceiling.

mod domain;
pub(crate) mod lenient;
mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use domain::{
    BorrowerProfile, CreditRating, Factor, ImpactLevel, ImprovementSuggestion, ResidencyStatus,
};
pub use policy::{format_currency, Tier};
pub use rules::debt_ratio;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless scorer applying the fixed weight table to a profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityScorer;

impl EligibilityScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, profile: &BorrowerProfile) -> EligibilityResult {
        let (components, raw_total, improvements) = rules::score_profile(profile);

        let score = raw_total.clamp(0, 100) as u8;
        let tier = Tier::from_score(score);
        let max_loan_amount = tier.loan_ceiling(profile.income);

        debug!(
            score,
            tier = tier.label(),
            shortfalls = improvements.len(),
            "eligibility scored"
        );

        EligibilityResult {
            score,
            tier,
            message: tier.message().to_string(),
            loan_range: format_currency(max_loan_amount),
            max_loan_amount,
            color: tier.color().to_string(),
            components,
            improvements,
        }
    }
}

/// Scores raw form values; string fields are parsed leniently.
pub fn calculate_eligibility(
    age: i32,
    income: f64,
    monthly_debt: f64,
    credit_rating: &str,
    residency_status: &str,
) -> EligibilityResult {
    let profile = BorrowerProfile::new(age, income, monthly_debt, credit_rating, residency_status);
    EligibilityScorer::new().score(&profile)
}

/// Points awarded to a single factor, kept for transparent breakdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponent {
    pub factor: Factor,
    pub points: u8,
    pub max_points: u8,
}

/// Scoring output consumed by the result card and the follow-up views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub score: u8,
    pub tier: Tier,
    pub message: String,
    /// Upper bound formatted as currency, e.g. `$40,000`.
    pub loan_range: String,
    pub max_loan_amount: u64,
    pub color: String,
    pub components: Vec<ScoreComponent>,
    pub improvements: Vec<ImprovementSuggestion>,
}

impl EligibilityResult {
    pub fn points_for(&self, factor: Factor) -> Option<u8> {
        self.components
            .iter()
            .find(|component| component.factor == factor)
            .map(|component| component.points)
    }
}
