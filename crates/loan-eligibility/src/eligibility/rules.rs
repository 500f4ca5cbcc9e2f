use super::domain::{
    BorrowerProfile, CreditRating, Factor, ImpactLevel, ImprovementSuggestion, ResidencyStatus,
};
use super::ScoreComponent;

/// Points awarded to one factor plus the advice to show when it falls short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FactorScore {
    pub points: u8,
    pub advice: Option<(&'static str, ImpactLevel)>,
}

impl FactorScore {
    fn full(points: u8) -> Self {
        Self {
            points,
            advice: None,
        }
    }

    fn short(points: u8, suggestion: &'static str, impact: ImpactLevel) -> Self {
        Self {
            points,
            advice: Some((suggestion, impact)),
        }
    }
}

/// Monthly debt divided by monthly income.
///
/// Inputs that cannot produce a meaningful ratio (zero or negative income, negative debt,
/// NaN or infinite values) yield `f64::INFINITY`, which falls into the lowest bucket.
pub fn debt_ratio(income: f64, monthly_debt: f64) -> f64 {
    if !income.is_finite() || income <= 0.0 || !monthly_debt.is_finite() || monthly_debt < 0.0 {
        return f64::INFINITY;
    }

    monthly_debt / (income / 12.0)
}

pub(crate) fn age_score(age: i32) -> FactorScore {
    match age {
        25..=55 => FactorScore::full(15),
        18..=24 => FactorScore::short(
            12,
            "Age 25+ typically gets better loan terms",
            ImpactLevel::Medium,
        ),
        56..=65 => FactorScore::short(
            10,
            "Consider applying before retirement age",
            ImpactLevel::Low,
        ),
        _ => FactorScore::short(5, "Age may affect loan eligibility", ImpactLevel::Low),
    }
}

pub(crate) fn income_score(income: f64) -> FactorScore {
    // NaN fails every comparison and lands in the floor bucket.
    if income >= 80_000.0 {
        FactorScore::full(25)
    } else if income >= 60_000.0 {
        FactorScore::full(20)
    } else if income >= 40_000.0 {
        FactorScore::full(15)
    } else if income >= 30_000.0 {
        FactorScore::short(
            10,
            "Increase income to $40K+ for better rates",
            ImpactLevel::High,
        )
    } else {
        FactorScore::short(
            5,
            "Most lenders require minimum $35K income",
            ImpactLevel::High,
        )
    }
}

pub(crate) fn debt_score(ratio: f64) -> FactorScore {
    if ratio <= 0.2 {
        FactorScore::full(20)
    } else if ratio <= 0.3 {
        FactorScore::full(15)
    } else if ratio <= 0.4 {
        FactorScore::short(
            10,
            "Reduce monthly debts to under 30% of income",
            ImpactLevel::High,
        )
    } else {
        FactorScore::short(
            5,
            "High debt-to-income ratio - consider debt consolidation",
            ImpactLevel::High,
        )
    }
}

pub(crate) fn credit_score(rating: &CreditRating) -> FactorScore {
    const REPAIR: &str = "Improve credit score by paying bills on time";

    match rating {
        CreditRating::Excellent => FactorScore::full(25),
        CreditRating::Good => FactorScore::full(20),
        CreditRating::Average => FactorScore::short(10, REPAIR, ImpactLevel::High),
        CreditRating::Poor | CreditRating::Unrecognized(_) => {
            FactorScore::short(0, REPAIR, ImpactLevel::High)
        }
    }
}

pub(crate) fn residency_score(status: &ResidencyStatus) -> FactorScore {
    match status {
        ResidencyStatus::Citizen | ResidencyStatus::Resident => FactorScore::full(15),
        ResidencyStatus::WorkVisa => FactorScore::short(
            10,
            "Permanent residency improves loan eligibility",
            ImpactLevel::Medium,
        ),
        ResidencyStatus::Other(_) => FactorScore::short(
            5,
            "NZ residency or citizenship required for best rates",
            ImpactLevel::High,
        ),
    }
}

pub(crate) fn score_profile(
    profile: &BorrowerProfile,
) -> (Vec<ScoreComponent>, i32, Vec<ImprovementSuggestion>) {
    let factors = [
        (Factor::Age, age_score(profile.age)),
        (Factor::Income, income_score(profile.income)),
        (
            Factor::Debt,
            debt_score(debt_ratio(profile.income, profile.monthly_debt)),
        ),
        (Factor::Credit, credit_score(&profile.credit_rating)),
        (Factor::Residency, residency_score(&profile.residency_status)),
    ];

    let mut components = Vec::with_capacity(factors.len());
    let mut improvements = Vec::new();
    let mut total: i32 = 0;

    for (factor, scored) in factors {
        total += i32::from(scored.points);
        components.push(ScoreComponent {
            factor,
            points: scored.points,
            max_points: factor.max_points(),
        });
        if let Some((suggestion, impact)) = scored.advice {
            improvements.push(ImprovementSuggestion {
                category: factor,
                suggestion: suggestion.to_string(),
                impact,
            });
        }
    }

    (components, total, improvements)
}
