use crate::eligibility::{BorrowerProfile, EligibilityResult, EligibilityScorer, Factor};

pub(super) fn profile(
    age: i32,
    income: f64,
    monthly_debt: f64,
    credit: &str,
    residency: &str,
) -> BorrowerProfile {
    BorrowerProfile::new(age, income, monthly_debt, credit, residency)
}

pub(super) fn strong_profile() -> BorrowerProfile {
    profile(30, 80_000.0, 0.0, "Excellent", "Citizen")
}

pub(super) fn score(profile: &BorrowerProfile) -> EligibilityResult {
    EligibilityScorer::new().score(profile)
}

pub(super) fn points(result: &EligibilityResult, factor: Factor) -> u8 {
    result
        .points_for(factor)
        .unwrap_or_else(|| panic!("{factor:?} component missing"))
}

pub(super) fn suggestion_for(result: &EligibilityResult, factor: Factor) -> Option<&str> {
    result
        .improvements
        .iter()
        .find(|item| item.category == factor)
        .map(|item| item.suggestion.as_str())
}
