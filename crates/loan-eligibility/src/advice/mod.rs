//! Score-improvement tips, reordered to match the borrower's weakest areas.

use serde::Serialize;

use crate::eligibility::ImpactLevel;
use crate::session::StoredAssessment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TipCategory {
    Income,
    Debt,
    Credit,
    Age,
    Residency,
    Savings,
    Employment,
    Assets,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImprovementTip {
    pub category: TipCategory,
    pub title: &'static str,
    pub description: &'static str,
    pub impact: ImpactLevel,
    pub timeframe: &'static str,
    pub actions: Vec<&'static str>,
}

/// Every tip in its default display order.
pub fn tip_catalog() -> Vec<ImprovementTip> {
    vec![
        ImprovementTip {
            category: TipCategory::Income,
            title: "Increase Your Annual Income",
            description: "Higher income significantly improves loan eligibility and amount",
            impact: ImpactLevel::High,
            timeframe: "3-12 months",
            actions: vec![
                "Ask for a salary increase or promotion",
                "Take on freelance or part-time work",
                "Develop skills for higher-paying roles",
                "Consider changing jobs for better pay",
            ],
        },
        ImprovementTip {
            category: TipCategory::Debt,
            title: "Reduce Monthly Debt Payments",
            description: "Lower debt-to-income ratio makes you more attractive to lenders",
            impact: ImpactLevel::High,
            timeframe: "1-6 months",
            actions: vec![
                "Pay off high-interest credit cards first",
                "Consolidate multiple debts",
                "Avoid taking on new debt",
                "Consider debt consolidation loans",
            ],
        },
        ImprovementTip {
            category: TipCategory::Credit,
            title: "Improve Your Credit Rating",
            description: "Better credit score unlocks lower rates and higher loan amounts",
            impact: ImpactLevel::High,
            timeframe: "3-12 months",
            actions: vec![
                "Pay all bills on time consistently",
                "Keep credit utilization below 30%",
                "Don't close old credit accounts",
                "Check and dispute credit report errors",
            ],
        },
        ImprovementTip {
            category: TipCategory::Age,
            title: "Age Considerations",
            description: "Lenders prefer borrowers in their prime earning years",
            impact: ImpactLevel::Low,
            timeframe: "N/A",
            actions: vec![
                "If under 25: Build credit history and stable income",
                "If over 55: Consider shorter loan terms",
                "Focus on other factors you can control",
                "Highlight job stability and experience",
            ],
        },
        ImprovementTip {
            category: TipCategory::Residency,
            title: "Strengthen Residency Status",
            description: "Permanent residency improves eligibility with most lenders",
            impact: ImpactLevel::Medium,
            timeframe: "Varies",
            actions: vec![
                "Apply for permanent residency if eligible",
                "Maintain continuous employment",
                "Keep all visa documentation current",
                "Consider specialist lenders for visa holders",
            ],
        },
        ImprovementTip {
            category: TipCategory::Savings,
            title: "Build Emergency Savings",
            description: "Having savings shows financial stability to lenders",
            impact: ImpactLevel::Medium,
            timeframe: "6-12 months",
            actions: vec![
                "Save at least 3-6 months of expenses",
                "Open a dedicated savings account",
                "Set up automatic transfers to savings",
                "Reduce unnecessary expenses",
            ],
        },
        ImprovementTip {
            category: TipCategory::Employment,
            title: "Stabilize Employment History",
            description: "Consistent employment history improves loan approval chances",
            impact: ImpactLevel::Medium,
            timeframe: "6-24 months",
            actions: vec![
                "Stay in current job for at least 12 months",
                "Avoid job-hopping before applying",
                "Get employment contracts in writing",
                "Document any salary increases",
            ],
        },
        ImprovementTip {
            category: TipCategory::Assets,
            title: "Build Assets and Equity",
            description: "Assets can be used as security or demonstrate financial stability",
            impact: ImpactLevel::Medium,
            timeframe: "12+ months",
            actions: vec![
                "Save for a property deposit",
                "Build investment portfolio",
                "Consider secured loans if you have assets",
                "Document all valuable assets",
            ],
        },
    ]
}

fn move_to(tips: &mut Vec<ImprovementTip>, category: TipCategory, index: usize) {
    if let Some(position) = tips.iter().position(|tip| tip.category == category) {
        let tip = tips.remove(position);
        let index = index.min(tips.len());
        tips.insert(index, tip);
    }
}

/// Catalog reordered for the stored assessment, if any.
pub fn personalized_tips(assessment: Option<&StoredAssessment>) -> Vec<ImprovementTip> {
    let mut tips = tip_catalog();
    let Some(assessment) = assessment else {
        return tips;
    };

    if assessment.income < 60_000.0 {
        move_to(&mut tips, TipCategory::Income, 0);
    }

    if assessment.debts > assessment.income / 12.0 * 0.3 {
        move_to(&mut tips, TipCategory::Debt, 1);
    }

    if assessment.credit.needs_repair() {
        move_to(&mut tips, TipCategory::Credit, 2);
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::{CreditRating, ResidencyStatus};

    fn assessment(income: f64, debts: f64, credit: CreditRating) -> StoredAssessment {
        StoredAssessment {
            age: 30,
            income,
            debts,
            credit,
            residency: ResidencyStatus::Citizen,
            score: 70,
        }
    }

    fn order(tips: &[ImprovementTip]) -> Vec<TipCategory> {
        tips.iter().map(|tip| tip.category).collect()
    }

    #[test]
    fn no_assessment_returns_catalog_order() {
        let tips = personalized_tips(None);
        assert_eq!(tips.len(), 8);
        assert_eq!(order(&tips), order(&tip_catalog()));
    }

    #[test]
    fn strong_assessment_keeps_catalog_order() {
        let stored = assessment(95_000.0, 300.0, CreditRating::Excellent);
        assert_eq!(order(&personalized_tips(Some(&stored))), order(&tip_catalog()));
    }

    #[test]
    fn weak_areas_lead_the_list() {
        // 40,000 / 12 * 0.3 = 1,000
        let stored = assessment(40_000.0, 1_200.0, CreditRating::Poor);
        let tips = personalized_tips(Some(&stored));
        assert_eq!(
            &order(&tips)[..4],
            &[
                TipCategory::Income,
                TipCategory::Debt,
                TipCategory::Credit,
                TipCategory::Age
            ]
        );
        assert_eq!(tips.len(), 8);
    }

    #[test]
    fn unrecognized_credit_counts_as_needing_repair() {
        let unknown = assessment(90_000.0, 100.0, CreditRating::parse("none"));
        assert_eq!(personalized_tips(Some(&unknown))[2].category, TipCategory::Credit);
    }

    #[test]
    fn move_to_removes_then_inserts() {
        let mut tips = tip_catalog();
        tips.reverse();

        move_to(&mut tips, TipCategory::Income, 0);
        move_to(&mut tips, TipCategory::Debt, 1);
        move_to(&mut tips, TipCategory::Credit, 2);

        assert_eq!(
            &order(&tips)[..4],
            &[
                TipCategory::Income,
                TipCategory::Debt,
                TipCategory::Credit,
                TipCategory::Assets
            ]
        );
        assert_eq!(tips.len(), 8);
    }

    #[test]
    fn move_to_clamps_index_to_length() {
        let mut tips = tip_catalog();
        move_to(&mut tips, TipCategory::Income, 50);
        assert_eq!(tips.last().map(|tip| tip.category), Some(TipCategory::Income));
    }
}
