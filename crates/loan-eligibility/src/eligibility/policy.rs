use serde::{Deserialize, Serialize};

/// Coarse eligibility bucket derived from the clamped score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    High,
    Moderate,
    Low,
}

impl Tier {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Tier::High
        } else if score >= 60 {
            Tier::Moderate
        } else {
            Tier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::High => "High",
            Tier::Moderate => "Moderate",
            Tier::Low => "Low",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Tier::High => "You're likely to qualify with most NZ banks",
            Tier::Moderate => "Moderate chance with some lenders",
            Tier::Low => "Consider improving your financial position",
        }
    }

    /// Accent colour for the result card.
    pub fn color(&self) -> &'static str {
        match self {
            Tier::High => "#22C55E",
            Tier::Moderate => "#F59E0B",
            Tier::Low => "#EF4444",
        }
    }

    fn income_multiple(&self) -> f64 {
        match self {
            Tier::High => 0.8,
            Tier::Moderate => 0.5,
            Tier::Low => 0.3,
        }
    }

    fn cap(&self) -> u64 {
        match self {
            Tier::High => 70_000,
            Tier::Moderate => 40_000,
            Tier::Low => 20_000,
        }
    }

    /// Indicative upper bound on the loan amount, in whole dollars.
    pub fn loan_ceiling(&self, income: f64) -> u64 {
        let income = if income.is_finite() && income > 0.0 {
            income
        } else {
            0.0
        };
        let scaled = (income * self.income_multiple()).round();
        (scaled as u64).min(self.cap())
    }
}

/// Renders whole dollars as `$12,345`.
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push('$');
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
