use crate::infra::EligibilityService;
use clap::{Args, ValueEnum};
use loan_eligibility::advice::ImprovementTip;
use loan_eligibility::config::AppConfig;
use loan_eligibility::eligibility::{BorrowerProfile, EligibilityResult};
use loan_eligibility::error::AppError;
use loan_eligibility::lenders::{write_csv, LenderRecord};
use loan_eligibility::session::FileStore;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Borrower age in years
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) age: i32,
    /// Gross annual income (NZD)
    #[arg(long)]
    pub(crate) income: f64,
    /// Total monthly debt repayments (NZD)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) monthly_debt: f64,
    /// Credit history: Excellent, Good, Average or Poor
    #[arg(long)]
    pub(crate) credit: String,
    /// Residency: Citizen, Resident, Work Visa or other
    #[arg(long)]
    pub(crate) residency: String,
    /// Print the full result as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Do not overwrite the stored assessment
    #[arg(long)]
    pub(crate) no_save: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct LendersArgs {
    /// Compare against this score instead of the stored assessment
    #[arg(long, value_parser = clap::value_parser!(u8).range(..=100))]
    pub(crate) score: Option<u8>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct TipsArgs {
    /// Print the tips as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

fn file_service(config: &AppConfig) -> EligibilityService<FileStore> {
    EligibilityService::from_config(config, FileStore::new(&config.storage.state_dir))
}

pub(crate) fn run_score(config: &AppConfig, args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        age,
        income,
        monthly_debt,
        credit,
        residency,
        json,
        no_save,
    } = args;

    let service = file_service(config);
    let profile = BorrowerProfile::new(age, income, monthly_debt, credit, residency);
    let result = if no_save {
        service.score(&profile)
    } else {
        service.score_and_store(&profile)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render_result(&result);
    }
    Ok(())
}

pub(crate) fn run_lenders(config: &AppConfig, args: LendersArgs) -> Result<(), AppError> {
    let service = file_service(config);
    let comparison = service.lender_comparison(args.score);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Csv => {
            let lenders: Vec<&LenderRecord> = comparison.lenders.iter().collect();
            write_csv(std::io::stdout().lock(), &lenders)?;
        }
        OutputFormat::Table => {
            match comparison.score {
                Some(score) => println!("Lenders for an eligibility score of {score}%"),
                None => println!(
                    "All lenders (run `score` first for personalised recommendations)"
                ),
            }
            render_lenders(&comparison.lenders);
        }
    }
    Ok(())
}

pub(crate) fn run_tips(config: &AppConfig, args: TipsArgs) -> Result<(), AppError> {
    let service = file_service(config);
    let improvements = service.improvements();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&improvements)?);
        return Ok(());
    }

    if let Some(score) = improvements.score {
        println!("Current score: {score}% - here's how to improve it");
    }
    render_tips(&improvements.tips);
    Ok(())
}

pub(crate) fn run_reset(config: &AppConfig) -> Result<(), AppError> {
    file_service(config).reset()?;
    println!("Stored assessment cleared");
    Ok(())
}

fn render_result(result: &EligibilityResult) {
    println!("Eligibility score: {}/100 ({} tier)", result.score, result.tier.label());
    println!("{}", result.message);
    println!("Indicative loan amount: Up to {}", result.loan_range);
    println!("Breakdown:");
    for component in &result.components {
        println!(
            "  - {}: {}/{}",
            component.factor.label(),
            component.points,
            component.max_points
        );
    }
    if !result.improvements.is_empty() {
        println!("Suggestions:");
        for item in &result.improvements {
            println!(
                "  - [{}] {} ({} impact)",
                item.category.label(),
                item.suggestion,
                item.impact.label()
            );
        }
    }
}

fn render_lenders(lenders: &[LenderRecord]) {
    if lenders.is_empty() {
        println!("No matching lenders. Consider improving your eligibility score.");
        return;
    }
    for lender in lenders {
        println!(
            "- {} ({}) | {} - {} | {} | min score {}%",
            lender.name,
            lender.lender_type.label(),
            lender.rate_from,
            lender.rate_to,
            lender.range,
            lender.min_score_needed
        );
        println!("    {}", lender.eligibility_notes);
        println!("    Apply: {}", lender.url);
    }
}

fn render_tips(tips: &[ImprovementTip]) {
    for tip in tips {
        println!(
            "- {} [{} impact, {}]",
            tip.title,
            tip.impact.label(),
            tip.timeframe
        );
        println!("    {}", tip.description);
        for action in &tip.actions {
            println!("    * {action}");
        }
    }
}
