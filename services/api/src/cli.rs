use crate::commands::{
    run_lenders, run_reset, run_score, run_tips, LendersArgs, ScoreArgs, TipsArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_eligibility::config::AppConfig;
use loan_eligibility::error::AppError;
use loan_eligibility::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "NZ Loan Eligibility",
    about = "Score indicative personal-loan eligibility and compare NZ lenders",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a borrower and remember the result for the other commands
    Score(ScoreArgs),
    /// List lenders whose minimum score the stored (or given) score meets
    Lenders(LendersArgs),
    /// Show score-improvement tips ordered for the stored assessment
    Tips(TipsArgs),
    /// Forget the stored assessment
    Reset,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Score(args) => run_score(&config, args),
        Command::Lenders(args) => run_lenders(&config, args),
        Command::Tips(args) => run_tips(&config, args),
        Command::Reset => run_reset(&config),
    }
}
