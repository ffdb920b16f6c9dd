use crate::commands::{run_assess, run_intake, run_keywords, AssessArgs, IntakeArgs, KeywordsArgs};
use crate::server;
use aiaudit::assessment::ModelProbabilities;
use aiaudit::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "aiaudit",
    about = "Triage AI systems against the EU AI Act and plan remediations",
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
    /// Build a remediation plan for a free-text system description
    Assess(AssessArgs),
    /// Score a structured intake form stored as JSON
    Intake(IntakeArgs),
    /// List the keyword dictionary, optionally for a single article
    Keywords(KeywordsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Serve a fixed classifier distribution given as `high,medium,low`
    #[arg(long, value_parser = crate::infra::parse_distribution)]
    pub(crate) fixed_distribution: Option<ModelProbabilities>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Intake(args) => run_intake(args),
        Command::Keywords(args) => run_keywords(args),
    }
}
