use crate::commands::{
    run_compare, run_plans, run_predict, run_premium, CompareArgs, PredictArgs, PremiumArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use healthcare_aid::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Healthcare Aid",
    about = "Serve or run the symptom matching and premium rating engines from the command line",
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
    /// Rank candidate diseases for a set of symptoms
    Predict(PredictArgs),
    /// Quote a single insurance plan for an applicant
    Premium(PremiumArgs),
    /// Compare premiums across two or more plans
    Compare(CompareArgs),
    /// List the insurance plans in the reference catalog
    Plans,
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

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
        Command::Premium(args) => run_premium(args),
        Command::Compare(args) => run_compare(args),
        Command::Plans => run_plans(),
    }
}
