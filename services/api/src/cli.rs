use crate::demo::{run_batch, run_demo, run_score, BatchArgs, ScoreInputArgs, ScoreKind};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rent_scoring::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rent Scoring",
    about = "Score rental deals and negotiation leverage from the command line",
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
    /// Score a single JSON input file
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
    /// Score every property in a snapshot CSV export
    Batch(BatchArgs),
    /// Score a handful of sample properties and print the results
    Demo,
}

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Compute a deal score from a DealScoreInput JSON file
    Deal(ScoreInputArgs),
    /// Compute a leverage score from a LeverageScoreInput JSON file
    Leverage(ScoreInputArgs),
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
        Command::Score {
            command: ScoreCommand::Deal(args),
        } => run_score(ScoreKind::Deal, args).await,
        Command::Score {
            command: ScoreCommand::Leverage(args),
        } => run_score(ScoreKind::Leverage, args).await,
        Command::Batch(args) => run_batch(args).await,
        Command::Demo => run_demo().await,
    }
}
