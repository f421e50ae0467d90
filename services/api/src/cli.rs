use crate::demo::{run_places, run_score, PlacesArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use saferoute::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SafeRoute",
    about = "Serve and exercise the SafeRoute safety-scoring backend from the command line",
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
    /// Score a GeoJSON route file with the local heuristic
    Score(ScoreArgs),
    /// Import a places CSV and run an autocomplete query against it
    Places(PlacesArgs),
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
        Command::Score(args) => run_score(args),
        Command::Places(args) => run_places(args),
    }
}
