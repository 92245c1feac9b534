use crate::demo::{
    run_account_score, run_committee_assemble, run_demo, AccountScoreArgs, CommitteeAssembleArgs,
    DemoArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use committee_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Committee Engine",
    about = "Assemble and score buying committees from the command line",
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
    /// Assemble a buying committee from an Apollo export
    Committee {
        #[command(subcommand)]
        command: CommitteeCommand,
    },
    /// Score account fit for the company in an Apollo export
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },
    /// Run an end-to-end CLI demo over a synthetic candidate pool
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum CommitteeCommand {
    /// Import a people export, assemble, validate, and print the committee
    Assemble(CommitteeAssembleArgs),
}

#[derive(Subcommand, Debug)]
enum AccountCommand {
    /// Import a people export and print the account-fit report
    Score(AccountScoreArgs),
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
        Command::Committee {
            command: CommitteeCommand::Assemble(args),
        } => run_committee_assemble(args),
        Command::Account {
            command: AccountCommand::Score(args),
        } => run_account_score(args),
        Command::Demo(args) => run_demo(args),
    }
}
