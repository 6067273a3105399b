use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use seatforge::blob::FileBlobStore;
use seatforge::config::AppConfig;
use seatforge::store::HistoryStore;
use std::process::ExitCode;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    app: AppConfig,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create, list and delete classes
    #[command(subcommand)]
    Class(cmd::classes::ClassCommand),
    /// Add a student to a class roster
    Student(cmd::classes::StudentArgs),
    /// Manage seating preferences and prohibitions
    #[command(subcommand)]
    Pair(cmd::classes::PairCommand),
    /// Set the desk grid of a class
    Config(cmd::classes::ConfigArgs),
    /// Set the generator priority weights of a class
    Priorities(cmd::classes::PrioritiesArgs),
    /// Check a class for inconsistent constraints
    Validate(cmd::validate::ValidateArgs),
    /// Request a seating from the generator and store it
    Generate(cmd::generate::GenerateArgs),
    /// Store a generator response read from a file
    Import(cmd::generate::ImportArgs),
    /// Show the stored seatings of a class
    History(cmd::history::HistoryArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    info!("📂 Data directory: {}", cli.app.data_dir.display());
    let mut store = match HistoryStore::open(FileBlobStore::new(&cli.app.data_dir)) {
        Ok(s) => s,
        Err(e) => {
            error!("❌ Could not load classes: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Class(c) => cmd::classes::run_class(c, &mut store).map(|_| true),
        Commands::Student(args) => cmd::classes::run_student(args, &mut store).map(|_| true),
        Commands::Pair(c) => cmd::classes::run_pair(c, &mut store).map(|_| true),
        Commands::Config(args) => cmd::classes::run_config(args, &mut store).map(|_| true),
        Commands::Priorities(args) => match matches.subcommand_matches("priorities") {
            Some(sub) => cmd::classes::run_priorities(args, sub, &mut store).map(|_| true),
            None => Ok(false),
        },
        Commands::Validate(args) => cmd::validate::run(args, &store),
        Commands::Generate(args) => cmd::generate::run(args, &cli.app.api_url, &mut store).await,
        Commands::Import(args) => cmd::generate::run_import(args, &mut store),
        Commands::History(args) => cmd::history::run(args, &store).map(|_| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
