use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "lovecard", version, about = "An interactive greeting card for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time left until the target instant
    Countdown(commands::countdown::CountdownArgs),
    /// Time together since the anniversary start
    Anniversary(commands::anniversary::AnniversaryArgs),
    /// List the quiz questions, or score a set of answers
    Quiz(commands::quiz::QuizArgs),
    /// Open the card interactively
    Play(commands::play::PlayArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Logs go to stderr so stdout stays clean for scripting.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOVECARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Countdown(args) => commands::countdown::run(args),
        Commands::Anniversary(args) => commands::anniversary::run(args),
        Commands::Quiz(args) => commands::quiz::run(args),
        Commands::Play(args) => commands::play::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
