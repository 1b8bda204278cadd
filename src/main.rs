use clap::{Parser, Subcommand};
use crewforge::model::CharacterTable;
use std::process;
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ship layout optimizer and upgrade planner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Character talent table.
    #[arg(global = true, short, long, default_value = "data/characters.json")]
    characters: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find the best placement of the selected roster.
    Optimize(cmd::optimize::OptimizeArgs),
    /// Rank every affordable rank upgrade by its efficiency gain.
    Roi(cmd::roi::RoiArgs),
    /// Show a character's resolved ship talents at a rank.
    Talents(cmd::talents::TalentsArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let table = match CharacterTable::load_from_file(&cli.characters) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("❌ Could not load character table '{}': {e}", cli.characters);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Optimize(args) => cmd::optimize::run(args, &table),
        Commands::Roi(args) => cmd::roi::run(args, &table),
        Commands::Talents(args) => cmd::talents::run(args, &table),
    };

    if let Err(e) = result {
        eprintln!("❌ {e}");
        process::exit(1);
    }
}
