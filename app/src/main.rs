//! Printdesk binary.
//!
//! Parses the command line, loads environment defaults, and hands off
//! to the subcommand handlers.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use printdesk::cli::{Cli, Command};
use printdesk::{commands, config};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    config::load_dotenv();

    let cli = Cli::parse();
    match cli.command {
        Command::Print(args) => commands::print::run(args),
        Command::Pad(args) => commands::pad::run(args),
        Command::Label(args) => commands::label::run(args),
        Command::Printers(args) => commands::printers::run(args),
    }
}
