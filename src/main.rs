use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use poupanca::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Reference calendar year for the series query (defaults to the current year)
    #[arg(short, long, global = true)]
    year: Option<i32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for poupanca::AppCommand {
    fn from(cmd: Commands) -> poupanca::AppCommand {
        match cmd {
            Commands::Rates => poupanca::AppCommand::Rates,
            Commands::Projection => poupanca::AppCommand::Projection,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the latest SELIC and TR observations for the year
    Rates,
    /// Display the projected annual savings account yield
    Projection,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => poupanca::cli::setup::setup(),
        Some(cmd) => poupanca::run_command(cmd.into(), cli.config_path.as_deref(), cli.year).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
