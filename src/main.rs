use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use coinrate::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for coinrate::AppCommand {
    fn from(cmd: Commands) -> coinrate::AppCommand {
        match cmd {
            Commands::Rate { asset, currency } => coinrate::AppCommand::Rate { asset, currency },
            Commands::Currencies => coinrate::AppCommand::Currencies,
            Commands::Assets => coinrate::AppCommand::Assets,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the rate of a cryptocurrency in a fiat currency
    Rate {
        /// Asset id, e.g. "bitcoin"
        asset: String,
        /// Target currency, defaults to the configured one
        currency: Option<String>,
    },
    /// List supported fiat currencies
    Currencies,
    /// List known cryptocurrencies
    Assets,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => coinrate::cli::setup::setup(),
        Some(cmd) => coinrate::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
