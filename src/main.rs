use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod commands;
mod config;
mod format;
mod models;
mod session;

use commands::{AnalyzeCommand, AuthCommand, ConfigCommand, DetectCommand, PingCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "cropbot")]
#[command(version)]
#[command(about = "Diagnose crop diseases from a photo", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, sign up or reset a password
    Auth(AuthCommand),

    /// Analyze a crop image for disease
    Analyze(AnalyzeCommand),

    /// Run raw disease detection on an image
    Detect(DetectCommand),

    /// Check that the analysis service is reachable
    Ping(PingCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output stays pipeable.
///
/// `CROPBOT_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("CROPBOT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("cropbot={}", default_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(cli.config)?;
    tracing::debug!("Using API at {}", config.api_url.value);

    match cli.command {
        Some(Commands::Auth(cmd)) => cmd.run(&config).await?,
        Some(Commands::Analyze(cmd)) => cmd.run(&config).await?,
        Some(Commands::Detect(cmd)) => cmd.run(&config).await?,
        Some(Commands::Ping(cmd)) => cmd.run(&config).await?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_with_location() {
        let cli = Cli::try_parse_from(["cropbot", "analyze", "leaf.jpg", "--location", "Eldoret"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Analyze(_))));
    }

    #[test]
    fn test_parse_verbosity() {
        let cli = Cli::try_parse_from(["cropbot", "-vv", "ping"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_reset_confirm_requires_token() {
        assert!(Cli::try_parse_from(["cropbot", "auth", "reset-confirm"]).is_err());
    }
}
