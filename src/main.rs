use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// mpwebstudio - MP Web Studio contact API
#[derive(Parser)]
#[command(name = "mpwebstudio")]
#[command(about = "Contact form backend for the MP Web Studio site", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Check that the configured SMTP relay accepts a connection
    CheckMail,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = mpwebstudio::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize observability (tracing + logging)
    mpwebstudio::observability::init_observability(
        "mpwebstudio",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.observability.json,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::CheckMail => cli::mail::check(config).await,
    }
}
