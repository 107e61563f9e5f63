mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "consentry", version, about = "Consent dialog detection")]
struct Args {
    /// Configuration file (defaults to ./consentry.yaml, then ~/.consentry/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Locate and classify the consent dialog in a document snapshot (JSON)
    Scan {
        snapshot: PathBuf,
        /// Signature catalog used when the heuristics are not confident
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Page URL; when given, a sanitized capture record is emitted
        #[arg(long)]
        url: Option<String>,
        /// Raw dialog markup for the capture record
        #[arg(long, requires = "url")]
        html: Option<PathBuf>,
    },
    /// Check a signature catalog without using it
    ValidateCatalog { catalog: PathBuf },
    /// Sanitize an HTML fragment and print the result
    Sanitize { html: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries JSON results.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = commands::load_config(args.config.as_deref()).await?;

    let output = match args.command {
        Command::Scan {
            snapshot,
            catalog,
            url,
            html,
        } => {
            commands::scan(
                config,
                commands::ScanOptions {
                    snapshot,
                    catalog,
                    url,
                    html,
                },
            )
            .await?
        }
        Command::ValidateCatalog { catalog } => commands::validate_catalog(&catalog).await?,
        Command::Sanitize { html } => commands::sanitize(config, &html).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
