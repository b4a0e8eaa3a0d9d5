use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fitroom")]
#[command(about = "fitroom CLI - virtual try-on orchestration client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a try-on composite from a person photo and a clothing photo
    Generate {
        /// Path to the person photo
        #[arg(long)]
        person: PathBuf,
        /// Path to the clothing photo
        #[arg(long)]
        clothing: PathBuf,
        /// Where to write the generated image
        #[arg(long, default_value = "tryon.png")]
        output: PathBuf,
        /// Override the synthesis model
        #[arg(long)]
        model: Option<String>,
    },
    /// Encode a file and print its transport payload summary
    Inspect {
        /// Path to the image file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            person,
            clothing,
            output,
            model,
        } => commands::generate::run(person, clothing, output, model).await?,
        Commands::Inspect { path } => commands::inspect::run(path).await?,
    }

    Ok(())
}
