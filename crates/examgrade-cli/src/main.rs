//! examgrade CLI: score answer sheets and estimate admission probability.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use examgrade_core::model::{Category, Gender, HomeState, PwdStatus};

mod commands;

use commands::OutputFormat;

#[derive(Parser)]
#[command(
    name = "examgrade",
    version,
    about = "Score exam answer sheets against the answer key"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an answer sheet
    Score {
        /// Path to the JSON answer sheet
        #[arg(long)]
        file: PathBuf,

        /// Show a per-question breakdown
        #[arg(long)]
        detail: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Only accept files named *.json
        #[arg(long)]
        json_only: bool,

        /// Write a JSON report to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score an answer sheet and estimate admission probability
    Estimate {
        /// Path to the JSON answer sheet
        #[arg(long)]
        file: PathBuf,

        /// Category: gen, ews, obc, sc, st
        #[arg(long)]
        category: Option<Category>,

        /// Gender: male, female (recorded only)
        #[arg(long)]
        gender: Option<Gender>,

        /// State: up, other (recorded only)
        #[arg(long)]
        state: Option<HomeState>,

        /// Person with disability: yes, no
        #[arg(long)]
        pwd: Option<PwdStatus>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Only accept files named *.json
        #[arg(long)]
        json_only: bool,

        /// Write a JSON report to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check an answer sheet for entries that cannot score
    Validate {
        /// Path to the JSON answer sheet
        #[arg(long)]
        file: PathBuf,
    },

    /// Print the answer key
    Key {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Create a starter config and example answer sheet
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examgrade=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            file,
            detail,
            format,
            json_only,
            output,
            config,
        } => commands::score::execute(file, detail, format, json_only, output, config).await,
        Commands::Estimate {
            file,
            category,
            gender,
            state,
            pwd,
            format,
            json_only,
            output,
            config,
        } => {
            let overrides = commands::estimate::ProfileOverrides {
                category,
                gender,
                state,
                pwd,
            };
            commands::estimate::execute(file, overrides, format, json_only, output, config).await
        }
        Commands::Validate { file } => commands::validate::execute(file),
        Commands::Key { format } => commands::key::execute(format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
