//! Mixdown CLI - compile audio timelines into ffmpeg filtergraphs.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mixdown")]
#[command(author, version, about = "Audio timeline to ffmpeg filtergraph compiler", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a timeline into a filtergraph, plan, or engine arguments
    Compile(commands::compile::CompileArgs),

    /// Check a timeline for structural problems
    Validate(commands::validate::ValidateArgs),

    /// List and inspect mastering presets
    Presets(commands::presets::PresetsArgs),
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compile(args) => commands::compile::run(args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
