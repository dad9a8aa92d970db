//! Compile command.

use anyhow::Context;
use clap::{Args, ValueEnum};
use mixdown_compiler::{MASTER_TAP, MixCompiler};
use mixdown_config::load_mix_graph;
use mixdown_core::ValidationReport;
use std::path::PathBuf;

use super::common::{CliResolver, load_preset_table, load_sequence, write_output};

/// What `compile` prints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// The `-filter_complex` program for the selected tap
    Filtergraph,
    /// The full plan as JSON
    Json,
    /// Engine arguments for the selected tap, as a JSON array
    Args,
}

#[derive(Args)]
pub struct CompileArgs {
    /// Timeline JSON file
    timeline: PathBuf,

    /// Bus routing graph (.toml or .json). Without it everything mixes to one bus.
    #[arg(short = 'g', long)]
    mix_graph: Option<PathBuf>,

    /// Export preset name
    #[arg(short, long, default_value = "default")]
    preset: String,

    /// Asset manifest (.json or .toml) mapping ids to URIs
    #[arg(long, conflicts_with = "asset_root")]
    assets: Option<PathBuf>,

    /// Resolve ids to files under DIR/assets and DIR/artifacts
    #[arg(long, value_name = "DIR")]
    asset_root: Option<PathBuf>,

    /// Directory of extra preset files (defaults to the user presets directory)
    #[arg(long, value_name = "DIR")]
    presets_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Emit::Filtergraph)]
    emit: Emit,

    /// Output tap: a bus id or "master"
    #[arg(long, default_value = MASTER_TAP)]
    tap: String,

    /// Render target passed to the engine with --emit args (defaults to <tap>.wav)
    #[arg(long, value_name = "FILE")]
    render_to: Option<PathBuf>,

    /// Write to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Compile even if the timeline fails validation
    #[arg(long)]
    no_validate: bool,
}

pub fn run(args: CompileArgs) -> anyhow::Result<()> {
    let sequence = load_sequence(&args.timeline)?;

    if !args.no_validate {
        let issues = sequence.validate();
        if !issues.is_empty() {
            eprintln!("{}", ValidationReport(issues.clone()));
            anyhow::bail!(
                "timeline has {} issue(s); fix them or pass --no-validate",
                issues.len()
            );
        }
    }

    let mix_graph = args
        .mix_graph
        .as_deref()
        .map(load_mix_graph)
        .transpose()
        .context("failed to load mix graph")?;

    let resolver = CliResolver::from_args(args.assets.as_deref(), args.asset_root.as_deref())?;
    let compiler = MixCompiler::new(load_preset_table(args.presets_dir.as_deref()), resolver);
    let plan = compiler.compile(&sequence, mix_graph.as_ref(), &args.preset)?;

    for diagnostic in &plan.diagnostics {
        eprintln!("warning: {diagnostic}");
    }

    let content = match args.emit {
        Emit::Filtergraph => plan.filter_complex_for(&args.tap)?,
        Emit::Json => serde_json::to_string_pretty(&plan)?,
        Emit::Args => {
            let target = args
                .render_to
                .unwrap_or_else(|| PathBuf::from(format!("{}.wav", args.tap)));
            serde_json::to_string_pretty(&plan.ffmpeg_args(&args.tap, &target)?)?
        }
    };

    write_output(args.output.as_deref(), &content)
}
