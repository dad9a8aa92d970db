//! Preset management commands.
//!
//! Lists and shows the mastering presets the compiler can target.

use clap::{Args, Subcommand};
use anyhow::Context;
use mixdown_config::{MasteringPreset, get_factory_preset, paths};
use std::path::{Path, PathBuf};

use super::common::load_preset_table;

#[derive(Args)]
pub struct PresetsArgs {
    /// Directory of extra preset files (defaults to the user presets directory)
    #[arg(long, global = true, value_name = "DIR")]
    presets_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List,

    /// Show a preset as TOML
    Show {
        /// Preset name
        name: String,
    },

    /// Save a mastering preset to the presets directory
    Save(SaveArgs),

    /// Show preset directories
    Paths,
}

#[derive(Args)]
struct SaveArgs {
    /// Name for the new preset
    name: String,

    /// Limiter ceiling in dB (must be <= 0)
    #[arg(long, default_value_t = -0.1, allow_negative_numbers = true)]
    limiter: f64,

    /// Headroom applied before the limiter, in dB
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    headroom: f64,

    /// Loudness normalization target in LUFS
    #[arg(long, allow_negative_numbers = true)]
    loudnorm: Option<f64>,

    /// Dither to 16-bit on export
    #[arg(long)]
    dither: bool,

    /// Description of the preset
    #[arg(short, long)]
    description: Option<String>,

    /// Overwrite if the preset file already exists
    #[arg(short, long)]
    force: bool,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => list_presets(args.presets_dir),
        PresetsCommand::Show { name } => show_preset(args.presets_dir, &name),
        PresetsCommand::Save(save) => save_preset(args.presets_dir.as_deref(), save),
        PresetsCommand::Paths => show_paths(),
    }
}

fn list_presets(dir: Option<PathBuf>) -> anyhow::Result<()> {
    let table = load_preset_table(dir.as_deref());

    println!("Mastering Presets:");
    println!("==================");
    for preset in table.iter() {
        let source = if get_factory_preset(&preset.name).as_ref() == Some(preset) {
            "factory"
        } else {
            "user"
        };
        let loudnorm = preset
            .loudnorm_target
            .map_or_else(|| "-".to_string(), |t| format!("{t:.1} LUFS"));
        println!(
            "  {:12} [{source:7}] limiter {:>5.1} dB  headroom {:>5.1} dB  loudnorm {:>10}  dither {}",
            preset.name,
            preset.limiter_threshold_db,
            preset.headroom_db,
            loudnorm,
            if preset.dither { "on" } else { "off" },
        );
    }
    Ok(())
}

fn show_preset(dir: Option<PathBuf>, name: &str) -> anyhow::Result<()> {
    let table = load_preset_table(dir.as_deref());
    let preset = table.require(name)?;
    print!("{}", preset.to_toml()?);
    Ok(())
}

fn save_preset(dir: Option<&Path>, args: SaveArgs) -> anyhow::Result<()> {
    let mut preset = MasteringPreset::new(&args.name)
        .with_limiter(args.limiter)
        .with_headroom(args.headroom)
        .with_dither(args.dither);
    if let Some(target) = args.loudnorm {
        preset = preset.with_loudnorm(target);
    }
    if let Some(description) = args.description {
        preset = preset.with_description(description);
    }
    preset.validate()?;

    let dir = match dir {
        Some(dir) => paths::ensure_presets_dir(dir)?,
        None => paths::ensure_user_presets_dir()?,
    };
    let path = dir.join(format!("{}.toml", args.name));
    if path.exists() && !args.force {
        anyhow::bail!(
            "preset '{}' already exists at {}; use --force to overwrite",
            args.name,
            path.display()
        );
    }

    preset
        .save(&path)
        .with_context(|| format!("failed to save preset '{}'", args.name))?;
    println!("Saved preset '{}' to {}", args.name, path.display());
    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("User config:  {}", paths::user_config_dir().display());
    println!("User presets: {}", paths::user_presets_dir().display());
    Ok(())
}
