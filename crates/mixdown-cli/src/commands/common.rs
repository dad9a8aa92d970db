//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use mixdown_compiler::{AssetResolver, DirResolver, MapResolver, PassthroughResolver};
use mixdown_config::{PresetTable, paths};
use mixdown_core::{AssetRef, AudioSequence};
use std::path::{Path, PathBuf};

/// Load a timeline from its JSON serialization.
pub fn load_sequence(path: &Path) -> anyhow::Result<AudioSequence> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read timeline '{}'", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse timeline '{}'", path.display()))
}

/// Factory presets overlaid with the presets in `dir`, or in the user
/// presets directory when `dir` is `None`.
///
/// Files that fail to load are reported and skipped.
pub fn load_preset_table(dir: Option<&Path>) -> PresetTable {
    let dir: PathBuf = dir.map_or_else(paths::user_presets_dir, Path::to_path_buf);
    let mut table = PresetTable::factory();
    for (path, err) in table.load_dir(&dir) {
        eprintln!("warning: skipping preset '{}': {err}", path.display());
    }
    table
}

/// Load an asset manifest (`.json` or `.toml`).
pub fn load_manifest(path: &Path) -> anyhow::Result<MapResolver> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read asset manifest '{}'", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse asset manifest '{}'", path.display())),
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("failed to parse asset manifest '{}'", path.display())),
        _ => anyhow::bail!(
            "unsupported asset manifest '{}' (expected .json or .toml)",
            path.display()
        ),
    }
}

/// The resolver selected on the command line.
pub enum CliResolver {
    /// `--assets MANIFEST`
    Manifest(MapResolver),
    /// `--asset-root DIR`
    Dir(DirResolver),
    /// Neither: ids are used as URIs.
    Passthrough(PassthroughResolver),
}

impl CliResolver {
    /// Pick a resolver from the mutually exclusive `--assets` / `--asset-root` flags.
    pub fn from_args(manifest: Option<&Path>, root: Option<&Path>) -> anyhow::Result<Self> {
        match (manifest, root) {
            (Some(manifest), _) => Ok(Self::Manifest(load_manifest(manifest)?)),
            (None, Some(root)) => Ok(Self::Dir(DirResolver::new(root))),
            (None, None) => Ok(Self::Passthrough(PassthroughResolver)),
        }
    }
}

impl AssetResolver for CliResolver {
    fn resolve(&self, asset: &AssetRef) -> Option<String> {
        match self {
            Self::Manifest(r) => r.resolve(asset),
            Self::Dir(r) => r.resolve(asset),
            Self::Passthrough(r) => r.resolve(asset),
        }
    }
}

/// Write `content` to `path`, or to stdout when `path` is `None`.
pub fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, format!("{content}\n"))
            .with_context(|| format!("failed to write '{}'", path.display())),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
