//! The preset table injected into the compiler.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::factory_presets::factory_presets;
use crate::paths::list_presets_in_dir;
use crate::preset::MasteringPreset;

/// Name-keyed mastering presets.
///
/// The table is assembled once, before compilation, and read-only afterwards.
/// Later insertions replace earlier rows with the same name, so user presets
/// loaded after [`PresetTable::factory`] override factory rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetTable {
    presets: BTreeMap<String, MasteringPreset>,
}

impl PresetTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding the factory presets.
    pub fn factory() -> Self {
        factory_presets()
            .into_iter()
            .fold(Self::new(), Self::with_preset)
    }

    /// Insert a preset, replacing any row with the same name.
    pub fn with_preset(mut self, preset: MasteringPreset) -> Self {
        self.insert(preset);
        self
    }

    /// Insert a preset, returning the row it replaced.
    pub fn insert(&mut self, preset: MasteringPreset) -> Option<MasteringPreset> {
        self.presets.insert(preset.name.clone(), preset)
    }

    /// Load every `.toml` file in `dir` into the table.
    ///
    /// Files that fail to parse are skipped and returned with their error;
    /// a missing directory loads nothing.
    pub fn load_dir(&mut self, dir: &Path) -> Vec<(PathBuf, ConfigError)> {
        let mut failures = Vec::new();
        for path in list_presets_in_dir(dir) {
            match MasteringPreset::load(&path) {
                Ok(preset) => {
                    tracing::debug!(preset = %preset.name, path = %path.display(), "loaded preset");
                    if let Some(old) = self.insert(preset) {
                        tracing::debug!(preset = %old.name, "preset overridden");
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping preset");
                    failures.push((path, e));
                }
            }
        }
        failures
    }

    /// Look up a preset by exact name.
    pub fn get(&self, name: &str) -> Option<&MasteringPreset> {
        self.presets.get(name)
    }

    /// Look up a preset, failing with [`ConfigError::PresetNotFound`].
    pub fn require(&self, name: &str) -> Result<&MasteringPreset, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
    }

    /// Whether the table has a row for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Presets in name order.
    pub fn iter(&self) -> impl Iterator<Item = &MasteringPreset> {
        self.presets.values()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
