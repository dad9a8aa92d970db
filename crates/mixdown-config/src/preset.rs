//! Mastering preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Lowest integrated loudness target the engine's loudness filter accepts.
const MIN_LOUDNORM_LUFS: f64 = -70.0;
/// Highest integrated loudness target the engine's loudness filter accepts.
const MAX_LOUDNORM_LUFS: f64 = -5.0;

/// Mastering settings applied to the master bus for one export target.
///
/// # TOML Format
///
/// ```toml
/// name = "podcast"
/// description = "Spoken word, -16 LUFS, 16-bit dither"
/// limiter_threshold_db = -1.0
/// headroom_db = -2.0
/// loudnorm_target = -16.0
/// dither = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MasteringPreset {
    /// Table key of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Limiter ceiling in dB.
    #[serde(default = "default_limiter")]
    pub limiter_threshold_db: f64,

    /// Gain applied before the limiter, in dB. Combined with the master gain.
    #[serde(default)]
    pub headroom_db: f64,

    /// Integrated loudness target in LUFS; `None` skips normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loudnorm_target: Option<f64>,

    /// Requantize the master to 16-bit PCM.
    #[serde(default)]
    pub dither: bool,
}

fn default_limiter() -> f64 {
    -0.1
}

impl MasteringPreset {
    /// Create a preset with a -0.1 dB limiter and nothing else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            limiter_threshold_db: default_limiter(),
            headroom_db: 0.0,
            loudnorm_target: None,
            dither: false,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the limiter ceiling.
    pub fn with_limiter(mut self, threshold_db: f64) -> Self {
        self.limiter_threshold_db = threshold_db;
        self
    }

    /// Set the pre-limiter headroom.
    pub fn with_headroom(mut self, headroom_db: f64) -> Self {
        self.headroom_db = headroom_db;
        self
    }

    /// Enable loudness normalization to `target_lufs`.
    pub fn with_loudnorm(mut self, target_lufs: f64) -> Self {
        self.loudnorm_target = Some(target_lufs);
        self
    }

    /// Enable or disable 16-bit dither.
    pub fn with_dither(mut self, dither: bool) -> Self {
        self.dither = dither;
        self
    }

    /// Load a preset from a TOML file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a preset from a TOML string and validate it.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let preset: MasteringPreset = toml::from_str(toml_str)?;
        preset.validate()?;
        Ok(preset)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the fields against what the mastering chain can express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid_preset(&self.name, "name must not be empty"));
        }
        if !self.limiter_threshold_db.is_finite() || self.limiter_threshold_db > 0.0 {
            return Err(ConfigError::invalid_preset(
                &self.name,
                format!(
                    "limiter threshold must be finite and <= 0 dB (got {})",
                    self.limiter_threshold_db
                ),
            ));
        }
        if !self.headroom_db.is_finite() {
            return Err(ConfigError::invalid_preset(&self.name, "headroom must be finite"));
        }
        if let Some(target) = self.loudnorm_target
            && !(MIN_LOUDNORM_LUFS..=MAX_LOUDNORM_LUFS).contains(&target)
        {
            return Err(ConfigError::invalid_preset(
                &self.name,
                format!(
                    "loudness target {target} LUFS outside [{MIN_LOUDNORM_LUFS}, {MAX_LOUDNORM_LUFS}]"
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_new() {
        let preset = MasteringPreset::new("flat");
        assert_eq!(preset.name, "flat");
        assert_eq!(preset.limiter_threshold_db, -0.1);
        assert_eq!(preset.headroom_db, 0.0);
        assert!(preset.loudnorm_target.is_none());
        assert!(!preset.dither);
    }

    #[test]
    fn test_from_toml_defaults() {
        let preset = MasteringPreset::from_toml(r#"name = "bare""#).unwrap();
        assert_eq!(preset.limiter_threshold_db, -0.1);
        assert!(preset.loudnorm_target.is_none());
    }

    #[test]
    fn test_toml_roundtrip_keeps_optional_target() {
        let preset = MasteringPreset::new("stream")
            .with_headroom(-1.5)
            .with_loudnorm(-14.0)
            .with_dither(true);
        let parsed = MasteringPreset::from_toml(&preset.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, preset);
    }

    #[test]
    fn test_rejects_positive_limiter() {
        let err = MasteringPreset::new("hot").with_limiter(1.0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPreset { .. }));
    }

    #[test]
    fn test_rejects_loudnorm_out_of_range() {
        assert!(MasteringPreset::new("x").with_loudnorm(-3.0).validate().is_err());
        assert!(MasteringPreset::new("x").with_loudnorm(-80.0).validate().is_err());
        assert!(MasteringPreset::new("x").with_loudnorm(-23.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_name() {
        assert!(MasteringPreset::new("  ").validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("club.toml");
        let preset = MasteringPreset::new("club").with_loudnorm(-9.0);
        preset.save(&path).unwrap();
        assert_eq!(MasteringPreset::load(&path).unwrap(), preset);
    }
}
