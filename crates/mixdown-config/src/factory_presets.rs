//! Factory mastering presets bundled with the mixdown library.
//!
//! These rows are always available without external files. The table is
//! fixed: extend it by adding rows, never by mutating it at runtime.

use crate::MasteringPreset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &["default", "podcast", "music", "voiceover"];

/// TOML content for factory presets.
///
/// These are embedded at compile time and always available.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("default", DEFAULT_PRESET),
    ("podcast", PODCAST_PRESET),
    ("music", MUSIC_PRESET),
    ("voiceover", VOICEOVER_PRESET),
];

/// Default preset - safety limiter and a little headroom.
const DEFAULT_PRESET: &str = r#"
name = "default"
description = "Safety limiter with 1 dB headroom, no normalization"
limiter_threshold_db = -0.1
headroom_db = -1.0
dither = false
"#;

/// Podcast preset - spoken word delivery.
const PODCAST_PRESET: &str = r#"
name = "podcast"
description = "Spoken word: -16 LUFS, -1 dB ceiling, 16-bit dither"
limiter_threshold_db = -1.0
headroom_db = -2.0
loudnorm_target = -16.0
dither = true
"#;

/// Music preset - streaming platform loudness.
const MUSIC_PRESET: &str = r#"
name = "music"
description = "Streaming music: -14 LUFS, -0.1 dB ceiling"
limiter_threshold_db = -0.1
headroom_db = -0.5
loudnorm_target = -14.0
dither = false
"#;

/// Voiceover preset - quieter dialogue stems.
const VOICEOVER_PRESET: &str = r#"
name = "voiceover"
description = "Dialogue stems: -18 LUFS, 3 dB headroom"
limiter_threshold_db = -1.0
headroom_db = -3.0
loudnorm_target = -18.0
dither = false
"#;

/// Returns all factory presets, in table order.
pub fn factory_presets() -> Vec<MasteringPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(name, toml_str)| match MasteringPreset::from_toml(toml_str) {
            Ok(preset) => Some(preset),
            Err(e) => {
                tracing::error!("failed to parse factory preset '{name}': {e}");
                None
            }
        })
        .collect()
}

/// Get a factory preset by name (case-insensitive).
pub fn get_factory_preset(name: &str) -> Option<MasteringPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .find(|(preset_name, _)| preset_name.eq_ignore_ascii_case(name))
        .and_then(|(_, toml_str)| MasteringPreset::from_toml(toml_str).ok())
}

/// Check if a name refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    FACTORY_PRESET_NAMES
        .iter()
        .any(|n| n.eq_ignore_ascii_case(name))
}
