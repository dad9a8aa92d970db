//! Integration tests for mixdown-config.
//!
//! These tests verify end-to-end functionality across modules.

use mixdown_config::{
    ConfigError, FACTORY_PRESET_NAMES, MasteringPreset, PresetTable, load_mix_graph, paths,
};
use tempfile::TempDir;

/// User presets loaded on top of the factory table override by name.
#[test]
fn test_user_dir_overrides_factory() {
    let dir = TempDir::new().unwrap();
    MasteringPreset::new("podcast")
        .with_description("Louder podcast")
        .with_limiter(-0.5)
        .with_loudnorm(-14.0)
        .save(dir.path().join("podcast.toml"))
        .unwrap();
    MasteringPreset::new("radio")
        .with_loudnorm(-23.0)
        .with_dither(true)
        .save(dir.path().join("radio.toml"))
        .unwrap();

    let mut table = PresetTable::factory();
    let failures = table.load_dir(dir.path());
    assert!(failures.is_empty(), "unexpected failures: {failures:?}");

    assert_eq!(table.len(), FACTORY_PRESET_NAMES.len() + 1);
    let podcast = table.require("podcast").unwrap();
    assert_eq!(podcast.loudnorm_target, Some(-14.0));
    assert!(!podcast.dither);
    assert!(table.get("radio").is_some_and(|p| p.dither));
}

/// Every saved preset file is listed and named after its stem.
#[test]
fn test_saved_presets_are_listed() {
    let dir = TempDir::new().unwrap();
    for name in ["b_side", "a_side"] {
        MasteringPreset::new(name)
            .save(dir.path().join(format!("{name}.toml")))
            .unwrap();
    }

    let names: Vec<String> = paths::list_presets_in_dir(dir.path())
        .iter()
        .filter_map(|p| paths::preset_name_from_path(p))
        .collect();
    assert_eq!(names, ["a_side", "b_side"]);
}

/// Mix graphs load from both formats to the same value.
#[test]
fn test_mix_graph_formats_agree() {
    let dir = TempDir::new().unwrap();
    let toml_path = dir.path().join("graph.toml");
    let json_path = dir.path().join("graph.json");

    std::fs::write(
        &toml_path,
        r#"
master_gain_db = -1.0

[[buses]]
id = "bus_vox"
name = "Vocals"
roles = ["vocal"]
gain_db = 2.0
"#,
    )
    .unwrap();
    std::fs::write(
        &json_path,
        r#"{"master_gain_db": -1.0, "buses": [{"id": "bus_vox", "name": "Vocals", "roles": ["vocal"], "gain_db": 2.0}]}"#,
    )
    .unwrap();

    assert_eq!(
        load_mix_graph(&toml_path).unwrap(),
        load_mix_graph(&json_path).unwrap()
    );
}

/// An invalid preset file is rejected on load.
#[test]
fn test_load_invalid_preset_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loud.toml");
    std::fs::write(&path, "name = \"loud\"\nloudnorm_target = 0.0\n").unwrap();

    let err = MasteringPreset::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPreset { .. }));
}
