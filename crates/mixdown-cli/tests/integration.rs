//! Integration tests for mixdown-cli.
//!
//! Tests invoke the built binary against timelines written to temporary
//! directories.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the `mixdown` binary built by cargo.
fn mixdown_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mixdown"))
}

const TIMELINE: &str = r#"{
  "id": "song",
  "tracks": [
    {
      "id": "t_drums",
      "name": "Kit",
      "role": "drums",
      "clips": [
        {"id": "kick", "source": {"asset_id": "kick"}, "start_ms": 0, "duration_ms": 2000}
      ]
    },
    {
      "id": "t_vox",
      "name": "Lead",
      "role": "vocal",
      "gain_db": -3,
      "clips": [
        {
          "id": "line1",
          "source": {"artifact_id": "take-7"},
          "start_ms": 500,
          "duration_ms": 3000,
          "fade_in_ms": 100,
          "fade_out_ms": 400,
          "fade_curve": "exp"
        }
      ]
    }
  ]
}"#;

const MIX_GRAPH: &str = r#"
master_gain_db = 0.0

[[buses]]
id = "bus_drums"
name = "Drums"
roles = ["drums"]

[[buses]]
id = "bus_vox"
name = "Vocals"
roles = ["vocal"]
gain_db = 1.5
"#;

const MANIFEST: &str = r#"{
  "assets": {"kick": "/media/kick.wav"},
  "artifacts": {"take-7": "/renders/take-7.wav"}
}"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("timeline.json"), TIMELINE).unwrap();
        std::fs::write(dir.path().join("graph.toml"), MIX_GRAPH).unwrap();
        std::fs::write(dir.path().join("assets.json"), MANIFEST).unwrap();
        std::fs::create_dir(dir.path().join("presets")).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn compile(&self, extra: &[&str]) -> std::process::Output {
        mixdown_bin()
            .arg("compile")
            .arg(self.path("timeline.json"))
            .arg("--mix-graph")
            .arg(self.path("graph.toml"))
            .arg("--assets")
            .arg(self.path("assets.json"))
            .arg("--presets-dir")
            .arg(self.path("presets"))
            .args(extra)
            .output()
            .expect("failed to run mixdown compile")
    }
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// mixdown compile
// ---------------------------------------------------------------------------

#[test]
fn compile_prints_filtergraph() {
    let fx = Fixture::new();
    let output = fx.compile(&["--preset", "podcast"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let wire = stdout(&output);
    let wire = wire.trim_end();
    assert!(wire.starts_with("[0:a]atrim=start=0.000:duration=2.000"), "{wire}");
    assert!(wire.contains("afade=t=out:st=2.600:d=0.400:curve=exp"));
    assert!(wire.contains("[bus_vox]volume=1.500dB[bus_vox_gain]"));
    assert!(wire.contains("loudnorm=I=-16.0:LRA=7.0:TP=-2.0"));
    assert!(wire.ends_with("[master_dither]"));
}

#[test]
fn compile_emits_plan_json() {
    let fx = Fixture::new();
    let output = fx.compile(&["--emit", "json"]);
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        plan["inputs"],
        serde_json::json!(["/media/kick.wav", "/renders/take-7.wav"])
    );
    assert_eq!(plan["output_taps"]["bus_drums"], "bus_drums");
    assert_eq!(plan["output_taps"]["master"], "master_limiter");
    assert_eq!(plan["bus_metadata"]["bus_vox"]["gain_db"], 1.5);
    assert_eq!(plan["bus_metadata"]["master"]["export_preset_name"], "default");
}

#[test]
fn compile_emits_engine_args_for_a_stem() {
    let fx = Fixture::new();
    let output = fx.compile(&["--emit", "args", "--tap", "bus_vox", "--render-to", "vox.wav"]);
    assert!(output.status.success());

    let args: Vec<String> = serde_json::from_str(&stdout(&output)).unwrap();
    let program = &args[args.iter().position(|a| a == "-filter_complex").unwrap() + 1];
    assert!(program.starts_with("[1:a]atrim"), "{program}");
    assert!(!program.contains("master"));
    assert_eq!(&args[args.len() - 3..], ["-map", "[bus_vox_gain]", "vox.wav"]);
}

#[test]
fn compile_writes_output_file() {
    let fx = Fixture::new();
    let target = fx.path("out.txt");
    let output = fx.compile(&["--output", target.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(std::fs::read_to_string(&target).unwrap().contains("[master_sum]"));
}

#[test]
fn compile_rejects_unknown_preset() {
    let fx = Fixture::new();
    let output = fx.compile(&["--preset", "alien_preset"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("alien_preset"));
}

#[test]
fn compile_reports_unresolved_clips() {
    let fx = Fixture::new();
    std::fs::write(fx.path("assets.json"), r#"{"assets": {"kick": "/media/kick.wav"}}"#).unwrap();
    let output = fx.compile(&[]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line1"), "{stderr}");
    assert!(!stdout(&output).contains("bus_vox"));
}

#[test]
fn compile_uses_user_preset_dir() {
    let fx = Fixture::new();
    std::fs::write(
        fx.path("presets").join("radio.toml"),
        "name = \"radio\"\nlimiter_threshold_db = -1.5\nloudnorm_target = -23.0\n",
    )
    .unwrap();
    let output = fx.compile(&["--preset", "radio"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let wire = stdout(&output);
    assert!(wire.contains("loudnorm=I=-23.0"));
    assert!(wire.contains("alimiter=limit=-1.5dB"));
}

#[test]
fn compile_refuses_invalid_timeline_unless_told() {
    let fx = Fixture::new();
    let broken = TIMELINE.replace("\"fade_out_ms\": 400", "\"fade_out_ms\": 2950");
    std::fs::write(fx.path("timeline.json"), broken).unwrap();

    let refused = fx.compile(&[]);
    assert!(!refused.status.success());
    assert!(String::from_utf8_lossy(&refused.stderr).contains("exceed duration"));

    let forced = fx.compile(&["--no-validate"]);
    assert!(forced.status.success());
}

// ---------------------------------------------------------------------------
// mixdown validate
// ---------------------------------------------------------------------------

fn validate(path: &Path) -> std::process::Output {
    mixdown_bin()
        .arg("validate")
        .arg(path)
        .output()
        .expect("failed to run mixdown validate")
}

#[test]
fn validate_accepts_clean_timeline() {
    let fx = Fixture::new();
    let output = validate(&fx.path("timeline.json"));
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("ok: 2 track(s), 2 clip(s), 3500 ms"));
}

#[test]
fn validate_lists_issues() {
    let fx = Fixture::new();
    let broken = TIMELINE.replace("\"duration_ms\": 2000", "\"duration_ms\": -5");
    std::fs::write(fx.path("timeline.json"), broken).unwrap();
    let output = validate(&fx.path("timeline.json"));
    assert!(!output.status.success());
    assert!(stdout(&output).contains("kick"));
}

// ---------------------------------------------------------------------------
// mixdown presets
// ---------------------------------------------------------------------------

#[test]
fn presets_list_shows_factory_rows() {
    let fx = Fixture::new();
    let output = mixdown_bin()
        .args(["presets", "list", "--presets-dir"])
        .arg(fx.path("presets"))
        .output()
        .expect("failed to run mixdown presets list");
    assert!(output.status.success());
    let out = stdout(&output);
    for name in ["default", "podcast", "music", "voiceover"] {
        assert!(out.contains(name), "missing '{name}' in:\n{out}");
    }
}

#[test]
fn presets_show_prints_toml() {
    let fx = Fixture::new();
    let output = mixdown_bin()
        .args(["presets", "show", "voiceover", "--presets-dir"])
        .arg(fx.path("presets"))
        .output()
        .expect("failed to run mixdown presets show");
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("loudnorm_target = -18.0"), "{out}");
    assert!(out.contains("headroom_db = -3.0"));
}

#[test]
fn presets_save_writes_loadable_file() {
    let fx = Fixture::new();
    let dir = fx.path("presets");
    std::fs::remove_dir(&dir).unwrap();
    let save = |extra: &[&str]| {
        mixdown_bin()
            .args(["presets", "save", "broadcast", "--limiter", "-2.0", "--loudnorm", "-23.0"])
            .arg("--presets-dir")
            .arg(&dir)
            .args(extra)
            .output()
            .expect("failed to run mixdown presets save")
    };

    let output = save(&["--dither"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.join("broadcast.toml").is_file());

    let again = save(&[]);
    assert!(!again.status.success());
    assert!(String::from_utf8_lossy(&again.stderr).contains("--force"));

    let output = fx.compile(&["--preset", "broadcast"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let wire = stdout(&output);
    assert!(wire.contains("loudnorm=I=-23.0"));
    assert!(wire.contains("alimiter=limit=-2.0dB"));
    assert!(wire.ends_with("[master_dither]\n"));
}

#[test]
fn presets_save_rejects_invalid_values() {
    let fx = Fixture::new();
    let output = mixdown_bin()
        .args(["presets", "save", "hot", "--limiter", "3.0", "--presets-dir"])
        .arg(fx.path("presets"))
        .output()
        .expect("failed to run mixdown presets save");
    assert!(!output.status.success());
    assert!(!fx.path("presets").join("hot.toml").exists());
}
