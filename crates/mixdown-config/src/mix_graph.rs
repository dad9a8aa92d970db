//! Loading bus routing graphs from disk.

use std::path::Path;

use mixdown_core::MixGraph;

use crate::error::ConfigError;

/// Load a [`MixGraph`] from a `.toml` or `.json` file.
///
/// # Errors
///
/// [`ConfigError::UnsupportedFormat`] for any other extension, or the
/// read/parse error of the chosen format.
pub fn load_mix_graph(path: impl AsRef<Path>) -> Result<MixGraph, ConfigError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let parse: fn(&str) -> Result<MixGraph, ConfigError> = match ext.as_deref() {
        Some("toml") => mix_graph_from_toml,
        Some("json") => mix_graph_from_json,
        _ => {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let graph = parse(&content)?;
    tracing::debug!(path = %path.display(), buses = graph.buses.len(), "loaded mix graph");
    Ok(graph)
}

/// Parse a [`MixGraph`] from TOML.
///
/// ```rust
/// let graph = mixdown_config::mix_graph_from_toml(r#"
/// master_gain_db = -1.0
///
/// [[buses]]
/// id = "bus_vox"
/// name = "Vocals"
/// roles = ["vocal", "dialogue"]
/// "#).unwrap();
/// assert_eq!(graph.buses[0].roles.len(), 2);
/// ```
pub fn mix_graph_from_toml(content: &str) -> Result<MixGraph, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Parse a [`MixGraph`] from JSON.
pub fn mix_graph_from_json(content: &str) -> Result<MixGraph, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const GRAPH_TOML: &str = r#"
master_gain_db = -2.0

[[buses]]
id = "bus_drums"
name = "Drums"
roles = ["drums"]
gain_db = -1.5

[[buses]]
id = "bus_music"
name = "Music"
roles = ["keys", "bass"]
"#;

    #[test]
    fn toml_keeps_bus_order() {
        let graph = mix_graph_from_toml(GRAPH_TOML).unwrap();
        assert_eq!(graph.master_gain_db, -2.0);
        assert_eq!(graph.buses[0].id, "bus_drums");
        assert_eq!(graph.buses[1].gain_db, 0.0);
    }

    #[test]
    fn load_by_extension() {
        let dir = TempDir::new().unwrap();
        let toml_path = dir.path().join("graph.toml");
        std::fs::write(&toml_path, GRAPH_TOML).unwrap();
        let json_path = dir.path().join("graph.JSON");
        std::fs::write(&json_path, r#"{"buses": [{"id": "only"}]}"#).unwrap();

        assert_eq!(load_mix_graph(&toml_path).unwrap().buses.len(), 2);
        assert_eq!(load_mix_graph(&json_path).unwrap().buses[0].id, "only");
    }

    #[test]
    fn unsupported_extension() {
        let err = load_mix_graph("graph.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_mix_graph("/nonexistent/graph.json").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            mix_graph_from_json("{").unwrap_err(),
            ConfigError::JsonParse(_)
        ));
    }
}
