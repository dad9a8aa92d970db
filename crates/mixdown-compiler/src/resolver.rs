//! Asset resolution.
//!
//! The compiler never touches storage. It asks an [`AssetResolver`] for the
//! URI of each clip's source and drops clips whose source does not resolve.

use mixdown_core::AssetRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Maps a clip's source reference to a URI the DSP engine can open.
pub trait AssetResolver {
    /// The URI for `asset`, or `None` when it cannot be resolved.
    fn resolve(&self, asset: &AssetRef) -> Option<String>;
}

impl<F> AssetResolver for F
where
    F: Fn(&AssetRef) -> Option<String>,
{
    fn resolve(&self, asset: &AssetRef) -> Option<String> {
        self(asset)
    }
}

/// In-memory lookup table, loadable from a JSON or TOML manifest.
///
/// ```toml
/// [assets]
/// kick = "s3://media/kick.wav"
///
/// [artifacts]
/// stem-42 = "/renders/stem-42.flac"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapResolver {
    /// Asset id to URI.
    #[serde(default)]
    pub assets: BTreeMap<String, String>,
    /// Artifact id to URI.
    #[serde(default)]
    pub artifacts: BTreeMap<String, String>,
}

impl MapResolver {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset URI.
    pub fn with_asset(mut self, id: impl Into<String>, uri: impl Into<String>) -> Self {
        self.assets.insert(id.into(), uri.into());
        self
    }

    /// Register an artifact URI.
    pub fn with_artifact(mut self, id: impl Into<String>, uri: impl Into<String>) -> Self {
        self.artifacts.insert(id.into(), uri.into());
        self
    }

    /// Number of registered references.
    pub fn len(&self) -> usize {
        self.assets.len() + self.artifacts.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssetResolver for MapResolver {
    fn resolve(&self, asset: &AssetRef) -> Option<String> {
        match asset {
            AssetRef::Asset { asset_id } => self.assets.get(asset_id),
            AssetRef::Artifact { artifact_id } => self.artifacts.get(artifact_id),
        }
        .cloned()
    }
}

/// Resolves to existing files under `root/assets/<id>` and `root/artifacts/<id>`.
///
/// Ids that would escape the root (absolute paths, `..`) never resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct DirResolver {
    root: PathBuf,
}

impl DirResolver {
    /// Resolve relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidate(&self, asset: &AssetRef) -> Option<PathBuf> {
        let (subdir, id) = match asset {
            AssetRef::Asset { asset_id } => ("assets", asset_id),
            AssetRef::Artifact { artifact_id } => ("artifacts", artifact_id),
        };
        let rel = Path::new(id);
        let contained = !id.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        contained.then(|| self.root.join(subdir).join(rel))
    }
}

impl AssetResolver for DirResolver {
    fn resolve(&self, asset: &AssetRef) -> Option<String> {
        let path = self.candidate(asset)?;
        path.is_file().then(|| path.to_string_lossy().into_owned())
    }
}

/// Uses the bare reference id as the URI.
///
/// Suited to timelines whose ids already are paths or URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassthroughResolver;

impl AssetResolver for PassthroughResolver {
    fn resolve(&self, asset: &AssetRef) -> Option<String> {
        let id = asset.id();
        (!id.is_empty()).then(|| id.to_string())
    }
}
