//! Audio tracks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::automation::AutomationLanes;
use crate::clip::AudioClip;

/// A lane of clips sharing gain, mute, and a semantic role.
///
/// Clip order in `clips` is irrelevant to rendering; the compiler re-sorts
/// by `start_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTrack {
    /// Track identifier.
    pub id: String,
    /// Display name. Also used as the routing role of "music" tracks.
    #[serde(default)]
    pub name: String,
    /// Clips on this track.
    #[serde(default)]
    pub clips: Vec<AudioClip>,
    /// Track gain in decibels, added to every clip's gain.
    #[serde(default)]
    pub gain_db: f64,
    #[serde(default)]
    pub pan: f64,
    /// Muted tracks contribute nothing to the mix.
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub solo: bool,
    /// Explicit render ordering, first sort key.
    #[serde(default)]
    pub order: i64,
    /// Free-text semantic tag, e.g. "drums" or "music".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Loose metadata from the editor. `meta.role` backs up a missing `role`.
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
    /// Track-level automation. Reserved; not applied to output gain.
    #[serde(default)]
    pub automation: AutomationLanes,
}

impl AudioTrack {
    /// Create an empty, unmuted track.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            clips: Vec::new(),
            gain_db: 0.0,
            pan: 0.0,
            mute: false,
            solo: false,
            order: 0,
            role: None,
            meta: BTreeMap::new(),
            automation: AutomationLanes::new(),
        }
    }

    /// Set the role tag.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the track gain.
    pub fn with_gain(mut self, gain_db: f64) -> Self {
        self.gain_db = gain_db;
        self
    }

    /// Set the render order.
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Mute or unmute the track.
    pub fn with_mute(mut self, mute: bool) -> Self {
        self.mute = mute;
        self
    }

    /// Add a metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Append a clip.
    pub fn with_clip(mut self, clip: AudioClip) -> Self {
        self.clips.push(clip);
        self
    }

    /// The declared role: `role` when set and non-empty, else `meta.role`.
    pub fn role_tag(&self) -> Option<&str> {
        self.role
            .as_deref()
            .filter(|r| !r.is_empty())
            .or_else(|| self.meta.get("role").map(String::as_str))
            .filter(|r| !r.is_empty())
    }

    /// Clips sorted by timeline position. Ties keep their stored order.
    pub fn clips_by_start(&self) -> Vec<&AudioClip> {
        let mut clips: Vec<&AudioClip> = self.clips.iter().collect();
        clips.sort_by(|a, b| a.start_ms.total_cmp(&b.start_ms));
        clips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssetRef;

    #[test]
    fn role_falls_back_to_meta() {
        let track = AudioTrack::new("t", "Vox").with_meta("role", "dialogue");
        assert_eq!(track.role_tag(), Some("dialogue"));

        let track = track.with_role("");
        assert_eq!(track.role_tag(), Some("dialogue"));

        let track = track.with_role("narration");
        assert_eq!(track.role_tag(), Some("narration"));
    }

    #[test]
    fn no_role_at_all() {
        assert_eq!(AudioTrack::new("t", "x").role_tag(), None);
    }

    #[test]
    fn clips_sorted_by_start() {
        let track = AudioTrack::new("t", "x")
            .with_clip(AudioClip::new("late", AssetRef::asset("a"), 3000.0, 100.0))
            .with_clip(AudioClip::new("early", AssetRef::asset("a"), 0.0, 100.0))
            .with_clip(AudioClip::new("mid", AssetRef::asset("a"), 1000.0, 100.0));
        let ids: Vec<&str> = track.clips_by_start().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["early", "mid", "late"]);
    }
}
