//! The top-level timeline.

use serde::{Deserialize, Serialize};

use crate::track::AudioTrack;

/// A named position on the timeline (verse, chorus, ...).
///
/// Carried for round-tripping; the compiler does not read markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMarker {
    /// Marker position in milliseconds.
    pub time_ms: f64,
    /// Marker label.
    pub label: String,
}

/// A multi-track audio timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSequence {
    /// Sequence identifier.
    #[serde(default)]
    pub id: String,
    /// Tempo in beats per minute.
    #[serde(default = "default_bpm")]
    pub bpm: f64,
    /// Explicit length. `0` means "derive from clip extents".
    #[serde(default)]
    pub duration_ms: f64,
    /// Tracks in the sequence.
    #[serde(default)]
    pub tracks: Vec<AudioTrack>,
    /// Section markers.
    #[serde(default)]
    pub markers: Vec<SectionMarker>,
}

fn default_bpm() -> f64 {
    120.0
}

impl AudioSequence {
    /// Create an empty sequence at 120 BPM.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bpm: default_bpm(),
            duration_ms: 0.0,
            tracks: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Set the tempo.
    pub fn with_bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    /// Set an explicit duration.
    pub fn with_duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Append a track.
    pub fn with_track(mut self, track: AudioTrack) -> Self {
        self.tracks.push(track);
        self
    }

    /// Append a section marker.
    pub fn with_marker(mut self, time_ms: f64, label: impl Into<String>) -> Self {
        self.markers.push(SectionMarker {
            time_ms,
            label: label.into(),
        });
        self
    }

    /// The explicit duration, or the furthest clip end when it is zero.
    pub fn effective_duration_ms(&self) -> f64 {
        if self.duration_ms > 0.0 {
            return self.duration_ms;
        }
        self.tracks
            .iter()
            .flat_map(|t| t.clips.iter())
            .map(|c| c.end_ms())
            .fold(0.0, f64::max)
    }

    /// Total number of clips across all tracks.
    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(|t| t.clips.len()).sum()
    }

    /// True when no track carries a clip.
    pub fn is_empty(&self) -> bool {
        self.clip_count() == 0
    }
}
