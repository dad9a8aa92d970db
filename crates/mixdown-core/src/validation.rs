//! Structural validation of timelines.
//!
//! The compiler does not re-validate its input: malformed timelines are the
//! editing service's responsibility to reject. This module is that boundary
//! check, reporting every issue instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use mixdown_core::{AssetRef, AudioClip, AudioSequence, AudioTrack, FadeCurve, ValidationIssue};
//!
//! let clip = AudioClip::new("c1", AssetRef::asset("a"), 0.0, 1000.0)
//!     .with_fades(800.0, 400.0, FadeCurve::Tri);
//! let seq = AudioSequence::new("s").with_track(AudioTrack::new("t", "T").with_clip(clip));
//!
//! let issues = seq.validate();
//! assert!(matches!(issues[0], ValidationIssue::FadesExceedDuration { .. }));
//! ```

use std::fmt;
use thiserror::Error;

use crate::clip::AudioClip;
use crate::sequence::AudioSequence;

/// A structural problem in a timeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationIssue {
    /// A start, duration, or offset is negative or not finite.
    #[error("clip '{clip_id}': {field} must be a finite, non-negative value (got {value})")]
    InvalidTime {
        /// Offending clip.
        clip_id: String,
        /// Field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// `fade_in_ms + fade_out_ms` exceeds the clip length.
    #[error("clip '{clip_id}': fades ({fade_in_ms} + {fade_out_ms} ms) exceed duration {duration_ms} ms")]
    FadesExceedDuration {
        /// Offending clip.
        clip_id: String,
        /// Fade-in length.
        fade_in_ms: f64,
        /// Fade-out length.
        fade_out_ms: f64,
        /// Clip length.
        duration_ms: f64,
    },

    /// `crossfade_in_ms + crossfade_out_ms` exceeds the clip length.
    #[error("clip '{clip_id}': crossfades ({in_ms} + {out_ms} ms) exceed duration {duration_ms} ms")]
    CrossfadesExceedDuration {
        /// Offending clip.
        clip_id: String,
        /// Crossfade-in length.
        in_ms: f64,
        /// Crossfade-out length.
        out_ms: f64,
        /// Clip length.
        duration_ms: f64,
    },

    /// An automation point lies outside the clip's timeline span.
    #[error("clip '{clip_id}': '{param}' point at {time_ms} ms outside [{start_ms}, {end_ms}]")]
    AutomationOutOfBounds {
        /// Offending clip.
        clip_id: String,
        /// Lane name.
        param: String,
        /// Point time.
        time_ms: f64,
        /// Clip start.
        start_ms: f64,
        /// Clip end.
        end_ms: f64,
    },

    /// Two points on one lane share a timestamp.
    #[error("clip '{clip_id}': '{param}' has duplicate points at {time_ms} ms")]
    DuplicateAutomationTime {
        /// Offending clip.
        clip_id: String,
        /// Lane name.
        param: String,
        /// Shared time.
        time_ms: f64,
    },

    /// A lane's points are not in ascending time order.
    #[error("clip '{clip_id}': '{param}' points are not sorted by time (at {time_ms} ms)")]
    UnsortedAutomation {
        /// Offending clip.
        clip_id: String,
        /// Lane name.
        param: String,
        /// First out-of-order time.
        time_ms: f64,
    },
}

impl ValidationIssue {
    /// Id of the clip the issue belongs to.
    pub fn clip_id(&self) -> &str {
        match self {
            Self::InvalidTime { clip_id, .. }
            | Self::FadesExceedDuration { clip_id, .. }
            | Self::CrossfadesExceedDuration { clip_id, .. }
            | Self::AutomationOutOfBounds { clip_id, .. }
            | Self::DuplicateAutomationTime { clip_id, .. }
            | Self::UnsortedAutomation { clip_id, .. } => clip_id,
        }
    }
}

/// Every issue found in one timeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport(pub Vec<ValidationIssue>);

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl AudioSequence {
    /// Check every clip in the sequence. An empty vector means valid.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for clip in self.tracks.iter().flat_map(|t| t.clips.iter()) {
            validate_clip(clip, &mut issues);
        }
        #[cfg(feature = "tracing")]
        if !issues.is_empty() {
            tracing::debug!("validate: {} issue(s) in sequence '{}'", issues.len(), self.id);
        }
        issues
    }
}

/// Append every issue found in `clip` to `issues`.
pub fn validate_clip(clip: &AudioClip, issues: &mut Vec<ValidationIssue>) {
    let times = [
        ("start_ms", clip.start_ms),
        ("duration_ms", clip.duration_ms),
        ("source_offset_ms", clip.source_offset_ms),
        ("fade_in_ms", clip.fade_in_ms),
        ("fade_out_ms", clip.fade_out_ms),
        ("crossfade_in_ms", clip.crossfade_in_ms),
        ("crossfade_out_ms", clip.crossfade_out_ms),
    ];
    for (field, value) in times {
        if !value.is_finite() || value < 0.0 {
            issues.push(ValidationIssue::InvalidTime {
                clip_id: clip.id.clone(),
                field,
                value,
            });
        }
    }

    if clip.fade_in_ms + clip.fade_out_ms > clip.duration_ms {
        issues.push(ValidationIssue::FadesExceedDuration {
            clip_id: clip.id.clone(),
            fade_in_ms: clip.fade_in_ms,
            fade_out_ms: clip.fade_out_ms,
            duration_ms: clip.duration_ms,
        });
    }
    if clip.crossfade_in_ms + clip.crossfade_out_ms > clip.duration_ms {
        issues.push(ValidationIssue::CrossfadesExceedDuration {
            clip_id: clip.id.clone(),
            in_ms: clip.crossfade_in_ms,
            out_ms: clip.crossfade_out_ms,
            duration_ms: clip.duration_ms,
        });
    }

    let (start, end) = (clip.start_ms, clip.end_ms());
    for (param, points) in &clip.automation {
        let mut prev: Option<f64> = None;
        for point in points {
            let t = point.time_ms;
            if t < start || t > end {
                issues.push(ValidationIssue::AutomationOutOfBounds {
                    clip_id: clip.id.clone(),
                    param: param.clone(),
                    time_ms: t,
                    start_ms: start,
                    end_ms: end,
                });
            }
            match prev {
                Some(p) if t == p => issues.push(ValidationIssue::DuplicateAutomationTime {
                    clip_id: clip.id.clone(),
                    param: param.clone(),
                    time_ms: t,
                }),
                Some(p) if t < p => issues.push(ValidationIssue::UnsortedAutomation {
                    clip_id: clip.id.clone(),
                    param: param.clone(),
                    time_ms: t,
                }),
                _ => {}
            }
            prev = Some(prev.map_or(t, |p| p.max(t)));
        }
    }
}
