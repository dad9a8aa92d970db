//! Audio clips and their source references.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::automation::{AutomationLanes, AutomationPoint};

/// Where a clip's audio comes from.
///
/// A clip references exactly one of an uploaded asset or a generated
/// artifact. The compiler hands this to an asset resolver to obtain a URI.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetRef {
    /// An uploaded media asset.
    Asset {
        /// Asset identifier.
        asset_id: String,
    },
    /// A rendered artifact produced by an earlier job.
    Artifact {
        /// Artifact identifier.
        artifact_id: String,
    },
}

impl AssetRef {
    /// Reference an uploaded asset.
    pub fn asset(id: impl Into<String>) -> Self {
        Self::Asset { asset_id: id.into() }
    }

    /// Reference a generated artifact.
    pub fn artifact(id: impl Into<String>) -> Self {
        Self::Artifact {
            artifact_id: id.into(),
        }
    }

    /// The bare identifier, regardless of kind.
    pub fn id(&self) -> &str {
        match self {
            Self::Asset { asset_id } => asset_id,
            Self::Artifact { artifact_id } => artifact_id,
        }
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset { asset_id } => write!(f, "asset:{asset_id}"),
            Self::Artifact { artifact_id } => write!(f, "artifact:{artifact_id}"),
        }
    }
}

/// Fade shape, using the DSP engine's curve vocabulary.
///
/// Shared by plain fades and crossfades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FadeCurve {
    /// Linear slope.
    #[default]
    Tri,
    /// Quarter of sine wave.
    Qsin,
    /// Half of sine wave.
    Hsin,
    /// Exponential sine wave.
    Esin,
    /// Logarithmic.
    Log,
    /// Inverted parabola.
    Ipar,
    /// Quadratic.
    Qua,
    /// Cubic.
    Cub,
    /// Square root.
    Squ,
    /// Cubic root.
    Cbr,
    /// Parabola.
    Par,
    /// Exponential.
    Exp,
    /// Inverted quarter of sine wave.
    Iqsin,
    /// Inverted half of sine wave.
    Ihsin,
    /// Double-exponential seat.
    Dese,
    /// Double-exponential sigmoid.
    Desi,
    /// Logistic sigmoid.
    Losi,
    /// No fade applied.
    Nofade,
}

impl FadeCurve {
    /// Wire name of the curve.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tri => "tri",
            Self::Qsin => "qsin",
            Self::Hsin => "hsin",
            Self::Esin => "esin",
            Self::Log => "log",
            Self::Ipar => "ipar",
            Self::Qua => "qua",
            Self::Cub => "cub",
            Self::Squ => "squ",
            Self::Cbr => "cbr",
            Self::Par => "par",
            Self::Exp => "exp",
            Self::Iqsin => "iqsin",
            Self::Ihsin => "ihsin",
            Self::Dese => "dese",
            Self::Desi => "desi",
            Self::Losi => "losi",
            Self::Nofade => "nofade",
        }
    }
}

impl fmt::Display for FadeCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A region of a source asset placed on the global timeline.
///
/// Invariants (enforced by the timeline service, reported by
/// [`AudioSequence::validate`](crate::AudioSequence::validate)):
///
/// - `fade_in_ms + fade_out_ms <= duration_ms`
/// - `crossfade_in_ms + crossfade_out_ms <= duration_ms`
/// - every automation point lies in `[start_ms, start_ms + duration_ms]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioClip {
    /// Clip identifier.
    pub id: String,
    /// Source media reference.
    pub source: AssetRef,
    /// Position on the global timeline.
    pub start_ms: f64,
    /// Length on the timeline.
    pub duration_ms: f64,
    /// Read position inside the source.
    #[serde(default)]
    pub source_offset_ms: f64,
    /// Clip gain in decibels.
    #[serde(default)]
    pub gain_db: f64,
    /// Stereo position, -1.0 (left) to 1.0 (right).
    #[serde(default)]
    pub pan: f64,
    #[serde(default)]
    pub fade_in_ms: f64,
    #[serde(default)]
    pub fade_out_ms: f64,
    #[serde(default)]
    pub fade_curve: FadeCurve,
    #[serde(default)]
    pub crossfade_in_ms: f64,
    #[serde(default)]
    pub crossfade_out_ms: f64,
    #[serde(default)]
    pub crossfade_curve: FadeCurve,
    /// Automation lanes; point times are absolute timeline time.
    #[serde(default)]
    pub automation: AutomationLanes,
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl AudioClip {
    /// Create a clip with no gain, fades, or automation.
    pub fn new(id: impl Into<String>, source: AssetRef, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            id: id.into(),
            source,
            start_ms,
            duration_ms,
            source_offset_ms: 0.0,
            gain_db: 0.0,
            pan: 0.0,
            fade_in_ms: 0.0,
            fade_out_ms: 0.0,
            fade_curve: FadeCurve::default(),
            crossfade_in_ms: 0.0,
            crossfade_out_ms: 0.0,
            crossfade_curve: FadeCurve::default(),
            automation: AutomationLanes::new(),
            label: None,
        }
    }

    /// Set the read position inside the source.
    pub fn with_source_offset(mut self, offset_ms: f64) -> Self {
        self.source_offset_ms = offset_ms;
        self
    }

    /// Set the clip gain.
    pub fn with_gain(mut self, gain_db: f64) -> Self {
        self.gain_db = gain_db;
        self
    }

    /// Set plain fade lengths and shape.
    pub fn with_fades(mut self, fade_in_ms: f64, fade_out_ms: f64, curve: FadeCurve) -> Self {
        self.fade_in_ms = fade_in_ms;
        self.fade_out_ms = fade_out_ms;
        self.fade_curve = curve;
        self
    }

    /// Set crossfade lengths and shape.
    pub fn with_crossfades(mut self, in_ms: f64, out_ms: f64, curve: FadeCurve) -> Self {
        self.crossfade_in_ms = in_ms;
        self.crossfade_out_ms = out_ms;
        self.crossfade_curve = curve;
        self
    }

    /// Attach an automation lane.
    pub fn with_automation(
        mut self,
        param: impl Into<String>,
        points: impl IntoIterator<Item = AutomationPoint>,
    ) -> Self {
        self.automation.insert(param.into(), points.into_iter().collect());
        self
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Timeline position where the clip ends.
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    /// Effective fade-in: the longer of the plain fade and the crossfade.
    pub fn effective_fade_in_ms(&self) -> f64 {
        self.fade_in_ms.max(self.crossfade_in_ms)
    }

    /// Effective fade-out: the longer of the plain fade and the crossfade.
    pub fn effective_fade_out_ms(&self) -> f64 {
        self.fade_out_ms.max(self.crossfade_out_ms)
    }

    /// Curve used for both edges: the crossfade curve whenever a crossfade
    /// is set, otherwise the plain fade curve.
    pub fn effective_fade_curve(&self) -> FadeCurve {
        if self.crossfade_in_ms != 0.0 || self.crossfade_out_ms != 0.0 {
            self.crossfade_curve
        } else {
            self.fade_curve
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_ref_deserializes_either_kind() {
        let a: AssetRef = serde_json::from_str(r#"{"asset_id": "a1"}"#).unwrap();
        let b: AssetRef = serde_json::from_str(r#"{"artifact_id": "r9"}"#).unwrap();
        assert_eq!(a, AssetRef::asset("a1"));
        assert_eq!(b, AssetRef::artifact("r9"));
        assert_eq!(b.id(), "r9");
        assert_eq!(b.to_string(), "artifact:r9");
    }

    #[test]
    fn effective_fades_take_longer_edge() {
        let clip = AudioClip::new("c", AssetRef::asset("a"), 0.0, 2000.0)
            .with_fades(100.0, 400.0, FadeCurve::Exp)
            .with_crossfades(250.0, 0.0, FadeCurve::Qsin);
        assert_eq!(clip.effective_fade_in_ms(), 250.0);
        assert_eq!(clip.effective_fade_out_ms(), 400.0);
        assert_eq!(clip.effective_fade_curve(), FadeCurve::Qsin);
    }

    #[test]
    fn plain_curve_without_crossfade() {
        let clip = AudioClip::new("c", AssetRef::asset("a"), 0.0, 2000.0)
            .with_fades(100.0, 100.0, FadeCurve::Exp);
        assert_eq!(clip.effective_fade_curve(), FadeCurve::Exp);
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let clip: AudioClip = serde_json::from_str(
            r#"{"id": "c1", "source": {"asset_id": "a"}, "start_ms": 500, "duration_ms": 1000}"#,
        )
        .unwrap();
        assert_eq!(clip.gain_db, 0.0);
        assert_eq!(clip.fade_curve, FadeCurve::Tri);
        assert!(clip.automation.is_empty());
        assert_eq!(clip.end_ms(), 1500.0);
    }
}
