//! Automation keyframes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Interpolation requested towards the next keyframe.
///
/// The compiler currently renders every lane as a step function, so
/// `Linear` and `Hold` produce the same program. The tag is carried so the
/// timeline round-trips unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutomationCurve {
    /// Ramp towards the next point.
    #[default]
    Linear,
    /// Hold this value until the next point.
    Hold,
}

/// A single keyframe on an automation lane.
///
/// `time_ms` is absolute timeline time, not relative to the owning clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutomationPoint {
    /// Absolute timeline position in milliseconds.
    pub time_ms: f64,
    /// Parameter value at this point (decibels for the gain lane).
    pub value: f64,
    /// Shape towards the next point.
    #[serde(default)]
    pub curve: AutomationCurve,
}

impl AutomationPoint {
    /// Create a linear keyframe.
    pub fn new(time_ms: f64, value: f64) -> Self {
        Self {
            time_ms,
            value,
            curve: AutomationCurve::Linear,
        }
    }

    /// Create a hold keyframe.
    pub fn hold(time_ms: f64, value: f64) -> Self {
        Self {
            time_ms,
            value,
            curve: AutomationCurve::Hold,
        }
    }
}

/// Automation lanes keyed by parameter name.
///
/// A `BTreeMap` keeps iteration order stable across runs.
pub type AutomationLanes = BTreeMap<String, Vec<AutomationPoint>>;
