//! Automation lanes to step-wise gain.
//!
//! Keyframes become a sequence of half-open segments covering the clip:
//!
//! ```text
//! points:    (0.5s, -6)        (2.0s, -12)
//! segments:  [0.0, 0.5) base   [0.5, 2.0) -6   [2.0, dur) -12
//! ```
//!
//! Each point starts a new segment and closes the previous one, even when
//! that closes a zero-width segment (a point at the clip start, or two points
//! at the same time). Before the first point the clip holds the baseline.
//! Points that move backwards in
//! time are discarded rather than rejected; timelines that went through
//! [`AudioSequence::validate`](mixdown_core::AudioSequence::validate) never
//! contain them.

use mixdown_core::{AutomationPoint, PiecewiseGain, Segment};

/// Result of compiling one lane.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledLane {
    /// The gain curve, in clip-relative seconds.
    pub gain: PiecewiseGain,
    /// Timeline times (ms) of points dropped for going backwards.
    pub discarded_ms: Vec<f64>,
}

/// Build segments from `(time_sec, value)` points over `[0, duration_sec]`.
///
/// Times are clamped to the range. A point earlier than the previous
/// accepted point is skipped and its index returned. Every accepted point
/// closes a segment, zero-width ones included, so the rendered expression
/// is a pure function of the accepted points.
pub fn build_segments(
    base_db: f64,
    points: &[(f64, f64)],
    duration_sec: f64,
) -> (PiecewiseGain, Vec<usize>) {
    let end = duration_sec.max(0.0);
    let mut segments = Vec::with_capacity(points.len() + 1);
    let mut discarded = Vec::new();
    let mut prev_t = 0.0;
    let mut prev_value = base_db;
    let mut accepted = 0usize;

    for (i, &(time, value)) in points.iter().enumerate() {
        if !time.is_finite() {
            discarded.push(i);
            continue;
        }
        let t = time.clamp(0.0, end);
        if t < prev_t {
            discarded.push(i);
            continue;
        }
        segments.push(Segment {
            start_sec: prev_t,
            end_sec: t,
            value_db: prev_value,
        });
        prev_t = t;
        prev_value = value;
        accepted += 1;
    }

    if accepted == 0 {
        return (PiecewiseGain::constant(base_db), discarded);
    }
    if prev_t < end {
        segments.push(Segment {
            start_sec: prev_t,
            end_sec: end,
            value_db: prev_value,
        });
    }

    (
        PiecewiseGain {
            base_db,
            segments,
        },
        discarded,
    )
}

/// Compile a lane whose point times are absolute timeline milliseconds.
///
/// Times are made clip-relative using `clip_start_ms`. Point values are
/// absolute decibels; `base_db` is the static gain used outside the lane.
pub fn compile_lane(
    base_db: f64,
    points: &[AutomationPoint],
    clip_start_ms: f64,
    duration_ms: f64,
) -> CompiledLane {
    let relative: Vec<(f64, f64)> = points
        .iter()
        .map(|p| ((p.time_ms - clip_start_ms) / 1000.0, p.value))
        .collect();
    let (gain, discarded) = build_segments(base_db, &relative, duration_ms / 1000.0);
    CompiledLane {
        gain,
        discarded_ms: discarded.into_iter().map(|i| points[i].time_ms).collect(),
    }
}
