//! Step-wise automation gain.

use super::literal::fixed3;

/// A half-open interval `[start_sec, end_sec)` holding a constant value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Interval start, seconds from clip start.
    pub start_sec: f64,
    /// Interval end, seconds from clip start.
    pub end_sec: f64,
    /// Gain over the interval, decibels.
    pub value_db: f64,
}

/// A gain curve made of ordered, non-overlapping segments over a baseline.
///
/// Rendered as a right-associated nested conditional: the first segment is
/// the outermost test and `base_db` is the innermost else-branch. The
/// engine's `between()` is inclusive on both ends, so at a shared boundary
/// the earlier segment wins.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseGain {
    /// Value outside every segment, decibels.
    pub base_db: f64,
    /// Segments in ascending time order.
    pub segments: Vec<Segment>,
}

impl PiecewiseGain {
    /// A curve with no segments.
    pub fn constant(base_db: f64) -> Self {
        Self {
            base_db,
            segments: Vec::new(),
        }
    }

    /// True when the curve never leaves its baseline.
    pub fn is_constant(&self) -> bool {
        self.segments.is_empty()
    }

    /// The decibel expression in the engine's expression language.
    pub fn expression(&self) -> String {
        self.segments
            .iter()
            .rev()
            .fold(fixed3(self.base_db), |otherwise, seg| {
                format!(
                    "if(between(t,{},{}),{},{})",
                    fixed3(seg.start_sec),
                    fixed3(seg.end_sec),
                    fixed3(seg.value_db),
                    otherwise
                )
            })
    }

    /// The expression converted from decibels to a linear multiplier.
    pub fn linear_expression(&self) -> String {
        format!("pow(10,({})/20)", self.expression())
    }

    /// Evaluate the curve at `t` seconds the way the engine does.
    pub fn value_at(&self, t: f64) -> f64 {
        self.segments
            .iter()
            .find(|seg| seg.start_sec <= t && t <= seg.end_sec)
            .map_or(self.base_db, |seg| seg.value_db)
    }
}
