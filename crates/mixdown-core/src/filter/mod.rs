//! Typed filtergraph IR.
//!
//! The compiler emits a flat list of [`Instruction`]s into a [`FilterGraph`].
//! Each instruction consumes zero or more [`Pad`]s, applies one [`Filter`],
//! and produces exactly one named output pad. Serialization to the engine's
//! textual format happens only through `Display`, so compiler logic and its
//! tests can match on typed values instead of strings.
//!
//! # Wire Format
//!
//! Steps are joined with `;`. A step is its input pads, the filter, and its
//! output pad:
//!
//! ```text
//! [0:a]atrim=start=0.000:duration=2.000,asetpts=PTS-STARTPTS[c0_trim];[c0_trim]adelay=delays=500:all=1[c0_delay]
//! ```
//!
//! Input streams are referenced as `[index:a]`, named pads as `[label]`.
//! Time and automation literals use fixed three-decimal formatting so the
//! output is byte-reproducible; this string is a wire contract with ffmpeg's
//! `-filter_complex`.
//!
//! # Ordering
//!
//! [`FilterGraph::check`] verifies the invariants the engine relies on: every
//! label produced exactly once, consumed at most once, and never consumed
//! before the step that produces it. Emitting in dependency order makes the
//! instruction list a topological order of the graph, so no cycles can occur.

mod graph;
mod instruction;
pub mod literal;
mod piecewise;

pub use graph::{FilterGraph, GraphError};
pub use instruction::{FadeDirection, Filter, Gain, Instruction, Pad};
pub use piecewise::{PiecewiseGain, Segment};
