//! Mixdown Core - timeline model and filtergraph IR
//!
//! This crate holds the input and output vocabulary of the mixdown compiler.
//! It performs no audio processing: it describes what a downstream DSP engine
//! (ffmpeg's `-filter_complex`) should execute.
//!
//! # Timeline Model
//!
//! Entities built by the timeline-editing service and treated as read-only
//! input by the compiler:
//!
//! - [`AudioSequence`] - The whole timeline: tracks, tempo, section markers
//! - [`AudioTrack`] - Ordered clips plus track gain, mute, role and render order
//! - [`AudioClip`] - A region of a source asset placed on the timeline
//! - [`AutomationPoint`] - A keyframe on an automation lane (absolute timeline time)
//!
//! # Bus Routing
//!
//! - [`MixGraph`] - Ordered buses plus the master gain
//! - [`BusConfig`] - A named bus, the role tags it accepts, and its gain
//!
//! # Filtergraph IR
//!
//! The compiler never builds strings directly. It emits typed
//! [`Instruction`]s into a [`FilterGraph`] and serializes to the wire format
//! only at the boundary:
//!
//! - [`Filter`] - Closed set of operation kinds (trim, fade, delay, volume, mix, ...)
//! - [`Pad`] - An input stream reference (`[3:a]`) or a named pad (`[c0_trim]`)
//! - [`PiecewiseGain`] - Step-wise automation gain rendered as nested conditionals
//!
//! # Validation
//!
//! [`AudioSequence::validate`] reports every structural problem in a timeline.
//! The compiler trusts its input; validation belongs at the model boundary.
//!
//! # Example
//!
//! ```rust
//! use mixdown_core::{AssetRef, AudioClip, AudioSequence, AudioTrack};
//!
//! let sequence = AudioSequence::new("song")
//!     .with_track(
//!         AudioTrack::new("t1", "Drums")
//!             .with_role("drums")
//!             .with_clip(AudioClip::new("c1", AssetRef::asset("kick-loop"), 0.0, 4000.0)),
//!     );
//!
//! assert!(sequence.validate().is_empty());
//! assert_eq!(sequence.effective_duration_ms(), 4000.0);
//! ```

mod automation;
mod bus;
mod clip;
mod sequence;
mod track;

/// Typed filtergraph instructions and wire serialization.
pub mod filter;

/// Structural validation of timelines.
pub mod validation;

pub use automation::{AutomationCurve, AutomationLanes, AutomationPoint};
pub use bus::{BusConfig, MixGraph};
pub use clip::{AssetRef, AudioClip, FadeCurve};
pub use filter::{
    FadeDirection, Filter, FilterGraph, Gain, GraphError, Instruction, Pad, PiecewiseGain,
    Segment,
};
pub use sequence::{AudioSequence, SectionMarker};
pub use track::AudioTrack;
pub use validation::{ValidationIssue, ValidationReport};

/// Parameter name of the automation lane that drives clip gain.
pub const GAIN_PARAM: &str = "gain";
