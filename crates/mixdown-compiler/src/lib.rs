//! Timeline to filtergraph compiler.
//!
//! Turns an [`AudioSequence`](mixdown_core::AudioSequence), an optional
//! [`MixGraph`](mixdown_core::MixGraph) and an export preset name into a
//! [`MixPlan`]: the sorted input list, an ffmpeg `-filter_complex`
//! program, one output tap per bus with content plus `"master"`, and the
//! export metadata for each tap.
//!
//! # Signal Flow
//!
//! ```text
//! clip ─ trim ─ fade ─ delay ─ gain ─┐
//! clip ─ trim ─ fade ─ delay ─ gain ─┼─ bus sum ─ bus gain ──┐
//!                                    │                       ├─ master sum ─ headroom ─ loudnorm ─ limiter ─ dither
//! clip ─ ...                        ─┴─ bus sum ─ bus gain ──┘
//! ```
//!
//! Compilation is pure: the same input always yields a byte-identical plan.
//! The only collaborator is the [`AssetResolver`], queried once per clip.
//!
//! # Modules
//!
//! - [`resolver`] - Asset resolution seam and stock resolvers
//! - [`automation`] - Keyframe lanes to step-wise gain segments
//! - [`routing`] - Role-based bus assignment

mod chain;
mod compiler;
mod error;
mod master;
mod mixer;
mod plan;

pub mod automation;
pub mod resolver;
pub mod routing;

pub use compiler::MixCompiler;
pub use error::CompileError;
pub use master::{
    DITHER_SAMPLE_RATE, LOUDNORM_RANGE_LU, LOUDNORM_TRUE_PEAK_DB, SILENCE_DURATION_SEC,
    SILENCE_SAMPLE_RATE,
};
pub use plan::{BusMetadata, Diagnostic, MASTER_TAP, MixPlan};
pub use resolver::{AssetResolver, DirResolver, MapResolver, PassthroughResolver};
pub use routing::{BusRouter, DEFAULT_BUS_ID, Route, clip_role};
