//! Compiler output.

use mixdown_config::MasteringPreset;
use mixdown_core::{AssetRef, Filter, FilterGraph};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::CompileError;

/// Key of the master output in [`MixPlan::output_taps`] and
/// [`MixPlan::bus_metadata`].
pub const MASTER_TAP: &str = "master";

/// Export settings recorded for one output tap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusMetadata {
    /// Bus id, or `"master"`.
    pub bus_id: String,
    /// Roles the bus accepts, sorted. Empty for the master.
    pub accepted_roles: Vec<String>,
    /// Bus gain, or the resolved master gain for the master entry.
    pub gain_db: f64,
    /// Preset the plan was compiled with.
    pub export_preset_name: String,
    /// Preset limiter ceiling.
    pub limiter_threshold: f64,
    /// Preset headroom.
    pub headroom_db: f64,
    /// Preset loudness target.
    pub loudnorm_target: Option<f64>,
    /// Whether the preset dithers.
    pub dithered: bool,
}

impl BusMetadata {
    pub(crate) fn new(
        bus_id: impl Into<String>,
        accepted_roles: Vec<String>,
        gain_db: f64,
        preset: &MasteringPreset,
    ) -> Self {
        Self {
            bus_id: bus_id.into(),
            accepted_roles,
            gain_db,
            export_preset_name: preset.name.clone(),
            limiter_threshold: preset.limiter_threshold_db,
            headroom_db: preset.headroom_db,
            loudnorm_target: preset.loudnorm_target,
            dithered: preset.dither,
        }
    }

    pub(crate) fn master(gain_db: f64, preset: &MasteringPreset) -> Self {
        Self::new(MASTER_TAP, Vec::new(), gain_db, preset)
    }
}

/// Something the compiler dropped or decided on the caller's behalf.
///
/// Diagnostics never change the emitted program.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The clip's source did not resolve; the clip was dropped.
    UnresolvedAsset {
        /// Dropped clip.
        clip_id: String,
        /// Its source reference.
        asset: AssetRef,
    },
    /// The track is muted; its clips were skipped.
    MutedTrack {
        /// Muted track.
        track_id: String,
        /// Number of clips skipped.
        clips: usize,
    },
    /// No bus accepted the clip's role; it went to the first bus.
    FallbackRoute {
        /// Routed clip.
        clip_id: String,
        /// Its role, possibly empty.
        role: String,
        /// Bus that received it.
        bus_id: String,
    },
    /// The mix graph declares no buses; the clip was dropped.
    Unrouted {
        /// Dropped clip.
        clip_id: String,
        /// Its role, possibly empty.
        role: String,
    },
    /// A bus shares its id with the master tap; its stem tap and metadata
    /// were replaced by the master's. Its signal still reaches the master.
    ShadowedBus {
        /// The bus id.
        bus_id: String,
    },
    /// An automation point went backwards in time and was ignored.
    DiscardedAutomationPoint {
        /// Owning clip.
        clip_id: String,
        /// Automation parameter.
        param: String,
        /// Point time on the timeline.
        time_ms: f64,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedAsset { clip_id, asset } => {
                write!(f, "clip '{clip_id}': {asset} did not resolve, clip dropped")
            }
            Self::MutedTrack { track_id, clips } => {
                write!(f, "track '{track_id}' is muted, {clips} clip(s) skipped")
            }
            Self::FallbackRoute {
                clip_id,
                role,
                bus_id,
            } => write!(
                f,
                "clip '{clip_id}': no bus accepts role '{role}', routed to '{bus_id}'"
            ),
            Self::Unrouted { clip_id, role } => {
                write!(f, "clip '{clip_id}': no buses to route role '{role}', clip dropped")
            }
            Self::ShadowedBus { bus_id } => write!(
                f,
                "bus '{bus_id}' is shadowed by the master output, its stem tap is unavailable"
            ),
            Self::DiscardedAutomationPoint {
                clip_id,
                param,
                time_ms,
            } => write!(
                f,
                "clip '{clip_id}': {param} point at {time_ms} ms goes backwards, ignored"
            ),
        }
    }
}

/// A compiled mix: inputs, the filtergraph, and its named outputs.
///
/// Every map is ordered, so serializing a plan is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixPlan {
    /// Sorted, deduplicated source URIs. Instruction `[n:a]` reads `inputs[n]`.
    pub inputs: Vec<String>,
    /// The filtergraph. Serializes as the wire string.
    pub instructions: FilterGraph,
    /// Output pad label per bus id, plus [`MASTER_TAP`].
    pub output_taps: BTreeMap<String, String>,
    /// Export settings per tap.
    pub bus_metadata: BTreeMap<String, BusMetadata>,
    /// What the compiler dropped or decided.
    pub diagnostics: Vec<Diagnostic>,
}

impl MixPlan {
    /// The full `-filter_complex` program.
    pub fn filter_complex(&self) -> String {
        self.instructions.to_string()
    }

    /// Label of the pad behind `tap`.
    pub fn tap(&self, tap: &str) -> Result<&str, CompileError> {
        self.output_taps
            .get(tap)
            .map(String::as_str)
            .ok_or_else(|| CompileError::UnknownTap(tap.to_string()))
    }

    /// The label of the master output.
    pub fn master_label(&self) -> Option<&str> {
        self.output_taps.get(MASTER_TAP).map(String::as_str)
    }

    /// Only the instructions `tap` depends on.
    ///
    /// The full program consumes every bus pad in the master sum, so a stem
    /// can only be mapped from a program pruned to that stem.
    pub fn graph_for(&self, tap: &str) -> Result<FilterGraph, CompileError> {
        let label = self.tap(tap)?;
        self.instructions
            .prune_for(label)
            .ok_or_else(|| CompileError::UnknownTap(tap.to_string()))
    }

    /// `-filter_complex` program for a single tap.
    pub fn filter_complex_for(&self, tap: &str) -> Result<String, CompileError> {
        Ok(self.graph_for(tap)?.to_string())
    }

    /// True when the plan renders generated silence.
    pub fn is_silent(&self) -> bool {
        self.instructions
            .iter()
            .any(|step| matches!(step.filter, Filter::Silence { .. }))
    }

    /// Engine arguments rendering `tap` to `output`.
    ///
    /// ```text
    /// -hide_banner -y -i <input>... -filter_complex <program> -map [<label>] <output>
    /// ```
    pub fn ffmpeg_args(&self, tap: &str, output: &Path) -> Result<Vec<String>, CompileError> {
        let label = self.tap(tap)?;
        let program = self.filter_complex_for(tap)?;

        let mut args = Vec::with_capacity(self.inputs.len() * 2 + 8);
        args.extend(["-hide_banner".to_string(), "-y".to_string()]);
        for uri in &self.inputs {
            args.push("-i".to_string());
            args.push(uri.clone());
        }
        args.push("-filter_complex".to_string());
        args.push(program);
        args.push("-map".to_string());
        args.push(format!("[{label}]"));
        args.push(output.to_string_lossy().into_owned());
        Ok(args)
    }
}
