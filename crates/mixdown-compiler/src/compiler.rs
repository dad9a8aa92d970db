//! The compile pipeline.

use mixdown_config::{MasteringPreset, PresetTable};
use mixdown_core::{AudioClip, AudioSequence, AudioTrack, FilterGraph, MixGraph};
use std::collections::{BTreeMap, BTreeSet};

use crate::chain::emit_clip_chain;
use crate::error::CompileError;
use crate::master::{emit_master, emit_silence};
use crate::mixer::mix_buses;
use crate::plan::{BusMetadata, Diagnostic, MASTER_TAP, MixPlan};
use crate::resolver::AssetResolver;
use crate::routing::{BusRouter, Route, clip_role};

/// A resolved, routed clip waiting for its chain.
struct Placement<'a> {
    clip: &'a AudioClip,
    track_gain_db: f64,
    uri: String,
    bus: usize,
}

/// Compiles timelines into [`MixPlan`]s.
///
/// The preset table and resolver are fixed at construction; `compile` takes
/// `&self` and keeps no state between calls.
///
/// # Example
///
/// ```rust
/// use mixdown_compiler::{MixCompiler, PassthroughResolver};
/// use mixdown_config::PresetTable;
/// use mixdown_core::{AssetRef, AudioClip, AudioSequence, AudioTrack};
///
/// let compiler = MixCompiler::new(PresetTable::factory(), PassthroughResolver);
/// let sequence = AudioSequence::new("demo").with_track(
///     AudioTrack::new("t1", "Voice")
///         .with_role("dialogue")
///         .with_clip(AudioClip::new("c1", AssetRef::asset("voice.wav"), 0.0, 3000.0)),
/// );
///
/// let plan = compiler.compile(&sequence, None, "podcast").unwrap();
/// assert_eq!(plan.inputs, ["voice.wav"]);
/// assert!(plan.output_taps.contains_key("main"));
/// assert!(plan.filter_complex().contains("loudnorm=I=-16.0"));
/// ```
#[derive(Debug, Clone)]
pub struct MixCompiler<R> {
    presets: PresetTable,
    resolver: R,
}

impl<R: AssetResolver> MixCompiler<R> {
    /// Create a compiler over `presets`, resolving sources with `resolver`.
    pub fn new(presets: PresetTable, resolver: R) -> Self {
        Self { presets, resolver }
    }

    /// A compiler over the factory presets.
    pub fn with_factory_presets(resolver: R) -> Self {
        Self::new(PresetTable::factory(), resolver)
    }

    /// The injected preset table.
    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }

    /// The injected resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Compile `sequence` for export preset `preset`.
    ///
    /// Without a `mix_graph` every clip goes to a single `"main"` bus.
    ///
    /// # Errors
    ///
    /// [`CompileError::UnknownPreset`] before anything else when `preset`
    /// is not in the table. [`CompileError::Graph`] if the emitted program
    /// is not well formed.
    pub fn compile(
        &self,
        sequence: &AudioSequence,
        mix_graph: Option<&MixGraph>,
        preset: &str,
    ) -> Result<MixPlan, CompileError> {
        let preset = self
            .presets
            .get(preset)
            .ok_or_else(|| CompileError::UnknownPreset(preset.to_string()))?;

        tracing::info!(
            sequence = %sequence.id,
            tracks = sequence.tracks.len(),
            preset = %preset.name,
            "compiling mix plan"
        );

        let router = BusRouter::new(mix_graph);
        let mut diagnostics = Vec::new();
        let (placements, resolved) = self.place_clips(sequence, &router, &mut diagnostics);

        if resolved == 0 {
            tracing::info!(sequence = %sequence.id, "no clips resolved, emitting silence");
            return Ok(silent_plan(Vec::new(), 0.0, preset, diagnostics));
        }

        let inputs: Vec<String> = placements
            .iter()
            .map(|p| p.uri.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let input_index: BTreeMap<&str, usize> = inputs
            .iter()
            .enumerate()
            .map(|(i, uri)| (uri.as_str(), i))
            .collect();

        let mut graph = FilterGraph::new();
        let mut assigned = vec![Vec::new(); router.buses().len()];
        for (k, placement) in placements.iter().enumerate() {
            let input = input_index[placement.uri.as_str()];
            let pad = emit_clip_chain(
                &mut graph,
                k,
                input,
                placement.clip,
                placement.track_gain_db,
                &mut diagnostics,
            );
            assigned[placement.bus].push(pad);
        }

        let bus_outputs = mix_buses(&mut graph, router.buses(), assigned, preset);
        let master_gain_db = mix_graph.map_or(0.0, |g| g.master_gain_db);

        if bus_outputs.is_empty() {
            tracing::info!(sequence = %sequence.id, "no bus has content, emitting silence");
            return Ok(silent_plan(inputs, master_gain_db, preset, diagnostics));
        }

        let mut output_taps = BTreeMap::new();
        let mut bus_metadata = BTreeMap::new();
        let mut bus_pads = Vec::with_capacity(bus_outputs.len());
        for output in bus_outputs {
            if let Some(label) = output.pad.as_label() {
                output_taps.insert(output.bus_id.clone(), label.to_string());
            }
            bus_metadata.insert(output.bus_id, output.metadata);
            bus_pads.push(output.pad);
        }

        if output_taps.contains_key(MASTER_TAP) {
            tracing::warn!("bus id '{MASTER_TAP}' is shadowed by the master output");
            diagnostics.push(Diagnostic::ShadowedBus {
                bus_id: MASTER_TAP.to_string(),
            });
        }
        let master = emit_master(&mut graph, bus_pads, master_gain_db, preset);
        if let Some(label) = master.as_label() {
            output_taps.insert(MASTER_TAP.to_string(), label.to_string());
        }
        bus_metadata.insert(
            MASTER_TAP.to_string(),
            BusMetadata::master(master_gain_db, preset),
        );

        graph.check(inputs.len())?;

        tracing::info!(
            inputs = inputs.len(),
            steps = graph.len(),
            taps = output_taps.len(),
            diagnostics = diagnostics.len(),
            "compiled mix plan"
        );

        Ok(MixPlan {
            inputs,
            instructions: graph,
            output_taps,
            bus_metadata,
            diagnostics,
        })
    }

    /// Resolve and route every audible clip, in render order.
    ///
    /// Returns the placements and the number of clips that resolved,
    /// routed or not.
    fn place_clips<'a>(
        &self,
        sequence: &'a AudioSequence,
        router: &BusRouter,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (Vec<Placement<'a>>, usize) {
        let mut placements = Vec::new();
        let mut resolved = 0;

        for track in tracks_in_render_order(sequence) {
            if track.mute {
                tracing::debug!(track = %track.id, "track muted, skipping");
                diagnostics.push(Diagnostic::MutedTrack {
                    track_id: track.id.clone(),
                    clips: track.clips.len(),
                });
                continue;
            }

            let role = clip_role(track);
            for clip in track.clips_by_start() {
                let Some(uri) = self.resolver.resolve(&clip.source) else {
                    tracing::warn!(clip = %clip.id, source = %clip.source, "source did not resolve, clip dropped");
                    diagnostics.push(Diagnostic::UnresolvedAsset {
                        clip_id: clip.id.clone(),
                        asset: clip.source.clone(),
                    });
                    continue;
                };
                resolved += 1;

                let route = router.route(&role);
                match route {
                    Route::Fallback(bus) => {
                        let bus_id = router.buses()[bus].id.clone();
                        tracing::debug!(clip = %clip.id, %role, %bus_id, "no bus matched, using fallback");
                        diagnostics.push(Diagnostic::FallbackRoute {
                            clip_id: clip.id.clone(),
                            role: role.clone(),
                            bus_id,
                        });
                    }
                    Route::Unrouted => {
                        tracing::warn!(clip = %clip.id, %role, "mix graph has no buses, clip dropped");
                        diagnostics.push(Diagnostic::Unrouted {
                            clip_id: clip.id.clone(),
                            role: role.clone(),
                        });
                    }
                    Route::Matched(_) => {}
                }

                if let Some(bus) = route.bus() {
                    placements.push(Placement {
                        clip,
                        track_gain_db: track.gain_db,
                        uri,
                        bus,
                    });
                }
            }
        }

        (placements, resolved)
    }
}

/// Tracks sorted by `(order, name, role)`. Ties keep declared order.
fn tracks_in_render_order(sequence: &AudioSequence) -> Vec<&AudioTrack> {
    let mut tracks: Vec<&AudioTrack> = sequence.tracks.iter().collect();
    tracks.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.role_tag().unwrap_or_default().cmp(b.role_tag().unwrap_or_default()))
    });
    tracks
}

fn silent_plan(
    inputs: Vec<String>,
    master_gain_db: f64,
    preset: &MasteringPreset,
    diagnostics: Vec<Diagnostic>,
) -> MixPlan {
    let mut graph = FilterGraph::new();
    let pad = emit_silence(&mut graph);
    let mut output_taps = BTreeMap::new();
    if let Some(label) = pad.as_label() {
        output_taps.insert(MASTER_TAP.to_string(), label.to_string());
    }
    let mut bus_metadata = BTreeMap::new();
    bus_metadata.insert(
        MASTER_TAP.to_string(),
        BusMetadata::master(master_gain_db, preset),
    );
    MixPlan {
        inputs,
        instructions: graph,
        output_taps,
        bus_metadata,
        diagnostics,
    }
}
