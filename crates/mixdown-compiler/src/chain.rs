//! Per-clip processing chains.

use mixdown_core::{
    AudioClip, FadeDirection, Filter, FilterGraph, GAIN_PARAM, Gain, Pad,
};

use crate::automation::compile_lane;
use crate::plan::Diagnostic;

/// Emit `trim -> fade in -> fade out -> delay -> gain` for one clip.
///
/// `index` names the labels (`c{index}_trim`, ...), `input` is the clip's
/// position in the plan's input list. Returns the last pad of the chain.
pub(crate) fn emit_clip_chain(
    graph: &mut FilterGraph,
    index: usize,
    input: usize,
    clip: &AudioClip,
    track_gain_db: f64,
    diagnostics: &mut Vec<Diagnostic>,
) -> Pad {
    let prefix = format!("c{index}");
    let duration_ms = clip.duration_ms.max(0.0);

    let mut pad = graph.emit(
        vec![Pad::Input(input)],
        Filter::Trim {
            start_sec: clip.source_offset_ms.max(0.0) / 1000.0,
            duration_sec: duration_ms / 1000.0,
        },
        &format!("{prefix}_trim"),
    );

    let curve = clip.effective_fade_curve();
    let fade_in_ms = clip.effective_fade_in_ms();
    if fade_in_ms > 0.0 {
        pad = graph.emit(
            vec![pad],
            Filter::Fade {
                direction: FadeDirection::In,
                start_sec: 0.0,
                duration_sec: fade_in_ms / 1000.0,
                curve,
            },
            &format!("{prefix}_fadein"),
        );
    }
    let fade_out_ms = clip.effective_fade_out_ms();
    if fade_out_ms > 0.0 {
        pad = graph.emit(
            vec![pad],
            Filter::Fade {
                direction: FadeDirection::Out,
                start_sec: (duration_ms - fade_out_ms).max(0.0) / 1000.0,
                duration_sec: fade_out_ms / 1000.0,
                curve,
            },
            &format!("{prefix}_fadeout"),
        );
    }

    pad = graph.emit(
        vec![pad],
        Filter::Delay {
            millis: clip.start_ms.max(0.0).round() as u64,
        },
        &format!("{prefix}_delay"),
    );

    let static_gain_db = clip.gain_db + track_gain_db;
    let gain = match clip.automation.get(GAIN_PARAM) {
        Some(points) => {
            let lane = compile_lane(static_gain_db, points, clip.start_ms, duration_ms);
            diagnostics.extend(lane.discarded_ms.iter().map(|&time_ms| {
                Diagnostic::DiscardedAutomationPoint {
                    clip_id: clip.id.clone(),
                    param: GAIN_PARAM.to_string(),
                    time_ms,
                }
            }));
            Some(Gain::Piecewise(lane.gain))
        }
        None if static_gain_db != 0.0 => Some(Gain::Db(static_gain_db)),
        None => None,
    };
    if let Some(gain) = gain {
        pad = graph.emit(vec![pad], Filter::Volume(gain), &format!("{prefix}_gain"));
    }

    tracing::debug!(clip = %clip.id, input, output = %pad, "emitted clip chain");
    pad
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixdown_core::{AssetRef, AutomationPoint, FadeCurve};

    fn chain(clip: &AudioClip, track_gain_db: f64) -> (FilterGraph, Pad, Vec<Diagnostic>) {
        let mut graph = FilterGraph::new();
        let mut diagnostics = Vec::new();
        let pad = emit_clip_chain(&mut graph, 0, 2, clip, track_gain_db, &mut diagnostics);
        (graph, pad, diagnostics)
    }

    fn clip() -> AudioClip {
        AudioClip::new("c", AssetRef::asset("a"), 1500.0, 4000.0)
    }

    #[test]
    fn minimal_chain_is_trim_then_delay() {
        let (graph, pad, _) = chain(&clip().with_source_offset(250.0), 0.0);
        assert_eq!(
            graph.to_string(),
            "[2:a]atrim=start=0.250:duration=4.000,asetpts=PTS-STARTPTS[c0_trim];\
             [c0_trim]adelay=delays=1500:all=1[c0_delay]"
        );
        assert_eq!(pad, Pad::Label("c0_delay".into()));
    }

    #[test]
    fn fades_use_offsets_and_curve() {
        let (graph, _, _) = chain(&clip().with_fades(500.0, 1000.0, FadeCurve::Exp), 0.0);
        let wire = graph.to_string();
        assert!(wire.contains("afade=t=in:st=0.000:d=0.500:curve=exp"), "{wire}");
        assert!(wire.contains("afade=t=out:st=3.000:d=1.000:curve=exp"), "{wire}");
    }

    #[test]
    fn crossfade_overrides_length_and_curve() {
        let c = clip()
            .with_fades(200.0, 0.0, FadeCurve::Exp)
            .with_crossfades(0.0, 600.0, FadeCurve::Qsin);
        let (graph, _, _) = chain(&c, 0.0);
        let wire = graph.to_string();
        assert!(wire.contains("afade=t=in:st=0.000:d=0.200:curve=qsin"), "{wire}");
        assert!(wire.contains("afade=t=out:st=3.400:d=0.600:curve=qsin"), "{wire}");
    }

    #[test]
    fn oversized_fade_out_starts_at_zero() {
        let (graph, _, _) = chain(&clip().with_fades(0.0, 9000.0, FadeCurve::Tri), 0.0);
        assert!(graph.to_string().contains("afade=t=out:st=0.000:d=9.000"));
    }

    #[test]
    fn static_gain_sums_clip_and_track() {
        let (graph, pad, _) = chain(&clip().with_gain(-3.0), 1.5);
        assert!(graph.to_string().ends_with("[c0_delay]volume=-1.500dB[c0_gain]"));
        assert_eq!(pad, Pad::Label("c0_gain".into()));
    }

    #[test]
    fn cancelling_gain_is_elided() {
        let (graph, _, _) = chain(&clip().with_gain(-2.0), 2.0);
        assert!(!graph.to_string().contains("volume"));
    }

    #[test]
    fn automation_lane_compiles_to_linear_expression() {
        let c = clip().with_gain(-1.0).with_automation(
            GAIN_PARAM,
            [AutomationPoint::new(1500.0, -6.0), AutomationPoint::new(3500.0, -12.0)],
        );
        let (graph, _, diagnostics) = chain(&c, 0.0);
        let wire = graph.to_string();
        assert!(diagnostics.is_empty());
        assert!(
            wire.ends_with(
                "volume=pow(10,(if(between(t,0.000,0.000),-1.000,\
                 if(between(t,0.000,2.000),-6.000,\
                 if(between(t,2.000,4.000),-12.000,-1.000))))/20):eval=frame[c0_gain]"
            ),
            "{wire}"
        );
    }

    #[test]
    fn empty_gain_lane_still_emits_baseline_expression() {
        let c = clip().with_automation(GAIN_PARAM, Vec::<AutomationPoint>::new());
        let (graph, pad, _) = chain(&c, 0.0);
        assert_eq!(pad, Pad::Label("c0_gain".into()));
        assert!(
            graph
                .to_string()
                .ends_with("volume=pow(10,(0.000)/20):eval=frame[c0_gain]")
        );
    }

    #[test]
    fn other_lanes_do_not_drive_gain() {
        let c = clip().with_automation("pan", [AutomationPoint::new(1500.0, 0.5)]);
        let (graph, _, _) = chain(&c, 0.0);
        assert!(!graph.to_string().contains("volume"));
    }

    #[test]
    fn backwards_point_is_reported() {
        let c = clip().with_automation(
            GAIN_PARAM,
            [AutomationPoint::new(3000.0, -6.0), AutomationPoint::new(2000.0, 0.0)],
        );
        let (_, _, diagnostics) = chain(&c, 0.0);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::DiscardedAutomationPoint {
                clip_id: "c".into(),
                param: GAIN_PARAM.into(),
                time_ms: 2000.0,
            }]
        );
    }
}
