//! Property-based tests for the timeline model and filtergraph IR.

use mixdown_core::{
    AssetRef, AudioClip, AudioSequence, AudioTrack, Filter, FilterGraph, Gain, Pad, PiecewiseGain,
    Segment,
};
use proptest::prelude::*;

fn steps(values: Vec<f64>) -> PiecewiseGain {
    let segments = values
        .iter()
        .enumerate()
        .map(|(i, &value_db)| Segment {
            start_sec: i as f64,
            end_sec: (i + 1) as f64,
            value_db,
        })
        .collect();
    PiecewiseGain {
        base_db: -6.0,
        segments,
    }
}

/// A chain per input, summed into one mix, with repeated base labels.
fn fan_in(inputs: usize) -> (FilterGraph, Pad) {
    let mut graph = FilterGraph::new();
    let chains: Vec<Pad> = (0..inputs)
        .map(|i| {
            let trimmed = graph.emit(
                vec![Pad::Input(i)],
                Filter::Trim {
                    start_sec: 0.0,
                    duration_sec: 1.0,
                },
                "chain",
            );
            graph.emit(vec![trimmed], Filter::Volume(Gain::Db(-1.0)), "chain")
        })
        .collect();
    let sum = graph.emit(chains, Filter::Mix { inputs }, "sum");
    (graph, sum)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn emitted_labels_are_unique(inputs in 1usize..12) {
        let (graph, _) = fan_in(inputs);
        prop_assert_eq!(graph.len(), inputs * 2 + 1);
        prop_assert!(graph.check(inputs).is_ok());
    }

    #[test]
    fn pruned_graph_is_well_formed(inputs in 1usize..12, pick in 0usize..12) {
        let (graph, _) = fan_in(inputs);
        let pick = pick % inputs;
        let target = graph.instructions()[pick * 2 + 1].output.clone();

        let pruned = graph.prune_for(&target).expect("label is produced");
        prop_assert_eq!(pruned.len(), 2);
        prop_assert!(pruned.check(inputs).is_ok());
        prop_assert_eq!(&pruned.instructions()[1].output, &target);
    }

    #[test]
    fn value_at_matches_segment_interiors(
        values in prop::collection::vec(-60.0f64..12.0, 1..16),
    ) {
        let gain = steps(values.clone());
        for (i, v) in values.iter().enumerate() {
            prop_assert_eq!(gain.value_at(i as f64 + 0.5), *v);
        }
        prop_assert_eq!(gain.value_at(values.len() as f64 + 0.5), -6.0);
    }

    #[test]
    fn expression_nests_every_segment(
        values in prop::collection::vec(-60.0f64..12.0, 0..16),
    ) {
        let expr = steps(values.clone()).expression();
        prop_assert_eq!(expr.matches("if(between(t,").count(), values.len());
        prop_assert_eq!(expr.matches('(').count(), expr.matches(')').count());
        prop_assert!(!expr.contains("-0.000"));
    }

    #[test]
    fn clean_clips_validate(
        start in 0.0f64..60_000.0,
        duration in 1.0f64..10_000.0,
        fade_share in 0.0f64..0.5,
    ) {
        let fade = duration * fade_share;
        let clip = AudioClip::new("c", AssetRef::asset("a"), start, duration)
            .with_fades(fade, fade, mixdown_core::FadeCurve::Qsin);
        let seq = AudioSequence::new("s").with_track(AudioTrack::new("t", "T").with_clip(clip));
        prop_assert!(seq.validate().is_empty());
        prop_assert_eq!(seq.effective_duration_ms(), start + duration);
    }
}

#[test]
fn timeline_json_with_defaults() {
    let seq: AudioSequence = serde_json::from_str(
        r#"{
            "id": "ep1",
            "tracks": [{
                "id": "t1",
                "meta": {"role": "dialogue"},
                "clips": [{
                    "id": "c1",
                    "source": {"artifact_id": "tts-1"},
                    "start_ms": 250,
                    "duration_ms": 1000,
                    "automation": {"gain": [{"time_ms": 250, "value": -3}]}
                }]
            }]
        }"#,
    )
    .unwrap();

    let track = &seq.tracks[0];
    assert_eq!(track.role_tag(), Some("dialogue"));
    assert_eq!(track.clips[0].source, AssetRef::artifact("tts-1"));
    assert_eq!(track.clips[0].automation["gain"][0].value, -3.0);
    assert!(seq.validate().is_empty());
    assert_eq!(seq.effective_duration_ms(), 1250.0);
}
