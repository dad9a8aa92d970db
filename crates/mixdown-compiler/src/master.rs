//! Master bus: sum, headroom, loudness, limiter, dither.

use mixdown_config::MasteringPreset;
use mixdown_core::{Filter, FilterGraph, Gain, Pad};

/// Loudness range passed to the normalizer, LU.
pub const LOUDNORM_RANGE_LU: f64 = 7.0;
/// True-peak ceiling passed to the normalizer, dBTP.
pub const LOUDNORM_TRUE_PEAK_DB: f64 = -2.0;
/// Output rate when dithering to 16-bit.
pub const DITHER_SAMPLE_RATE: u32 = 48_000;
/// Sample rate of the placeholder for plans without content.
pub const SILENCE_SAMPLE_RATE: u32 = 44_100;
/// Length of the placeholder for plans without content, seconds.
pub const SILENCE_DURATION_SEC: f64 = 5.0;

/// Emit the placeholder that stands in for a mix with no content.
pub(crate) fn emit_silence(graph: &mut FilterGraph) -> Pad {
    graph.emit(
        Vec::new(),
        Filter::Silence {
            sample_rate: SILENCE_SAMPLE_RATE,
            duration_sec: SILENCE_DURATION_SEC,
        },
        "master_silence",
    )
}

/// Emit the mastering chain over `buses`. `buses` must not be empty.
pub(crate) fn emit_master(
    graph: &mut FilterGraph,
    buses: Vec<Pad>,
    master_gain_db: f64,
    preset: &MasteringPreset,
) -> Pad {
    let count = buses.len();
    let mut pad = graph.emit(buses, Filter::Mix { inputs: count }, "master_sum");

    if master_gain_db != 0.0 || preset.headroom_db != 0.0 {
        pad = graph.emit(
            vec![pad],
            Filter::Volume(Gain::Db(master_gain_db + preset.headroom_db)),
            "master_gain",
        );
    }

    if let Some(target) = preset.loudnorm_target {
        pad = graph.emit(
            vec![pad],
            Filter::LoudNorm {
                integrated_lufs: target,
                loudness_range: LOUDNORM_RANGE_LU,
                true_peak_db: LOUDNORM_TRUE_PEAK_DB,
            },
            "master_loudnorm",
        );
    }

    pad = graph.emit(
        vec![pad],
        Filter::Limiter {
            limit_db: preset.limiter_threshold_db,
        },
        "master_limiter",
    );

    if preset.dither {
        pad = graph.emit(
            vec![pad],
            Filter::Dither {
                sample_rate: DITHER_SAMPLE_RATE,
            },
            "master_dither",
        );
    }

    tracing::debug!(buses = count, preset = %preset.name, output = %pad, "assembled master chain");
    pad
}
