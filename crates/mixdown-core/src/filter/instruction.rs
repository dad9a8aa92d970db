//! Instruction and operation types.

use std::fmt;

use super::literal::{fixed1, fixed3};
use super::piecewise::PiecewiseGain;
use crate::clip::FadeCurve;

/// A pad consumed by an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pad {
    /// Audio stream of the input at this index: `[3:a]`.
    Input(usize),
    /// A named pad produced by an earlier instruction: `[c0_trim]`.
    Label(String),
}

impl Pad {
    /// The label, if this is a named pad.
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label),
            Self::Input(_) => None,
        }
    }
}

impl fmt::Display for Pad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(index) => write!(f, "[{index}:a]"),
            Self::Label(label) => write!(f, "[{label}]"),
        }
    }
}

/// Which edge of a clip a fade shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// Fade up from silence.
    In,
    /// Fade down to silence.
    Out,
}

impl FadeDirection {
    fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// Gain applied by a volume step.
#[derive(Debug, Clone, PartialEq)]
pub enum Gain {
    /// Static gain in decibels.
    Db(f64),
    /// Time-varying gain, decibel steps converted to a linear multiplier.
    Piecewise(PiecewiseGain),
}

/// The closed set of operations the compiler emits.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Cut `duration_sec` from the source starting at `start_sec`, then
    /// reset timestamps to zero.
    Trim {
        /// Read position in the source, seconds.
        start_sec: f64,
        /// Length to keep, seconds.
        duration_sec: f64,
    },
    /// Fade one edge of the signal.
    Fade {
        /// Edge being shaped.
        direction: FadeDirection,
        /// Fade start, seconds from the start of the stream.
        start_sec: f64,
        /// Fade length, seconds.
        duration_sec: f64,
        /// Fade shape.
        curve: FadeCurve,
    },
    /// Prepend silence so the signal starts at `millis` on the timeline.
    Delay {
        /// Whole milliseconds of silence.
        millis: u64,
    },
    /// Scale the signal.
    Volume(Gain),
    /// Unweighted sum of all inputs.
    Mix {
        /// Number of input pads.
        inputs: usize,
    },
    /// EBU R128 loudness normalization.
    LoudNorm {
        /// Integrated loudness target, LUFS.
        integrated_lufs: f64,
        /// Loudness range target, LU.
        loudness_range: f64,
        /// True-peak ceiling, dBTP.
        true_peak_db: f64,
    },
    /// Brickwall limiter with automatic level correction disabled.
    Limiter {
        /// Ceiling in decibels.
        limit_db: f64,
    },
    /// Requantize to 16-bit signed PCM, stereo.
    Dither {
        /// Output sample rate.
        sample_rate: u32,
    },
    /// Stereo digital silence.
    Silence {
        /// Generator sample rate.
        sample_rate: u32,
        /// Length in seconds.
        duration_sec: f64,
    },
}

impl Filter {
    /// Engine filter name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Trim { .. } => "atrim",
            Self::Fade { .. } => "afade",
            Self::Delay { .. } => "adelay",
            Self::Volume(_) => "volume",
            Self::Mix { .. } => "amix",
            Self::LoudNorm { .. } => "loudnorm",
            Self::Limiter { .. } => "alimiter",
            Self::Dither { .. } => "aformat",
            Self::Silence { .. } => "anullsrc",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trim {
                start_sec,
                duration_sec,
            } => write!(
                f,
                "atrim=start={}:duration={},asetpts=PTS-STARTPTS",
                fixed3(*start_sec),
                fixed3(*duration_sec)
            ),
            Self::Fade {
                direction,
                start_sec,
                duration_sec,
                curve,
            } => write!(
                f,
                "afade=t={}:st={}:d={}:curve={}",
                direction.as_str(),
                fixed3(*start_sec),
                fixed3(*duration_sec),
                curve
            ),
            Self::Delay { millis } => write!(f, "adelay=delays={millis}:all=1"),
            Self::Volume(Gain::Db(db)) => write!(f, "volume={}dB", fixed3(*db)),
            Self::Volume(Gain::Piecewise(gain)) => {
                write!(f, "volume={}:eval=frame", gain.linear_expression())
            }
            Self::Mix { inputs } => write!(f, "amix=inputs={inputs}:normalize=0"),
            Self::LoudNorm {
                integrated_lufs,
                loudness_range,
                true_peak_db,
            } => write!(
                f,
                "loudnorm=I={}:LRA={}:TP={}",
                fixed1(*integrated_lufs),
                fixed1(*loudness_range),
                fixed1(*true_peak_db)
            ),
            Self::Limiter { limit_db } => {
                write!(f, "alimiter=limit={}dB:level=false", fixed1(*limit_db))
            }
            Self::Dither { sample_rate } => write!(
                f,
                "aformat=sample_fmts=s16:sample_rates={sample_rate}:channel_layouts=stereo"
            ),
            Self::Silence {
                sample_rate,
                duration_sec,
            } => write!(
                f,
                "anullsrc=channel_layout=stereo:sample_rate={sample_rate}:duration={}",
                fixed3(*duration_sec)
            ),
        }
    }
}

/// One step of the program: consume `inputs`, apply `filter`, produce `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Pads consumed, in order.
    pub inputs: Vec<Pad>,
    /// Operation applied.
    pub filter: Filter,
    /// Label of the produced pad.
    pub output: String,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pad in &self.inputs {
            write!(f, "{pad}")?;
        }
        write!(f, "{}[{}]", self.filter, self.output)
    }
}
