//! Static measure registry: which measures each exercise reports, the comment
//! bound to every (measure, rating) pair and the rule that turns accumulated
//! evidence into a rating.
//!
//! All numeric constants here are part of the output contract.

use crate::types::{Exercise, Measure, Rating};

pub const WINDOW_SIZE: usize = 30;

// Squat
pub const SQUAT_TORSO_MAX_DEG: f32 = 40.0;
pub const SQUAT_HEAD_MAX_OFFSET: f32 = 0.1;
pub const SQUAT_DEPTH_MIN_FRAMES: usize = 30;

// Pull-up
pub const PULL_UP_ARMS_EXTENDED_MIN_DEG: f32 = 160.0;
pub const PULL_UP_SHOULDER_HEIGHT_FRACTION: f32 = 0.05;
pub const PULL_UP_SHOULDER_OFFSET_PX: f32 = 10.0;

// Side lateral raise
pub const RAISE_TOO_HIGH_MIN_DEG: f32 = 110.0;
pub const RAISE_CORRECT_MIN_DEG: f32 = 70.0;
pub const RAISE_ELBOW_LOCKED_MAX_DEG: f32 = 10.0;
pub const RAISE_ELBOW_BENT_MIN_DEG: f32 = 40.0;
pub const RAISE_SYMMETRY_MAX_DEG: f32 = 10.0;

// Triceps extension
pub const TRICEPS_UP_MIN_DEG: f32 = 170.0;
pub const TRICEPS_DOWN_MAX_DEG: f32 = 80.0;

/// Number of lowest/highest samples averaged by spread rules.
pub const SPREAD_EXTREMES: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CountCmp {
    /// `count > threshold`
    Above,
    /// `count >= threshold`
    AtLeast,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpreadLimit {
    /// `|avg_low - avg_high| < fraction * avg_high`
    NarrowerThanFractionOfHigh(f32),
    /// `avg_high - avg_low > limit`
    WiderThan(f32),
}

/// How the evidence collected for a measure becomes its rating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rule {
    /// Any qualifying window of the per-frame signal gives `flagged`, with the
    /// windows as segments; otherwise `clear` over the whole clip.
    Windowed {
        window_size: usize,
        threshold: usize,
        flagged: Rating,
        clear: Rating,
    },
    /// Total flagged-frame count against a fixed threshold.
    FrameCount {
        cmp: CountCmp,
        threshold: usize,
        met: Rating,
        unmet: Rating,
    },
    /// Spread between the averages of the lowest and highest samples of a series.
    Spread {
        extremes: usize,
        limit: SpreadLimit,
        met: Rating,
        unmet: Rating,
    },
    Fixed(Rating),
}

impl Rule {
    /// Every rating this rule can produce.
    pub fn outcomes(&self) -> Vec<Rating> {
        match *self {
            Rule::Windowed { flagged, clear, .. } => vec![flagged, clear],
            Rule::FrameCount { met, unmet, .. } | Rule::Spread { met, unmet, .. } => {
                vec![met, unmet]
            }
            Rule::Fixed(rating) => vec![rating],
        }
    }
}

pub fn measures(exercise: Exercise) -> &'static [Measure] {
    match exercise {
        Exercise::Squat => &[
            Measure::SquatDepth,
            Measure::SquatBackPosture,
            Measure::HeadAlignment,
        ],
        Exercise::PullUp => &[
            Measure::PullUpArmsNearlyExtended,
            Measure::PullUpChinOverBar,
            Measure::PullUpShoulderCorrectPosition,
        ],
        Exercise::BenchPress => &[Measure::BasicLandmarks],
        Exercise::SideLateralRaise => &[
            Measure::SideLateralRaiseArmsLiftingTooHigh,
            Measure::SideLateralRaiseArmsAbductionUpCorrectPosition,
            Measure::SideLateralRaiseElbowsBendAngles,
            Measure::SideLateralRaiseShouldersIncorrectElevation,
            Measure::SideLateralRaiseSymmetry,
        ],
        Exercise::TricepsExtension => &[
            Measure::TricepsExtensionCompleteUpExtension,
            Measure::TricepsExtensionCompleteDownExtension,
            Measure::TricepsExtensionShoulderAngle,
        ],
    }
}

const fn windowed(threshold: usize, flagged: Rating) -> Rule {
    Rule::Windowed {
        window_size: WINDOW_SIZE,
        threshold,
        flagged,
        clear: Rating::Perfect,
    }
}

const fn over(threshold: usize, met: Rating, unmet: Rating) -> Rule {
    Rule::FrameCount {
        cmp: CountCmp::Above,
        threshold,
        met,
        unmet,
    }
}

pub fn rule(measure: Measure) -> Rule {
    match measure {
        Measure::SquatDepth => Rule::FrameCount {
            cmp: CountCmp::AtLeast,
            threshold: SQUAT_DEPTH_MIN_FRAMES,
            met: Rating::Perfect,
            unmet: Rating::Warning,
        },
        Measure::SquatBackPosture => windowed(10, Rating::Dangerous),
        Measure::HeadAlignment => windowed(10, Rating::Dangerous),

        Measure::PullUpArmsNearlyExtended => windowed(3, Rating::Warning),
        Measure::PullUpChinOverBar => windowed(3, Rating::Warning),
        Measure::PullUpShoulderCorrectPosition => windowed(10, Rating::Dangerous),

        Measure::BasicLandmarks => Rule::Fixed(Rating::Perfect),

        Measure::SideLateralRaiseArmsLiftingTooHigh => {
            over(5, Rating::Dangerous, Rating::Perfect)
        }
        Measure::SideLateralRaiseArmsAbductionUpCorrectPosition => {
            over(10, Rating::Warning, Rating::Perfect)
        }
        Measure::SideLateralRaiseElbowsBendAngles => over(10, Rating::Warning, Rating::Perfect),
        Measure::SideLateralRaiseShouldersIncorrectElevation => Rule::Spread {
            extremes: SPREAD_EXTREMES,
            limit: SpreadLimit::NarrowerThanFractionOfHigh(0.05),
            met: Rating::Dangerous,
            unmet: Rating::Perfect,
        },
        Measure::SideLateralRaiseSymmetry => over(10, Rating::Dangerous, Rating::Perfect),

        Measure::TricepsExtensionCompleteUpExtension => {
            over(3, Rating::Perfect, Rating::Warning)
        }
        Measure::TricepsExtensionCompleteDownExtension => {
            over(3, Rating::Perfect, Rating::Warning)
        }
        Measure::TricepsExtensionShoulderAngle => Rule::Spread {
            extremes: SPREAD_EXTREMES,
            limit: SpreadLimit::WiderThan(10.0),
            met: Rating::Dangerous,
            unmet: Rating::Perfect,
        },
    }
}

/// Canned comment for a (measure, rating) pair, if that outcome is defined.
pub fn comment(measure: Measure, rating: Rating) -> Option<&'static str> {
    use Measure::*;
    use Rating::*;

    let text = match (measure, rating) {
        (SquatDepth, Perfect) => "Great depth: your hips dropped to knee level or below.",
        (SquatDepth, Warning) => {
            "You are not squatting deep enough. Try to bring your hips down to knee level."
        }

        (SquatBackPosture, Perfect) => "Your back stayed upright throughout the squat.",
        (SquatBackPosture, Dangerous) => {
            "Your torso leans too far forward. Keep your chest up to protect your lower back."
        }

        (HeadAlignment, Perfect) => "Your head stayed in line with your spine.",
        (HeadAlignment, Dangerous) => {
            "Your head juts forward of your shoulders. Keep your neck neutral."
        }

        (PullUpArmsNearlyExtended, Perfect) => {
            "You controlled the bottom of the movement without hanging on locked arms."
        }
        (PullUpArmsNearlyExtended, Warning) => {
            "Your arms reached near full extension at the bottom. Keep a slight bend to stay engaged."
        }

        (PullUpChinOverBar, Perfect) => {
            "Your chin did not linger above your hands at the top of the rep."
        }
        (PullUpChinOverBar, Warning) => {
            "Your mouth stayed above the line of your hands for several frames. Lower under control instead of hanging at the top."
        }

        (PullUpShoulderCorrectPosition, Perfect) => {
            "Your shoulders stayed down and away from your ears."
        }
        (PullUpShoulderCorrectPosition, Dangerous) => {
            "Your shoulders shrug up toward your ears. Pull them down before each rep."
        }

        (BasicLandmarks, Perfect) => "Body landmarks were tracked through the set.",

        (SideLateralRaiseArmsLiftingTooHigh, Perfect) => "You stopped the raise at shoulder height.",
        (SideLateralRaiseArmsLiftingTooHigh, Dangerous) => {
            "Your arms go above shoulder height, which stresses the shoulder joint."
        }

        (SideLateralRaiseArmsAbductionUpCorrectPosition, Perfect) => {
            "Your arms reached a good abduction angle."
        }
        (SideLateralRaiseArmsAbductionUpCorrectPosition, Warning) => {
            "Watch your arm path: many frames sit at the top of the raise."
        }

        (SideLateralRaiseElbowsBendAngles, Perfect) => "Your elbows kept a slight, steady bend.",
        (SideLateralRaiseElbowsBendAngles, Warning) => {
            "Your elbows are either locked or bent too much. Keep a soft, constant bend."
        }

        (SideLateralRaiseShouldersIncorrectElevation, Perfect) => {
            "Your shoulders moved through a normal range relative to your hips."
        }
        (SideLateralRaiseShouldersIncorrectElevation, Dangerous) => {
            "Your shoulders showed almost no range of motion relative to your hips. Move through the full raise instead of holding one position."
        }

        (SideLateralRaiseSymmetry, Perfect) => "Both arms moved symmetrically.",
        (SideLateralRaiseSymmetry, Dangerous) => {
            "Your arms rise unevenly. Lift both sides at the same pace and height."
        }

        (TricepsExtensionCompleteUpExtension, Perfect) => "You fully extended your arm at the top.",
        (TricepsExtensionCompleteUpExtension, Warning) => {
            "You are not reaching full extension. Straighten your arm at the top of each rep."
        }

        (TricepsExtensionCompleteDownExtension, Perfect) => {
            "You lowered the weight through a full range of motion."
        }
        (TricepsExtensionCompleteDownExtension, Warning) => {
            "You are not lowering the weight enough. Bend your elbow further at the bottom."
        }

        (TricepsExtensionShoulderAngle, Perfect) => "Your upper arm stayed stable.",
        (TricepsExtensionShoulderAngle, Dangerous) => {
            "Your upper arm swings during the set. Keep the elbow fixed and avoid torso sway."
        }

        _ => return None,
    };

    Some(text)
}
