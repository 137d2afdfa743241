mod bench_press;
mod pull_up;
pub mod signal;
mod side_lateral_raise;
mod squat;
mod triceps_extension;

pub use self::{
    bench_press::BenchPressEvaluator, pull_up::PullUpEvaluator,
    side_lateral_raise::SideLateralRaiseEvaluator, squat::SquatEvaluator,
    triceps_extension::TricepsExtensionEvaluator,
};

use crate::{
    error::EngineError,
    registry::{self, CountCmp, Rule, SpreadLimit},
    segmenter,
    types::{
        Exercise, ExerciseFeedback, FinalEvaluation, FrameReadings, Landmark, Measure, Pose,
        Rating, VideoSegment,
    },
};

use self::signal::{FrameSignal, Series};

/// Per-exercise form checks.
///
/// Implementations only accumulate evidence; turning evidence into ratings is
/// driven by the measure registry.
pub trait EvaluateExercise {
    fn exercise(&self) -> Exercise;

    /// Records the evidence of one frame. `frame` has been range-checked.
    ///
    /// Returns `None` without touching any state when the pose lacks a
    /// landmark this exercise needs.
    fn evaluate_pose(&mut self, frame: usize, pose: &Pose) -> Option<FrameReadings>;

    /// Evidence accumulated so far for one of this exercise's measures.
    fn evidence(&self, measure: Measure) -> Evidence<'_>;
}

pub enum Evidence<'a> {
    Signal(&'a FrameSignal),
    Count(usize),
    Series(Vec<&'a Series>),
    Nothing,
}

/// One variant per supported exercise.
#[derive(Clone, Debug)]
pub enum ExerciseStrategy {
    Squat(SquatEvaluator),
    PullUp(PullUpEvaluator),
    BenchPress(BenchPressEvaluator),
    SideLateralRaise(SideLateralRaiseEvaluator),
    TricepsExtension(TricepsExtensionEvaluator),
}

impl ExerciseStrategy {
    fn as_dyn(&self) -> &dyn EvaluateExercise {
        match self {
            ExerciseStrategy::Squat(e) => e,
            ExerciseStrategy::PullUp(e) => e,
            ExerciseStrategy::BenchPress(e) => e,
            ExerciseStrategy::SideLateralRaise(e) => e,
            ExerciseStrategy::TricepsExtension(e) => e,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn EvaluateExercise {
        match self {
            ExerciseStrategy::Squat(e) => e,
            ExerciseStrategy::PullUp(e) => e,
            ExerciseStrategy::BenchPress(e) => e,
            ExerciseStrategy::SideLateralRaise(e) => e,
            ExerciseStrategy::TricepsExtension(e) => e,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Collecting { last_frame: Option<usize> },
    Finalized,
}

/// A single (clip, exercise) evaluation: constructed with the clip length,
/// fed every frame in increasing order, then finalized.
#[derive(Clone, Debug)]
pub struct Evaluator {
    strategy: ExerciseStrategy,
    total_frames: usize,
    phase: Phase,
}

impl Evaluator {
    pub fn new(strategy: ExerciseStrategy, total_frames: usize) -> Self {
        Self {
            strategy,
            total_frames,
            phase: Phase::Collecting { last_frame: None },
        }
    }

    pub fn exercise(&self) -> Exercise {
        self.strategy.as_dyn().exercise()
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    pub fn is_finalized(&self) -> bool {
        self.phase == Phase::Finalized
    }

    /// Feeds one frame. A missing pose (or one without the landmarks this
    /// exercise needs) is "no evidence" and leaves every signal untouched.
    pub fn evaluate_frame(
        &mut self,
        frame: usize,
        pose: Option<&Pose>,
    ) -> Result<FrameReadings, EngineError> {
        let last_frame = match self.phase {
            Phase::Finalized => return Err(EngineError::AlreadyFinalized),
            Phase::Collecting { last_frame } => last_frame,
        };
        if frame >= self.total_frames {
            return Err(EngineError::FrameOutOfRange {
                frame,
                total_frames: self.total_frames,
            });
        }
        if let Some(previous) = last_frame.filter(|&previous| frame <= previous) {
            return Err(EngineError::FrameOutOfOrder { frame, previous });
        }
        self.phase = Phase::Collecting {
            last_frame: Some(frame),
        };

        let Some(pose) = pose else {
            log::debug!("frame {frame}: no pose, skipping");
            return Ok(FrameReadings::new());
        };

        match self.strategy.as_dyn_mut().evaluate_pose(frame, pose) {
            Some(readings) => Ok(readings),
            None => {
                log::debug!("frame {frame}: pose is missing required landmarks, skipping");
                Ok(FrameReadings::new())
            }
        }
    }

    /// Rates every measure of the exercise from the accumulated evidence.
    ///
    /// Marks the evaluator finalized. Calling it again returns the same result.
    pub fn get_final_evaluation(&mut self) -> FinalEvaluation {
        self.phase = Phase::Finalized;

        let strategy = self.strategy.as_dyn();
        let exercise = strategy.exercise();
        let feedback = registry::measures(exercise)
            .iter()
            .map(|&measure| judge(measure, strategy.evidence(measure)))
            .collect();

        FinalEvaluation { exercise, feedback }
    }
}

impl Evidence<'_> {
    fn flagged_frames(&self) -> Option<usize> {
        match self {
            Evidence::Signal(signal) => Some(signal.flagged_frames()),
            Evidence::Count(count) => Some(*count),
            Evidence::Series(_) | Evidence::Nothing => None,
        }
    }
}

fn judge(measure: Measure, evidence: Evidence<'_>) -> ExerciseFeedback {
    let rule = registry::rule(measure);
    let (rating, segments) = match rule {
        Rule::Windowed {
            window_size,
            threshold,
            flagged,
            clear,
        } => match evidence {
            Evidence::Signal(signal) => {
                let windows = segmenter::segments(signal.as_slice(), window_size, threshold);
                if windows.is_empty() {
                    (clear, vec![VideoSegment::WholeClip])
                } else {
                    (flagged, windows)
                }
            }
            _ => mismatched(measure, rule),
        },
        Rule::FrameCount {
            cmp,
            threshold,
            met,
            unmet,
        } => match evidence.flagged_frames() {
            Some(count) => {
                let is_met = match cmp {
                    CountCmp::Above => count > threshold,
                    CountCmp::AtLeast => count >= threshold,
                };
                let rating = if is_met { met } else { unmet };
                (rating, vec![VideoSegment::WholeClip])
            }
            None => mismatched(measure, rule),
        },
        Rule::Spread {
            extremes,
            limit,
            met,
            unmet,
        } => match evidence {
            Evidence::Series(series) => {
                let spreads: Vec<_> = series.iter().filter_map(|s| s.extremes(extremes)).collect();
                let rating = if spreads.is_empty() {
                    // no samples at all: nothing to hold against the user
                    met.min(unmet)
                } else if spreads.iter().any(|&(low, high)| spread_met(limit, low, high)) {
                    met
                } else {
                    unmet
                };
                (rating, vec![VideoSegment::WholeClip])
            }
            _ => mismatched(measure, rule),
        },
        Rule::Fixed(rating) => (rating, vec![VideoSegment::WholeClip]),
    };

    ExerciseFeedback {
        measure,
        rating,
        comment: registry::comment(measure, rating)
            .unwrap_or_default()
            .to_string(),
        segments,
    }
}

fn spread_met(limit: SpreadLimit, low: f32, high: f32) -> bool {
    match limit {
        SpreadLimit::NarrowerThanFractionOfHigh(fraction) => {
            (low - high).abs() < fraction * high
        }
        SpreadLimit::WiderThan(max) => high - low > max,
    }
}

fn mismatched(measure: Measure, rule: Rule) -> (Rating, Vec<VideoSegment>) {
    log::error!("evidence for {measure} does not fit its rule {rule:?}");
    let best = rule.outcomes().into_iter().min().unwrap_or(Rating::Perfect);
    (best, vec![VideoSegment::WholeClip])
}

/// Normalized points for `landmarks`, or `None` if any is missing.
pub(crate) fn landmarks<const N: usize>(
    pose: &Pose,
    landmarks: [Landmark; N],
) -> Option<[[f32; 2]; N]> {
    let mut points = [[0.0; 2]; N];
    for (slot, landmark) in points.iter_mut().zip(landmarks) {
        *slot = pose.point(landmark)?;
    }
    Some(points)
}
