use crate::types::{Exercise, FrameReadings, Measure, Pose};

use super::{EvaluateExercise, Evidence};

/// Bench press has no form checks yet; only the landmark overlay is reported.
#[derive(Clone, Debug, Default)]
pub struct BenchPressEvaluator;

impl BenchPressEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl EvaluateExercise for BenchPressEvaluator {
    fn exercise(&self) -> Exercise {
        Exercise::BenchPress
    }

    fn evaluate_pose(&mut self, _frame: usize, _pose: &Pose) -> Option<FrameReadings> {
        Some(FrameReadings::new())
    }

    fn evidence(&self, _measure: Measure) -> Evidence<'_> {
        Evidence::Nothing
    }
}
