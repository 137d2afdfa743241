use crate::{
    error::EngineError,
    evaluator::{
        BenchPressEvaluator, Evaluator, ExerciseStrategy, PullUpEvaluator,
        SideLateralRaiseEvaluator, SquatEvaluator, TricepsExtensionEvaluator,
    },
    types::Exercise,
};

/// A fresh evaluator for one clip of `total_frames` frames.
pub fn create(exercise: Exercise, total_frames: usize) -> Evaluator {
    let strategy = match exercise {
        Exercise::Squat => ExerciseStrategy::Squat(SquatEvaluator::new(total_frames)),
        Exercise::PullUp => ExerciseStrategy::PullUp(PullUpEvaluator::new(total_frames)),
        Exercise::BenchPress => ExerciseStrategy::BenchPress(BenchPressEvaluator::new()),
        Exercise::SideLateralRaise => {
            ExerciseStrategy::SideLateralRaise(SideLateralRaiseEvaluator::new(total_frames))
        }
        Exercise::TricepsExtension => {
            ExerciseStrategy::TricepsExtension(TricepsExtensionEvaluator::new(total_frames))
        }
    };
    Evaluator::new(strategy, total_frames)
}

/// Like [`create`], from an identifier such as `"SQUAT"` or `"pull_up"`.
pub fn create_by_name(exercise: &str, total_frames: usize) -> Result<Evaluator, EngineError> {
    let exercise = exercise
        .trim()
        .parse::<Exercise>()
        .map_err(|_| EngineError::UnsupportedExercise(exercise.to_string()))?;
    Ok(create(exercise, total_frames))
}
