//! Drives evaluators: whole tracks in one call, several viewpoints in
//! parallel, or a live frame stream on a worker thread.

mod worker;

pub use self::worker::{PoseExtractor, feed_frames, start_viewpoint_worker};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::{
    factory,
    feedback::ViewpointEvaluation,
    track::PoseTrack,
    types::{Exercise, Pose},
};

/// One frame of a clip on its way to an evaluation worker.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseFrame {
    pub index: usize,
    pub pose: Option<Pose>,
}

/// Feeds every frame of `track` through a fresh evaluator and finalizes it.
pub fn evaluate_track(track: &PoseTrack) -> Result<ViewpointEvaluation> {
    let exercise = track.exercise()?;
    let viewpoint = track.viewpoint()?;

    let mut evaluator = factory::create(exercise, track.total_frames);
    for (index, pose) in track.poses() {
        evaluator
            .evaluate_frame(index, pose.as_ref())
            .with_context(|| format!("{viewpoint} {exercise} track"))?;
    }

    Ok(ViewpointEvaluation::new(
        viewpoint,
        evaluator.get_final_evaluation(),
    ))
}

/// Evaluates every track in parallel. Results keep the order of `tracks`.
pub fn evaluate_viewpoints(tracks: &[PoseTrack]) -> Vec<Result<ViewpointEvaluation>> {
    tracks.par_iter().map(evaluate_track).collect()
}

/// Exercise of the first track naming a supported one. Tracks of other or
/// unknown exercises then fail as individual viewpoints.
pub fn report_exercise(tracks: &[PoseTrack]) -> Option<Exercise> {
    tracks.iter().find_map(|track| track.exercise().ok())
}
