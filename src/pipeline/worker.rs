use std::thread;

use anyhow::{Context, Result, bail};
use crossbeam_channel::{Receiver, Sender};

use crate::{
    evaluator::Evaluator,
    factory,
    feedback::ViewpointEvaluation,
    types::{Exercise, Pose, Viewpoint},
};

use super::PoseFrame;

/// The pose-extraction step: one image in, the detected pose (if any) out.
pub trait PoseExtractor {
    type Image;

    fn extract_pose(&mut self, image: &Self::Image) -> Result<Option<Pose>>;
}

/// Runs `extractor` over `images` in order and sends one frame per image.
///
/// An image that fails extraction is sent as a frame without a pose. Returns
/// the number of frames sent.
pub fn feed_frames<X, I>(extractor: &mut X, images: I, frame_tx: &Sender<PoseFrame>) -> Result<usize>
where
    X: PoseExtractor,
    I: IntoIterator<Item = X::Image>,
{
    let mut sent = 0;
    for (index, image) in images.into_iter().enumerate() {
        let pose = match extractor.extract_pose(&image) {
            Ok(pose) => pose,
            Err(err) => {
                log::warn!("frame {index}: pose extraction failed: {err:?}");
                None
            }
        };
        if frame_tx.send(PoseFrame { index, pose }).is_err() {
            bail!("evaluation worker stopped after {sent} frames");
        }
        sent += 1;
    }
    Ok(sent)
}

/// Evaluates one viewpoint on its own thread.
///
/// The worker consumes every frame sent on `frame_rx` (none are dropped) and
/// finalizes once all senders are gone.
pub fn start_viewpoint_worker(
    exercise: Exercise,
    viewpoint: Viewpoint,
    total_frames: usize,
    frame_rx: Receiver<PoseFrame>,
) -> thread::JoinHandle<Result<ViewpointEvaluation>> {
    thread::spawn(move || {
        log::info!("starting {viewpoint} {exercise} worker for {total_frames} frames");

        let mut evaluator = factory::create(exercise, total_frames);
        let evaluated = run_worker_loop(&mut evaluator, &frame_rx)
            .with_context(|| format!("{viewpoint} {exercise} worker"))?;
        let evaluation = evaluator.get_final_evaluation();

        log::info!("{viewpoint} {exercise} worker finished after {evaluated} frames");
        Ok(ViewpointEvaluation::new(viewpoint, evaluation))
    })
}

fn run_worker_loop(evaluator: &mut Evaluator, frame_rx: &Receiver<PoseFrame>) -> Result<usize> {
    let mut evaluated = 0;
    while let Ok(frame) = frame_rx.recv() {
        evaluator.evaluate_frame(frame.index, frame.pose.as_ref())?;
        evaluated += 1;
    }
    Ok(evaluated)
}
