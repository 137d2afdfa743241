use crate::{
    geometry::{self, angle},
    registry::{TRICEPS_DOWN_MAX_DEG, TRICEPS_UP_MIN_DEG},
    types::{Exercise, FrameReadings, Landmark, Measure, Pose, Reading},
};

use super::{
    EvaluateExercise, Evidence, landmarks,
    signal::{FrameSignal, Series},
};

/// Side-view triceps extension on the left arm.
#[derive(Clone, Debug)]
pub struct TricepsExtensionEvaluator {
    complete_up_extension: FrameSignal,
    complete_down_extension: FrameSignal,
    shoulder_angle: Series,
}

impl TricepsExtensionEvaluator {
    pub fn new(total_frames: usize) -> Self {
        Self {
            complete_up_extension: FrameSignal::new(total_frames),
            complete_down_extension: FrameSignal::new(total_frames),
            shoulder_angle: Series::with_capacity(total_frames),
        }
    }
}

impl EvaluateExercise for TricepsExtensionEvaluator {
    fn exercise(&self) -> Exercise {
        Exercise::TricepsExtension
    }

    fn evaluate_pose(&mut self, frame: usize, pose: &Pose) -> Option<FrameReadings> {
        let points = landmarks(
            pose,
            [
                Landmark::LeftHip,
                Landmark::LeftShoulder,
                Landmark::LeftElbow,
                Landmark::LeftWrist,
            ],
        )?;
        let [hip, shoulder, elbow, wrist] = points.map(|p| geometry::to_pixels(p, pose.frame_size));

        let extension = angle(shoulder, elbow, wrist);
        if extension > TRICEPS_UP_MIN_DEG {
            self.complete_up_extension.mark(frame);
        }
        if extension < TRICEPS_DOWN_MAX_DEG {
            self.complete_down_extension.mark(frame);
        }

        // upper arm drift: how far the elbow swings away from the torso line
        let shoulder_angle = angle(hip, shoulder, elbow);
        self.shoulder_angle.push(shoulder_angle);

        Some(vec![
            Reading {
                measure: Measure::TricepsExtensionCompleteUpExtension,
                value: extension,
            },
            Reading {
                measure: Measure::TricepsExtensionCompleteDownExtension,
                value: extension,
            },
            Reading {
                measure: Measure::TricepsExtensionShoulderAngle,
                value: shoulder_angle,
            },
        ])
    }

    fn evidence(&self, measure: Measure) -> Evidence<'_> {
        match measure {
            Measure::TricepsExtensionCompleteUpExtension => {
                Evidence::Signal(&self.complete_up_extension)
            }
            Measure::TricepsExtensionCompleteDownExtension => {
                Evidence::Signal(&self.complete_down_extension)
            }
            Measure::TricepsExtensionShoulderAngle => {
                Evidence::Series(vec![&self.shoulder_angle])
            }
            _ => Evidence::Nothing,
        }
    }
}
