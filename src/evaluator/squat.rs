use crate::{
    geometry::{self, angle_to_vertical, horizontal_offset, vertical_depth},
    registry::{SQUAT_HEAD_MAX_OFFSET, SQUAT_TORSO_MAX_DEG},
    types::{Exercise, FrameReadings, Landmark, Measure, Pose, Reading},
};

use super::{EvaluateExercise, Evidence, landmarks, signal::FrameSignal};

/// Side-view squat checks on the left body chain.
#[derive(Clone, Debug)]
pub struct SquatEvaluator {
    back_posture: FrameSignal,
    head_alignment: FrameSignal,
    deep_squat_frames: usize,
}

impl SquatEvaluator {
    pub fn new(total_frames: usize) -> Self {
        Self {
            back_posture: FrameSignal::new(total_frames),
            head_alignment: FrameSignal::new(total_frames),
            deep_squat_frames: 0,
        }
    }
}

impl EvaluateExercise for SquatEvaluator {
    fn exercise(&self) -> Exercise {
        Exercise::Squat
    }

    fn evaluate_pose(&mut self, frame: usize, pose: &Pose) -> Option<FrameReadings> {
        let [hip, knee, shoulder, ear] = landmarks(
            pose,
            [
                Landmark::LeftHip,
                Landmark::LeftKnee,
                Landmark::LeftShoulder,
                Landmark::LeftEar,
            ],
        )?;

        // torso lean is measured on pixels so non-square frames keep their angle
        let torso_angle = angle_to_vertical(
            geometry::to_pixels(hip, pose.frame_size),
            geometry::to_pixels(shoulder, pose.frame_size),
        );
        if torso_angle > SQUAT_TORSO_MAX_DEG {
            self.back_posture.mark(frame);
        }

        let depth = vertical_depth(hip, knee);
        if depth >= 0.0 {
            self.deep_squat_frames += 1;
        }

        let head_offset = horizontal_offset(ear, shoulder);
        if head_offset > SQUAT_HEAD_MAX_OFFSET {
            self.head_alignment.mark(frame);
        }

        Some(vec![
            Reading {
                measure: Measure::SquatBackPosture,
                value: torso_angle,
            },
            Reading {
                measure: Measure::SquatDepth,
                value: depth,
            },
            Reading {
                measure: Measure::HeadAlignment,
                value: head_offset,
            },
        ])
    }

    fn evidence(&self, measure: Measure) -> Evidence<'_> {
        match measure {
            Measure::SquatDepth => Evidence::Count(self.deep_squat_frames),
            Measure::SquatBackPosture => Evidence::Signal(&self.back_posture),
            Measure::HeadAlignment => Evidence::Signal(&self.head_alignment),
            _ => Evidence::Nothing,
        }
    }
}
