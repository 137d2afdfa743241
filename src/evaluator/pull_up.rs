use crate::{
    geometry::{self, angle, vertical_depth},
    registry::{
        PULL_UP_ARMS_EXTENDED_MIN_DEG, PULL_UP_SHOULDER_HEIGHT_FRACTION,
        PULL_UP_SHOULDER_OFFSET_PX,
    },
    types::{Exercise, FrameReadings, Landmark, Measure, Pose, Reading},
};

use super::{EvaluateExercise, Evidence, landmarks, signal::FrameSignal};

#[derive(Clone, Debug)]
pub struct PullUpEvaluator {
    arms_nearly_extended: FrameSignal,
    chin_over_bar: FrameSignal,
    shoulder_correct_position: FrameSignal,
}

impl PullUpEvaluator {
    pub fn new(total_frames: usize) -> Self {
        Self {
            arms_nearly_extended: FrameSignal::new(total_frames),
            chin_over_bar: FrameSignal::new(total_frames),
            shoulder_correct_position: FrameSignal::new(total_frames),
        }
    }
}

/// Shrug threshold in pixels: ears closer than this to the shoulders.
fn shoulder_threshold_px(frame_height: u32) -> f32 {
    PULL_UP_SHOULDER_HEIGHT_FRACTION * frame_height as f32 + PULL_UP_SHOULDER_OFFSET_PX
}

impl EvaluateExercise for PullUpEvaluator {
    fn exercise(&self) -> Exercise {
        Exercise::PullUp
    }

    fn evaluate_pose(&mut self, frame: usize, pose: &Pose) -> Option<FrameReadings> {
        let [
            left_shoulder,
            left_elbow,
            left_wrist,
            right_shoulder,
            left_ear,
            right_ear,
            mouth,
            left_index,
            right_index,
        ] = landmarks(
            pose,
            [
                Landmark::LeftShoulder,
                Landmark::LeftElbow,
                Landmark::LeftWrist,
                Landmark::RightShoulder,
                Landmark::LeftEar,
                Landmark::RightEar,
                Landmark::MouthLeft,
                Landmark::LeftIndex,
                Landmark::RightIndex,
            ],
        )?;
        let size = pose.frame_size;

        let arm_angle = angle(
            geometry::to_pixels(left_shoulder, size),
            geometry::to_pixels(left_elbow, size),
            geometry::to_pixels(left_wrist, size),
        );
        if arm_angle > PULL_UP_ARMS_EXTENDED_MIN_DEG {
            self.arms_nearly_extended.mark(frame);
        }

        // positive when the mouth sits above the line of the hands
        let grip_y = (left_index[1] + right_index[1]) / 2.0;
        let chin_clearance = grip_y - mouth[1];
        if chin_clearance > 0.0 {
            self.chin_over_bar.mark(frame);
        }

        let height = size.height as f32;
        let left_gap_px = vertical_depth(left_shoulder, left_ear).abs() * height;
        let right_gap_px = vertical_depth(right_shoulder, right_ear).abs() * height;
        let threshold_px = shoulder_threshold_px(size.height);
        if left_gap_px < threshold_px || right_gap_px < threshold_px {
            self.shoulder_correct_position.mark(frame);
        }

        Some(vec![
            Reading {
                measure: Measure::PullUpArmsNearlyExtended,
                value: arm_angle,
            },
            Reading {
                measure: Measure::PullUpChinOverBar,
                value: chin_clearance,
            },
            Reading {
                measure: Measure::PullUpShoulderCorrectPosition,
                value: left_gap_px.min(right_gap_px),
            },
        ])
    }

    fn evidence(&self, measure: Measure) -> Evidence<'_> {
        match measure {
            Measure::PullUpArmsNearlyExtended => Evidence::Signal(&self.arms_nearly_extended),
            Measure::PullUpChinOverBar => Evidence::Signal(&self.chin_over_bar),
            Measure::PullUpShoulderCorrectPosition => {
                Evidence::Signal(&self.shoulder_correct_position)
            }
            _ => Evidence::Nothing,
        }
    }
}
