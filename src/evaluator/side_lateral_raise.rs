use crate::{
    geometry::{self, angle, vertical_depth},
    registry::{
        RAISE_CORRECT_MIN_DEG, RAISE_ELBOW_BENT_MIN_DEG, RAISE_ELBOW_LOCKED_MAX_DEG,
        RAISE_SYMMETRY_MAX_DEG, RAISE_TOO_HIGH_MIN_DEG,
    },
    types::{Exercise, FrameReadings, Landmark, Measure, Pose, Reading},
};

use super::{
    EvaluateExercise, Evidence, landmarks,
    signal::{FrameSignal, Series},
};

/// Front-view lateral raise checks on both arms.
#[derive(Clone, Debug)]
pub struct SideLateralRaiseEvaluator {
    arms_lifting_too_high: FrameSignal,
    arms_abduction_up_correct: FrameSignal,
    incorrect_elbow_bend: FrameSignal,
    incorrect_symmetry: FrameSignal,
    left_shoulder_elevation: Series,
}

impl SideLateralRaiseEvaluator {
    pub fn new(total_frames: usize) -> Self {
        Self {
            arms_lifting_too_high: FrameSignal::new(total_frames),
            arms_abduction_up_correct: FrameSignal::new(total_frames),
            incorrect_elbow_bend: FrameSignal::new(total_frames),
            incorrect_symmetry: FrameSignal::new(total_frames),
            left_shoulder_elevation: Series::with_capacity(total_frames),
        }
    }
}

impl EvaluateExercise for SideLateralRaiseEvaluator {
    fn exercise(&self) -> Exercise {
        Exercise::SideLateralRaise
    }

    fn evaluate_pose(&mut self, frame: usize, pose: &Pose) -> Option<FrameReadings> {
        let points = landmarks(
            pose,
            [
                Landmark::LeftHip,
                Landmark::RightHip,
                Landmark::LeftShoulder,
                Landmark::RightShoulder,
                Landmark::LeftElbow,
                Landmark::RightElbow,
                Landmark::LeftWrist,
                Landmark::RightWrist,
            ],
        )?;
        let [
            left_hip,
            right_hip,
            left_shoulder,
            right_shoulder,
            left_elbow,
            right_elbow,
            left_wrist,
            right_wrist,
        ] = points.map(|p| geometry::to_pixels(p, pose.frame_size));

        let left_abduction = angle(left_hip, left_shoulder, left_wrist);
        let right_abduction = angle(right_hip, right_shoulder, right_wrist);

        let too_high =
            left_abduction > RAISE_TOO_HIGH_MIN_DEG && right_abduction > RAISE_TOO_HIGH_MIN_DEG;
        if too_high {
            self.arms_lifting_too_high.mark(frame);
        }
        if !too_high
            && left_abduction > RAISE_CORRECT_MIN_DEG
            && right_abduction > RAISE_CORRECT_MIN_DEG
        {
            self.arms_abduction_up_correct.mark(frame);
        }

        let left_bend = angle(left_shoulder, left_elbow, left_wrist);
        let right_bend = angle(right_shoulder, right_elbow, right_wrist);
        let locked = left_bend < RAISE_ELBOW_LOCKED_MAX_DEG || right_bend < RAISE_ELBOW_LOCKED_MAX_DEG;
        let over_bent = left_bend > RAISE_ELBOW_BENT_MIN_DEG || right_bend > RAISE_ELBOW_BENT_MIN_DEG;
        if locked || over_bent {
            self.incorrect_elbow_bend.mark(frame);
        }

        // normalized units, only compared with itself; the left side is rated
        let [left_hip_n, _, left_shoulder_n, ..] = points;
        let elevation = vertical_depth(left_shoulder_n, left_hip_n);
        self.left_shoulder_elevation.push(elevation);

        let asymmetry = (left_abduction - right_abduction).abs();
        if asymmetry > RAISE_SYMMETRY_MAX_DEG {
            self.incorrect_symmetry.mark(frame);
        }

        Some(vec![
            Reading {
                measure: Measure::SideLateralRaiseArmsLiftingTooHigh,
                value: left_abduction.max(right_abduction),
            },
            Reading {
                measure: Measure::SideLateralRaiseArmsAbductionUpCorrectPosition,
                value: left_abduction.min(right_abduction),
            },
            Reading {
                measure: Measure::SideLateralRaiseElbowsBendAngles,
                value: left_bend.max(right_bend),
            },
            Reading {
                measure: Measure::SideLateralRaiseShouldersIncorrectElevation,
                value: elevation,
            },
            Reading {
                measure: Measure::SideLateralRaiseSymmetry,
                value: asymmetry,
            },
        ])
    }

    fn evidence(&self, measure: Measure) -> Evidence<'_> {
        match measure {
            Measure::SideLateralRaiseArmsLiftingTooHigh => {
                Evidence::Signal(&self.arms_lifting_too_high)
            }
            Measure::SideLateralRaiseArmsAbductionUpCorrectPosition => {
                Evidence::Signal(&self.arms_abduction_up_correct)
            }
            Measure::SideLateralRaiseElbowsBendAngles => {
                Evidence::Signal(&self.incorrect_elbow_bend)
            }
            Measure::SideLateralRaiseShouldersIncorrectElevation => {
                Evidence::Series(vec![&self.left_shoulder_elevation])
            }
            Measure::SideLateralRaiseSymmetry => Evidence::Signal(&self.incorrect_symmetry),
            _ => Evidence::Nothing,
        }
    }
}
