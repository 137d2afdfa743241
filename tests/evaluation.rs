use form_coach::{
    EngineError, Exercise, FrameSize, Landmark, Measure, Pose, Rating, VideoSegment, factory,
    registry,
};
use strum::IntoEnumIterator;

const FRAME: FrameSize = FrameSize {
    width: 1000,
    height: 1000,
};

fn squat_pose(lean_deg: f32, hip_y: f32, knee_y: f32, ear_dx: f32) -> Pose {
    // shoulder 0.4 above the hip, pushed forward to reach the lean angle
    let shoulder_dx = 0.4 * lean_deg.to_radians().tan();
    Pose::new(FRAME)
        .with(Landmark::LeftHip, 0.3, hip_y)
        .with(Landmark::LeftKnee, 0.4, knee_y)
        .with(Landmark::LeftShoulder, 0.3 + shoulder_dx, hip_y - 0.4)
        .with(Landmark::LeftEar, 0.3 + shoulder_dx + ear_dx, hip_y - 0.5)
}

fn pull_up_pose(arms_straight: bool) -> Pose {
    let elbow_x = if arms_straight { 0.4 } else { 0.25 };
    Pose::new(FRAME)
        .with(Landmark::LeftShoulder, 0.4, 0.4)
        .with(Landmark::RightShoulder, 0.6, 0.4)
        .with(Landmark::LeftElbow, elbow_x, 0.25)
        .with(Landmark::LeftWrist, 0.4, 0.1)
        .with(Landmark::LeftEar, 0.45, 0.3)
        .with(Landmark::RightEar, 0.55, 0.3)
        .with(Landmark::MouthLeft, 0.48, 0.35)
        .with(Landmark::LeftIndex, 0.4, 0.1)
        .with(Landmark::RightIndex, 0.6, 0.1)
}

#[test]
fn squat_with_good_form_is_perfect_everywhere() {
    let mut evaluator = factory::create(Exercise::Squat, 90);
    for frame in 0..90 {
        let readings = evaluator
            .evaluate_frame(frame, Some(&squat_pose(0.0, 0.7, 0.65, 0.0)))
            .unwrap();
        assert_eq!(readings.len(), 3);
    }

    let result = evaluator.get_final_evaluation();
    assert_eq!(result.rating(Measure::SquatDepth), Some(Rating::Perfect));
    for measure in [Measure::SquatBackPosture, Measure::HeadAlignment] {
        let feedback = result.get(measure).unwrap();
        assert_eq!(feedback.rating, Rating::Perfect);
        assert_eq!(feedback.segments, vec![VideoSegment::WholeClip]);
    }
}

#[test]
fn squat_lean_in_first_window_is_dangerous() {
    let mut evaluator = factory::create(Exercise::Squat, 90);
    for frame in 0..90 {
        let lean = if frame < 10 { 50.0 } else { 0.0 };
        evaluator
            .evaluate_frame(frame, Some(&squat_pose(lean, 0.7, 0.65, 0.0)))
            .unwrap();
    }

    let result = evaluator.get_final_evaluation();
    let back = result.get(Measure::SquatBackPosture).unwrap();
    assert_eq!(back.rating, Rating::Dangerous);
    assert_eq!(
        back.segments,
        vec![VideoSegment::Window {
            start: 0,
            end: 30,
            relevant_frames: 10
        }]
    );
    assert_eq!(result.rating(Measure::SquatDepth), Some(Rating::Perfect));
}

#[test]
fn squat_lean_one_frame_short_of_threshold_is_perfect() {
    let mut evaluator = factory::create(Exercise::Squat, 90);
    for frame in 0..90 {
        let lean = if frame < 9 { 50.0 } else { 0.0 };
        evaluator
            .evaluate_frame(frame, Some(&squat_pose(lean, 0.7, 0.65, 0.0)))
            .unwrap();
    }
    let result = evaluator.get_final_evaluation();
    assert_eq!(result.rating(Measure::SquatBackPosture), Some(Rating::Perfect));
}

#[test]
fn shallow_squat_warns_on_depth() {
    let mut evaluator = factory::create(Exercise::Squat, 60);
    for frame in 0..60 {
        // only 29 deep frames
        let hip_y = if frame < 29 { 0.7 } else { 0.5 };
        evaluator
            .evaluate_frame(frame, Some(&squat_pose(0.0, hip_y, 0.65, 0.0)))
            .unwrap();
    }
    let result = evaluator.get_final_evaluation();
    assert_eq!(result.rating(Measure::SquatDepth), Some(Rating::Warning));
}

#[test]
fn forward_head_in_last_window_is_dangerous() {
    let mut evaluator = factory::create(Exercise::Squat, 90);
    for frame in 0..90 {
        let ear_dx = if frame >= 70 { 0.2 } else { 0.0 };
        evaluator
            .evaluate_frame(frame, Some(&squat_pose(0.0, 0.7, 0.65, ear_dx)))
            .unwrap();
    }
    let head = evaluator.get_final_evaluation();
    let head = head.get(Measure::HeadAlignment).unwrap();
    assert_eq!(head.rating, Rating::Dangerous);
    assert_eq!(
        head.segments,
        vec![VideoSegment::Window {
            start: 60,
            end: 90,
            relevant_frames: 20
        }]
    );
}

#[test]
fn pull_up_rare_extension_flips_rating() {
    let mut evaluator = factory::create(Exercise::PullUp, 90);
    for frame in 0..90 {
        let straight = (40..43).contains(&frame);
        evaluator
            .evaluate_frame(frame, Some(&pull_up_pose(straight)))
            .unwrap();
    }

    let result = evaluator.get_final_evaluation();
    let arms = result.get(Measure::PullUpArmsNearlyExtended).unwrap();
    assert_eq!(arms.rating, Rating::Warning);
    assert_eq!(
        arms.segments,
        vec![VideoSegment::Window {
            start: 30,
            end: 60,
            relevant_frames: 3
        }]
    );
    assert_eq!(
        result.rating(Measure::PullUpChinOverBar),
        Some(Rating::Perfect)
    );
    assert_eq!(
        result.rating(Measure::PullUpShoulderCorrectPosition),
        Some(Rating::Perfect)
    );
}

#[test]
fn pull_up_without_extension_is_perfect() {
    let mut evaluator = factory::create(Exercise::PullUp, 90);
    for frame in 0..90 {
        // two straight frames: below the threshold of 3
        evaluator
            .evaluate_frame(frame, Some(&pull_up_pose(frame < 2)))
            .unwrap();
    }
    let result = evaluator.get_final_evaluation();
    assert_eq!(
        result.rating(Measure::PullUpArmsNearlyExtended),
        Some(Rating::Perfect)
    );
}

fn raise_pose(right_wrist: [f32; 2]) -> Pose {
    Pose::new(FRAME)
        .with(Landmark::LeftHip, 0.4, 0.7)
        .with(Landmark::RightHip, 0.6, 0.7)
        .with(Landmark::LeftShoulder, 0.4, 0.3)
        .with(Landmark::RightShoulder, 0.6, 0.3)
        .with(Landmark::LeftElbow, 0.2, 0.32)
        .with(Landmark::RightElbow, 0.8, 0.32)
        .with(Landmark::LeftWrist, 0.0, 0.3)
        .with(Landmark::RightWrist, right_wrist[0], right_wrist[1])
}

/// Both arms at `deg` degrees from hanging, shoulders and hips fixed.
fn raise_sweep_pose(deg: f32) -> Pose {
    let (sin, cos) = deg.to_radians().sin_cos();
    let reach = 0.3;
    Pose::new(FRAME)
        .with(Landmark::LeftHip, 0.4, 0.7)
        .with(Landmark::RightHip, 0.6, 0.7)
        .with(Landmark::LeftShoulder, 0.4, 0.3)
        .with(Landmark::RightShoulder, 0.6, 0.3)
        .with(Landmark::LeftElbow, 0.4 - reach / 2.0 * sin, 0.3 + reach / 2.0 * cos)
        .with(Landmark::RightElbow, 0.6 + reach / 2.0 * sin, 0.3 + reach / 2.0 * cos)
        .with(Landmark::LeftWrist, 0.4 - reach * sin, 0.3 + reach * cos)
        .with(Landmark::RightWrist, 0.6 + reach * sin, 0.3 + reach * cos)
}

#[test]
fn side_raise_with_steady_upright_shoulders_is_perfect() {
    let mut evaluator = factory::create(Exercise::SideLateralRaise, 60);
    for frame in 0..60 {
        let deg = 90.0 * frame as f32 / 59.0;
        evaluator
            .evaluate_frame(frame, Some(&raise_sweep_pose(deg)))
            .unwrap();
    }

    let result = evaluator.get_final_evaluation();
    // shoulders sit above the hips, so the elevation is negative and never
    // falls under a fraction of itself
    assert_eq!(
        result.rating(Measure::SideLateralRaiseShouldersIncorrectElevation),
        Some(Rating::Perfect)
    );
    assert_eq!(
        result.rating(Measure::SideLateralRaiseSymmetry),
        Some(Rating::Perfect)
    );
    assert_eq!(
        result.rating(Measure::SideLateralRaiseArmsLiftingTooHigh),
        Some(Rating::Perfect)
    );
}

#[test]
fn side_raise_shoulders_below_hips_without_range_are_dangerous() {
    let mut evaluator = factory::create(Exercise::SideLateralRaise, 20);
    for frame in 0..20 {
        // bent over: shoulders lower in the frame than the hips, and fixed
        let pose = Pose::new(FRAME)
            .with(Landmark::LeftHip, 0.4, 0.3)
            .with(Landmark::RightHip, 0.6, 0.3)
            .with(Landmark::LeftShoulder, 0.4, 0.7)
            .with(Landmark::RightShoulder, 0.6, 0.7)
            .with(Landmark::LeftElbow, 0.3, 0.8)
            .with(Landmark::RightElbow, 0.7, 0.8)
            .with(Landmark::LeftWrist, 0.2, 0.9)
            .with(Landmark::RightWrist, 0.8, 0.9);
        evaluator.evaluate_frame(frame, Some(&pose)).unwrap();
    }
    let result = evaluator.get_final_evaluation();
    assert_eq!(
        result.rating(Measure::SideLateralRaiseShouldersIncorrectElevation),
        Some(Rating::Dangerous)
    );
}

#[test]
fn side_raise_uneven_arms_are_dangerous() {
    let mut evaluator = factory::create(Exercise::SideLateralRaise, 20);
    for frame in 0..20 {
        // right arm stays down
        evaluator
            .evaluate_frame(frame, Some(&raise_pose([0.62, 0.65])))
            .unwrap();
    }
    let result = evaluator.get_final_evaluation();
    assert_eq!(
        result.rating(Measure::SideLateralRaiseSymmetry),
        Some(Rating::Dangerous)
    );
}

fn triceps_pose(wrist: [f32; 2], elbow_x: f32) -> Pose {
    Pose::new(FRAME)
        .with(Landmark::LeftHip, 0.5, 0.8)
        .with(Landmark::LeftShoulder, 0.5, 0.4)
        .with(Landmark::LeftElbow, elbow_x, 0.2)
        .with(Landmark::LeftWrist, wrist[0], wrist[1])
}

#[test]
fn triceps_full_range_with_stable_shoulder_is_perfect() {
    let mut evaluator = factory::create(Exercise::TricepsExtension, 20);
    for frame in 0..20 {
        let wrist = if frame % 2 == 0 { [0.5, 0.0] } else { [0.45, 0.35] };
        evaluator
            .evaluate_frame(frame, Some(&triceps_pose(wrist, 0.5)))
            .unwrap();
    }

    let result = evaluator.get_final_evaluation();
    for measure in registry::measures(Exercise::TricepsExtension) {
        assert_eq!(result.rating(*measure), Some(Rating::Perfect), "{measure}");
    }
}

#[test]
fn triceps_swinging_upper_arm_is_dangerous() {
    let mut evaluator = factory::create(Exercise::TricepsExtension, 20);
    for frame in 0..20 {
        // upper arm swings between vertical and ~27 degrees off it
        let elbow_x = if frame < 10 { 0.5 } else { 0.6 };
        evaluator
            .evaluate_frame(frame, Some(&triceps_pose([elbow_x, 0.0], elbow_x)))
            .unwrap();
    }
    let result = evaluator.get_final_evaluation();
    assert_eq!(
        result.rating(Measure::TricepsExtensionShoulderAngle),
        Some(Rating::Dangerous)
    );
}

#[test]
fn bench_press_reports_basic_landmarks_only() {
    let mut evaluator = factory::create(Exercise::BenchPress, 3);
    for frame in 0..3 {
        let readings = evaluator
            .evaluate_frame(frame, Some(&squat_pose(0.0, 0.7, 0.65, 0.0)))
            .unwrap();
        assert!(readings.is_empty());
    }
    let result = evaluator.get_final_evaluation();
    assert_eq!(result.feedback.len(), 1);
    assert_eq!(result.rating(Measure::BasicLandmarks), Some(Rating::Perfect));
    assert!(!result.feedback[0].comment.is_empty());
}

#[test]
fn every_measure_gets_exactly_one_rated_comment() {
    for exercise in Exercise::iter() {
        for total_frames in [0, 45] {
            let mut evaluator = factory::create(exercise, total_frames);
            let result = evaluator.get_final_evaluation();

            let measures: Vec<_> = result.iter().map(|f| f.measure).collect();
            assert_eq!(measures, registry::measures(exercise), "{exercise}");
            for feedback in result.iter() {
                assert!(!feedback.comment.is_empty(), "{}", feedback.measure);
                assert!(!feedback.segments.is_empty(), "{}", feedback.measure);
            }
        }
    }
}

#[test]
fn absent_poses_leave_no_trace() {
    for exercise in Exercise::iter() {
        let mut fed = factory::create(exercise, 60);
        for frame in 0..60 {
            assert!(fed.evaluate_frame(frame, None).unwrap().is_empty());
        }
        let mut fresh = factory::create(exercise, 60);
        assert_eq!(fed.get_final_evaluation(), fresh.get_final_evaluation());
    }
}

#[test]
fn pose_missing_landmarks_is_skipped() {
    let mut evaluator = factory::create(Exercise::PullUp, 1);
    let partial = Pose::new(FRAME).with(Landmark::LeftShoulder, 0.4, 0.4);
    assert!(evaluator.evaluate_frame(0, Some(&partial)).unwrap().is_empty());
}

#[test]
fn lifecycle_violations_fail_loudly() {
    let mut evaluator = factory::create(Exercise::Squat, 5);
    assert_eq!(
        evaluator.evaluate_frame(5, None),
        Err(EngineError::FrameOutOfRange {
            frame: 5,
            total_frames: 5
        })
    );

    evaluator.evaluate_frame(2, None).unwrap();
    assert_eq!(
        evaluator.evaluate_frame(2, None),
        Err(EngineError::FrameOutOfOrder {
            frame: 2,
            previous: 2
        })
    );
    // gaps are fine
    evaluator.evaluate_frame(4, None).unwrap();

    let first = evaluator.get_final_evaluation();
    assert!(evaluator.is_finalized());
    assert_eq!(
        evaluator.evaluate_frame(4, None),
        Err(EngineError::AlreadyFinalized)
    );
    assert_eq!(evaluator.get_final_evaluation(), first);
}
