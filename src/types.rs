use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// BlazePose landmark names, in model output order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Landmark {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

fn full_visibility() -> f32 {
    1.0
}

/// A landmark position in normalized image space. `z` is carried but ignored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default = "full_visibility")]
    pub visibility: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    pub fn point(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// All keypoints detected in one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub frame_size: FrameSize,
    pub keypoints: BTreeMap<Landmark, Keypoint>,
}

impl Pose {
    pub fn new(frame_size: FrameSize) -> Self {
        Self {
            frame_size,
            keypoints: BTreeMap::new(),
        }
    }

    pub fn with(mut self, landmark: Landmark, x: f32, y: f32) -> Self {
        self.insert(landmark, Keypoint::new(x, y));
        self
    }

    pub fn insert(&mut self, landmark: Landmark, keypoint: Keypoint) {
        self.keypoints.insert(landmark, keypoint);
    }

    pub fn get(&self, landmark: Landmark) -> Option<&Keypoint> {
        self.keypoints.get(&landmark)
    }

    /// Normalized `[x, y]` of a landmark.
    pub fn point(&self, landmark: Landmark) -> Option<[f32; 2]> {
        self.get(landmark).map(Keypoint::point)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Exercise {
    Squat,
    PullUp,
    BenchPress,
    SideLateralRaise,
    TricepsExtension,
}

impl Exercise {
    pub fn display_name(&self) -> &'static str {
        match self {
            Exercise::Squat => "Squat",
            Exercise::PullUp => "Pull-up",
            Exercise::BenchPress => "Bench press",
            Exercise::SideLateralRaise => "Side lateral raise",
            Exercise::TricepsExtension => "Triceps extension",
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Measure {
    SquatDepth,
    SquatBackPosture,
    HeadAlignment,
    PullUpArmsNearlyExtended,
    PullUpChinOverBar,
    PullUpShoulderCorrectPosition,
    BasicLandmarks,
    SideLateralRaiseArmsLiftingTooHigh,
    SideLateralRaiseArmsAbductionUpCorrectPosition,
    SideLateralRaiseElbowsBendAngles,
    SideLateralRaiseShouldersIncorrectElevation,
    SideLateralRaiseSymmetry,
    TricepsExtensionCompleteUpExtension,
    TricepsExtensionCompleteDownExtension,
    TricepsExtensionShoulderAngle,
}

impl Measure {
    pub fn exercise(&self) -> Exercise {
        match self {
            Measure::SquatDepth | Measure::SquatBackPosture | Measure::HeadAlignment => {
                Exercise::Squat
            }
            Measure::PullUpArmsNearlyExtended
            | Measure::PullUpChinOverBar
            | Measure::PullUpShoulderCorrectPosition => Exercise::PullUp,
            Measure::BasicLandmarks => Exercise::BenchPress,
            Measure::SideLateralRaiseArmsLiftingTooHigh
            | Measure::SideLateralRaiseArmsAbductionUpCorrectPosition
            | Measure::SideLateralRaiseElbowsBendAngles
            | Measure::SideLateralRaiseShouldersIncorrectElevation
            | Measure::SideLateralRaiseSymmetry => Exercise::SideLateralRaise,
            Measure::TricepsExtensionCompleteUpExtension
            | Measure::TricepsExtensionCompleteDownExtension
            | Measure::TricepsExtensionShoulderAngle => Exercise::TricepsExtension,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Measure::SquatDepth => "Squat depth",
            Measure::SquatBackPosture => "Back posture",
            Measure::HeadAlignment => "Head alignment",
            Measure::PullUpArmsNearlyExtended => "Arm extension at the bottom",
            Measure::PullUpChinOverBar => "Chin over the bar",
            Measure::PullUpShoulderCorrectPosition => "Shoulder engagement",
            Measure::BasicLandmarks => "Basic landmarks",
            Measure::SideLateralRaiseArmsLiftingTooHigh => "Arm height",
            Measure::SideLateralRaiseArmsAbductionUpCorrectPosition => "Arm abduction",
            Measure::SideLateralRaiseElbowsBendAngles => "Elbow bend",
            Measure::SideLateralRaiseShouldersIncorrectElevation => "Shoulder elevation",
            Measure::SideLateralRaiseSymmetry => "Arm symmetry",
            Measure::TricepsExtensionCompleteUpExtension => "Full extension",
            Measure::TricepsExtensionCompleteDownExtension => "Full flexion",
            Measure::TricepsExtensionShoulderAngle => "Shoulder stability",
        }
    }
}

/// Outcome of a measure over a whole clip, ordered from best to worst.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Rating {
    Perfect,
    Warning,
    Dangerous,
}

impl Rating {
    pub fn label(&self) -> &'static str {
        match self {
            Rating::Perfect => "perfect",
            Rating::Warning => "worth a look",
            Rating::Dangerous => "dangerous",
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Viewpoint {
    Front,
    Side,
    Back,
}

/// The part of a clip a piece of feedback is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SegmentRecord", try_from = "SegmentRecord")]
pub enum VideoSegment {
    WholeClip,
    /// Half-open `[start, end)` frame range.
    Window {
        start: usize,
        end: usize,
        relevant_frames: usize,
    },
}

impl VideoSegment {
    /// `(start, end)` in seconds; `None` for the whole clip or a non-positive fps.
    pub fn seconds(&self, fps: f32) -> Option<(f32, f32)> {
        match *self {
            VideoSegment::Window { start, end, .. } if fps > 0.0 => {
                Some((start as f32 / fps, end as f32 / fps))
            }
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SegmentRecord {
    Window {
        start: usize,
        end: usize,
        count: usize,
    },
    Full {
        full: bool,
    },
}

impl From<VideoSegment> for SegmentRecord {
    fn from(segment: VideoSegment) -> Self {
        match segment {
            VideoSegment::WholeClip => SegmentRecord::Full { full: true },
            VideoSegment::Window {
                start,
                end,
                relevant_frames,
            } => SegmentRecord::Window {
                start,
                end,
                count: relevant_frames,
            },
        }
    }
}

impl TryFrom<SegmentRecord> for VideoSegment {
    type Error = String;

    fn try_from(record: SegmentRecord) -> Result<Self, Self::Error> {
        match record {
            SegmentRecord::Full { full: true } => Ok(VideoSegment::WholeClip),
            SegmentRecord::Full { full: false } => {
                Err("segment must either be a window or `full: true`".to_string())
            }
            SegmentRecord::Window { start, end, count } => Ok(VideoSegment::Window {
                start,
                end,
                relevant_frames: count,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseFeedback {
    pub measure: Measure,
    pub rating: Rating,
    pub comment: String,
    pub segments: Vec<VideoSegment>,
}

/// Per-measure feedback of one evaluator, in registry order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalEvaluation {
    pub exercise: Exercise,
    pub feedback: Vec<ExerciseFeedback>,
}

impl FinalEvaluation {
    pub fn get(&self, measure: Measure) -> Option<&ExerciseFeedback> {
        self.feedback.iter().find(|f| f.measure == measure)
    }

    pub fn rating(&self, measure: Measure) -> Option<Rating> {
        self.get(measure).map(|f| f.rating)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExerciseFeedback> {
        self.feedback.iter()
    }
}

/// A scalar computed while evaluating one frame, for overlays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Reading {
    pub measure: Measure,
    pub value: f32,
}

pub type FrameReadings = Vec<Reading>;
