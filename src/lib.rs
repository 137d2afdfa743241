//! Exercise form evaluation: per-frame body keypoints in, rated and
//! time-anchored form feedback out.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod factory;
pub mod feedback;
pub mod geometry;
pub mod pipeline;
pub mod registry;
pub mod segmenter;
pub mod track;
pub mod types;

pub use crate::{
    error::EngineError,
    evaluator::Evaluator,
    feedback::{FeedbackComment, Report, ViewpointEvaluation, summarize},
    types::{
        Exercise, ExerciseFeedback, FinalEvaluation, FrameReadings, FrameSize, Keypoint,
        Landmark, Measure, Pose, Rating, Reading, VideoSegment, Viewpoint,
    },
};
