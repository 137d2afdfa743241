//! Pose tracks: the per-frame keypoints of one clip as written by the pose
//! extractor, stored as JSON.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    error::EngineError,
    types::{Exercise, FrameSize, Keypoint, Landmark, Pose, Viewpoint},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseTrack {
    /// Exercise identifier, e.g. `SQUAT`.
    pub exercise: String,
    /// Camera viewpoint identifier, e.g. `SIDE`.
    pub viewpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f32>,
    pub total_frames: usize,
    pub frame_size: FrameSize,
    #[serde(default)]
    pub frames: Vec<TrackFrame>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackFrame {
    pub index: usize,
    /// `None` when no person was detected.
    #[serde(default)]
    pub keypoints: Option<BTreeMap<String, Keypoint>>,
}

impl PoseTrack {
    pub fn new(
        exercise: Exercise,
        viewpoint: Viewpoint,
        total_frames: usize,
        frame_size: FrameSize,
    ) -> Self {
        Self {
            exercise: exercise.to_string(),
            viewpoint: viewpoint.to_string(),
            fps: None,
            total_frames,
            frame_size,
            frames: Vec::new(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read pose track {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse pose track {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).context("failed to encode pose track")?;
        fs::write(path, content)
            .with_context(|| format!("failed to write pose track {}", path.display()))
    }

    pub fn exercise(&self) -> Result<Exercise, EngineError> {
        self.exercise
            .trim()
            .parse()
            .map_err(|_| EngineError::UnsupportedExercise(self.exercise.clone()))
    }

    pub fn viewpoint(&self) -> Result<Viewpoint, EngineError> {
        self.viewpoint
            .trim()
            .parse()
            .map_err(|_| EngineError::UnsupportedViewpoint(self.viewpoint.clone()))
    }

    /// Appends a frame; `None` records a frame without a detected person.
    pub fn push(&mut self, index: usize, pose: Option<&Pose>) {
        let keypoints = pose.map(|pose| {
            pose.keypoints
                .iter()
                .map(|(landmark, keypoint)| (landmark.to_string(), *keypoint))
                .collect()
        });
        self.frames.push(TrackFrame { index, keypoints });
    }

    /// `(index, pose)` for every stored frame, in file order.
    pub fn poses(&self) -> impl Iterator<Item = (usize, Option<Pose>)> + '_ {
        self.frames
            .iter()
            .map(|frame| (frame.index, frame.pose(self.frame_size)))
    }
}

impl TrackFrame {
    /// Builds the frame's pose. Unknown landmark names are dropped with a
    /// warning; the frame still counts.
    pub fn pose(&self, frame_size: FrameSize) -> Option<Pose> {
        let keypoints = self.keypoints.as_ref()?;
        let mut pose = Pose::new(frame_size);
        for (name, keypoint) in keypoints {
            match name.parse::<Landmark>() {
                Ok(landmark) => pose.insert(landmark, *keypoint),
                Err(_) => log::warn!("frame {}: unknown landmark `{name}`", self.index),
            }
        }
        Some(pose)
    }
}
