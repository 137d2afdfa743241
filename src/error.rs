use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("exercise `{0}` is not supported")]
    UnsupportedExercise(String),

    #[error("viewpoint `{0}` is not supported")]
    UnsupportedViewpoint(String),

    #[error("frame {frame} is out of range for a clip of {total_frames} frames")]
    FrameOutOfRange { frame: usize, total_frames: usize },

    #[error("frame {frame} arrived after frame {previous}; frames must be strictly increasing")]
    FrameOutOfOrder { frame: usize, previous: usize },

    #[error("evaluator was already finalized")]
    AlreadyFinalized,
}
