use std::cmp::Ordering;

/// Pre-sized per-frame flag buffer. Index = frame index, `1` = the frame shows
/// the condition being tracked. Frames never written stay `0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSignal {
    flags: Vec<u8>,
}

impl FrameSignal {
    pub fn new(total_frames: usize) -> Self {
        Self {
            flags: vec![0; total_frames],
        }
    }

    /// Flags `frame`. The caller guarantees `frame < len()`.
    pub fn mark(&mut self, frame: usize) {
        if let Some(flag) = self.flags.get_mut(frame) {
            *flag = 1;
        }
    }

    pub fn flagged_frames(&self) -> usize {
        self.flags.iter().filter(|&&flag| flag != 0).count()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.flags
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Raw per-frame samples, appended only for frames that were evaluated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    samples: Vec<f32>,
}

impl Series {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: f32) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean of the `n` lowest and the `n` highest samples. Uses every sample
    /// when there are fewer than `n`; `None` for an empty series.
    pub fn extremes(&self, n: usize) -> Option<(f32, f32)> {
        if self.samples.is_empty() || n == 0 {
            return None;
        }

        let mut sorted = self.samples.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let take = n.min(sorted.len());
        let low = mean(&sorted[..take]);
        let high = mean(&sorted[sorted.len() - take..]);
        Some((low, high))
    }
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}
