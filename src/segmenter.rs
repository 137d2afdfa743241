use crate::types::VideoSegment;

/// Splits `signal` into consecutive, non-overlapping windows of `window_size`
/// frames and returns the windows holding at least `threshold` flagged frames.
///
/// A trailing window shorter than `window_size` is never reported. A zero
/// `window_size` yields no windows.
pub fn segments(signal: &[u8], window_size: usize, threshold: usize) -> Vec<VideoSegment> {
    if window_size == 0 {
        return Vec::new();
    }

    signal
        .chunks_exact(window_size)
        .enumerate()
        .filter_map(|(index, window)| {
            let relevant_frames = window.iter().filter(|&&flag| flag != 0).count();
            (relevant_frames >= threshold).then(|| {
                let start = index * window_size;
                VideoSegment::Window {
                    start,
                    end: start + window_size,
                    relevant_frames,
                }
            })
        })
        .collect()
}
