//! Planar helpers shared by every evaluator.
//!
//! Points are `[x, y]` in image coordinates (y grows downward). The functions
//! do not care whether the inputs are normalized or pixel-scaled, but both
//! points of a comparison must use the same space.

use crate::types::FrameSize;

const MIN_NORM: f32 = 1e-6;

/// Angle at vertex `b` between the rays `b→a` and `b→c`, in degrees `[0, 180]`.
///
/// Returns `0.0` when either ray has near-zero length.
pub fn angle(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
    let ba = sub(a, b);
    let bc = sub(c, b);
    let (Some(ba), Some(bc)) = (normalize(ba), normalize(bc)) else {
        log::warn!("degenerate angle at {b:?} (a={a:?}, c={c:?}), using 0.0");
        return 0.0;
    };

    dot(ba, bc).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Acute angle between the segment `from→to` and the image vertical, in `[0, 90]`.
pub fn angle_to_vertical(from: [f32; 2], to: [f32; 2]) -> f32 {
    let Some(dir) = normalize(sub(to, from)) else {
        log::warn!("degenerate segment {from:?} -> {to:?}, using 0.0");
        return 0.0;
    };

    let raw = dot(dir, [0.0, -1.0]).clamp(-1.0, 1.0).acos().to_degrees();
    raw.min(180.0 - raw)
}

/// `p.x - q.x`; positive when `p` is further right than `q`.
pub fn horizontal_offset(p: [f32; 2], q: [f32; 2]) -> f32 {
    p[0] - q[0]
}

/// `p.y - q.y`; positive when `p` is lower in the frame than `q`.
pub fn vertical_depth(p: [f32; 2], q: [f32; 2]) -> f32 {
    p[1] - q[1]
}

pub fn to_pixels(point: [f32; 2], size: FrameSize) -> [f32; 2] {
    [point[0] * size.width as f32, point[1] * size.height as f32]
}

fn sub(a: [f32; 2], b: [f32; 2]) -> [f32; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

fn dot(a: [f32; 2], b: [f32; 2]) -> f32 {
    a[0] * b[0] + a[1] * b[1]
}

fn normalize(v: [f32; 2]) -> Option<[f32; 2]> {
    let len = (v[0] * v[0] + v[1] * v[1]).sqrt();
    if len < MIN_NORM {
        None
    } else {
        Some([v[0] / len, v[1] / len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn straight_and_right_angles() {
        assert!(close(angle([0.0, 0.0], [0.5, 0.0], [1.0, 0.0]), 180.0));
        assert!(close(angle([0.0, 0.0], [0.5, 0.0], [0.5, 0.5]), 90.0));
        assert!(close(angle([1.0, 0.0], [0.0, 0.0], [1.0, 0.0]), 0.0));
    }

    #[test]
    fn angle_is_symmetric() {
        let samples = [
            ([0.1, 0.2], [0.4, 0.4], [0.9, 0.1]),
            ([0.3, 0.9], [0.5, 0.5], [0.2, 0.1]),
            ([0.0, 1.0], [1.0, 1.0], [0.7, 0.3]),
        ];
        for (a, b, c) in samples {
            assert!(close(angle(a, b, c), angle(c, b, a)));
        }
    }

    #[test]
    fn degenerate_angle_is_zero() {
        assert_eq!(angle([0.5, 0.5], [0.5, 0.5], [1.0, 0.0]), 0.0);
        assert_eq!(angle([0.0, 0.0], [0.5, 0.5], [0.5, 0.5]), 0.0);
        assert_eq!(angle_to_vertical([0.3, 0.3], [0.3, 0.3]), 0.0);
    }

    #[test]
    fn vertical_reference() {
        // shoulder straight above hip
        assert!(close(angle_to_vertical([0.5, 0.6], [0.5, 0.2]), 0.0));
        // upside down is still upright
        assert!(close(angle_to_vertical([0.5, 0.2], [0.5, 0.6]), 0.0));
        assert!(close(angle_to_vertical([0.0, 1.0], [1.0, 0.0]), 45.0));
        assert!(close(angle_to_vertical([0.0, 0.5], [1.0, 0.5]), 90.0));
    }

    #[test]
    fn offsets_follow_image_axes() {
        assert!(close(horizontal_offset([0.7, 0.0], [0.5, 0.0]), 0.2));
        assert!(close(vertical_depth([0.0, 0.6], [0.0, 0.5]), 0.1));
        assert!(vertical_depth([0.0, 0.4], [0.0, 0.5]) < 0.0);
    }

    #[test]
    fn pixel_scaling() {
        let px = to_pixels([0.5, 0.25], FrameSize::new(1920, 1080));
        assert!(close(px[0], 960.0));
        assert!(close(px[1], 270.0));
    }
}
