//! Blending and interpolation functions.

/// Linear interpolation between two values.
///
/// Returns `a` when `t=0`, `b` when `t=1`, and linear blend in between.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate one 8-bit channel.
#[inline]
pub fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    lerp(a as f32, b as f32, t).round().clamp(0.0, 255.0) as u8
}

/// Source-over compositing of a straight-alpha color onto an opaque pixel.
///
/// `alpha` is the effective source alpha (color alpha times coverage).
#[inline]
pub fn source_over(dst: [u8; 3], src: [u8; 3], alpha: f32) -> [u8; 3] {
    let alpha = alpha.clamp(0.0, 1.0);
    [
        lerp_channel(dst[0], src[0], alpha),
        lerp_channel(dst[1], src[1], alpha),
        lerp_channel(dst[2], src[2], alpha),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
    }

    #[test]
    fn test_source_over_extremes() {
        assert_eq!(source_over([0, 0, 0], [255, 255, 255], 0.0), [0, 0, 0]);
        assert_eq!(source_over([0, 0, 0], [255, 255, 255], 1.0), [255, 255, 255]);
        assert_eq!(source_over([0, 0, 0], [200, 100, 50], 0.5), [100, 50, 25]);
    }
}
