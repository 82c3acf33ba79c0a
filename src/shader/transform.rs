//! Angle conversion and axis projection.

use std::f32::consts::PI;

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(angle_deg: f32) -> f32 {
    angle_deg * PI / 180.0
}

/// Unit-free direction for an angle in degrees, as `(cos, sin)`.
///
/// Values within `1e-6` of zero are snapped to zero so that right angles
/// produce exactly axis-aligned directions.
#[inline]
pub fn direction_deg(angle_deg: f32) -> (f32, f32) {
    let rad = deg_to_rad(angle_deg);
    let snap = |v: f32| if v.abs() < 1e-6 { 0.0 } else { v };
    (snap(rad.cos()), snap(rad.sin()))
}

/// Position of `(px, py)` along the axis from `(x0, y0)` to `(x1, y1)`.
///
/// Returns 0 at the start, 1 at the end, clamped to [0, 1]. A zero-length
/// axis projects everything to 0.
#[inline]
pub fn project_on_axis(px: f32, py: f32, x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f32::EPSILON {
        return 0.0;
    }
    (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
}
