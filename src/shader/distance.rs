//! Distance functions for coverage calculations.

/// Euclidean distance between two points.
#[inline]
pub fn dist(x: f32, y: f32, cx: f32, cy: f32) -> f32 {
    let dx = x - cx;
    let dy = y - cy;
    (dx * dx + dy * dy).sqrt()
}

/// Distance to nearest grid line.
///
/// Returns the distance from a coordinate to the nearest line in a 1D grid
/// with the given spacing. Grid lines are at 0, spacing, 2*spacing, etc.
#[inline]
pub fn dist_to_grid(coord: f32, spacing: f32) -> f32 {
    let pos_in_cell = coord / spacing;
    let frac = pos_in_cell - pos_in_cell.floor();
    frac.min(1.0 - frac) * spacing
}

/// Distance from a point to a segment with flat (butt) ends.
///
/// Inside the segment's extent this is the perpendicular distance. Past
/// either end the overshoot along the axis is folded in, so a stroke
/// built on top of it stops square at the endpoints.
pub fn dist_to_segment(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len = (dx * dx + dy * dy).sqrt();
    if len <= f32::EPSILON {
        return dist(px, py, x1, y1);
    }

    let ux = dx / len;
    let uy = dy / len;
    let along = (px - x1) * ux + (py - y1) * uy;
    let across = ((px - x1) * -uy + (py - y1) * ux).abs();

    let overshoot = if along < 0.0 {
        -along
    } else if along > len {
        along - len
    } else {
        0.0
    };

    // Max (not hypot) keeps the butt end square.
    across.max(overshoot)
}

/// Signed distance to an axis-aligned rectangle (negative inside).
pub fn sd_rect(px: f32, py: f32, x: f32, y: f32, w: f32, h: f32) -> f32 {
    let cx = x + w / 2.0;
    let cy = y + h / 2.0;
    let qx = (px - cx).abs() - w / 2.0;
    let qy = (py - cy).abs() - h / 2.0;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    outside + inside
}
