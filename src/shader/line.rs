//! Anti-aliased edges and line families.

use super::distance::dist_to_grid;
use std::f32::consts::SQRT_2;

/// Anti-aliased edge function.
///
/// Creates a smooth transition from 1 to 0 as distance increases past the edge.
///
/// # Parameters
/// - `dist`: Distance from the shape's center line (0 = on it)
/// - `half_thickness`: Half the total thickness (distance from center to edge)
/// - `aa_width`: Width of the anti-aliasing transition (typically 1.0)
///
/// # Returns
/// - 1.0 if dist < half_thickness
/// - Smooth falloff from 1 to 0 over aa_width
/// - 0.0 if dist > half_thickness + aa_width
#[inline]
pub fn aa_edge(dist: f32, half_thickness: f32, aa_width: f32) -> f32 {
    if dist < half_thickness {
        1.0
    } else if dist < half_thickness + aa_width {
        1.0 - (dist - half_thickness) / aa_width
    } else {
        0.0
    }
}

/// Family of 45° lines running down-right (`x - y = offset + k * spacing`).
///
/// `spacing` is measured along the horizontal axis, the way the lines are
/// laid out (each line starts `spacing` further right on the top edge).
/// Returns coverage in [0, 1].
#[inline]
pub fn diagonal_lines(x: f32, y: f32, offset: f32, spacing: f32, thickness: f32, aa_width: f32) -> f32 {
    let along = dist_to_grid(x - y - offset, spacing);
    aa_edge(along / SQRT_2, thickness / 2.0, aa_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aa_edge() {
        assert_eq!(aa_edge(0.0, 1.0, 1.0), 1.0); // On center line
        assert_eq!(aa_edge(0.5, 1.0, 1.0), 1.0); // Inside
        assert!((aa_edge(1.5, 1.0, 1.0) - 0.5).abs() < 1e-6); // Halfway through AA
        assert_eq!(aa_edge(2.5, 1.0, 1.0), 0.0); // Outside
    }

    #[test]
    fn test_diagonal_on_and_off_line() {
        // (20, 0) lies on the line x - y = 0 + 1 * 20.
        assert_eq!(diagonal_lines(20.0, 0.0, 0.0, 20.0, 1.0, 1.0), 1.0);
        assert_eq!(diagonal_lines(35.0, 25.0, 0.0, 20.0, 1.0, 1.0), 0.0);
        // Halfway between two lines is uncovered.
        assert_eq!(diagonal_lines(10.0, 0.0, 0.0, 20.0, 1.0, 1.0), 0.0);
    }
}
