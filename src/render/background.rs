//! Two-stop directional gradient with an optional stripe texture.
//!
//! The gradient axis is derived from the angle alone:
//!
//! ```text
//! d     = (W * cos(angle), H * sin(angle))
//! start = center - d / 2
//! end   = center + d / 2
//! ```
//!
//! Each pixel is projected onto the axis and the two stops are mixed by
//! the clamped projection. 0° runs left to right, 90° top to bottom, and
//! 180° is the exact reverse of 0°.

use serde::Serialize;

use crate::color::{self, Rgba};
use crate::design::{Background, Overlay};
use crate::shader::{diagonal_lines, direction_deg, lerp_channel, project_on_axis};

use super::surface::Surface;

/// Horizontal distance between stripes.
pub const STRIPE_SPACING: f32 = 20.0;
/// Stripe stroke width.
pub const STRIPE_WIDTH: f32 = 1.0;
/// Stripe color: white at 3% opacity.
pub const STRIPE_COLOR: Rgba = Rgba {
    r: 255,
    g: 255,
    b: 255,
    a: 0.03,
};

/// Gradient start and end points in nominal pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientAxis {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl GradientAxis {
    /// Position of `(x, y)` along the axis, clamped to `[0, 1]`.
    pub fn t(&self, x: f32, y: f32) -> f32 {
        project_on_axis(x, y, self.x0, self.y0, self.x1, self.y1)
    }
}

/// Axis for a `width` x `height` surface at `angle` degrees.
pub fn gradient_axis(width: f32, height: f32, angle: f32) -> GradientAxis {
    let (cos, sin) = direction_deg(angle);
    let (dx, dy) = (width * cos, height * sin);
    let (cx, cy) = (width / 2.0, height / 2.0);
    GradientAxis {
        x0: cx - dx / 2.0,
        y0: cy - dy / 2.0,
        x1: cx + dx / 2.0,
        y1: cy + dy / 2.0,
    }
}

/// Paint the gradient, then the stripe overlay if the pattern asks for it.
pub fn composite(surface: &mut Surface, background: &Background) {
    let start = color::parse_or(&background.color1, Rgba::BLACK);
    let end = color::parse_or(&background.color2, Rgba::BLACK);
    let axis = gradient_axis(surface.width(), surface.height(), background.angle);

    surface.shade(|x, y| {
        let t = axis.t(x, y);
        Rgba {
            r: lerp_channel(start.r, end.r, t),
            g: lerp_channel(start.g, end.g, t),
            b: lerp_channel(start.b, end.b, t),
            a: start.a + (end.a - start.a) * t,
        }
    });

    if background.overlay() == Some(Overlay::DiagonalStripes) {
        draw_stripes(surface);
    }
}

/// 45° lines from `(i, 0)` to `(i + H, H)` for `i` in `-H..W` step 20.
fn draw_stripes(surface: &mut Surface) {
    let height = surface.height();
    let aa = 1.0 / surface.scale();
    surface.shade(|x, y| {
        let coverage = diagonal_lines(x, y, -height, STRIPE_SPACING, STRIPE_WIDTH, aa);
        STRIPE_COLOR.fade(coverage)
    });
}
