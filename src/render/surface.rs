//! The pixel surface every raster primitive draws on.
//!
//! A [`Surface`] owns an opaque RGBA buffer of `nominal * scale` pixels.
//! Callers always speak nominal coordinates; the surface applies the scale,
//! which is how export renders the same scene at 2x.
//!
//! Shapes are painted through coverage [`Mask`]s: a primitive computes how
//! much of each device pixel it covers, and the surface blends its color in
//! with source-over. If a drop shadow is set, every mask painted while it
//! is set also casts a blurred shadow underneath.
//!
//! Masks never extend past the surface's [`Clip`] window (the device
//! pixels plus room for the current shadow's blur), however far off the
//! surface a primitive's coordinates reach.

use image::{Rgba as Pixel, RgbaImage};
use rayon::prelude::*;

use crate::color::Rgba;
use crate::error::SignboardError;
use crate::shader::{aa_edge, dist_to_segment, sd_rect, source_over};

/// Largest device-pixel width or height a surface is created with.
pub const MAX_DEVICE_DIM: u32 = 16_384;

/// Largest shadow blur sigma, in device pixels.
pub const MAX_SHADOW_SIGMA: f32 = 64.0;

/// Device size of a `nominal * scale` surface, rejecting sizes above
/// [`MAX_DEVICE_DIM`].
pub fn device_size(nominal_width: u32, nominal_height: u32, scale: f32) -> Result<(u32, u32), SignboardError> {
    let w = (nominal_width as f64 * scale as f64).round();
    let h = (nominal_height as f64 * scale as f64).round();
    if !(w.is_finite() && h.is_finite()) || w > MAX_DEVICE_DIM as f64 || h > MAX_DEVICE_DIM as f64 {
        return Err(SignboardError::Export(format!(
            "{}x{} at scale {} exceeds the {} pixel surface limit",
            nominal_width, nominal_height, scale, MAX_DEVICE_DIM
        )));
    }
    Ok(((w as u32).max(1), (h as u32).max(1)))
}

/// Half-open window of device pixels a mask may cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clip {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Clip {
    /// Exactly the pixels of a `width` x `height` device buffer.
    pub fn device(width: u32, height: u32) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: width.min(i32::MAX as u32) as i32,
            y1: height.min(i32::MAX as u32) as i32,
        }
    }

    fn grown(self, margin: i32) -> Self {
        Self {
            x0: self.x0 - margin,
            y0: self.y0 - margin,
            x1: self.x1 + margin,
            y1: self.y1 + margin,
        }
    }
}

/// Box radius for three passes approximating a Gaussian of `sigma`.
fn blur_radius(sigma: f32) -> usize {
    // Three box passes of width w have variance 3 * (w^2 - 1) / 12.
    let box_width = (4.0 * sigma * sigma + 1.0).sqrt();
    (((box_width - 1.0) / 2.0).round() as usize).max(1)
}

/// Pixels a blur of `sigma` spreads coverage outwards.
fn blur_margin(sigma: f32) -> usize {
    3 * blur_radius(sigma.min(MAX_SHADOW_SIGMA)) + 1
}

/// Zero-offset drop shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    /// Blur radius in nominal pixels. The Gaussian used has sigma = blur / 2.
    pub blur: f32,
}

impl Shadow {
    /// A zero-offset shadow only shows when it is blurred and visible.
    pub fn is_visible(&self) -> bool {
        !self.color.is_transparent() && self.blur > 0.0
    }
}

/// Per-pixel coverage over a rectangular window of device pixels.
#[derive(Debug, Clone)]
pub struct Mask {
    pub x0: i32,
    pub y0: i32,
    pub width: usize,
    pub height: usize,
    data: Vec<f32>,
}

impl Mask {
    pub fn new(x0: i32, y0: i32, width: usize, height: usize) -> Self {
        Self {
            x0,
            y0,
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Mask spanning the given device-space bounds (rounded outwards),
    /// cut down to `clip`.
    pub fn covering(x_min: f32, y_min: f32, x_max: f32, y_max: f32, clip: Clip) -> Self {
        let fit = |v: f32, lo: i32, hi: i32| -> i32 {
            if v.is_nan() {
                lo
            } else {
                v.clamp(lo as f32, hi as f32) as i32
            }
        };
        let x0 = fit(x_min.floor(), clip.x0, clip.x1);
        let y0 = fit(y_min.floor(), clip.y0, clip.y1);
        let x1 = fit(x_max.ceil(), clip.x0, clip.x1);
        let y1 = fit(y_max.ceil(), clip.y0, clip.y1);
        Self::new(x0, y0, (x1 - x0).max(0) as usize, (y1 - y0).max(0) as usize)
    }

    /// `(x0, y0, x1, y1)` of the window, half open.
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        (
            self.x0,
            self.y0,
            self.x0 + self.width as i32,
            self.y0 + self.height as i32,
        )
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let lx = x - self.x0;
        let ly = y - self.y0;
        if lx < 0 || ly < 0 || lx >= self.width as i32 || ly >= self.height as i32 {
            return None;
        }
        Some(ly as usize * self.width + lx as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> f32 {
        self.index(x, y).map(|i| self.data[i]).unwrap_or(0.0)
    }

    /// Add coverage, clamped to 1.
    pub fn accumulate(&mut self, x: i32, y: i32, coverage: f32) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = (self.data[i] + coverage).min(1.0);
        }
    }

    /// Keep the larger of the existing and new coverage.
    pub fn cover(&mut self, x: i32, y: i32, coverage: f32) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = self.data[i].max(coverage.min(1.0));
        }
    }

    /// Fill every pixel from a function of the device-space pixel center.
    pub fn fill_with(&mut self, f: impl Fn(f32, f32) -> f32) {
        for ly in 0..self.height {
            let py = (self.y0 + ly as i32) as f32 + 0.5;
            for lx in 0..self.width {
                let px = (self.x0 + lx as i32) as f32 + 0.5;
                self.data[ly * self.width + lx] = f(px, py).clamp(0.0, 1.0);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&c| c <= 0.0)
    }

    /// Gaussian-like blur (three box passes) with the given sigma in device
    /// pixels, capped at [`MAX_SHADOW_SIGMA`]. The result is grown so the
    /// blur is not clipped.
    pub fn blurred(&self, sigma: f32) -> Mask {
        if !(sigma > 0.0) {
            return self.clone();
        }

        let sigma = sigma.min(MAX_SHADOW_SIGMA);
        let radius = blur_radius(sigma);
        let margin = blur_margin(sigma);

        let mut out = Mask::new(
            self.x0 - margin as i32,
            self.y0 - margin as i32,
            self.width + 2 * margin,
            self.height + 2 * margin,
        );
        for ly in 0..self.height {
            let src = &self.data[ly * self.width..(ly + 1) * self.width];
            let start = (ly + margin) * out.width + margin;
            out.data[start..start + self.width].copy_from_slice(src);
        }

        let (w, h) = (out.width, out.height);
        let mut scratch = vec![0.0f32; w.max(h)];
        for _ in 0..3 {
            for y in 0..h {
                let row = &mut out.data[y * w..(y + 1) * w];
                box_pass(row, &mut scratch[..w], radius);
            }
            let mut column = vec![0.0f32; h];
            for x in 0..w {
                for y in 0..h {
                    column[y] = out.data[y * w + x];
                }
                box_pass(&mut column, &mut scratch[..h], radius);
                for y in 0..h {
                    out.data[y * w + x] = column[y];
                }
            }
        }
        out
    }
}

/// One running-sum box blur pass over a line of samples.
fn box_pass(line: &mut [f32], scratch: &mut [f32], radius: usize) {
    let n = line.len();
    if n == 0 {
        return;
    }
    let span = (2 * radius + 1) as f32;
    let mut sum: f32 = line[..radius.min(n - 1) + 1].iter().sum();
    for i in 0..n {
        scratch[i] = sum / span;
        let add = i + radius + 1;
        if add < n {
            sum += line[add];
        }
        if i >= radius {
            sum -= line[i - radius];
        }
    }
    line.copy_from_slice(&scratch[..n]);
}

/// Opaque RGBA drawing target with a uniform scale transform.
pub struct Surface {
    image: RgbaImage,
    scale: f32,
    nominal_width: f32,
    nominal_height: f32,
    shadow: Option<Shadow>,
}

impl Surface {
    /// Create a white surface of `nominal * scale` device pixels, each side
    /// capped at [`MAX_DEVICE_DIM`]. Use [`device_size`] to reject
    /// oversized surfaces instead.
    pub fn new(nominal_width: u32, nominal_height: u32, scale: f32) -> Self {
        let w = ((nominal_width as f32 * scale).round() as u32).clamp(1, MAX_DEVICE_DIM);
        let h = ((nominal_height as f32 * scale).round() as u32).clamp(1, MAX_DEVICE_DIM);
        Self {
            image: RgbaImage::from_pixel(w, h, Pixel([255, 255, 255, 255])),
            scale,
            nominal_width: nominal_width as f32,
            nominal_height: nominal_height as f32,
            shadow: None,
        }
    }

    /// Nominal width (before scaling).
    pub fn width(&self) -> f32 {
        self.nominal_width
    }

    /// Nominal height (before scaling).
    pub fn height(&self) -> f32 {
        self.nominal_height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn shadow(&self) -> Option<Shadow> {
        self.shadow
    }

    pub fn set_shadow(&mut self, shadow: Shadow) {
        self.shadow = Some(shadow);
    }

    /// Turn the shadow off so later primitives do not cast one.
    pub fn clear_shadow(&mut self) {
        self.shadow = None;
    }

    fn shadow_sigma(&self, shadow: Shadow) -> f32 {
        (shadow.blur / 2.0 * self.scale).min(MAX_SHADOW_SIGMA)
    }

    /// Window masks are cut to: the device pixels, grown by the blur
    /// margin while a visible shadow is set.
    pub fn clip(&self) -> Clip {
        let clip = Clip::device(self.image.width(), self.image.height());
        match self.shadow.filter(Shadow::is_visible) {
            Some(shadow) => clip.grown(blur_margin(self.shadow_sigma(shadow)) as i32),
            None => clip,
        }
    }

    /// Device-pixel color at `(x, y)`, as `[r, g, b]`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let p = self.image.get_pixel(x, y);
        [p[0], p[1], p[2]]
    }

    /// Paint the whole surface with one color.
    pub fn fill(&mut self, color: Rgba) {
        self.shade(|_, _| color);
    }

    /// Paint every pixel with a color computed from its nominal-space center.
    pub fn shade<F>(&mut self, f: F)
    where
        F: Fn(f32, f32) -> Rgba + Sync,
    {
        let width = self.image.width() as usize;
        let scale = self.scale;
        self.image
            .par_chunks_mut(width * 4)
            .enumerate()
            .for_each(|(y, row)| {
                let ny = (y as f32 + 0.5) / scale;
                for (x, px) in row.chunks_exact_mut(4).enumerate() {
                    let nx = (x as f32 + 0.5) / scale;
                    let c = f(nx, ny);
                    if c.a <= 0.0 {
                        continue;
                    }
                    let out = source_over([px[0], px[1], px[2]], [c.r, c.g, c.b], c.a);
                    px[..3].copy_from_slice(&out);
                }
            });
    }

    /// Blend `color` through a coverage mask, casting the current shadow first.
    pub fn paint_mask(&mut self, mask: &Mask, color: Rgba) {
        if let Some(shadow) = self.shadow.filter(Shadow::is_visible) {
            let blurred = mask.blurred(self.shadow_sigma(shadow));
            self.blend_mask(&blurred, shadow.color);
        }
        self.blend_mask(mask, color);
    }

    fn blend_mask(&mut self, mask: &Mask, color: Rgba) {
        if color.is_transparent() {
            return;
        }
        let (w, h) = (self.image.width() as i32, self.image.height() as i32);
        let x_start = mask.x0.max(0);
        let y_start = mask.y0.max(0);
        let x_end = (mask.x0 + mask.width as i32).min(w);
        let y_end = (mask.y0 + mask.height as i32).min(h);

        for y in y_start..y_end {
            for x in x_start..x_end {
                let coverage = mask.get(x, y);
                if coverage <= 0.0 {
                    continue;
                }
                let px = self.image.get_pixel_mut(x as u32, y as u32);
                let out = source_over([px[0], px[1], px[2]], [color.r, color.g, color.b], color.a * coverage);
                px[0] = out[0];
                px[1] = out[1];
                px[2] = out[2];
            }
        }
    }

    /// Stroke a straight segment with flat ends. Coordinates are nominal.
    pub fn stroke_segment(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Rgba) {
        if width <= 0.0 {
            return;
        }
        let s = self.scale;
        let (ax, ay, bx, by) = (x1 * s, y1 * s, x2 * s, y2 * s);
        let half = width * s / 2.0;
        let pad = half + 1.0;

        let mut mask = Mask::covering(
            ax.min(bx) - pad,
            ay.min(by) - pad,
            ax.max(bx) + pad,
            ay.max(by) + pad,
            self.clip(),
        );
        mask.fill_with(|px, py| aa_edge(dist_to_segment(px, py, ax, ay, bx, by), half, 1.0));
        self.paint_mask(&mask, color);
    }

    /// Stroke the outline of a rectangle, centered on its edges. Nominal coordinates.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Rgba) {
        if width <= 0.0 {
            return;
        }
        let s = self.scale;
        let (rx, ry, rw, rh) = (x * s, y * s, w * s, h * s);
        let half = width * s / 2.0;
        let pad = half + 1.0;

        let mut mask = Mask::covering(rx - pad, ry - pad, rx + rw + pad, ry + rh + pad, self.clip());
        mask.fill_with(|px, py| aa_edge(sd_rect(px, py, rx, ry, rw, rh).abs(), half, 1.0));
        self.paint_mask(&mask, color);
    }
}
