//! Font faces for measuring and painting text.
//!
//! Two kinds of face are available:
//!
//! - **Outline** faces: TTF/OTF files loaded with `ab_glyph`, looked up by
//!   family name. A directory of `<Family>-Regular.ttf` /
//!   `<Family>-Bold.ttf` files can be loaded with [`FontBook::load_dir`].
//! - The built-in **bitmap** face (Spleen 12x24), used for every family
//!   without an outline. Each character advances by half the font size;
//!   bold weights are drawn with a double strike.
//!
//! Text is positioned by its left edge and the vertical middle of the em
//! box, which is what `textBaseline = middle` means for the layout rules.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use spleen_font::{FONT_12X24, PSF2Font};

use super::surface::{Clip, Mask};
use crate::error::SignboardError;
use crate::layout::{FontSpec, TextMeasure};

const CELL_W: usize = 12;
const CELL_H: usize = 24;

/// Bitmap advance as a fraction of the font size.
pub const BITMAP_ADVANCE: f32 = 0.5;

/// Normalize a CSS-like family list to a lookup key: first family,
/// unquoted, lower case, without spaces or dashes.
fn family_key(family: &str) -> String {
    let first = family.split(',').next().unwrap_or("");
    first
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lazily decoded Spleen glyph bitmaps, `CELL_W * CELL_H` cells each.
#[derive(Default)]
pub struct BitmapGlyphs {
    cache: Mutex<HashMap<char, Arc<[bool]>>>,
}

impl BitmapGlyphs {
    fn glyph(&self, ch: char) -> Arc<[bool]> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.entry(ch).or_insert_with(|| decode_glyph(ch)).clone()
    }
}

fn decode_glyph(ch: char) -> Arc<[bool]> {
    let mut cells = vec![false; CELL_W * CELL_H];
    let mut utf8 = [0u8; 4];
    let bytes = ch.encode_utf8(&mut utf8).as_bytes();

    let found = PSF2Font::new(FONT_12X24).ok().and_then(|mut font| {
        let glyph = font.glyph_for_utf8(bytes)?;
        for (row_y, row) in glyph.enumerate() {
            for (col_x, on) in row.enumerate() {
                if row_y < CELL_H && col_x < CELL_W {
                    cells[row_y * CELL_W + col_x] = on;
                }
            }
        }
        Some(())
    });

    if found.is_none() && !ch.is_whitespace() {
        draw_box(&mut cells);
    }
    cells.into()
}

/// Hollow box for characters the bitmap face lacks.
fn draw_box(cells: &mut [bool]) {
    let (left, right, top, bottom) = (1, CELL_W - 2, 4, CELL_H - 3);
    for y in top..=bottom {
        for x in left..=right {
            if x == left || x == right || y == top || y == bottom {
                cells[y * CELL_W + x] = true;
            }
        }
    }
}

/// A resolved face for one `FontSpec`.
pub enum Face<'a> {
    Outline { font: &'a FontArc, synthetic_bold: bool },
    Bitmap { glyphs: &'a BitmapGlyphs, bold: bool },
}

impl Face<'_> {
    /// Width of `text` at `size` nominal pixels.
    pub fn advance(&self, size: f32, text: &str) -> f32 {
        match self {
            Face::Outline { font, .. } => {
                let scaled = font.as_scaled(em_scale(font, size));
                let mut width = 0.0;
                let mut prev = None;
                for ch in text.chars() {
                    let id = font.glyph_id(ch);
                    if let Some(p) = prev {
                        width += scaled.kern(p, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                width
            }
            Face::Bitmap { .. } => text.chars().count() as f32 * size * BITMAP_ADVANCE,
        }
    }

    /// Rasterize one line into a device-space coverage mask cut to `clip`.
    /// `left` and `middle_y` are nominal; `scale` maps them to device pixels.
    pub fn rasterize(&self, text: &str, size: f32, left: f32, middle_y: f32, scale: f32, clip: Clip) -> Mask {
        let width = self.advance(size, text);
        let pad = size * 0.5;
        let mut mask = Mask::covering(
            (left - pad) * scale,
            (middle_y - size) * scale,
            (left + width + pad) * scale,
            (middle_y + size) * scale,
            clip,
        );
        if mask.width == 0 || mask.height == 0 {
            return mask;
        }

        match self {
            Face::Outline { font, synthetic_bold } => {
                draw_outline(font, text, size * scale, left * scale, middle_y * scale, &mut mask);
                if *synthetic_bold {
                    let offset = (size * scale / 24.0).max(1.0);
                    draw_outline(font, text, size * scale, left * scale + offset, middle_y * scale, &mut mask);
                }
            }
            Face::Bitmap { glyphs, bold } => {
                draw_bitmap(glyphs, *bold, text, size, left, middle_y, scale, &mut mask);
            }
        }
        mask
    }
}

/// `PxScale` for a CSS em size (ab_glyph scales by ascent - descent).
fn em_scale(font: &FontArc, size: f32) -> PxScale {
    let height = font.height_unscaled();
    let upem = font.units_per_em().unwrap_or(height);
    PxScale::from(size * height / upem)
}

fn draw_outline(font: &FontArc, text: &str, size: f32, left: f32, middle_y: f32, mask: &mut Mask) {
    let px_scale = em_scale(font, size);
    let scaled = font.as_scaled(px_scale);
    let baseline = middle_y + (scaled.ascent() + scaled.descent()) / 2.0;

    let mut caret = left;
    let mut prev = None;
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(p) = prev {
            caret += scaled.kern(p, id);
        }
        let glyph = id.with_scale_and_position(px_scale, ab_glyph::point(caret, baseline));
        caret += scaled.h_advance(id);
        prev = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let (x0, y0, x1, y1) = mask.bounds();
            if bounds.max.x < x0 as f32 || bounds.min.x > x1 as f32 || bounds.max.y < y0 as f32 || bounds.min.y > y1 as f32 {
                continue;
            }
            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;
                mask.accumulate(x, y, coverage);
            });
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_bitmap(
    glyphs: &BitmapGlyphs,
    bold: bool,
    text: &str,
    size: f32,
    left: f32,
    middle_y: f32,
    scale: f32,
    mask: &mut Mask,
) {
    let cell_w = size * BITMAP_ADVANCE;
    let top = middle_y - size / 2.0;
    let sub = [0.25, 0.75];
    let (mx0, my0, mx1, my1) = mask.bounds();

    for (i, ch) in text.chars().enumerate() {
        let cell_left = left + i as f32 * cell_w;
        if cell_left * scale >= mx1 as f32 {
            break;
        }

        let x0 = ((cell_left * scale).floor() as i32).max(mx0);
        let x1 = (((cell_left + cell_w) * scale).ceil() as i32).saturating_add(1).min(mx1);
        let y0 = ((top * scale).floor() as i32).max(my0);
        let y1 = (((top + size) * scale).ceil() as i32).min(my1);
        if x1 <= x0 || y1 <= y0 {
            continue;
        }

        let cells = glyphs.glyph(ch);
        let lit = |gx: i32, gy: i32| {
            gx >= 0
                && gy >= 0
                && (gx as usize) < CELL_W
                && (gy as usize) < CELL_H
                && cells[gy as usize * CELL_W + gx as usize]
        };

        for dy in y0..y1 {
            for dx in x0..x1 {
                let mut hits = 0;
                for sy in sub {
                    for sx in sub {
                        let nx = (dx as f32 + sx) / scale;
                        let ny = (dy as f32 + sy) / scale;
                        let gx = ((nx - cell_left) / cell_w * CELL_W as f32).floor() as i32;
                        let gy = ((ny - top) / size * CELL_H as f32).floor() as i32;
                        if lit(gx, gy) || (bold && lit(gx - 1, gy)) {
                            hits += 1;
                        }
                    }
                }
                if hits > 0 {
                    mask.cover(dx, dy, hits as f32 / 4.0);
                }
            }
        }
    }
}

/// Loaded faces keyed by family, with the bitmap face as fallback.
#[derive(Default)]
pub struct FontBook {
    outlines: HashMap<(String, bool), FontArc>,
    bitmap: BitmapGlyphs,
}

impl FontBook {
    /// A book with only the built-in bitmap face.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Load every `<Family>-Regular` / `<Family>-Bold` TTF or OTF in `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, SignboardError> {
        let mut book = Self::builtin();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);
            if !matches!(ext.as_deref(), Some("ttf") | Some("otf")) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let (family, bold) = match stem.rsplit_once('-') {
                Some((family, style)) if style.eq_ignore_ascii_case("bold") => (family, true),
                Some((family, style)) if style.eq_ignore_ascii_case("regular") => (family, false),
                Some(_) => {
                    tracing::debug!(file = %path.display(), "skipping font style");
                    continue;
                }
                None => (stem, false),
            };
            let bytes = std::fs::read(&path)?;
            book.add_face(family, bold, bytes)?;
            tracing::debug!(family, bold, file = %path.display(), "loaded font face");
        }
        tracing::info!(faces = book.outlines.len(), dir = %dir.display(), "font directory loaded");
        Ok(book)
    }

    /// Register an outline face for `family`.
    pub fn add_face(&mut self, family: &str, bold: bool, bytes: Vec<u8>) -> Result<(), SignboardError> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| SignboardError::Font(format!("{}: {}", family, e)))?;
        self.outlines.insert((family_key(family), bold), font);
        Ok(())
    }

    pub fn has_outline(&self, family: &str) -> bool {
        let key = family_key(family);
        self.outlines.contains_key(&(key.clone(), false)) || self.outlines.contains_key(&(key, true))
    }

    /// Resolve a face. Bold weights prefer the bold file and fall back to a
    /// double-struck regular one.
    pub fn face(&self, spec: &FontSpec) -> Face<'_> {
        let key = family_key(&spec.family);
        let bold = spec.weight.is_bold();

        if let Some(font) = self.outlines.get(&(key.clone(), bold)) {
            return Face::Outline {
                font,
                synthetic_bold: false,
            };
        }
        if let Some(font) = self.outlines.get(&(key, false)) {
            return Face::Outline {
                font,
                synthetic_bold: bold,
            };
        }
        Face::Bitmap {
            glyphs: &self.bitmap,
            bold,
        }
    }
}

impl TextMeasure for FontBook {
    fn measure(&self, font: &FontSpec, text: &str) -> f32 {
        self.face(font).advance(font.size, text)
    }
}
