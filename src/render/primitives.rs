//! Immediate-mode draw operations for each style sub-object.
//!
//! Line placement ([`layout_text`], [`layout_element`]) is kept apart from
//! painting so the live target can reuse the exact same geometry.

use serde::Serialize;

use crate::color::{self, Rgba};
use crate::design::{Border, CanvasElement, Icon, Line, TextAlign, TextStyle};
use crate::layout::{FontSpec, LineBlock, TextMeasure, wrap};

use super::font::FontBook;
use super::surface::{Shadow, Surface};

/// One wrapped line with its resolved position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub text: String,
    /// Left edge in nominal pixels.
    pub left: f32,
    /// Vertical middle of the line's em box.
    pub y: f32,
    pub width: f32,
}

fn aligned_left(anchor_x: f32, width: f32, align: TextAlign) -> f32 {
    match align {
        TextAlign::Left => anchor_x,
        TextAlign::Center => anchor_x - width / 2.0,
        TextAlign::Right => anchor_x - width,
    }
}

fn place<M: TextMeasure + ?Sized>(
    lines: Vec<String>,
    block: LineBlock,
    anchor_x: f32,
    align: TextAlign,
    font: &FontSpec,
    measure: &M,
) -> Vec<PlacedLine> {
    lines
        .into_iter()
        .zip(block.line_ys())
        .map(|(text, y)| {
            let width = measure.measure(font, &text);
            PlacedLine {
                left: aligned_left(anchor_x, width, align),
                y,
                width,
                text,
            }
        })
        .collect()
}

/// Wrap a text slot and center the block on its anchor `y`.
pub fn layout_text<M: TextMeasure + ?Sized>(style: &TextStyle, measure: &M) -> Vec<PlacedLine> {
    let font = style.font();
    let lines = wrap(&style.text, style.wrap_width(), &font, measure);
    let block = LineBlock::centered(lines.len(), font.size, style.y);
    place(lines, block, style.x, style.align, &font, measure)
}

/// Wrap an element's content to its box and lay it from the box top.
pub fn layout_element<M: TextMeasure + ?Sized>(
    element: &CanvasElement,
    surface_w: f32,
    surface_h: f32,
    measure: &M,
) -> Vec<PlacedLine> {
    let font = element.font();
    let (left, top, width, _) = element.pixel_box(surface_w, surface_h);
    let max_width = if width > 0.0 { width } else { f32::INFINITY };
    let lines = wrap(&element.content, max_width, &font, measure);
    let block = LineBlock::from_top(lines.len(), font.size, top);

    let box_w = width.max(0.0);
    let anchor_x = match element.text_align {
        TextAlign::Left => left,
        TextAlign::Center => left + box_w / 2.0,
        TextAlign::Right => left + box_w,
    };
    place(lines, block, anchor_x, element.text_align, &font, measure)
}

fn paint_lines(surface: &mut Surface, fonts: &FontBook, font: &FontSpec, lines: &[PlacedLine], color: Rgba) {
    let face = fonts.face(font);
    for line in lines {
        let mask = face.rasterize(&line.text, font.size, line.left, line.y, surface.scale(), surface.clip());
        surface.paint_mask(&mask, color);
    }
}

/// Stroke a frame inset by half its width so it stays on the surface.
pub fn draw_border(surface: &mut Surface, border: &Border) {
    let margin = border.width;
    let color = color::parse_or(&border.color, Rgba::BLACK);
    let (w, h) = (surface.width(), surface.height());
    surface.stroke_rect(margin / 2.0, margin / 2.0, w - margin, h - margin, border.width, color);
}

pub fn draw_line(surface: &mut Surface, line: &Line) {
    let color = color::parse_or(&line.color, Rgba::BLACK);
    surface.stroke_segment(line.x1, line.y1, line.x2, line.y2, line.width, color);
}

/// Draw the icon glyph centered on `(x, y)`.
pub fn draw_icon(surface: &mut Surface, fonts: &FontBook, icon: &Icon) {
    let font = icon.font();
    let width = fonts.measure(&font, &icon.text);
    let line = PlacedLine {
        text: icon.text.clone(),
        left: icon.x - width / 2.0,
        y: icon.y,
        width,
    };
    let color = color::parse_or(&icon.color, Rgba::BLACK);
    paint_lines(surface, fonts, &font, &[line], color);
}

/// Wrap, center and paint a text slot, with its optional drop shadow.
///
/// The shadow is always cleared afterwards.
pub fn draw_text(surface: &mut Surface, fonts: &FontBook, style: &TextStyle) {
    let lines = layout_text(style, fonts);
    tracing::trace!(lines = lines.len(), text = %style.text, "drawing text");

    if style.text_shadow {
        let shadow_color = style
            .shadow_color
            .as_deref()
            .and_then(color::parse)
            .unwrap_or(Rgba::TRANSPARENT);
        surface.set_shadow(Shadow {
            color: shadow_color,
            blur: style.shadow_blur,
        });
    }

    let color = color::parse_or(&style.color, Rgba::BLACK);
    paint_lines(surface, fonts, &style.font(), &lines, color);

    surface.clear_shadow();
}

/// Paint a positioned element's text inside its box.
pub fn draw_element(surface: &mut Surface, fonts: &FontBook, element: &CanvasElement) {
    let lines = layout_element(element, surface.width(), surface.height(), fonts);
    let color = color::parse_or(&element.color, Rgba::BLACK);
    paint_lines(surface, fonts, &element.font(), &lines, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::FontWeight;
    use pretty_assertions::assert_eq;

    fn half_em(font: &FontSpec, text: &str) -> f32 {
        text.chars().count() as f32 * font.size * 0.5
    }

    fn title() -> TextStyle {
        serde_json::from_value(serde_json::json!({
            "text": "The Golden Spoon Restaurant",
            "x": 400, "y": 200, "fontSize": 48, "maxWidth": 300,
            "align": "center", "color": "#ffffff"
        }))
        .unwrap()
    }

    #[test]
    fn test_layout_text_centers_block_and_lines() {
        let lines = layout_text(&title(), &half_em);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["The Golden", "Spoon", "Restaurant"]);
        assert!((lines[1].y - 200.0).abs() < 1e-4);
        // "Spoon" = 5 chars * 24px, centered on x = 400.
        assert_eq!(lines[1].left, 400.0 - 60.0);
    }

    #[test]
    fn test_right_alignment_ends_at_anchor() {
        let mut style = title();
        style.align = TextAlign::Right;
        style.max_width = None;
        let lines = layout_text(&style, &half_em);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].left + lines[0].width, 400.0);
    }

    #[test]
    fn test_layout_element_uses_box() {
        let mut el = CanvasElement::text("t", "Fresh Bread Daily");
        el.x = 10.0;
        el.y = 20.0;
        el.width = 200.0;
        el.height = 100.0;
        el.font_size = 20.0;
        let lines = layout_element(&el, 800.0, 600.0, &half_em);
        // 10px per char: "Fresh Bread" = 110, "Fresh Bread Daily" = 170.
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].left, 80.0);
        assert!((lines[0].y - (120.0 + 12.0)).abs() < 1e-4);
        assert_eq!(el.font().weight, FontWeight::SEMIBOLD);
    }

    #[test]
    fn test_text_shadow_is_cleared() {
        let mut surface = Surface::new(200, 100, 1.0);
        let fonts = FontBook::builtin();
        let mut style = title();
        style.x = 100.0;
        style.y = 50.0;
        style.font_size = 20.0;
        style.text_shadow = true;
        style.shadow_color = Some("rgba(0,0,0,0.5)".into());
        style.shadow_blur = 10.0;
        draw_text(&mut surface, &fonts, &style);
        assert_eq!(surface.shadow(), None);
    }

    #[test]
    fn test_border_stays_inside() {
        let mut surface = Surface::new(50, 50, 1.0);
        draw_border(
            &mut surface,
            &Border {
                enabled: true,
                color: "#ff0000".into(),
                width: 8.0,
            },
        );
        assert_eq!(surface.pixel(0, 25), [255, 0, 0]);
        assert_eq!(surface.pixel(49, 25), [255, 0, 0]);
        assert_eq!(surface.pixel(25, 25), [255, 255, 255]);
    }

    #[test]
    fn test_icon_is_centered() {
        let mut surface = Surface::new(100, 100, 1.0);
        let fonts = FontBook::builtin();
        let icon = Icon {
            text: "H".into(),
            x: 50.0,
            y: 50.0,
            size: 40.0,
            color: "#000000".into(),
        };
        draw_icon(&mut surface, &fonts, &icon);
        let inked = |x0: u32, x1: u32| (x0..x1).any(|x| (30..70).any(|y| surface.pixel(x, y) != [255, 255, 255]));
        assert!(inked(30, 50));
        assert!(inked(50, 70));
        assert!(!inked(0, 25));
        assert!(!inked(75, 100));
    }
}
