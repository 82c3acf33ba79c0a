//! Freely positioned elements for the editable mode.

use serde::{Deserialize, Serialize};

use super::types::{FontWeight, TextAlign};
use crate::layout::FontSpec;

/// Id for an element that arrived without one: its 1-based position in
/// the element list, so the same JSON always yields the same ids.
pub fn positional_id(index: usize) -> String {
    format!("element-{}", index + 1)
}

fn default_kind() -> String {
    "text".to_string()
}

fn default_font_size() -> f32 {
    24.0
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

fn default_color() -> String {
    "#000000".to_string()
}

/// One movable, editable text block.
///
/// `x`/`y` are percentages of the surface width/height; `width`/`height`
/// are pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasElement {
    /// Empty until the owning element list assigns a [`positional_id`].
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_font_size", alias = "font_size")]
    pub font_size: f32,
    #[serde(default = "default_font_family", alias = "font_family")]
    pub font_family: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, alias = "text_align")]
    pub text_align: TextAlign,
    #[serde(default)]
    pub draggable: bool,
}

impl CanvasElement {
    /// Build a text element with the given id and content.
    pub fn text(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: default_kind(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            content: content.into(),
            font_size: default_font_size(),
            font_family: default_font_family(),
            color: default_color(),
            text_align: TextAlign::default(),
            draggable: false,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == "text"
    }

    /// Element text is always painted semi-bold.
    pub fn font(&self) -> FontSpec {
        FontSpec::new(&self.font_family, self.font_size, FontWeight::SEMIBOLD)
    }

    /// Pixel box on a surface of the given nominal size: `(left, top, w, h)`.
    pub fn pixel_box(&self, surface_w: f32, surface_h: f32) -> (f32, f32, f32, f32) {
        (
            self.x / 100.0 * surface_w,
            self.y / 100.0 * surface_h,
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_fields_accepted() {
        let el: CanvasElement = serde_json::from_str(
            r#"{"id": "title", "type": "text", "x": 10, "y": 20, "width": 300, "height": 80,
                "content": "Hello", "font_size": 48, "font_family": "Poppins",
                "color": "#ffffff", "text_align": "center", "draggable": true}"#,
        )
        .unwrap();
        assert_eq!(el.font_size, 48.0);
        assert_eq!(el.font_family, "Poppins");
        assert_eq!(el.text_align, TextAlign::Center);
        assert!(el.draggable);
    }

    #[test]
    fn test_missing_id_defaults_empty() {
        let a: CanvasElement = serde_json::from_str(r#"{"content": "a"}"#).unwrap();
        assert_eq!(a.id, "");
        assert!(a.is_text());
        assert_eq!(positional_id(0), "element-1");
    }

    #[test]
    fn test_pixel_box() {
        let mut el = CanvasElement::text("t", "x");
        el.x = 25.0;
        el.y = 50.0;
        el.width = 100.0;
        el.height = 40.0;
        assert_eq!(el.pixel_box(800.0, 600.0), (200.0, 300.0, 100.0, 40.0));
    }
}
