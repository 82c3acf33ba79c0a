//! Style sub-objects for the drawing mode.
//!
//! Field names follow the generator's camelCase JSON (`fontSize`,
//! `maxWidth`, `textShadow`, ...). Colors stay strings so they can be
//! written back unchanged; they are resolved when painting.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::layout::FontSpec;

fn default_font_size() -> f32 {
    16.0
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

fn default_color() -> String {
    "#000000".to_string()
}

/// Two-stop directional gradient with an optional texture overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub color1: String,
    pub color2: String,
    /// Gradient direction in degrees (0 = left to right, 90 = top to bottom).
    #[serde(default)]
    pub angle: f32,
    /// Texture name. Only `diagonal_stripes` draws anything; other names
    /// are kept for round-tripping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Texture drawn over the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    DiagonalStripes,
}

impl Background {
    pub fn overlay(&self) -> Option<Overlay> {
        match self.pattern.as_deref() {
            Some("diagonal_stripes") => Some(Overlay::DiagonalStripes),
            _ => None,
        }
    }
}

/// Stroked frame around the whole surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub width: f32,
}

/// Straight decorative segment between two literal points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_line_width")]
    pub width: f32,
}

fn default_line_width() -> f32 {
    1.0
}

/// Single glyph centered on `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub text: String,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_font_size")]
    pub size: f32,
    #[serde(default = "default_color")]
    pub color: String,
}

impl Icon {
    pub fn font(&self) -> FontSpec {
        FontSpec::new("Arial", self.size, FontWeight::NORMAL)
    }
}

/// Horizontal alignment relative to the anchor `x`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    #[serde(alias = "start")]
    Left,
    Center,
    #[serde(alias = "end")]
    Right,
}

/// Numeric font weight (100..=900).
///
/// Accepts numbers, numeric strings and the keywords `normal`/`bold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const SEMIBOLD: FontWeight = FontWeight(600);
    pub const BOLD: FontWeight = FontWeight(700);

    pub fn is_bold(self) -> bool {
        self >= Self::SEMIBOLD
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::BOLD
    }
}

impl Serialize for FontWeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0)
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WeightValue {
            Number(u16),
            Text(String),
        }

        match WeightValue::deserialize(deserializer)? {
            WeightValue::Number(n) => Ok(FontWeight(n)),
            WeightValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "normal" => Ok(FontWeight::NORMAL),
                "bold" => Ok(FontWeight::BOLD),
                other => other
                    .parse::<u16>()
                    .map(FontWeight)
                    .map_err(|_| serde::de::Error::custom(format!("invalid font weight '{}'", s))),
            },
        }
    }
}

/// A wrapped, vertically centered text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub text: String,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub align: TextAlign,
    /// Wrap width. `None` never wraps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f32>,
    #[serde(default)]
    pub text_shadow: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<String>,
    #[serde(default)]
    pub shadow_blur: f32,
}

impl TextStyle {
    pub fn font(&self) -> FontSpec {
        FontSpec::new(&self.font_family, self.font_size, self.font_weight)
    }

    pub fn wrap_width(&self) -> f32 {
        self.max_width.unwrap_or(f32::INFINITY)
    }
}
