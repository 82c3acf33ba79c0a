//! # Design Description
//!
//! The structured value an external generator produces and the editor
//! mutates: shop name, business type, a named palette and the elements to
//! draw.
//!
//! Elements come in two shapes, distinguished by their JSON form:
//!
//! - an object of fixed slots ([`SlotElements`]) drawn at absolute pixel
//!   coordinates, used by the drawing mode;
//! - an array of [`CanvasElement`]s positioned in percentage space, used
//!   by the editable mode.
//!
//! ```
//! use signboard::design::{DesignDescription, Elements};
//!
//! let json = r#"{
//!     "shop_name": "Bean There",
//!     "business_type": "Cafe",
//!     "colors": {"text": "#ffffff", "secondary": "#a0826d",
//!                "accent": "#ffd700", "primary": "#6f4e37", "dark": "#3e2723"},
//!     "elements": []
//! }"#;
//! let design: DesignDescription = serde_json::from_str(json).unwrap();
//! assert!(matches!(design.elements, Elements::Nodes(_)));
//! ```

mod element;
mod types;

pub use element::{CanvasElement, positional_id};
pub use types::{Background, Border, FontWeight, Icon, Line, Overlay, TextAlign, TextStyle};

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use crate::color::{self, Rgba};
use crate::config::SignboardConfig;
use crate::error::SignboardError;

/// Named palette. Values are color strings, canonically `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default = "white")]
    pub text: String,
    #[serde(default = "white")]
    pub secondary: String,
    #[serde(default = "white")]
    pub accent: String,
    #[serde(default = "black")]
    pub primary: String,
    #[serde(default = "black")]
    pub dark: String,
}

fn white() -> String {
    "#ffffff".to_string()
}

fn black() -> String {
    "#000000".to_string()
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: white(),
            secondary: white(),
            accent: white(),
            primary: black(),
            dark: black(),
        }
    }
}

/// Fixed-slot elements for the drawing mode. Every slot is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotElements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decor_line1: Option<Line>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decor_line2: Option<Line>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<TextStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<TextStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<TextStyle>,
}

/// The two element layouts a design can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Elements {
    /// Ordered, freely positioned elements (editable mode).
    ///
    /// Listed first: a struct would also accept a JSON array.
    Nodes(#[serde(deserialize_with = "nodes_with_ids")] Vec<CanvasElement>),
    /// Absolute-coordinate slots (drawing mode).
    Slots(SlotElements),
}

fn nodes_with_ids<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<CanvasElement>, D::Error> {
    let mut nodes = Vec::<CanvasElement>::deserialize(deserializer)?;
    for (i, node) in nodes.iter_mut().enumerate() {
        if node.id.trim().is_empty() {
            node.id = positional_id(i);
        }
    }
    Ok(nodes)
}

impl Default for Elements {
    fn default() -> Self {
        Elements::Slots(SlotElements::default())
    }
}

/// One signboard: content, palette and layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDescription {
    #[serde(alias = "shopName")]
    pub shop_name: String,

    #[serde(default, alias = "businessType")]
    pub business_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,

    #[serde(default)]
    pub colors: Palette,

    /// Nominal surface width in pixels.
    #[serde(
        default,
        rename = "canvasWidth",
        alias = "canvas_width",
        skip_serializing_if = "Option::is_none"
    )]
    pub canvas_width: Option<u32>,

    /// Nominal surface height in pixels.
    #[serde(
        default,
        rename = "canvasHeight",
        alias = "canvas_height",
        skip_serializing_if = "Option::is_none"
    )]
    pub canvas_height: Option<u32>,

    /// Surface fill for the editable mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default)]
    pub elements: Elements,
}

impl DesignDescription {
    /// Nominal surface size, falling back to the configured default.
    pub fn surface_size(&self, config: &SignboardConfig) -> (u32, u32) {
        (
            self.canvas_width.filter(|w| *w > 0).unwrap_or(config.surface_width),
            self.canvas_height.filter(|h| *h > 0).unwrap_or(config.surface_height),
        )
    }

    /// Check the design is one the renderer accepts and return its
    /// nominal surface size.
    ///
    /// Rejects surfaces or font sizes above `config.max_surface_dim` and
    /// element lists where two elements share an id.
    pub fn validate(&self, config: &SignboardConfig) -> Result<(u32, u32), SignboardError> {
        let (w, h) = self.surface_size(config);
        let limit = config.max_surface_dim;
        if w > limit || h > limit {
            return Err(SignboardError::InvalidDesign(format!(
                "surface {}x{} exceeds the {} pixel limit",
                w, h, limit
            )));
        }

        let sizes: Vec<f32> = match &self.elements {
            Elements::Nodes(nodes) => nodes.iter().map(|el| el.font_size).collect(),
            Elements::Slots(slots) => [&slots.shop_name, &slots.tagline, &slots.business_type]
                .into_iter()
                .flatten()
                .map(|style| style.font_size)
                .chain(slots.icon.as_ref().map(|icon| icon.size))
                .collect(),
        };
        if let Some(size) = sizes.into_iter().find(|size| !(*size <= limit as f32)) {
            return Err(SignboardError::InvalidDesign(format!(
                "font size {} exceeds the {} pixel limit",
                size, limit
            )));
        }

        if let Some(nodes) = self.nodes() {
            let mut seen = HashSet::new();
            if let Some(dup) = nodes.iter().find(|el| !seen.insert(el.id.as_str())) {
                return Err(SignboardError::InvalidDesign(format!("duplicate element id '{}'", dup.id)));
            }
        }
        Ok((w, h))
    }

    /// Fill color of the surface in the editable mode.
    ///
    /// Uses `background_color`, then the palette's primary color.
    pub fn surface_background(&self) -> Rgba {
        self.background_color
            .as_deref()
            .and_then(color::parse)
            .or_else(|| color::parse(&self.colors.primary))
            .unwrap_or(Rgba::WHITE)
    }

    pub fn slots(&self) -> Option<&SlotElements> {
        match &self.elements {
            Elements::Slots(slots) => Some(slots),
            Elements::Nodes(_) => None,
        }
    }

    pub fn slots_mut(&mut self) -> Option<&mut SlotElements> {
        match &mut self.elements {
            Elements::Slots(slots) => Some(slots),
            Elements::Nodes(_) => None,
        }
    }

    pub fn nodes(&self) -> Option<&[CanvasElement]> {
        match &self.elements {
            Elements::Nodes(nodes) => Some(nodes),
            Elements::Slots(_) => None,
        }
    }

    pub fn node(&self, id: &str) -> Option<&CanvasElement> {
        self.nodes()?.iter().find(|el| el.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut CanvasElement> {
        match &mut self.elements {
            Elements::Nodes(nodes) => nodes.iter_mut().find(|el| el.id == id),
            Elements::Slots(_) => None,
        }
    }
}
