//! Scene walking shared by every render target.
//!
//! [`render_scene`] decides *what* is drawn and in which order; a
//! [`RenderTarget`] decides *how*. Slot designs are drawn in a fixed
//! order, each step only if its slot is present (or, for the border,
//! enabled):
//!
//! ```text
//! clear(white) → background → border → decorLine1 → decorLine2
//!              → icon → shopName → tagline → businessType
//! ```
//!
//! Element designs clear to the design's surface background and then place
//! each element in sequence order.

use crate::color::Rgba;
use crate::design::{Background, Border, CanvasElement, DesignDescription, Elements, Icon, Line, TextStyle};

use super::background;
use super::font::FontBook;
use super::primitives;
use super::surface::Surface;

/// Which text slot a [`RenderTarget::text`] call is drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextSlot {
    ShopName,
    Tagline,
    BusinessType,
}

/// A destination for one scene: pixels, a node tree, a recorder in tests.
pub trait RenderTarget {
    /// Nominal `(width, height)` of the target.
    fn size(&self) -> (f32, f32);

    fn clear(&mut self, color: Rgba);

    fn background(&mut self, background: &Background);

    fn border(&mut self, border: &Border);

    fn line(&mut self, line: &Line);

    fn icon(&mut self, icon: &Icon);

    fn text(&mut self, slot: TextSlot, style: &TextStyle);

    fn element(&mut self, element: &CanvasElement);
}

/// Draw `design` onto `target`.
pub fn render_scene<T: RenderTarget + ?Sized>(target: &mut T, design: &DesignDescription) {
    match &design.elements {
        Elements::Slots(slots) => {
            target.clear(Rgba::WHITE);

            if let Some(bg) = &slots.background {
                target.background(bg);
            }
            if let Some(border) = slots.border.as_ref().filter(|b| b.enabled) {
                target.border(border);
            }
            if let Some(line) = &slots.decor_line1 {
                target.line(line);
            }
            if let Some(line) = &slots.decor_line2 {
                target.line(line);
            }
            if let Some(icon) = &slots.icon {
                target.icon(icon);
            }
            if let Some(style) = &slots.shop_name {
                target.text(TextSlot::ShopName, style);
            }
            if let Some(style) = &slots.tagline {
                target.text(TextSlot::Tagline, style);
            }
            if let Some(style) = &slots.business_type {
                target.text(TextSlot::BusinessType, style);
            }
        }
        Elements::Nodes(nodes) => {
            target.clear(design.surface_background());
            for element in nodes {
                if element.is_text() {
                    target.element(element);
                } else {
                    tracing::debug!(id = %element.id, kind = %element.kind, "skipping non-text element");
                }
            }
        }
    }
}

/// Paints a scene onto a [`Surface`].
pub struct RasterTarget<'a> {
    surface: &'a mut Surface,
    fonts: &'a FontBook,
}

impl<'a> RasterTarget<'a> {
    pub fn new(surface: &'a mut Surface, fonts: &'a FontBook) -> Self {
        Self { surface, fonts }
    }
}

impl RenderTarget for RasterTarget<'_> {
    fn size(&self) -> (f32, f32) {
        (self.surface.width(), self.surface.height())
    }

    fn clear(&mut self, color: Rgba) {
        self.surface.fill(Rgba::WHITE);
        if color != Rgba::WHITE {
            self.surface.fill(color);
        }
    }

    fn background(&mut self, bg: &Background) {
        background::composite(self.surface, bg);
    }

    fn border(&mut self, border: &Border) {
        primitives::draw_border(self.surface, border);
    }

    fn line(&mut self, line: &Line) {
        primitives::draw_line(self.surface, line);
    }

    fn icon(&mut self, icon: &Icon) {
        primitives::draw_icon(self.surface, self.fonts, icon);
    }

    fn text(&mut self, _slot: TextSlot, style: &TextStyle) {
        primitives::draw_text(self.surface, self.fonts, style);
    }

    fn element(&mut self, element: &CanvasElement) {
        primitives::draw_element(self.surface, self.fonts, element);
    }
}

/// Render `design` into a fresh surface at `scale`.
pub fn rasterize(design: &DesignDescription, width: u32, height: u32, scale: f32, fonts: &FontBook) -> Surface {
    let mut surface = Surface::new(width, height, scale);
    render_scene(&mut RasterTarget::new(&mut surface, fonts), design);
    surface
}
