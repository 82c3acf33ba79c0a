//! Editable node tree for DOM-style front ends.
//!
//! [`LiveTarget`] walks the same scene as the raster target but records
//! resolved geometry instead of pixels: wrapped lines with their positions,
//! element boxes, the gradient axis. The resulting [`LiveScene`] serializes
//! to JSON for `/api/layout`.

use serde::Serialize;

use crate::color::Rgba;
use crate::design::{Background, Border, CanvasElement, Icon, Line, TextAlign, TextStyle};
use crate::layout::TextMeasure;

use super::background::{GradientAxis, gradient_axis};
use super::primitives::{PlacedLine, layout_element, layout_text};
use super::scene::{RenderTarget, TextSlot};

/// Font as a front end would set it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveFont {
    pub family: String,
    pub size: f32,
    pub weight: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LiveNode {
    Background {
        color1: String,
        color2: String,
        angle: f32,
        axis: GradientAxis,
        stripes: bool,
    },
    #[serde(rename_all = "camelCase")]
    Border {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        stroke_width: f32,
        color: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: String,
    },
    Icon {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: String,
    },
    Text {
        slot: TextSlot,
        font: LiveFont,
        color: String,
        align: TextAlign,
        lines: Vec<PlacedLine>,
        #[serde(skip_serializing_if = "Option::is_none")]
        shadow: Option<LiveShadow>,
    },
    Element {
        id: String,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        font: LiveFont,
        color: String,
        align: TextAlign,
        lines: Vec<PlacedLine>,
        editable: bool,
        selected: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveShadow {
    pub color: String,
    pub blur: f32,
}

/// A fully resolved scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveScene {
    pub width: f32,
    pub height: f32,
    /// Surface color after clearing, as `#rrggbb`.
    pub background: String,
    pub nodes: Vec<LiveNode>,
}

impl LiveScene {
    pub fn element(&self, id: &str) -> Option<&LiveNode> {
        self.nodes
            .iter()
            .find(|n| matches!(n, LiveNode::Element { id: node_id, .. } if node_id == id))
    }
}

/// Records a [`LiveScene`].
pub struct LiveTarget<'a, M: TextMeasure + ?Sized> {
    measure: &'a M,
    selected: Option<String>,
    scene: LiveScene,
}

impl<'a, M: TextMeasure + ?Sized> LiveTarget<'a, M> {
    pub fn new(width: f32, height: f32, measure: &'a M) -> Self {
        Self {
            measure,
            selected: None,
            scene: LiveScene {
                width,
                height,
                background: Rgba::WHITE.hex(),
                nodes: Vec::new(),
            },
        }
    }

    /// Mark the element with this id as selected.
    pub fn with_selection(mut self, selected: Option<&str>) -> Self {
        self.selected = selected.map(str::to_string);
        self
    }

    pub fn into_scene(self) -> LiveScene {
        self.scene
    }
}

fn live_font(family: &str, size: f32, weight: u16) -> LiveFont {
    LiveFont {
        family: family.to_string(),
        size,
        weight,
    }
}

impl<M: TextMeasure + ?Sized> RenderTarget for LiveTarget<'_, M> {
    fn size(&self) -> (f32, f32) {
        (self.scene.width, self.scene.height)
    }

    fn clear(&mut self, color: Rgba) {
        self.scene.nodes.clear();
        self.scene.background = color.hex();
    }

    fn background(&mut self, bg: &Background) {
        self.scene.nodes.push(LiveNode::Background {
            color1: bg.color1.clone(),
            color2: bg.color2.clone(),
            angle: bg.angle,
            axis: gradient_axis(self.scene.width, self.scene.height, bg.angle),
            stripes: bg.overlay().is_some(),
        });
    }

    fn border(&mut self, border: &Border) {
        let m = border.width;
        self.scene.nodes.push(LiveNode::Border {
            x: m / 2.0,
            y: m / 2.0,
            width: self.scene.width - m,
            height: self.scene.height - m,
            stroke_width: m,
            color: border.color.clone(),
        });
    }

    fn line(&mut self, line: &Line) {
        self.scene.nodes.push(LiveNode::Line {
            x1: line.x1,
            y1: line.y1,
            x2: line.x2,
            y2: line.y2,
            width: line.width,
            color: line.color.clone(),
        });
    }

    fn icon(&mut self, icon: &Icon) {
        self.scene.nodes.push(LiveNode::Icon {
            text: icon.text.clone(),
            x: icon.x,
            y: icon.y,
            size: icon.size,
            color: icon.color.clone(),
        });
    }

    fn text(&mut self, slot: TextSlot, style: &TextStyle) {
        let shadow = style.text_shadow.then(|| LiveShadow {
            color: style.shadow_color.clone().unwrap_or_else(|| "transparent".to_string()),
            blur: style.shadow_blur,
        });
        self.scene.nodes.push(LiveNode::Text {
            slot,
            font: live_font(&style.font_family, style.font_size, style.font_weight.0),
            color: style.color.clone(),
            align: style.align,
            lines: layout_text(style, self.measure),
            shadow,
        });
    }

    fn element(&mut self, element: &CanvasElement) {
        let (left, top, width, height) = element.pixel_box(self.scene.width, self.scene.height);
        let font = element.font();
        self.scene.nodes.push(LiveNode::Element {
            id: element.id.clone(),
            left,
            top,
            width,
            height,
            font: live_font(&font.family, font.size, font.weight.0),
            color: element.color.clone(),
            align: element.text_align,
            lines: layout_element(element, self.scene.width, self.scene.height, self.measure),
            editable: element.draggable,
            selected: self.selected.as_deref() == Some(element.id.as_str()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::DesignDescription;
    use crate::layout::FontSpec;
    use crate::render::render_scene;

    fn half_em(font: &FontSpec, text: &str) -> f32 {
        text.chars().count() as f32 * font.size * 0.5
    }

    #[test]
    fn test_element_nodes_carry_box_and_flags() {
        let design: DesignDescription = serde_json::from_value(serde_json::json!({
            "shop_name": "Bean There",
            "background_color": "#3e2723",
            "elements": [
                {"id": "title", "x": 25, "y": 10, "width": 400, "height": 80,
                 "content": "Bean There", "fontSize": 40, "draggable": true},
                {"id": "footer", "x": 0, "y": 90, "width": 800, "height": 40,
                 "content": "Since 1999", "fontSize": 20}
            ]
        }))
        .unwrap();

        let mut target = LiveTarget::new(800.0, 600.0, &half_em).with_selection(Some("title"));
        render_scene(&mut target, &design);
        let scene = target.into_scene();

        assert_eq!(scene.background, "#3e2723");
        assert_eq!(scene.nodes.len(), 2);
        match scene.element("title") {
            Some(LiveNode::Element {
                left,
                top,
                editable,
                selected,
                lines,
                font,
                ..
            }) => {
                assert_eq!((*left, *top), (200.0, 60.0));
                assert!(*editable);
                assert!(*selected);
                assert_eq!(lines.len(), 1);
                assert_eq!(font.weight, 600);
            }
            other => panic!("unexpected node {:?}", other),
        }
        assert!(matches!(
            scene.element("footer"),
            Some(LiveNode::Element {
                editable: false,
                selected: false,
                ..
            })
        ));
    }

    #[test]
    fn test_serializes_with_kind_tags() {
        let mut target = LiveTarget::new(100.0, 50.0, &half_em);
        target.border(&Border {
            enabled: true,
            color: "#ffc300".into(),
            width: 8.0,
        });
        let json = serde_json::to_value(target.into_scene()).unwrap();
        assert_eq!(json["nodes"][0]["kind"], "border");
        assert_eq!(json["nodes"][0]["strokeWidth"], 8.0);
        assert_eq!(json["nodes"][0]["width"], 92.0);
    }
}
