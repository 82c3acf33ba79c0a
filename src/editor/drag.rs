//! Percentage-space drag positioning.
//!
//! ```text
//! Idle ──pointer down on a draggable element──▶ Dragging
//! Dragging ──pointer move──▶ Dragging   (visual position only)
//! Dragging ──pointer up──▶ Idle         (position committed)
//! ```
//!
//! Each axis moves by `pointer_delta / surface_dimension * 100` and is
//! clamped to `0..=100 - footprint`, where the footprint is the element's
//! own size as a percentage of the surface. Elements without a size use
//! the configured default footprint.

use crate::design::CanvasElement;

/// Position committed on pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub struct DragCommit {
    pub id: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
struct Drag {
    id: String,
    pointer_start: (f32, f32),
    element_start: (f32, f32),
    surface: (f32, f32),
    max: (f32, f32),
    current: (f32, f32),
}

#[derive(Debug, Clone, Default, PartialEq)]
enum DragState {
    #[default]
    Idle,
    Dragging(Drag),
}

/// Footprint of `element` in percent of the surface, per axis.
pub fn footprint_pct(element: &CanvasElement, surface: (f32, f32), default_pct: f32) -> (f32, f32) {
    let axis = |size: f32, dim: f32| {
        if size > 0.0 && dim > 0.0 {
            (size / dim * 100.0).min(100.0)
        } else {
            default_pct
        }
    };
    (axis(element.width, surface.0), axis(element.height, surface.1))
}

/// `start + delta%` clamped to `0..=max`.
fn clamp_axis(start: f32, delta_px: f32, dim: f32, max: f32) -> f32 {
    let delta_pct = if dim > 0.0 { delta_px / dim * 100.0 } else { 0.0 };
    (start + delta_pct).min(max).max(0.0)
}

/// One-at-a-time drag state machine.
#[derive(Debug, Clone)]
pub struct Positioner {
    state: DragState,
    default_footprint_pct: f32,
}

impl Positioner {
    pub fn new(default_footprint_pct: f32) -> Self {
        Self {
            state: DragState::Idle,
            default_footprint_pct,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Start dragging `element` from pointer position `pointer`.
    ///
    /// Returns `false` (and stays idle) for non-draggable elements or while
    /// another drag is active.
    pub fn begin(&mut self, element: &CanvasElement, pointer: (f32, f32), surface: (f32, f32)) -> bool {
        if !element.draggable || self.is_dragging() {
            return false;
        }
        let footprint = footprint_pct(element, surface, self.default_footprint_pct);
        let max = ((100.0 - footprint.0).max(0.0), (100.0 - footprint.1).max(0.0));
        // A press without a move still commits a position inside the range.
        let current = (
            clamp_axis(element.x, 0.0, surface.0, max.0),
            clamp_axis(element.y, 0.0, surface.1, max.1),
        );
        self.state = DragState::Dragging(Drag {
            id: element.id.clone(),
            pointer_start: pointer,
            element_start: (element.x, element.y),
            surface,
            max,
            current,
        });
        tracing::debug!(id = %element.id, x = element.x, y = element.y, "drag started");
        true
    }

    /// Track the pointer. Returns the element's new visual position.
    pub fn update(&mut self, pointer: (f32, f32)) -> Option<(f32, f32)> {
        let DragState::Dragging(drag) = &mut self.state else {
            return None;
        };
        drag.current = (
            clamp_axis(
                drag.element_start.0,
                pointer.0 - drag.pointer_start.0,
                drag.surface.0,
                drag.max.0,
            ),
            clamp_axis(
                drag.element_start.1,
                pointer.1 - drag.pointer_start.1,
                drag.surface.1,
                drag.max.1,
            ),
        );
        Some(drag.current)
    }

    /// The dragged element and its in-flight position.
    pub fn preview(&self) -> Option<(&str, f32, f32)> {
        match &self.state {
            DragState::Dragging(drag) => Some((drag.id.as_str(), drag.current.0, drag.current.1)),
            DragState::Idle => None,
        }
    }

    /// Finish the drag and hand back the position to commit.
    pub fn end(&mut self) -> Option<DragCommit> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(drag) => {
                tracing::debug!(id = %drag.id, x = drag.current.0, y = drag.current.1, "drag committed");
                Some(DragCommit {
                    id: drag.id,
                    x: drag.current.0,
                    y: drag.current.1,
                })
            }
            DragState::Idle => None,
        }
    }

    /// Drop any active drag without committing.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
