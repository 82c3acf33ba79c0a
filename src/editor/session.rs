//! The editor session: one owner for the current design and everything
//! the editing surface needs around it.
//!
//! Edits go through [`EditorSession::apply`], which mutates the single
//! design copy in place and reports whether a re-render is due. Rendering
//! is a projection of the session state ([`EditorSession::render_preview`],
//! [`EditorSession::live_scene`]).
//!
//! Generate and export are split into `begin_*` / `finish_*` halves so the
//! slow part (network call, rasterization) can run elsewhere. A second
//! `begin_*` of the same kind while one is outstanding fails with
//! [`SignboardError::Busy`]. Failures never touch the design; they are
//! queued as [`Notice`]s.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::Serialize;

use super::drag::Positioner;
use crate::color::to_hex;
use crate::config::SignboardConfig;
use crate::design::DesignDescription;
use crate::error::{Operation, SignboardError};
use crate::export::{ExportedImage, export_design, now_millis};
use crate::render::{FontBook, LiveScene, LiveTarget, Surface, rasterize, render_scene};
use crate::source::{DesignSource, GenerateRequest, SaveReceipt};

/// One user edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Palette `text` and the shop name color.
    TextColor(String),
    /// Palette `secondary` and the tagline color.
    TaglineColor(String),
    /// Palette `accent` and the icon, business type and first line colors.
    AccentColor(String),
    /// Palette `primary` and the gradient start.
    BackgroundStart(String),
    /// Palette `dark` and the gradient end.
    BackgroundEnd(String),
    TitleFontSize(f32),
    /// Surface fill for element designs.
    SurfaceBackground(String),
    Select(String),
    Deselect,
    ElementColor(String),
    ElementFontFamily(String),
    ElementFontSize(f32),
    ElementContent(String),
    ClearElementContent,
    PointerDown { id: String, x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Values shown by the editing controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    pub text_color: String,
    pub tagline_color: String,
    pub accent_color: String,
    pub background_start: String,
    pub background_end: String,
    pub surface_background: String,
    pub title_font_size: Option<f32>,
    pub element: Option<ElementControls>,
}

/// Controls for the selected element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementControls {
    pub id: String,
    pub color: String,
    pub font_family: String,
    pub font_size: f32,
}

/// Proof that an operation was begun; hand it back to the matching finish.
#[must_use]
#[derive(Debug)]
pub struct Ticket {
    operation: Operation,
}

impl Ticket {
    pub fn operation(&self) -> Operation {
        self.operation
    }
}

/// Everything an export needs, detached from the session.
#[derive(Debug)]
pub struct ExportJob {
    pub ticket: Ticket,
    pub design: DesignDescription,
    pub millis: i64,
    pub scale: f32,
    config: SignboardConfig,
}

impl ExportJob {
    pub fn render(&self, fonts: &FontBook) -> Result<ExportedImage, SignboardError> {
        export_design(&self.design, fonts, &self.config, self.scale, self.millis)
    }
}

/// Editor state for one user.
pub struct EditorSession {
    config: SignboardConfig,
    design: Option<DesignDescription>,
    selected: Option<String>,
    positioner: Positioner,
    in_flight: HashSet<Operation>,
    last_export_millis: i64,
    notices: Vec<Notice>,
}

impl EditorSession {
    pub fn new(config: SignboardConfig) -> Self {
        let positioner = Positioner::new(config.default_footprint_pct);
        Self {
            config,
            design: None,
            selected: None,
            positioner,
            in_flight: HashSet::new(),
            last_export_millis: 0,
            notices: Vec::new(),
        }
    }

    pub fn config(&self) -> &SignboardConfig {
        &self.config
    }

    pub fn design(&self) -> Option<&DesignDescription> {
        self.design.as_ref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.positioner.is_dragging()
    }

    pub fn is_busy(&self, operation: Operation) -> bool {
        self.in_flight.contains(&operation)
    }

    /// Replace the design outright (e.g. one loaded from disk). Designs
    /// that fail [`DesignDescription::validate`] leave the session as it was.
    pub fn load(&mut self, design: DesignDescription) -> Result<(), SignboardError> {
        design.validate(&self.config)?;
        self.install(design);
        Ok(())
    }

    fn install(&mut self, design: DesignDescription) {
        tracing::debug!(shop = %design.shop_name, "design replaced");
        self.positioner.cancel();
        self.selected = None;
        self.design = Some(design);
    }

    /// Drain queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Success => tracing::info!(%message, "notice"),
            NoticeLevel::Error => tracing::warn!(%message, "notice"),
        }
        self.notices.push(Notice { level, message });
    }

    /// Nominal surface size of the current design.
    pub fn viewport(&self) -> Option<(f32, f32)> {
        let (w, h) = self.design.as_ref()?.surface_size(&self.config);
        Some((w as f32, h as f32))
    }

    /// Apply one edit. Returns `true` if the design should be re-rendered.
    pub fn apply(&mut self, edit: Edit) -> bool {
        let viewport = self.viewport();
        let max_font_size = self.config.max_surface_dim as f32;
        let font_size_ok = move |size: f32| size > 0.0 && size <= max_font_size;
        let Some(design) = self.design.as_mut() else {
            return false;
        };
        tracing::trace!(?edit, "applying edit");

        match edit {
            Edit::TextColor(color) => {
                if let Some(slot) = design.slots_mut().and_then(|s| s.shop_name.as_mut()) {
                    slot.color = color.clone();
                }
                design.colors.text = color;
                true
            }
            Edit::TaglineColor(color) => {
                if let Some(slot) = design.slots_mut().and_then(|s| s.tagline.as_mut()) {
                    slot.color = color.clone();
                }
                design.colors.secondary = color;
                true
            }
            Edit::AccentColor(color) => {
                if let Some(slots) = design.slots_mut() {
                    if let Some(icon) = slots.icon.as_mut() {
                        icon.color = color.clone();
                    }
                    if let Some(text) = slots.business_type.as_mut() {
                        text.color = color.clone();
                    }
                    if let Some(line) = slots.decor_line1.as_mut() {
                        line.color = color.clone();
                    }
                }
                design.colors.accent = color;
                true
            }
            Edit::BackgroundStart(color) => {
                if let Some(bg) = design.slots_mut().and_then(|s| s.background.as_mut()) {
                    bg.color1 = color.clone();
                }
                design.colors.primary = color;
                true
            }
            Edit::BackgroundEnd(color) => {
                if let Some(bg) = design.slots_mut().and_then(|s| s.background.as_mut()) {
                    bg.color2 = color.clone();
                }
                design.colors.dark = color;
                true
            }
            Edit::TitleFontSize(size) => match design.slots_mut().and_then(|s| s.shop_name.as_mut()) {
                Some(title) if font_size_ok(size) => {
                    title.font_size = size;
                    true
                }
                _ => false,
            },
            Edit::SurfaceBackground(color) => {
                design.background_color = Some(color);
                true
            }
            Edit::Select(id) => {
                if design.node(&id).is_none() {
                    return false;
                }
                self.selected = Some(id);
                true
            }
            Edit::Deselect => self.selected.take().is_some(),
            Edit::ElementColor(color) => {
                with_selected(design, &self.selected, |el| el.color = color)
            }
            Edit::ElementFontFamily(family) => {
                with_selected(design, &self.selected, |el| el.font_family = family)
            }
            Edit::ElementFontSize(size) => {
                if !font_size_ok(size) {
                    return false;
                }
                with_selected(design, &self.selected, |el| el.font_size = size)
            }
            Edit::ElementContent(content) => {
                with_selected(design, &self.selected, |el| el.content = content)
            }
            Edit::ClearElementContent => {
                with_selected(design, &self.selected, |el| el.content.clear())
            }
            Edit::PointerDown { id, x, y } => {
                // A second press mid-drag changes nothing.
                if self.positioner.is_dragging() {
                    return false;
                }
                let (Some(element), Some(surface)) = (design.node(&id), viewport) else {
                    return false;
                };
                if !self.positioner.begin(element, (x, y), surface) {
                    tracing::debug!(%id, "selected element is not draggable");
                }
                self.selected = Some(id);
                true
            }
            Edit::PointerMove { x, y } => self.positioner.update((x, y)).is_some(),
            Edit::PointerUp => {
                let Some(commit) = self.positioner.end() else {
                    return false;
                };
                match design.node_mut(&commit.id) {
                    Some(el) => {
                        el.x = commit.x;
                        el.y = commit.y;
                        true
                    }
                    None => false,
                }
            }
            Edit::Reset => {
                self.design = None;
                self.selected = None;
                self.positioner.cancel();
                self.notify(NoticeLevel::Success, "Design reset");
                true
            }
        }
    }

    /// Control values for the current design.
    pub fn controls(&self) -> Option<Controls> {
        let design = self.design.as_ref()?;
        let slots = design.slots();
        let element = self
            .selected
            .as_deref()
            .and_then(|id| design.node(id))
            .map(|el| ElementControls {
                id: el.id.clone(),
                color: to_hex(Some(&el.color)),
                font_family: el.font_family.clone(),
                font_size: el.font_size,
            });

        Some(Controls {
            text_color: to_hex(Some(&design.colors.text)),
            tagline_color: to_hex(Some(&design.colors.secondary)),
            accent_color: to_hex(Some(&design.colors.accent)),
            background_start: to_hex(Some(&design.colors.primary)),
            background_end: to_hex(Some(&design.colors.dark)),
            surface_background: design.surface_background().hex(),
            title_font_size: slots.and_then(|s| s.shop_name.as_ref()).map(|t| t.font_size),
            element,
        })
    }

    /// The design as it should look right now, including an in-flight drag.
    fn displayed(&self) -> Option<Cow<'_, DesignDescription>> {
        let design = self.design.as_ref()?;
        match self.positioner.preview() {
            Some((id, x, y)) => {
                let mut moved = design.clone();
                if let Some(el) = moved.node_mut(id) {
                    el.x = x;
                    el.y = y;
                }
                Some(Cow::Owned(moved))
            }
            None => Some(Cow::Borrowed(design)),
        }
    }

    /// Rasterize the current state at 1x.
    pub fn render_preview(&self, fonts: &FontBook) -> Option<Surface> {
        let design = self.displayed()?;
        let (w, h) = design.surface_size(&self.config);
        Some(rasterize(&design, w, h, 1.0, fonts))
    }

    /// Editable node tree of the current state.
    pub fn live_scene(&self, fonts: &FontBook) -> Option<LiveScene> {
        let design = self.displayed()?;
        let (w, h) = design.surface_size(&self.config);
        let mut target = LiveTarget::new(w as f32, h as f32, fonts).with_selection(self.selected.as_deref());
        render_scene(&mut target, &design);
        Some(target.into_scene())
    }

    fn begin(&mut self, operation: Operation) -> Result<Ticket, SignboardError> {
        if !self.in_flight.insert(operation) {
            return Err(SignboardError::Busy(operation));
        }
        Ok(Ticket { operation })
    }

    /// Clear `expected` from the in-flight set. A ticket from another
    /// operation is logged and otherwise ignored.
    fn finish(&mut self, ticket: Ticket, expected: Operation) {
        if ticket.operation != expected {
            tracing::warn!(ticket = %ticket.operation, %expected, "ticket handed to the wrong finish");
        }
        self.in_flight.remove(&expected);
    }

    /// Validate the request and mark a generate as in flight.
    pub fn begin_generate(&mut self, request: GenerateRequest) -> Result<(Ticket, GenerateRequest), SignboardError> {
        let request = match request.validated() {
            Ok(request) => request,
            Err(e) => {
                if let SignboardError::Validation { message, .. } = &e {
                    self.notify(NoticeLevel::Error, message.clone());
                }
                return Err(e);
            }
        };
        let ticket = self.begin(Operation::Generate)?;
        tracing::debug!(shop = %request.shop_name, business = %request.business_type, "generate started");
        Ok((ticket, request))
    }

    /// Install the generated design, or keep the current one on failure.
    pub fn finish_generate(
        &mut self,
        ticket: Ticket,
        result: Result<DesignDescription, SignboardError>,
    ) -> Result<(), SignboardError> {
        self.finish(ticket, Operation::Generate);
        let result = result.and_then(|design| design.validate(&self.config).map(|_| design));
        match result {
            Ok(design) => {
                self.install(design);
                self.notify(NoticeLevel::Success, "Design generated successfully!");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "generate failed");
                self.notify(NoticeLevel::Error, "Failed to generate design");
                Err(e)
            }
        }
    }

    /// Ask `source` for a design and install it.
    pub async fn generate(&mut self, source: &dyn DesignSource, request: GenerateRequest) -> Result<(), SignboardError> {
        let (ticket, request) = self.begin_generate(request)?;
        let result = source.generate(&request).await;
        self.finish_generate(ticket, result)
    }

    /// Snapshot the design for export and mark an export as in flight.
    ///
    /// Timestamps strictly increase across exports from one session.
    pub fn begin_export(&mut self) -> Result<ExportJob, SignboardError> {
        let Some(design) = self.design.clone() else {
            self.notify(NoticeLevel::Error, "Please generate a design first");
            return Err(SignboardError::NoDesign);
        };
        let ticket = self.begin(Operation::Export)?;
        let millis = now_millis().max(self.last_export_millis + 1);
        self.last_export_millis = millis;
        Ok(ExportJob {
            ticket,
            design,
            millis,
            scale: self.config.export_scale,
            config: self.config.clone(),
        })
    }

    pub fn finish_export(
        &mut self,
        ticket: Ticket,
        result: Result<ExportedImage, SignboardError>,
    ) -> Result<ExportedImage, SignboardError> {
        self.finish(ticket, Operation::Export);
        match &result {
            Ok(_) => self.notify(NoticeLevel::Success, "Design exported successfully!"),
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.notify(NoticeLevel::Error, "Error exporting design. Please try again.");
            }
        }
        result
    }

    /// Export the current design at the configured scale.
    pub fn export(&mut self, fonts: &FontBook) -> Result<ExportedImage, SignboardError> {
        let job = self.begin_export()?;
        let result = job.render(fonts);
        self.finish_export(job.ticket, result)
    }

    /// Persist the current design through `source`.
    pub async fn save(&mut self, source: &dyn DesignSource) -> Result<SaveReceipt, SignboardError> {
        let Some(design) = self.design.as_ref() else {
            self.notify(NoticeLevel::Error, "Please generate a design first");
            return Err(SignboardError::NoDesign);
        };
        let result = source.save(design).await;
        match &result {
            Ok(_) => self.notify(NoticeLevel::Success, "Design saved successfully!"),
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.notify(NoticeLevel::Error, "Error saving design");
            }
        }
        result
    }
}

fn with_selected(
    design: &mut DesignDescription,
    selected: &Option<String>,
    f: impl FnOnce(&mut crate::design::CanvasElement),
) -> bool {
    match selected.as_deref().and_then(|id| design.node_mut(id)) {
        Some(el) => {
            f(el);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{CanvasElement, Elements, Palette};
    use pretty_assertions::assert_eq;

    fn slot_design() -> DesignDescription {
        serde_json::from_value(serde_json::json!({
            "shop_name": "The Golden Spoon",
            "business_type": "Restaurant",
            "colors": {"primary": "#C41E3A", "secondary": "#FF6B35", "accent": "#FFC300",
                       "text": "#FFFFFF", "dark": "#2C1810"},
            "elements": {
                "background": {"color1": "#C41E3A", "color2": "#2C1810", "angle": 135},
                "icon": {"text": "R", "x": 400, "y": 100, "size": 80, "color": "#FFC300"},
                "shopName": {"text": "THE GOLDEN SPOON", "x": 400, "y": 200, "fontSize": 72,
                             "color": "#FFFFFF", "align": "center", "maxWidth": 700},
                "tagline": {"text": "Taste the Difference", "x": 400, "y": 300, "fontSize": 28,
                            "color": "#FF6B35", "align": "center"},
                "businessType": {"text": "Restaurant", "x": 400, "y": 380, "fontSize": 20,
                                 "color": "#FFC300", "align": "center"},
                "decorLine1": {"x1": 100, "y1": 420, "x2": 700, "y2": 420, "color": "#FFC300", "width": 3},
                "decorLine2": {"x1": 100, "y1": 460, "x2": 700, "y2": 460, "color": "#FF6B35", "width": 2}
            }
        }))
        .unwrap()
    }

    fn node_design() -> DesignDescription {
        let mut title = CanvasElement::text("title", "Bean There");
        title.x = 10.0;
        title.y = 10.0;
        title.draggable = true;
        DesignDescription {
            shop_name: "Bean There".into(),
            business_type: "Cafe".into(),
            template_id: None,
            colors: Palette::default(),
            canvas_width: Some(800),
            canvas_height: Some(600),
            background_color: Some("#3e2723".into()),
            elements: Elements::Nodes(vec![title]),
        }
    }

    fn session_with(design: DesignDescription) -> EditorSession {
        let mut session = EditorSession::new(SignboardConfig::default());
        session.load(design).unwrap();
        session
    }

    #[test]
    fn test_edits_without_design_are_noops() {
        let mut session = EditorSession::new(SignboardConfig::default());
        assert!(!session.apply(Edit::TextColor("#000000".into())));
        assert!(!session.apply(Edit::PointerUp));
        assert!(session.controls().is_none());
        assert!(session.render_preview(&FontBook::builtin()).is_none());
    }

    #[test]
    fn test_accent_color_touches_all_accent_slots() {
        let mut session = session_with(slot_design());
        assert!(session.apply(Edit::AccentColor("#00ff00".into())));
        let design = session.design().unwrap();
        let slots = design.slots().unwrap();
        assert_eq!(design.colors.accent, "#00ff00");
        assert_eq!(slots.icon.as_ref().unwrap().color, "#00ff00");
        assert_eq!(slots.business_type.as_ref().unwrap().color, "#00ff00");
        assert_eq!(slots.decor_line1.as_ref().unwrap().color, "#00ff00");
        // Second line keeps the secondary color.
        assert_eq!(slots.decor_line2.as_ref().unwrap().color, "#FF6B35");
    }

    #[test]
    fn test_background_and_text_edits() {
        let mut session = session_with(slot_design());
        session.apply(Edit::BackgroundStart("#111111".into()));
        session.apply(Edit::BackgroundEnd("#222222".into()));
        session.apply(Edit::TextColor("#333333".into()));
        session.apply(Edit::TaglineColor("#444444".into()));
        assert!(session.apply(Edit::TitleFontSize(60.0)));
        assert!(!session.apply(Edit::TitleFontSize(-1.0)));

        let slots = session.design().unwrap().slots().unwrap().clone();
        let bg = slots.background.unwrap();
        assert_eq!((bg.color1.as_str(), bg.color2.as_str()), ("#111111", "#222222"));
        assert_eq!(slots.shop_name.as_ref().unwrap().color, "#333333");
        assert_eq!(slots.shop_name.unwrap().font_size, 60.0);
        assert_eq!(slots.tagline.unwrap().color, "#444444");
    }

    #[test]
    fn test_controls_report_hex() {
        let session = session_with(slot_design());
        let controls = session.controls().unwrap();
        assert_eq!(controls.text_color, "#ffffff");
        assert_eq!(controls.background_start, "#c41e3a");
        assert_eq!(controls.title_font_size, Some(72.0));
        assert!(controls.element.is_none());
    }

    #[test]
    fn test_element_edits_need_selection() {
        let mut session = session_with(node_design());
        assert!(!session.apply(Edit::ElementColor("#ff0000".into())));
        assert!(!session.apply(Edit::Select("missing".into())));
        assert!(session.apply(Edit::Select("title".into())));
        assert!(session.apply(Edit::ElementColor("rgb(255, 0, 0)".into())));
        assert!(session.apply(Edit::ElementFontFamily("Poppins".into())));
        assert!(session.apply(Edit::ElementFontSize(30.0)));
        assert!(session.apply(Edit::ElementContent("Bean Here".into())));

        let controls = session.controls().unwrap().element.unwrap();
        assert_eq!(controls.color, "#ff0000");
        assert_eq!(controls.font_family, "Poppins");
        assert_eq!(controls.font_size, 30.0);
        assert_eq!(session.design().unwrap().node("title").unwrap().content, "Bean Here");

        assert!(session.apply(Edit::ClearElementContent));
        assert_eq!(session.design().unwrap().node("title").unwrap().content, "");
        assert!(session.apply(Edit::Deselect));
        assert!(!session.apply(Edit::Deselect));
    }

    #[test]
    fn test_drag_is_visual_until_pointer_up() {
        let mut session = session_with(node_design());
        assert!(session.apply(Edit::PointerDown {
            id: "title".into(),
            x: 0.0,
            y: 0.0
        }));
        assert_eq!(session.selected(), Some("title"));
        assert!(session.apply(Edit::PointerMove { x: 80.0, y: 60.0 }));

        // Authoritative state is untouched mid-drag.
        assert_eq!(session.design().unwrap().node("title").unwrap().x, 10.0);
        let scene = session.live_scene(&FontBook::builtin()).unwrap();
        match scene.element("title") {
            Some(crate::render::LiveNode::Element { left, .. }) => assert_eq!(*left, 160.0),
            other => panic!("unexpected {:?}", other),
        }

        assert!(session.apply(Edit::PointerUp));
        let el = session.design().unwrap().node("title").unwrap();
        assert_eq!((el.x, el.y), (20.0, 20.0));
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_press_during_drag_is_ignored() {
        let mut design = node_design();
        let mut other = CanvasElement::text("other", "Open daily");
        other.draggable = true;
        if let Elements::Nodes(nodes) = &mut design.elements {
            nodes.push(other);
        }
        let mut session = session_with(design);

        assert!(session.apply(Edit::PointerDown { id: "title".into(), x: 0.0, y: 0.0 }));
        assert!(!session.apply(Edit::PointerDown { id: "other".into(), x: 0.0, y: 0.0 }));
        assert_eq!(session.selected(), Some("title"));

        assert!(session.apply(Edit::PointerMove { x: 80.0, y: 60.0 }));
        assert!(session.apply(Edit::PointerUp));
        let design = session.design().unwrap();
        assert_eq!(design.node("title").map(|el| (el.x, el.y)), Some((20.0, 20.0)));
        assert_eq!(design.node("other").map(|el| (el.x, el.y)), Some((0.0, 0.0)));
    }

    #[test]
    fn test_press_on_fixed_element_selects_without_drag() {
        let mut design = node_design();
        if let Elements::Nodes(nodes) = &mut design.elements {
            nodes[0].draggable = false;
        }
        let mut session = session_with(design);
        assert!(session.apply(Edit::PointerDown { id: "title".into(), x: 0.0, y: 0.0 }));
        assert_eq!(session.selected(), Some("title"));
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_font_size_edits_are_bounded() {
        let mut session = session_with(slot_design());
        assert!(!session.apply(Edit::TitleFontSize(1e9)));
        assert!(!session.apply(Edit::TitleFontSize(f32::NAN)));
        assert_eq!(session.controls().unwrap().title_font_size, Some(72.0));
    }

    #[test]
    fn test_load_rejects_invalid_design() {
        let mut session = session_with(slot_design());
        let mut big = node_design();
        big.canvas_width = Some(1_000_000);
        let err = session.load(big).unwrap_err();
        assert!(matches!(err, SignboardError::InvalidDesign(_)));
        assert_eq!(session.design().unwrap().shop_name, "The Golden Spoon");
    }

    #[test]
    fn test_generated_design_is_validated() {
        let mut session = session_with(slot_design());
        let (ticket, _) = session.begin_generate(GenerateRequest::new("Other", "Cafe")).unwrap();
        let mut big = node_design();
        big.canvas_height = Some(1_000_000);
        let err = session.finish_generate(ticket, Ok(big)).unwrap_err();
        assert!(matches!(err, SignboardError::InvalidDesign(_)));
        assert!(!session.is_busy(Operation::Generate));
        assert_eq!(session.design().unwrap().shop_name, "The Golden Spoon");
    }

    #[test]
    fn test_mismatched_ticket_clears_the_finishing_operation() {
        let mut session = session_with(node_design());
        let (generate_ticket, _) = session.begin_generate(GenerateRequest::new("Shop", "Cafe")).unwrap();
        let job = session.begin_export().unwrap();

        let _ = session.finish_generate(job.ticket, Err(SignboardError::Collaborator("down".into())));
        assert!(!session.is_busy(Operation::Generate));
        assert!(session.is_busy(Operation::Export));

        let _ = session.finish_export(generate_ticket, Err(SignboardError::Export("disk full".into())));
        assert!(!session.is_busy(Operation::Export));
    }

    #[test]
    fn test_surface_background_edit() {
        let mut session = session_with(node_design());
        assert!(session.apply(Edit::SurfaceBackground("#123456".into())));
        assert_eq!(session.controls().unwrap().surface_background, "#123456");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = session_with(node_design());
        session.apply(Edit::Select("title".into()));
        assert!(session.apply(Edit::Reset));
        assert!(session.design().is_none());
        assert!(session.selected().is_none());
        let notices = session.take_notices();
        assert_eq!(notices.last().unwrap().message, "Design reset");
    }

    #[test]
    fn test_validation_blocks_generate() {
        let mut session = EditorSession::new(SignboardConfig::default());
        let err = session.begin_generate(GenerateRequest::new("", "Cafe")).unwrap_err();
        assert!(matches!(err, SignboardError::Validation { .. }));
        assert!(!session.is_busy(Operation::Generate));
        assert_eq!(session.take_notices()[0].message, "Please enter a shop name");
    }

    #[test]
    fn test_second_generate_is_busy() {
        let mut session = EditorSession::new(SignboardConfig::default());
        let (ticket, _) = session.begin_generate(GenerateRequest::new("Shop", "Cafe")).unwrap();
        let err = session.begin_generate(GenerateRequest::new("Shop", "Cafe")).unwrap_err();
        assert!(matches!(err, SignboardError::Busy(Operation::Generate)));

        session
            .finish_generate(ticket, Err(SignboardError::Collaborator("down".into())))
            .unwrap_err();
        assert!(!session.is_busy(Operation::Generate));
        assert!(session.design().is_none());
    }

    #[test]
    fn test_failed_generate_keeps_design() {
        let mut session = session_with(slot_design());
        let (ticket, _) = session.begin_generate(GenerateRequest::new("Other", "Cafe")).unwrap();
        let _ = session.finish_generate(ticket, Err(SignboardError::Collaborator("down".into())));
        assert_eq!(session.design().unwrap().shop_name, "The Golden Spoon");
        let notices = session.take_notices();
        assert_eq!(notices.last().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_exports_get_distinct_names() {
        let mut design = node_design();
        design.canvas_width = Some(40);
        design.canvas_height = Some(30);
        let mut session = session_with(design);
        let fonts = FontBook::builtin();
        let a = session.export(&fonts).unwrap();
        let b = session.export(&fonts).unwrap();
        assert_ne!(a.filename, b.filename);
        assert_eq!((a.width, a.height), (80, 60));
        assert!(!session.is_busy(Operation::Export));
    }

    #[test]
    fn test_export_busy_and_no_design() {
        let mut empty = EditorSession::new(SignboardConfig::default());
        assert!(matches!(empty.begin_export(), Err(SignboardError::NoDesign)));

        let mut session = session_with(node_design());
        let job = session.begin_export().unwrap();
        assert!(matches!(session.begin_export(), Err(SignboardError::Busy(Operation::Export))));
        let _ = session.finish_export(job.ticket, Err(SignboardError::Export("disk full".into())));
        assert!(!session.is_busy(Operation::Export));
    }
}
