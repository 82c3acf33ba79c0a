//! # Session Tests
//!
//! Drives an [`EditorSession`] the way a front end would: generate through
//! a design source, edit, drag, export and save.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::sync::Mutex;

use signboard::design::DesignDescription;
use signboard::editor::{Edit, NoticeLevel};
use signboard::error::Operation;
use signboard::render::FontBook;
use signboard::source::{DesignSource, GenerateRequest, SaveReceipt, TemplateInfo, decode_design_envelope};
use signboard::{EditorSession, SignboardConfig, SignboardError};

/// In-memory design source. Answers generate with a fixed envelope, or
/// fails when `fail` is set.
struct FakeSource {
    fail: bool,
    requests: Mutex<Vec<GenerateRequest>>,
    saved: Mutex<Vec<String>>,
}

impl FakeSource {
    fn new() -> Self {
        Self {
            fail: false,
            requests: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl DesignSource for FakeSource {
    async fn templates(&self) -> Result<BTreeMap<String, TemplateInfo>, SignboardError> {
        Ok(BTreeMap::new())
    }

    async fn business_types(&self) -> Result<Vec<String>, SignboardError> {
        Ok(vec!["Cafe".into(), "Restaurant".into()])
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<DesignDescription, SignboardError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(SignboardError::Collaborator("service unavailable".into()));
        }
        decode_design_envelope(serde_json::json!({
            "status": "success",
            "design": {
                "shop_name": request.shop_name,
                "business_type": request.business_type,
                "template_id": request.template_id,
                "canvasWidth": 800,
                "canvasHeight": 600,
                "background_color": "#3e2723",
                "elements": [
                    {"id": "title", "type": "text", "x": 10, "y": 10, "content": request.shop_name,
                     "fontSize": 48, "color": "#ffffff", "draggable": true},
                    {"id": "subtitle", "type": "text", "x": 10, "y": 40, "width": 400, "height": 60,
                     "content": request.business_type, "fontSize": 24, "draggable": true}
                ]
            }
        }))
    }

    async fn save(&self, design: &DesignDescription) -> Result<SaveReceipt, SignboardError> {
        self.saved.lock().unwrap().push(design.shop_name.clone());
        Ok(SaveReceipt {
            message: Some("Design saved successfully".into()),
            design_id: Some("d-1".into()),
            timestamp: None,
        })
    }
}

fn session() -> EditorSession {
    EditorSession::new(SignboardConfig::default())
}

#[tokio::test]
async fn test_generate_installs_design() {
    let source = FakeSource::new();
    let mut session = session();
    session
        .generate(&source, GenerateRequest::new("  Bean There ", "Cafe"))
        .await
        .unwrap();

    let design = session.design().unwrap();
    assert_eq!(design.shop_name, "Bean There");
    assert_eq!(design.template_id.as_deref(), Some("bold_street"));
    assert!(!session.is_busy(Operation::Generate));

    let notices = session.take_notices();
    assert_eq!(notices.last().unwrap().message, "Design generated successfully!");
    assert_eq!(notices.last().unwrap().level, NoticeLevel::Success);
}

#[tokio::test]
async fn test_generate_validates_before_calling_out() {
    let source = FakeSource::new();
    let mut session = session();

    let err = session
        .generate(&source, GenerateRequest::new("Shop", "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, SignboardError::Validation { .. }));
    assert!(source.requests.lock().unwrap().is_empty());
    assert_eq!(session.take_notices()[0].message, "Please select a business type");
}

#[tokio::test]
async fn test_failed_generate_keeps_previous_design() {
    let mut session = session();
    session
        .generate(&FakeSource::new(), GenerateRequest::new("First", "Cafe"))
        .await
        .unwrap();
    session.take_notices();

    let err = session
        .generate(&FakeSource::failing(), GenerateRequest::new("Second", "Cafe"))
        .await
        .unwrap_err();
    assert!(matches!(err, SignboardError::Collaborator(_)));
    assert_eq!(session.design().unwrap().shop_name, "First");
    assert!(!session.is_busy(Operation::Generate));

    let notices = session.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Failed to generate design");
}

#[tokio::test]
async fn test_drag_commits_clamped_percentages() {
    let mut session = session();
    session
        .generate(&FakeSource::new(), GenerateRequest::new("Bean There", "Cafe"))
        .await
        .unwrap();

    // 150% of an 800x600 surface.
    assert!(session.apply(Edit::PointerDown {
        id: "title".into(),
        x: 100.0,
        y: 100.0
    }));
    assert!(session.apply(Edit::PointerMove { x: 1300.0, y: 1000.0 }));
    assert!(session.apply(Edit::PointerUp));

    let title = session.design().unwrap().node("title").unwrap();
    assert_eq!((title.x, title.y), (80.0, 80.0));
}

#[tokio::test]
async fn test_drag_footprint_follows_element_size() {
    let mut session = session();
    session
        .generate(&FakeSource::new(), GenerateRequest::new("Bean There", "Cafe"))
        .await
        .unwrap();

    // subtitle is 400x60 on 800x600: footprint 50% x 10%.
    session.apply(Edit::PointerDown {
        id: "subtitle".into(),
        x: 0.0,
        y: 0.0,
    });
    session.apply(Edit::PointerMove { x: 2000.0, y: 2000.0 });
    session.apply(Edit::PointerUp);

    let subtitle = session.design().unwrap().node("subtitle").unwrap();
    assert_eq!((subtitle.x, subtitle.y), (50.0, 90.0));
}

#[tokio::test]
async fn test_export_then_save() {
    let source = FakeSource::new();
    let mut session = session();
    session
        .generate(&source, GenerateRequest::new("Bean There", "Cafe"))
        .await
        .unwrap();
    session.take_notices();

    let exported = session.export(&FontBook::builtin()).unwrap();
    assert!(exported.filename.starts_with("Bean_There_signboard_"));
    assert!(exported.filename.ends_with(".png"));
    assert_eq!((exported.width, exported.height), (1600, 1200));

    let receipt = session.save(&source).await.unwrap();
    assert_eq!(receipt.design_id.as_deref(), Some("d-1"));
    assert_eq!(*source.saved.lock().unwrap(), vec!["Bean There".to_string()]);

    let messages: Vec<String> = session.take_notices().into_iter().map(|n| n.message).collect();
    assert_eq!(messages, vec!["Design exported successfully!", "Design saved successfully!"]);
}

#[tokio::test]
async fn test_save_and_export_need_a_design() {
    let mut session = session();
    assert!(matches!(
        session.save(&FakeSource::new()).await,
        Err(SignboardError::NoDesign)
    ));
    assert!(matches!(
        session.export(&FontBook::builtin()),
        Err(SignboardError::NoDesign)
    ));
    let notices = session.take_notices();
    assert!(notices.iter().all(|n| n.message == "Please generate a design first"));
    assert_eq!(notices.len(), 2);
}

#[tokio::test]
async fn test_reset_then_edits_do_nothing() {
    let mut session = session();
    session
        .generate(&FakeSource::new(), GenerateRequest::new("Bean There", "Cafe"))
        .await
        .unwrap();
    assert!(session.apply(Edit::Select("title".into())));
    assert!(session.apply(Edit::Reset));

    assert!(session.design().is_none());
    assert!(!session.apply(Edit::ElementColor("#ff0000".into())));
    assert!(!session.apply(Edit::Reset));
    assert!(session.live_scene(&FontBook::builtin()).is_none());
}
