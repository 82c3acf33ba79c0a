//! # Design Source
//!
//! The external collaborator that produces and persists designs.
//!
//! Every response is wrapped in an envelope with a `status` field; anything
//! other than `"success"` becomes [`SignboardError::Collaborator`] carrying
//! the service's `message`.
//!
//! ## Generate envelope
//!
//! The canonical shape nests the design:
//!
//! ```json
//! { "status": "success", "design": { "shop_name": "...", ... } }
//! ```
//!
//! Services that merge the design fields into the top level next to
//! `status` are still understood; that shape is logged at `warn`.

pub mod http;

pub use http::HttpDesignSource;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::design::DesignDescription;
use crate::error::{Field, SignboardError};

/// Template used when the caller does not pick one.
pub const DEFAULT_TEMPLATE: &str = "bold_street";

/// Body of a generate call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub shop_name: String,
    pub business_type: String,
    pub template_id: String,
}

impl GenerateRequest {
    pub fn new(shop_name: impl Into<String>, business_type: impl Into<String>) -> Self {
        Self {
            shop_name: shop_name.into(),
            business_type: business_type.into(),
            template_id: DEFAULT_TEMPLATE.to_string(),
        }
    }

    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = template_id.into();
        self
    }

    /// Trim the shop name and reject missing inputs, shop name first.
    pub fn validated(mut self) -> Result<Self, SignboardError> {
        self.shop_name = self.shop_name.trim().to_string();
        if self.shop_name.is_empty() {
            return Err(SignboardError::validation(Field::ShopName));
        }
        if self.business_type.trim().is_empty() {
            return Err(SignboardError::validation(Field::BusinessType));
        }
        Ok(self)
    }
}

/// One entry of the template catalogue.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplateInfo {
    pub name: String,
    /// Remaining template attributes, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Acknowledgement of a save.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SaveReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub design_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Produces and persists designs.
#[async_trait]
pub trait DesignSource: Send + Sync {
    /// Template catalogue keyed by template id.
    async fn templates(&self) -> Result<BTreeMap<String, TemplateInfo>, SignboardError>;

    async fn business_types(&self) -> Result<Vec<String>, SignboardError>;

    async fn generate(&self, request: &GenerateRequest) -> Result<DesignDescription, SignboardError>;

    async fn save(&self, design: &DesignDescription) -> Result<SaveReceipt, SignboardError>;
}

/// Fail unless the envelope says `"status": "success"`.
pub fn check_status(body: &Value) -> Result<(), SignboardError> {
    match body.get("status").and_then(Value::as_str) {
        Some("success") => Ok(()),
        status => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("unexpected status {:?}", status.unwrap_or("<missing>")));
            Err(SignboardError::Collaborator(message))
        }
    }
}

/// Pull the design out of a generate response.
pub fn decode_design_envelope(mut body: Value) -> Result<DesignDescription, SignboardError> {
    check_status(&body)?;

    let nested = body
        .get_mut("design")
        .filter(|d| d.is_object())
        .map(Value::take);
    let design = match nested {
        Some(design) => design,
        None => {
            tracing::warn!("generate response uses the merged envelope; reading design fields from the top level");
            body
        }
    };

    serde_json::from_value(design)
        .map_err(|e| SignboardError::Collaborator(format!("malformed design in response: {}", e)))
}

/// Take a field out of a success envelope.
pub(crate) fn envelope_field<T: serde::de::DeserializeOwned>(
    mut body: Value,
    field: &str,
) -> Result<T, SignboardError> {
    check_status(&body)?;
    let value = body
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| SignboardError::Collaborator(format!("response has no '{}'", field)))?;
    serde_json::from_value(value)
        .map_err(|e| SignboardError::Collaborator(format!("malformed '{}' in response: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::Elements;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn design_fields() -> Value {
        json!({
            "shop_name": "Bean There",
            "business_type": "Cafe",
            "template_id": "modern",
            "elements": {"background": {"color1": "#6f4e37", "color2": "#3e2723", "angle": 135}}
        })
    }

    #[test]
    fn test_nested_envelope() {
        let body = json!({"status": "success", "design": design_fields()});
        let design = decode_design_envelope(body).unwrap();
        assert_eq!(design.shop_name, "Bean There");
        assert!(matches!(design.elements, Elements::Slots(_)));
    }

    #[test]
    fn test_merged_envelope_fallback() {
        let mut body = design_fields();
        body["status"] = json!("success");
        let design = decode_design_envelope(body).unwrap();
        assert_eq!(design.template_id.as_deref(), Some("modern"));
    }

    #[test]
    fn test_error_status_carries_message() {
        let body = json!({"status": "error", "message": "boom"});
        match decode_design_envelope(body) {
            Err(SignboardError::Collaborator(msg)) => assert_eq!(msg, "boom"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_status_is_an_error() {
        assert!(matches!(
            check_status(&json!({"design": {}})),
            Err(SignboardError::Collaborator(_))
        ));
    }

    #[test]
    fn test_envelope_field() {
        let types: Vec<String> =
            envelope_field(json!({"status": "success", "types": ["Cafe", "Salon"]}), "types").unwrap();
        assert_eq!(types, vec!["Cafe", "Salon"]);
        let templates: BTreeMap<String, TemplateInfo> = envelope_field(
            json!({"status": "success", "templates": {"modern": {"name": "Modern", "border": true}}}),
            "templates",
        )
        .unwrap();
        assert_eq!(templates["modern"].name, "Modern");
        assert_eq!(templates["modern"].extra["border"], json!(true));
    }

    #[test]
    fn test_request_validation_order() {
        let err = GenerateRequest::new("  ", "").validated().unwrap_err();
        assert!(matches!(
            err,
            SignboardError::Validation {
                field: Field::ShopName,
                ..
            }
        ));
        let err = GenerateRequest::new("Shop", "").validated().unwrap_err();
        assert!(matches!(
            err,
            SignboardError::Validation {
                field: Field::BusinessType,
                ..
            }
        ));
        let ok = GenerateRequest::new("  Shop ", "Cafe").validated().unwrap();
        assert_eq!(ok.shop_name, "Shop");
        assert_eq!(ok.template_id, DEFAULT_TEMPLATE);
    }
}
