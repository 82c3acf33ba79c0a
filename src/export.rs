//! # Export
//!
//! Renders a design at the export scale and encodes it as PNG.
//!
//! Filenames follow `<shop name>_signboard_<unix millis>.png`, with every
//! run of whitespace in the shop name replaced by a single underscore.

use std::io::Cursor;

use image::RgbaImage;

use crate::config::SignboardConfig;
use crate::design::DesignDescription;
use crate::error::SignboardError;
use crate::render::surface::device_size;
use crate::render::{FontBook, rasterize};

/// An encoded export, ready to write or send.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Build the download filename for an export taken at `millis`.
pub fn export_filename(shop_name: &str, millis: i64) -> String {
    let stem = shop_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}_signboard_{}.png", stem, millis)
}

/// Current time in unix milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, SignboardError> {
    let mut png_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
        .map_err(|e| SignboardError::Export(format!("PNG encoding failed: {}", e)))?;
    Ok(png_bytes)
}

/// Render `design` at `scale` and encode it. Nothing is returned on failure.
pub fn export_design(
    design: &DesignDescription,
    fonts: &FontBook,
    config: &SignboardConfig,
    scale: f32,
    millis: i64,
) -> Result<ExportedImage, SignboardError> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(SignboardError::Export(format!("invalid export scale {}", scale)));
    }
    let (width, height) = design.validate(config)?;
    device_size(width, height, scale)?;
    let surface = rasterize(design, width, height, scale, fonts);
    let img = surface.into_image();
    let png = encode_png(&img)?;

    let exported = ExportedImage {
        filename: export_filename(&design.shop_name, millis),
        width: img.width(),
        height: img.height(),
        png,
    };
    tracing::info!(
        file = %exported.filename,
        width = exported.width,
        height = exported.height,
        bytes = exported.png.len(),
        "design exported"
    );
    Ok(exported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filename_collapses_whitespace() {
        assert_eq!(
            export_filename("The  Golden\tSpoon", 1700000000000),
            "The_Golden_Spoon_signboard_1700000000000.png"
        );
        assert_eq!(export_filename("Cafe", 5), "Cafe_signboard_5.png");
    }

    #[test]
    fn test_export_is_double_size_png() {
        let design: DesignDescription = serde_json::from_value(serde_json::json!({
            "shop_name": "Bean There",
            "canvasWidth": 120,
            "canvasHeight": 80,
            "elements": {"background": {"color1": "#6f4e37", "color2": "#3e2723", "angle": 0}}
        }))
        .unwrap();
        let config = SignboardConfig::default();
        let out = export_design(&design, &FontBook::builtin(), &config, 2.0, 42).unwrap();
        assert_eq!((out.width, out.height), (240, 160));
        assert_eq!(&out.png[1..4], b"PNG");
        assert_eq!(out.filename, "Bean_There_signboard_42.png");

        let decoded = image::load_from_memory(&out.png).unwrap();
        assert_eq!(decoded.width(), 240);
    }

    #[test]
    fn test_invalid_scale_is_export_error() {
        let design: DesignDescription = serde_json::from_value(serde_json::json!({"shop_name": "X"})).unwrap();
        let err = export_design(&design, &FontBook::builtin(), &SignboardConfig::default(), 0.0, 1).unwrap_err();
        assert!(matches!(err, SignboardError::Export(_)));
    }

    #[test]
    fn test_oversized_exports_are_refused() {
        let design: DesignDescription = serde_json::from_value(serde_json::json!({"shop_name": "X"})).unwrap();
        let fonts = FontBook::builtin();
        let config = SignboardConfig::default();
        let err = export_design(&design, &fonts, &config, 100.0, 1).unwrap_err();
        assert!(matches!(err, SignboardError::Export(_)));

        let mut wide = design.clone();
        wide.canvas_width = Some(50_000);
        let err = export_design(&wide, &fonts, &config, 1.0, 1).unwrap_err();
        assert!(matches!(err, SignboardError::InvalidDesign(_)));
    }
}
