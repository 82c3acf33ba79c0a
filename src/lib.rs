//! # Signboard - Parametric Signboard Layout and Rendering
//!
//! Signboard turns a structured design description (shop name, palette,
//! positioned text and decorations) into a finished signboard image. It
//! provides:
//!
//! - **Text layout**: greedy word wrapping and vertically centered blocks
//! - **Rendering**: gradient backgrounds, borders, lines, icons and text
//!   with drop shadows, onto a pixel surface or an editable node tree
//! - **Editing**: a session reducer with percentage-space dragging
//! - **Export**: 2x PNG export with unique filenames
//! - **Design source**: client for the external design generator
//!
//! ## Quick Start
//!
//! ```
//! use signboard::{
//!     config::SignboardConfig,
//!     design::DesignDescription,
//!     export::export_design,
//!     render::FontBook,
//! };
//!
//! let design: DesignDescription = serde_json::from_str(r##"{
//!     "shop_name": "The Golden Spoon",
//!     "canvasWidth": 200,
//!     "canvasHeight": 100,
//!     "elements": {
//!         "background": {"color1": "#C41E3A", "color2": "#2C1810", "angle": 135},
//!         "shopName": {"text": "THE GOLDEN SPOON", "x": 100, "y": 50,
//!                      "fontSize": 24, "maxWidth": 180, "align": "center"}
//!     }
//! }"##)?;
//!
//! let config = SignboardConfig::default();
//! let exported = export_design(&design, &FontBook::builtin(), &config, config.export_scale, 0)?;
//! assert_eq!((exported.width, exported.height), (400, 200));
//! assert_eq!(exported.filename, "The_Golden_Spoon_signboard_0.png");
//! # Ok::<(), signboard::error::SignboardError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`design`] | Design description data model |
//! | [`layout`] | Text wrapping and vertical placement |
//! | [`render`] | Surfaces, fonts, primitives and render targets |
//! | [`editor`] | Editing session and drag positioning |
//! | [`export`] | PNG export |
//! | [`source`] | Design generator client |
//! | [`server`] | HTTP rendering server |
//! | [`color`] | Color parsing and hex normalization |
//! | [`shader`] | Per-pixel math helpers |
//! | [`config`] | Runtime configuration |
//! | [`error`] | Error types |

pub mod color;
pub mod config;
pub mod design;
pub mod editor;
pub mod error;
pub mod export;
pub mod layout;
pub mod render;
pub mod server;
pub mod shader;
pub mod source;

// Re-exports for convenience
pub use config::SignboardConfig;
pub use design::DesignDescription;
pub use editor::EditorSession;
pub use error::SignboardError;
