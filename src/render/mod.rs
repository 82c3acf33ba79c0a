//! # Rendering Module
//!
//! Turns a [`DesignDescription`](crate::design::DesignDescription) into
//! pixels or into an editable node tree.
//!
//! ## Modules
//!
//! - [`surface`]: RGBA surface with coverage masks, strokes and drop shadow
//! - [`font`]: Outline and bitmap faces, text measurement
//! - [`background`]: Angle-driven two-stop gradient and stripe texture
//! - [`primitives`]: Border, line, icon, text and element drawing
//! - [`scene`]: Fixed draw order and the [`RenderTarget`] seam
//! - [`live`]: Node-tree target for editable front ends
//!
//! ## Usage Example
//!
//! ```
//! use signboard::design::DesignDescription;
//! use signboard::render::{FontBook, rasterize};
//!
//! let design: DesignDescription = serde_json::from_str(r##"{
//!     "shop_name": "Bean There",
//!     "elements": {
//!         "background": {"color1": "#6f4e37", "color2": "#3e2723", "angle": 90},
//!         "shopName": {"text": "Bean There", "x": 200, "y": 100, "fontSize": 32,
//!                      "color": "#ffffff", "align": "center"}
//!     }
//! }"##).unwrap();
//!
//! let surface = rasterize(&design, 400, 200, 1.0, &FontBook::builtin());
//! assert_eq!(surface.image().dimensions(), (400, 200));
//! ```

pub mod background;
pub mod font;
pub mod live;
pub mod primitives;
pub mod scene;
pub mod surface;

pub use font::FontBook;
pub use live::{LiveNode, LiveScene, LiveTarget};
pub use scene::{RasterTarget, RenderTarget, TextSlot, rasterize, render_scene};
pub use surface::Surface;
