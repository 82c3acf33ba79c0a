//! # Shader Primitives
//!
//! Per-pixel building blocks used by the rasterizer. Each primitive answers
//! "how much of this pixel is covered" or "where along an axis is this
//! pixel", and the surface turns those answers into color.
//!
//! ## Categories
//!
//! - [`distance`]: distance to grid lines, segments and rectangle outlines
//! - [`line`]: anti-aliased edges and diagonal line families
//! - [`transform`]: angle conversion and axis projection
//! - [`blend`]: interpolation and source-over compositing
//!
//! ## Example
//!
//! ```rust
//! use signboard::shader::*;
//!
//! // Coverage of a 3px wide horizontal segment at a pixel 1px off its axis.
//! let d = dist_to_segment(5.0, 11.0, 0.0, 10.0, 20.0, 10.0);
//! assert_eq!(aa_edge(d, 1.5, 1.0), 1.0);
//! ```

pub mod blend;
pub mod distance;
pub mod line;
pub mod transform;

pub use blend::*;
pub use distance::*;
pub use line::*;
pub use transform::*;
