//! Geometric transforms: crop, quarter turns and free rotation.
//!
//! Geometry always runs before pixel filtering so convolution neighborhoods
//! see the final image boundaries.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in native pixel coordinates of the bitmap they apply to
//! - Free rotation angles are in degrees, positive = clockwise on screen
//! - Origin is top-left corner

mod crop;
mod quarter_turn;
mod rotation;

pub use crop::{apply_crop, CropRect};
pub use quarter_turn::{rotate_90, RotationDirection};
pub use rotation::{apply_rotation, compute_rotated_bounds, InterpolationFilter};
