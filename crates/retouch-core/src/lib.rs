//! Retouch Core - Image enhancement library
//!
//! This crate provides the editing core for Retouch: decoding and 2x
//! upscaling of a source image, tonal and detail filters, crop and rotation,
//! the fixed compositing pipeline, the crop selection state machine and the
//! edit session that owns the base bitmap.

pub mod adjustments;
pub mod color;
pub mod decode;
pub mod encode;
pub mod filter;
pub mod pipeline;
pub mod selection;
pub mod session;
pub mod transform;
pub mod upload;
pub mod upscale;
pub mod values;

pub use adjustments::{adjust_brightness, adjust_contrast, adjust_saturation};
pub use decode::{decode_image, Bitmap, DecodeError, SourceImage};
pub use encode::{encode_jpeg, encode_png, export, EncodeError, ExportFormat};
pub use filter::{reduce_noise, sharpen};
pub use pipeline::apply_adjustments;
pub use selection::{CoordinateTransform, CropSelectionMapper, CropSelectionState, Point};
pub use session::{EditSession, LoadOutcome, LoadTicket, SessionError};
pub use transform::{
    apply_crop, apply_rotation, compute_rotated_bounds, rotate_90, CropRect, InterpolationFilter,
    RotationDirection,
};
pub use upload::{ChunkAssembler, EnhancementService, PassThroughService, UploadError};
pub use upscale::{decode_and_upscale, upscale};
pub use values::EnhancementValues;
