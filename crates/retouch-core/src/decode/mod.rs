//! Image decoding for the editing pipeline.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and WebP bytes into upright RGBA bitmaps
//! - Exact-size resampling used by the upscale step
//!
//! # Architecture
//!
//! Decoding is the only step that waits on outside input (the browser hands
//! over bytes asynchronously). Everything after it is synchronous and
//! single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::decode::{decode_image, SourceImage};
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let bitmap = decode_image(&SourceImage::new(bytes, "image/png")).unwrap();
//! println!("Decoded {}x{} bitmap", bitmap.width, bitmap.height);
//! ```

mod decoder;
mod resize;
mod types;

pub use decoder::decode_image;
pub use resize::resize;
pub(crate) use resize::scale_dimension;
pub use types::{Bitmap, DecodeError, FilterType, Orientation, SourceImage};
