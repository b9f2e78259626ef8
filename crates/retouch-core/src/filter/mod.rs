//! Neighborhood filters built on 3x3 convolution.
//!
//! - **Convolution**: generic kernel application with edge replication
//! - **Sharpen**: unsharp-mask approximation scaled by intensity
//! - **Noise reduction**: up to two box-blur passes
//!
//! Only R, G and B are filtered; alpha passes through untouched.

mod convolution;
mod detail;

pub use convolution::{convolve, Kernel};
pub use detail::{noise_reduction_passes, reduce_noise, sharpen};
