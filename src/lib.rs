//! Discrete 1D convolution on slices and Candle tensors

pub mod conv1d;
pub mod kernel;
pub mod kernelize;

pub use conv1d::{Conv1dLayer, Conv1dLayerConfig};
pub use kernel::{
    ConvMode, KernelStrategy, Sample, convolve, convolve_direct, convolve_mode, convolve_with,
};
// Re-export core Candle types for convenience in downstream crates
pub use candle::{DType, Device, Tensor};

// Candle-backed convolution lives in the conv1d-augment sub-crate.
pub use conv1d_augment::TensorConvExt;

#[cfg(feature = "cli")]
pub use conv1d_helpers as helpers;
