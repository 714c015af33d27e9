//! Kernel builders and direct tensor convolution.

use anyhow::Result;
use candle::{DType, Device, Tensor};

use crate::kernel::convolve;

/// Unit impulse `[1, 0, ..., 0]` of length `len`.
pub fn impulse_kernel(len: usize, device: &Device) -> Result<Tensor> {
    anyhow::ensure!(len > 0, "kernel length must be > 0");
    let mut taps = vec![0f32; len];
    taps[0] = 1.0;
    Ok(Tensor::from_vec(taps, len, device)?)
}

/// Moving-average kernel: `len` taps of `1 / len`.
pub fn boxcar_kernel(len: usize, device: &Device) -> Result<Tensor> {
    anyhow::ensure!(len > 0, "kernel length must be > 0");
    Ok(Tensor::ones(len, DType::F32, device)?.affine(1.0 / len as f64, 0.0)?)
}

/// Full convolution of two 1D tensors via the slice kernel.
pub fn convolve_tensor(x: &Tensor, k: &Tensor) -> Result<Tensor> {
    anyhow::ensure!(
        x.rank() == 1 && k.rank() == 1,
        "convolve_tensor expects 1D tensors, got {:?} and {:?}",
        x.dims(),
        k.dims()
    );
    anyhow::ensure!(
        x.dtype() == k.dtype(),
        "dtype mismatch: {:?} vs {:?}",
        x.dtype(),
        k.dtype()
    );
    let xs = x.to_dtype(DType::F64)?.to_vec1::<f64>()?;
    let ks = k.to_dtype(DType::F64)?.to_vec1::<f64>()?;
    let y = convolve(&xs, &ks);
    let len = y.len();
    Ok(Tensor::from_vec(y, len, x.device())?.to_dtype(x.dtype())?)
}
