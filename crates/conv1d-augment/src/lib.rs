//! conv1d-augment: extension traits that wrap Candle's conv1d op.
//!
//! Candle's `conv1d` is a cross-correlation over `[B, C, L]` inputs. Flipping
//! the kernel and zero-padding by `M - 1` on each side turns it into the full
//! linear convolution; the other modes are windows over that result.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use candle::{DType, Tensor};

/// Output window taken from the full convolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConvMode {
    /// Every position with any overlap, length `n + m - 1`.
    #[default]
    Full,
    /// Centred window with the length of the longer input.
    Same,
    /// Only positions where the shorter input fully overlaps the longer one.
    Valid,
}

impl ConvMode {
    /// Output length for inputs of length `n` and `m`. Zero if either is empty.
    pub fn output_len(self, n: usize, m: usize) -> usize {
        if n == 0 || m == 0 {
            return 0;
        }
        match self {
            ConvMode::Full => n + m - 1,
            ConvMode::Same => n.max(m),
            ConvMode::Valid => n.max(m) - n.min(m) + 1,
        }
    }

    /// Offset of the window inside the full result.
    pub fn slice_start(self, n: usize, m: usize) -> usize {
        if n == 0 || m == 0 {
            return 0;
        }
        match self {
            ConvMode::Full => 0,
            ConvMode::Same => (n + m - 1 - n.max(m)) / 2,
            ConvMode::Valid => n.min(m) - 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConvMode::Full => "full",
            ConvMode::Same => "same",
            ConvMode::Valid => "valid",
        }
    }
}

impl fmt::Display for ConvMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConvMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(ConvMode::Full),
            "same" => Ok(ConvMode::Same),
            "valid" => Ok(ConvMode::Valid),
            other => bail!("unknown convolution mode '{other}' (expected full, same or valid)"),
        }
    }
}

/// How the inner index j is scanned for each output position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KernelStrategy {
    /// Scan j over all of `[0, N)` and test `k - j` against `[0, M)`.
    Direct,
    /// Scan only `[max(0, k - M + 1), min(N - 1, k)]`.
    #[default]
    Bounded,
}

impl KernelStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            KernelStrategy::Direct => "direct",
            KernelStrategy::Bounded => "bounded",
        }
    }
}

impl fmt::Display for KernelStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KernelStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(KernelStrategy::Direct),
            "bounded" => Ok(KernelStrategy::Bounded),
            other => bail!("unknown kernel strategy '{other}' (expected direct or bounded)"),
        }
    }
}

pub trait TensorConvExt {
    /// Full linear convolution of two 1D tensors: `[N] * [M] -> [N+M-1]`
    fn convolve_full(&self, kernel: &Tensor) -> Result<Tensor>;
    /// 1D convolution windowed by `mode`
    fn convolve_mode(&self, kernel: &Tensor, mode: ConvMode) -> Result<Tensor>;
    /// Full convolution of every row of a [B,T] tensor with a 1D kernel
    fn convolve_rows(&self, kernel: &Tensor) -> Result<Tensor>;
}

impl TensorConvExt for Tensor {
    fn convolve_full(&self, kernel: &Tensor) -> Result<Tensor> {
        self.convolve_mode(kernel, ConvMode::Full)
    }

    fn convolve_mode(&self, kernel: &Tensor, mode: ConvMode) -> Result<Tensor> {
        anyhow::ensure!(self.rank() == 1, "expected 1D signal, got {:?}", self.dims());
        let n = self.dims1()?;
        let rows = self.reshape((1, n))?;
        let full = rows.convolve_rows(kernel)?; // [1, n+m-1]
        let m = kernel.dims1()?;
        let out = full.narrow(1, mode.slice_start(n, m), mode.output_len(n, m))?;
        Ok(out.squeeze(0)?)
    }

    fn convolve_rows(&self, kernel: &Tensor) -> Result<Tensor> {
        let (b, t) = match self.dims() {
            &[b, t] => (b, t),
            dims => bail!("expected [B,T], got {dims:?}"),
        };
        anyhow::ensure!(kernel.rank() == 1, "kernel must be 1D, got {:?}", kernel.dims());
        anyhow::ensure!(
            kernel.dtype() == self.dtype(),
            "dtype mismatch: signal {:?} vs kernel {:?}",
            self.dtype(),
            kernel.dtype()
        );
        let m = kernel.dims1()?;
        if t == 0 || m == 0 {
            return Ok(Tensor::zeros((b, 0), self.dtype(), self.device())?);
        }
        // integer inputs are promoted, result is cast back
        let work = match self.dtype() {
            DType::F32 | DType::F64 => self.clone(),
            _ => self.to_dtype(DType::F64)?,
        };
        let taps = kernel.to_dtype(work.dtype())?;
        let rev = Tensor::from_vec((0..m as u32).rev().collect::<Vec<_>>(), m, kernel.device())?;
        let flipped = taps.index_select(&rev, 0)?.reshape((1, 1, m))?; // [c_out=1, c_in=1, m]
        let x = work.reshape((b, 1, t))?.contiguous()?;
        let y = x.conv1d(&flipped, m - 1, 1, 1, 1)?; // [b, 1, t+m-1]
        Ok(y.squeeze(1)?.to_dtype(self.dtype())?)
    }
}
