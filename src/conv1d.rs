use anyhow::Result;
use candle::{DType, Device, Tensor};

use crate::kernel::{ConvMode, KernelStrategy, convolve_mode};

/// Configuration for the convolution layer
#[derive(Debug, Clone)]
pub struct Conv1dLayerConfig {
    /// Output window over the full convolution
    pub mode: ConvMode,
    /// Inner-loop scan used by the slice kernel
    pub strategy: KernelStrategy,
    /// Data type the taps are stored in
    pub dtype: DType,
}

impl Default for Conv1dLayerConfig {
    fn default() -> Self {
        Self {
            mode: ConvMode::Full,
            strategy: KernelStrategy::Bounded,
            dtype: DType::F32,
        }
    }
}

/// Fixed-kernel 1D convolution over Candle tensors.
///
/// Signals are `[T]` or `[batch, T]`; every row is convolved with the same
/// taps. Accumulation runs in f64 on the host and the result is cast back to
/// the input dtype.
#[derive(Debug, Clone)]
pub struct Conv1dLayer {
    taps: Tensor, // [m]
    mode: ConvMode,
    strategy: KernelStrategy,
    taps_host: Vec<f64>,
}

impl Conv1dLayer {
    /// Build from host taps, stored as a tensor in `cfg.dtype`.
    pub fn new(cfg: Conv1dLayerConfig, taps: &[f64], device: &Device) -> Result<Self> {
        let t = Tensor::from_slice(taps, taps.len(), device)?.to_dtype(cfg.dtype)?;
        Self::from_tensor(cfg, t)
    }

    /// Build from an existing taps tensor. The tensor keeps its own dtype.
    pub fn from_tensor(cfg: Conv1dLayerConfig, taps: Tensor) -> Result<Self> {
        anyhow::ensure!(taps.rank() == 1, "taps must be 1D, got {:?}", taps.dims());
        let taps_host = taps.to_dtype(DType::F64)?.to_vec1::<f64>()?;
        Ok(Self {
            taps,
            mode: cfg.mode,
            strategy: cfg.strategy,
            taps_host,
        })
    }

    /// Taps tensor the layer convolves with. Fixed after construction; build a
    /// new layer with [`Conv1dLayer::from_tensor`] to change it.
    pub fn taps(&self) -> &Tensor {
        &self.taps
    }

    pub fn mode(&self) -> ConvMode {
        self.mode
    }

    pub fn strategy(&self) -> KernelStrategy {
        self.strategy
    }

    pub fn kernel_len(&self) -> usize {
        self.taps_host.len()
    }

    /// Output length for a signal of `t` samples.
    pub fn output_len(&self, t: usize) -> usize {
        self.mode.output_len(t, self.kernel_len())
    }

    /// Forward pass.
    ///
    /// input: [T] or [batch, T]
    /// returns: [T'] or [batch, T'] with T' = `output_len(T)`
    pub fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let dims = input.dims();
        tracing::debug!(
            shape = ?dims,
            taps = self.kernel_len(),
            mode = %self.mode,
            strategy = ?self.strategy,
            "conv1d forward"
        );
        match *dims {
            [_] => {
                let x = input.to_dtype(DType::F64)?.to_vec1::<f64>()?;
                let y = self.run(&x);
                let len = y.len();
                Ok(Tensor::from_vec(y, len, input.device())?.to_dtype(input.dtype())?)
            }
            [batch, t] => {
                let rows = input.to_dtype(DType::F64)?.to_vec2::<f64>()?;
                let out_len = self.output_len(t);
                let mut flat = Vec::with_capacity(batch * out_len);
                for row in &rows {
                    flat.extend(self.run(row));
                }
                Ok(Tensor::from_vec(flat, (batch, out_len), input.device())?
                    .to_dtype(input.dtype())?)
            }
            _ => anyhow::bail!("input must be [T] or [batch, T], got {dims:?}"),
        }
    }

    /// nD forward pass convenience: the last dimension is time, all leading
    /// dimensions are flattened into rows and restored afterwards.
    ///   input: [d_1, ..., d_k, T]
    ///   returns: [d_1, ..., d_k, T']
    pub fn forward_nd(&self, input: &Tensor) -> Result<Tensor> {
        let dims = input.dims();
        let Some((&t, lead)) = dims.split_last() else {
            anyhow::bail!("input must be at least [T]");
        };
        if lead.is_empty() {
            return self.forward(input);
        }
        let rows: usize = lead.iter().product();
        let y = self.forward(&input.reshape((rows, t))?)?; // [rows, T']
        let mut out_shape = lead.to_vec();
        out_shape.push(self.output_len(t));
        Ok(y.reshape(out_shape)?)
    }

    fn run(&self, x: &[f64]) -> Vec<f64> {
        convolve_mode(x, &self.taps_host, self.mode, self.strategy)
    }
}
