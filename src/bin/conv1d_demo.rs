//! Minimal convolution demo binary
//!
//! Build: cargo run --features cli --bin conv1d_demo -- --a 1,2,3 --b 0,1,0.5

use anyhow::Result;
use conv1drustcandle::helpers::CommonCli;
use conv1drustcandle::{Device, Tensor, TensorConvExt, convolve_mode};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = CommonCli::parse_or_dialog()?;
    let (a, b) = args.sequences()?;
    let (mode, strategy) = (args.mode, args.strategy);
    tracing::info!(n = a.len(), m = b.len(), %mode, %strategy, "convolving");

    let y = convolve_mode(&a, &b, mode, strategy);
    println!("conv1d {mode} ({} x {} -> {}):", a.len(), b.len(), y.len());
    for (k, v) in y.iter().enumerate() {
        println!("k={k:02}: {v:.6}");
    }

    // Cross-check against Candle's conv1d path
    let dev = Device::Cpu;
    let ta = Tensor::from_slice(&a, a.len(), &dev)?;
    let tb = Tensor::from_slice(&b, b.len(), &dev)?;
    let check = ta.convolve_mode(&tb, mode)?.to_vec1::<f64>()?;
    let max_err = y
        .iter()
        .zip(&check)
        .map(|(p, q)| (p - q).abs())
        .fold(0.0f64, f64::max);
    tracing::debug!(max_err, "candle cross-check");
    if max_err > 1e-9 {
        tracing::warn!(max_err, "slice kernel and candle conv1d disagree");
    }
    Ok(())
}
