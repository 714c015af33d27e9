//! Candle-backed convolution (conv1d-augment) against the slice kernel.
use anyhow::Result;
use candle::{DType, Device, Tensor};
use conv1drustcandle::{ConvMode, KernelStrategy, TensorConvExt, convolve, convolve_mode};

fn assert_close(got: &[f64], want: &[f64], eps: f64) {
    assert_eq!(got.len(), want.len(), "length mismatch: {got:?} vs {want:?}");
    for (g, w) in got.iter().zip(want) {
        assert!((g - w).abs() <= eps, "got {got:?} want {want:?}");
    }
}

#[test]
fn test_convolve_full_1d() -> Result<()> {
    let dev = Device::Cpu;
    let a = [0.5f64, -1.5, 2.0, 4.0, -0.25];
    let b = [1.0f64, 0.0, -3.0];
    let ta = Tensor::new(&a, &dev)?;
    let tb = Tensor::new(&b, &dev)?;
    let v = ta.convolve_full(&tb)?.to_vec1::<f64>()?;
    assert_close(&v, &convolve(&a, &b), 1e-12);
    Ok(())
}

#[test]
fn test_kernel_longer_than_signal() -> Result<()> {
    let dev = Device::Cpu;
    let a = [2.0f64, 3.0];
    let b = [1.0f64, 2.0, 3.0, 4.0, 5.0];
    let v = Tensor::new(&a, &dev)?
        .convolve_full(&Tensor::new(&b, &dev)?)?
        .to_vec1::<f64>()?;
    assert_close(&v, &convolve(&a, &b), 1e-12);
    Ok(())
}

#[test]
fn test_convolve_modes() -> Result<()> {
    let dev = Device::Cpu;
    let a: Vec<f64> = (0..9).map(|k| (k as f64 * 0.7).cos()).collect();
    let b = [0.25f64, 0.5, 0.25, -0.1];
    let ta = Tensor::new(a.as_slice(), &dev)?;
    let tb = Tensor::new(&b, &dev)?;
    for mode in [ConvMode::Full, ConvMode::Same, ConvMode::Valid] {
        let v = ta.convolve_mode(&tb, mode)?.to_vec1::<f64>()?;
        let want = convolve_mode(&a, &b, mode, KernelStrategy::Bounded);
        assert_close(&v, &want, 1e-12);
    }
    Ok(())
}

#[test]
fn test_convolve_rows_f32() -> Result<()> {
    let dev = Device::Cpu;
    // [B=2, T=4]
    let data: [f32; 8] = [1., 2., 3., 4., 5., 6., 7., 8.];
    let x = Tensor::from_slice(&data, (2, 4), &dev)?;
    let k = Tensor::new(&[1f32, 1.], &dev)?;
    let y = x.convolve_rows(&k)?;
    assert_eq!(y.dtype(), DType::F32);
    let v = y.to_vec2::<f32>()?;
    assert_eq!(
        v,
        vec![vec![1., 3., 5., 7., 4.], vec![5., 11., 13., 15., 8.]]
    );
    Ok(())
}

#[test]
fn test_empty_kernel_gives_empty() -> Result<()> {
    let dev = Device::Cpu;
    let x = Tensor::new(&[1f64, 2.], &dev)?;
    let k = Tensor::zeros(0, DType::F64, &dev)?;
    assert_eq!(x.convolve_full(&k)?.dims(), &[0]);
    Ok(())
}
