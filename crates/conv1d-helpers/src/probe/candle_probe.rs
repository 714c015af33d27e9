use anyhow::Result;
use candle::{Device, Tensor};

#[test]
fn probe_conv1d_is_cross_correlation() -> Result<()> {
    let dev = Device::Cpu;
    // [B=1, C=1, L=4] against an asymmetric [1,1,2] kernel, no padding
    let x = Tensor::from_slice(&[1f32, 2., 3., 4.], (1, 1, 4), &dev)?;
    let k = Tensor::from_slice(&[1f32, 10.], (1, 1, 2), &dev)?;
    let y = x.conv1d(&k, 0, 1, 1, 1)?; // y[i] = x[i] + 10 x[i+1]
    let v = y.flatten_all()?.to_vec1::<f32>()?;
    assert_eq!(v, vec![21., 32., 43.]);
    Ok(())
}

#[test]
fn probe_flipped_padded_conv1d_is_full_convolution() -> Result<()> {
    let dev = Device::Cpu;
    let x = Tensor::from_slice(&[1f32, 2., 3.], (1, 1, 3), &dev)?;
    // [0, 1, 0.5] reversed
    let k = Tensor::from_slice(&[0.5f32, 1., 0.], (1, 1, 3), &dev)?;
    let y = x.conv1d(&k, 2, 1, 1, 1)?;
    assert_eq!(y.dims(), &[1, 1, 5]);
    let v = y.flatten_all()?.to_vec1::<f32>()?;
    assert_eq!(v, vec![0., 1., 2.5, 4., 1.5]);
    Ok(())
}
