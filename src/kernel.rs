//! Discrete linear convolution on slices.
//!
//! For `a` of length N and `b` of length M the full result has length
//! N + M - 1 and element k is `sum_j a[j] * b[k - j]` over every j with
//! `0 <= j < N` and `0 <= k - j < M`. If either input is empty the result is
//! empty; every mode and strategy follows that rule.

use std::ops::{Add, Mul};

pub use conv1d_augment::{ConvMode, KernelStrategy};

/// Element types the kernel accepts. `Default` must be the additive zero.
pub trait Sample: Copy + Default + Add<Output = Self> + Mul<Output = Self> {}

impl<T> Sample for T where T: Copy + Default + Add<Output = T> + Mul<Output = T> {}

/// Full convolution using the bounded index range.
pub fn convolve<T: Sample>(a: &[T], b: &[T]) -> Vec<T> {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return Vec::new();
    }
    let mut out = vec![T::default(); n + m - 1];
    for (k, slot) in out.iter_mut().enumerate() {
        let lo = (k + 1).saturating_sub(m);
        let hi = k.min(n - 1);
        let mut acc = T::default();
        for j in lo..=hi {
            acc = acc + a[j] * b[k - j];
        }
        *slot = acc;
    }
    out
}

/// Full convolution scanning every j in `[0, N)`.
///
/// Reference form of [`convolve`]; both visit the same (j, k - j) pairs in the
/// same order, so results are bitwise identical.
pub fn convolve_direct<T: Sample>(a: &[T], b: &[T]) -> Vec<T> {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return Vec::new();
    }
    let mut out = vec![T::default(); n + m - 1];
    for (k, slot) in out.iter_mut().enumerate() {
        let mut acc = T::default();
        for (j, &aj) in a.iter().enumerate() {
            if let Some(i) = k.checked_sub(j)
                && i < m
            {
                acc = acc + aj * b[i];
            }
        }
        *slot = acc;
    }
    out
}

/// Full convolution using the scan selected by `strategy`.
pub fn convolve_with<T: Sample>(a: &[T], b: &[T], strategy: KernelStrategy) -> Vec<T> {
    match strategy {
        KernelStrategy::Direct => convolve_direct(a, b),
        KernelStrategy::Bounded => convolve(a, b),
    }
}

/// Convolution windowed by `mode`, sliced out of the full result.
pub fn convolve_mode<T: Sample>(
    a: &[T],
    b: &[T],
    mode: ConvMode,
    strategy: KernelStrategy,
) -> Vec<T> {
    let full = convolve_with(a, b, strategy);
    if mode == ConvMode::Full {
        return full;
    }
    let start = mode.slice_start(a.len(), b.len());
    let len = mode.output_len(a.len(), b.len());
    full[start..start + len].to_vec()
}
