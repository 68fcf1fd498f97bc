//! Numeric fill kernels.
//!
//! The primitives the fill operators delegate to: uniform and gaussian
//! random streams, constant set, and a sequential range. Free functions
//! parameterized by element type and execution context; a device backend
//! substitutes its own equivalents behind the same signatures.

use scirs2_core::ndarray::ArrayD;
use scirs2_core::random::Rng;

use crate::context::CpuContext;

/// Fill `out` with independent draws from Uniform[min, max).
pub fn rand_uniform(ctx: &mut CpuContext, min: f32, max: f32, out: &mut ArrayD<f32>) {
    let lo = min as f64;
    let span = (max - min) as f64;
    for v in out.iter_mut() {
        *v = (lo + span * ctx.rng().random::<f64>()) as f32;
    }
}

/// Fill `out` with independent draws from Normal(mean, std), using the
/// Box-Muller transform.
pub fn rand_gaussian(ctx: &mut CpuContext, mean: f32, std: f32, out: &mut ArrayD<f32>) {
    for v in out.iter_mut() {
        let u1: f64 = ctx.rng().random();
        let u2: f64 = ctx.rng().random();
        let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        *v = (mean as f64 + std as f64 * z0) as f32;
    }
}

/// Set every element of `out` to `value`. A no-op on empty buffers.
pub fn fill_with<T: Clone>(value: T, out: &mut ArrayD<T>) {
    out.fill(value);
}

/// Write 0, 1, 2, ... into `out` in storage order.
pub fn fill_range(out: &mut ArrayD<f32>) {
    for (i, v) in out.iter_mut().enumerate() {
        *v = i as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use scirs2_core::ndarray::IxDyn;

    #[test]
    fn test_rand_uniform_bounds_and_mean() {
        let mut ctx = CpuContext::seeded(7);
        let mut out = ArrayD::<f32>::zeros(IxDyn(&[10_000]));
        rand_uniform(&mut ctx, 0.0, 1.0, &mut out);

        assert!(out.iter().all(|&v| (0.0..1.0).contains(&v)));
        let mean = out.iter().map(|&v| v as f64).sum::<f64>() / out.len() as f64;
        assert_abs_diff_eq!(mean, 0.5, epsilon = 0.02);
    }

    #[test]
    fn test_rand_uniform_respects_min_max() {
        let mut ctx = CpuContext::seeded(8);
        let mut out = ArrayD::<f32>::zeros(IxDyn(&[1_000]));
        rand_uniform(&mut ctx, -2.0, 3.0, &mut out);
        assert!(out.iter().all(|&v| (-2.0..3.0).contains(&v)));
    }

    #[test]
    fn test_rand_gaussian_moments() {
        let mut ctx = CpuContext::seeded(9);
        let mut out = ArrayD::<f32>::zeros(IxDyn(&[20_000]));
        rand_gaussian(&mut ctx, 1.0, 2.0, &mut out);

        let n = out.len() as f64;
        let mean = out.iter().map(|&v| v as f64).sum::<f64>() / n;
        let var = out.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n;
        assert_abs_diff_eq!(mean, 1.0, epsilon = 0.06);
        assert_abs_diff_eq!(var.sqrt(), 2.0, epsilon = 0.06);
    }

    #[test]
    fn test_fill_with() {
        let mut out = ArrayD::<i64>::zeros(IxDyn(&[3, 3]));
        fill_with(-5, &mut out);
        assert!(out.iter().all(|&v| v == -5));

        let mut empty = ArrayD::<i64>::zeros(IxDyn(&[0]));
        fill_with(1, &mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_fill_range_storage_order() {
        let mut out = ArrayD::<f32>::zeros(IxDyn(&[2, 3]));
        fill_range(&mut out);
        assert_eq!(
            out.iter().copied().collect::<Vec<_>>(),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]
        );
    }
}
