//! Core utilities shared by the filters.
//!
//! This module provides the numeric building blocks that the engine composes:
//! - Border index mapping (reflect-101 and replicate)
//! - Gaussian kernel generation
//! - Separable and full 2-D correlation with fixed integer kernels
//! - Gradient combination and saturating arithmetic
//!
//! All helpers take `(height, width, channels)` views and process each
//! channel independently. Row passes are distributed with Rayon; every row is
//! computed from the input only, so results do not depend on scheduling.

use ndarray::{Array3, ArrayView3, Axis, Zip};
use rayon::prelude::*;

/// Map an out-of-range coordinate back into `0..len` using reflect-101
/// (`gfedcb|abcdefgh|gfedcba`), the default border of the smoothing and
/// gradient filters.
#[inline]
pub fn reflect_101(p: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut p = p;
    while p < 0 || p > last {
        p = if p < 0 { -p } else { 2 * last - p };
    }
    p as usize
}

/// Clamp a coordinate to the nearest edge pixel (`aaaa|abcd|dddd`).
#[inline]
pub fn replicate(p: isize, len: usize) -> usize {
    p.clamp(0, len as isize - 1) as usize
}

/// Generate a normalized 1D Gaussian kernel of a fixed size.
///
/// A non-positive `sigma` is derived from the kernel size as
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
///
/// # Arguments
/// * `size` - Number of taps (odd)
/// * `sigma` - Standard deviation, or `<= 0` for the derived value
///
/// # Returns
/// Normalized kernel as `Vec<f32>`
pub fn gaussian_kernel_1d(size: usize, sigma: f64) -> Vec<f32> {
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8
    };
    let center = (size as f64 - 1.0) * 0.5;
    let scale = -0.5 / (sigma * sigma);

    let weights: Vec<f64> = (0..size)
        .map(|i| {
            let x = i as f64 - center;
            (scale * x * x).exp()
        })
        .collect();

    // Normalize
    let sum: f64 = weights.iter().sum();
    weights.iter().map(|w| (w / sum) as f32).collect()
}

/// Apply a separable filter (horizontal taps then vertical taps) to a u8 image.
///
/// Intermediate values stay in f32; the result is rounded and clamped to
/// 0-255. Borders use reflect-101.
pub fn separable_filter_u8(input: ArrayView3<u8>, kernel_x: &[f32], kernel_y: &[f32]) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let half_x = (kernel_x.len() / 2) as isize;
    let half_y = (kernel_y.len() / 2) as isize;

    // Pass 1: horizontal
    let mut temp = Array3::<f32>::zeros((height, width, channels));
    temp.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in kernel_x.iter().enumerate() {
                        let sx = reflect_101(x as isize + ki as isize - half_x, width);
                        sum += input[[y, sx, c]] as f32 * kv;
                    }
                    row[[x, c]] = sum;
                }
            }
        });

    // Pass 2: vertical
    let mut output = Array3::<u8>::zeros((height, width, channels));
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in kernel_y.iter().enumerate() {
                        let sy = reflect_101(y as isize + ki as isize - half_y, height);
                        sum += temp[[sy, x, c]] * kv;
                    }
                    row[[x, c]] = sum.round().clamp(0.0, 255.0) as u8;
                }
            }
        });

    output
}

/// Correlate a u8 image with a fixed N×N integer kernel into 16-bit signed
/// samples.
///
/// The kernel is applied without flipping, anchored at `(N / 2, N / 2)`, so
/// a 2×2 kernel reads the pixel and its up/left neighbours. Borders use
/// reflect-101. Sums are saturated to the i16 range.
pub fn correlate_i16<const N: usize>(input: ArrayView3<u8>, kernel: &[[i32; N]; N]) -> Array3<i16> {
    let (height, width, channels) = input.dim();
    let anchor = (N / 2) as isize;

    let mut output = Array3::<i16>::zeros((height, width, channels));
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0i32;
                    for (ky, kernel_row) in kernel.iter().enumerate() {
                        let sy = reflect_101(y as isize + ky as isize - anchor, height);
                        for (kx, &kv) in kernel_row.iter().enumerate() {
                            if kv == 0 {
                                continue;
                            }
                            let sx = reflect_101(x as isize + kx as isize - anchor, width);
                            sum += input[[sy, sx, c]] as i32 * kv;
                        }
                    }
                    row[[x, c]] = sum.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
                }
            }
        });

    output
}

/// Combine two signed gradient images into a displayable edge map.
///
/// Each gradient is converted to `min(|g|, 255)` first, then the pair is
/// blended with equal weights: `round(0.5 * |gx| + 0.5 * |gy|)`. Halves are
/// rounded to even.
pub fn combine_gradients(grad_x: &Array3<i16>, grad_y: &Array3<i16>) -> Array3<u8> {
    let mut output = Array3::<u8>::zeros(grad_x.raw_dim());
    Zip::from(&mut output)
        .and(grad_x)
        .and(grad_y)
        .par_for_each(|out, &gx, &gy| {
            let ax = (gx as i32).abs().min(255) as f32;
            let ay = (gy as i32).abs().min(255) as f32;
            *out = (0.5 * ax + 0.5 * ay).round_ties_even().clamp(0.0, 255.0) as u8;
        });
    output
}

/// Per-sample `a - b`, clamped at 0 instead of wrapping.
pub fn saturating_sub(a: ArrayView3<u8>, b: ArrayView3<u8>) -> Array3<u8> {
    let mut output = Array3::<u8>::zeros(a.raw_dim());
    Zip::from(&mut output)
        .and(&a)
        .and(&b)
        .for_each(|out, &va, &vb| *out = va.saturating_sub(vb));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_101_mirrors_without_repeating_edge() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(6, 5), 2);
        assert_eq!(reflect_101(3, 5), 3);
    }

    #[test]
    fn test_reflect_101_tiny_axis() {
        // Kernel half-width larger than the image
        assert_eq!(reflect_101(-7, 1), 0);
        assert_eq!(reflect_101(-7, 2), 1);
        assert!(reflect_101(9, 3) < 3);
    }

    #[test]
    fn test_replicate_clamps() {
        assert_eq!(replicate(-3, 4), 0);
        assert_eq!(replicate(7, 4), 3);
    }

    #[test]
    fn test_gaussian_kernel_normalized_and_symmetric() {
        let k = gaussian_kernel_1d(15, 0.0);
        assert_eq!(k.len(), 15);
        let sum: f32 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..7 {
            assert!((k[i] - k[14 - i]).abs() < 1e-7);
        }
        assert!(k[7] > k[6]);
    }

    #[test]
    fn test_correlate_roberts_anchor() {
        // Single bright pixel at (1, 1); kernel [[1,0],[0,-1]] reads (y-1,x-1) - (y,x)
        let mut img = Array3::<u8>::zeros((3, 3, 1));
        img[[1, 1, 0]] = 100;
        let g = correlate_i16(img.view(), &[[1, 0], [0, -1]]);
        assert_eq!(g[[1, 1, 0]], -100);
        assert_eq!(g[[2, 2, 0]], 100);
        assert_eq!(g[[0, 1, 0]], 0);
    }

    #[test]
    fn test_correlate_keeps_negative_values() {
        let mut img = Array3::<u8>::zeros((3, 3, 1));
        for y in 0..3 {
            img[[y, 0, 0]] = 255;
        }
        let g = correlate_i16(img.view(), &[[-1, 0, 1], [-1, 0, 1], [-1, 0, 1]]);
        assert_eq!(g[[1, 1, 0]], -765);
    }

    #[test]
    fn test_combine_gradients_saturates_each_side() {
        let gx = Array3::<i16>::from_elem((1, 1, 1), -765);
        let gy = Array3::<i16>::from_elem((1, 1, 1), 3);
        let out = combine_gradients(&gx, &gy);
        // 0.5 * 255 + 0.5 * 3 = 129
        assert_eq!(out[[0, 0, 0]], 129);
    }

    #[test]
    fn test_combine_gradients_rounds_half_to_even() {
        let gx = Array3::<i16>::from_elem((1, 2, 1), 1);
        let gy = Array3::<i16>::from_elem((1, 2, 1), 2);
        // 1.5 rounds to 2
        assert_eq!(combine_gradients(&gx, &gy)[[0, 0, 0]], 2);
        let gx = Array3::<i16>::from_elem((1, 1, 1), 2);
        let gy = Array3::<i16>::from_elem((1, 1, 1), 3);
        // 2.5 rounds to 2
        assert_eq!(combine_gradients(&gx, &gy)[[0, 0, 0]], 2);
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let a = Array3::<u8>::from_elem((1, 2, 1), 10);
        let mut b = Array3::<u8>::from_elem((1, 2, 1), 4);
        b[[0, 1, 0]] = 200;
        let out = saturating_sub(a.view(), b.view());
        assert_eq!(out[[0, 0, 0]], 6);
        assert_eq!(out[[0, 1, 0]], 0);
    }

    #[test]
    fn test_separable_identity_kernel() {
        let mut img = Array3::<u8>::zeros((4, 5, 3));
        img[[2, 3, 1]] = 77;
        let out = separable_filter_u8(img.view(), &[1.0], &[1.0]);
        assert_eq!(out, img);
    }
}
