//! Smoothing filters: Gaussian (low-pass), high-pass residual and box (mean).
//!
//! All functions work on any channel count and process channels
//! independently. Borders use reflect-101.

use ndarray::{Array3, ArrayView3, Axis};
use rayon::prelude::*;

use super::core::{gaussian_kernel_1d, reflect_101, saturating_sub, separable_filter_u8};

/// Kernel size of the low-pass filter.
pub const LPF_KERNEL_SIZE: usize = 15;
/// Kernel size of the mean filter.
pub const MEAN_KERNEL_SIZE: usize = 5;

/// Apply Gaussian blur - u8 version.
///
/// Uses separable 2-pass convolution with a fixed number of taps.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `kernel_size` - Taps per axis (odd)
/// * `sigma` - Standard deviation; `0.0` derives it from `kernel_size`
///
/// # Returns
/// Blurred image with same dimensions
pub fn gaussian_blur_u8(input: ArrayView3<u8>, kernel_size: usize, sigma: f64) -> Array3<u8> {
    let kernel = gaussian_kernel_1d(kernel_size, sigma);
    separable_filter_u8(input, &kernel, &kernel)
}

/// Low-pass filter: 15×15 Gaussian with derived sigma.
pub fn low_pass_u8(input: ArrayView3<u8>) -> Array3<u8> {
    gaussian_blur_u8(input, LPF_KERNEL_SIZE, 0.0)
}

/// High-pass filter: the input minus its low-pass result, saturating at 0.
pub fn high_pass_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let low = low_pass_u8(input);
    saturating_sub(input, low.view())
}

/// Apply box blur - u8 version.
///
/// Every output sample is the rounded mean of the `kernel_size²`
/// neighbourhood, with reflect-101 borders so the divisor is constant.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `kernel_size` - Window side length (odd)
///
/// # Returns
/// Blurred image with same dimensions
pub fn box_blur_u8(input: ArrayView3<u8>, kernel_size: usize) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let r = (kernel_size / 2) as isize;
    let count = (kernel_size * kernel_size) as u32;

    let mut output = Array3::<u8>::zeros((height, width, channels));
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0u32;
                    for dy in -r..=r {
                        let sy = reflect_101(y as isize + dy, height);
                        for dx in -r..=r {
                            let sx = reflect_101(x as isize + dx, width);
                            sum += input[[sy, sx, c]] as u32;
                        }
                    }
                    row[[x, c]] = ((sum + count / 2) / count) as u8;
                }
            }
        });

    output
}

/// Mean filter: 5×5 box blur.
pub fn mean_u8(input: ArrayView3<u8>) -> Array3<u8> {
    box_blur_u8(input, MEAN_KERNEL_SIZE)
}
