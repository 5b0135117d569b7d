//! Grayscale conversion between the BGR working layout and single-channel
//! images.
//!
//! Uses ITU-R BT.601 luma weights in 14-bit fixed point, so a pixel whose
//! three channels are equal converts to exactly that value.

use ndarray::{Array3, ArrayView3, Axis};

/// BT.601 luma weights scaled by 2^14 (sum is exactly 16384).
const LUMA_B: u32 = 1868;
const LUMA_G: u32 = 9617;
const LUMA_R: u32 = 4899;
const LUMA_SHIFT: u32 = 14;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

/// Luma of a single BGR pixel.
#[inline]
pub fn luma_bgr(b: u8, g: u8, r: u8) -> u8 {
    ((b as u32 * LUMA_B + g as u32 * LUMA_G + r as u32 * LUMA_R + LUMA_ROUND) >> LUMA_SHIFT) as u8
}

/// Convert a BGR image to a single-channel grayscale image.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3) in BGR order, or
///   (height, width, 1) which is returned as a copy
///
/// # Returns
/// Array of shape (height, width, 1)
pub fn bgr_to_gray(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    if channels == 1 {
        return input.to_owned();
    }

    let mut output = Array3::<u8>::zeros((height, width, 1));
    for y in 0..height {
        for x in 0..width {
            output[[y, x, 0]] = luma_bgr(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
        }
    }
    output
}

/// Widen a single-channel image to 3 channels by replication.
pub fn gray_to_bgr(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let gray = input.index_axis(Axis(2), 0);
    let mut output = Array3::<u8>::zeros((height, width, 3));
    for mut plane in output.axis_iter_mut(Axis(2)) {
        plane.assign(&gray);
    }
    output
}
