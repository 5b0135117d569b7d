//! Binary segmentation by a fixed global threshold.

use ndarray::{Array3, ArrayView3};

use super::grayscale::{bgr_to_gray, gray_to_bgr};

/// Samples at or above this value become foreground.
pub const SEGMENTATION_THRESHOLD: u8 = 128;
/// Foreground value.
pub const SEGMENTATION_MAX: u8 = 255;

/// Apply binary threshold - u8 version.
///
/// Every sample `>= threshold` becomes `max_value`, everything else 0.
/// Channels are thresholded independently.
pub fn binary_threshold_u8(input: ArrayView3<u8>, threshold: u8, max_value: u8) -> Array3<u8> {
    input.mapv(|v| if v >= threshold { max_value } else { 0 })
}

/// Segmentation filter: grayscale, threshold at 128, replicate to 3
/// channels.
pub fn segmentation_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let gray = bgr_to_gray(input);
    let binary = binary_threshold_u8(gray.view(), SEGMENTATION_THRESHOLD, SEGMENTATION_MAX);
    gray_to_bgr(binary.view())
}
