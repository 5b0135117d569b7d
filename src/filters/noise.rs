//! Noise removal: per-channel median (rank) filter.
//!
//! Removes salt-and-pepper noise while preserving edges. Borders replicate
//! the nearest edge pixel.

use ndarray::{Array3, ArrayView3, Axis};
use rayon::prelude::*;

use super::core::replicate;

/// Window side length of the median filter.
pub const MEDIAN_WINDOW: usize = 5;

/// Apply median filter - u8 version.
///
/// # Arguments
/// * `input` - Image with any channel count (height, width, channels)
/// * `window` - Window side length (odd)
///
/// # Returns
/// Median-filtered image with same channel count
pub fn median_u8(input: ArrayView3<u8>, window: usize) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let radius = (window / 2) as isize;
    let window_size = window * window;

    let mut output = Array3::<u8>::zeros((height, width, channels));
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            let mut values: Vec<u8> = Vec::with_capacity(window_size);
            for x in 0..width {
                for c in 0..channels {
                    values.clear();
                    for dy in -radius..=radius {
                        let sy = replicate(y as isize + dy, height);
                        for dx in -radius..=radius {
                            let sx = replicate(x as isize + dx, width);
                            values.push(input[[sy, sx, c]]);
                        }
                    }

                    values.sort_unstable();
                    row[[x, c]] = values[values.len() / 2];
                }
            }
        });

    output
}
