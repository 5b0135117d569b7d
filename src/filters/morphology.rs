//! Morphology filters: Erode, Dilate, Open, Close.
//!
//! Each channel is processed on its own with a binary structuring element.
//! Samples outside the image never take part in the min/max, so borders
//! neither erode nor grow regions.

use ndarray::{Array2, Array3, ArrayView3, Axis};
use rayon::prelude::*;

/// Side length of the structuring element used by the engine.
pub const STRUCTURING_ELEMENT_SIZE: usize = 5;

/// Binary neighbourhood mask, anchored at its center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    mask: Array2<bool>,
}

impl StructuringElement {
    /// All-ones square of odd side `size`.
    pub fn square(size: usize) -> Self {
        StructuringElement {
            mask: Array2::from_elem((size, size), true),
        }
    }

    pub fn size(&self) -> (usize, usize) {
        self.mask.dim()
    }

    /// Offsets `(dy, dx)` of the active taps relative to the anchor.
    fn offsets(&self) -> Vec<(isize, isize)> {
        let (rows, cols) = self.mask.dim();
        let (ay, ax) = ((rows / 2) as isize, (cols / 2) as isize);
        self.mask
            .indexed_iter()
            .filter(|(_, &on)| on)
            .map(|((r, c), _)| (r as isize - ay, c as isize - ax))
            .collect()
    }
}

impl Default for StructuringElement {
    fn default() -> Self {
        StructuringElement::square(STRUCTURING_ELEMENT_SIZE)
    }
}

#[derive(Clone, Copy)]
enum Rank {
    Min,
    Max,
}

fn rank_filter(input: ArrayView3<u8>, element: &StructuringElement, rank: Rank) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let offsets = element.offsets();

    let mut output = Array3::<u8>::zeros((height, width, channels));
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut acc = match rank {
                        Rank::Min => u8::MAX,
                        Rank::Max => u8::MIN,
                    };
                    for &(dy, dx) in &offsets {
                        let sy = y as isize + dy;
                        let sx = x as isize + dx;
                        if sy < 0 || sy >= height as isize || sx < 0 || sx >= width as isize {
                            continue;
                        }
                        let v = input[[sy as usize, sx as usize, c]];
                        acc = match rank {
                            Rank::Min => acc.min(v),
                            Rank::Max => acc.max(v),
                        };
                    }
                    row[[x, c]] = acc;
                }
            }
        });

    output
}

/// Apply erosion to image - u8 version.
///
/// Erode takes the minimum value in the neighborhood,
/// making dark regions grow and bright regions shrink.
///
/// # Arguments
/// * `input` - Image with any channel count (height, width, channels)
/// * `element` - Structuring element
///
/// # Returns
/// Eroded image with same channel count
pub fn erode_u8(input: ArrayView3<u8>, element: &StructuringElement) -> Array3<u8> {
    rank_filter(input, element, Rank::Min)
}

/// Apply dilation to image - u8 version.
///
/// Dilate takes the maximum value in the neighborhood,
/// making bright regions grow and dark regions shrink.
pub fn dilate_u8(input: ArrayView3<u8>, element: &StructuringElement) -> Array3<u8> {
    rank_filter(input, element, Rank::Max)
}

/// Morphological opening (erode then dilate).
///
/// Removes bright features smaller than the structuring element.
pub fn open_u8(input: ArrayView3<u8>, element: &StructuringElement) -> Array3<u8> {
    let eroded = erode_u8(input, element);
    dilate_u8(eroded.view(), element)
}

/// Morphological closing (dilate then erode).
///
/// Fills small dark holes while preserving larger dark regions.
pub fn close_u8(input: ArrayView3<u8>, element: &StructuringElement) -> Array3<u8> {
    let dilated = dilate_u8(input, element);
    erode_u8(dilated.view(), element)
}
