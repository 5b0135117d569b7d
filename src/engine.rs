//! Filter dispatch: maps a filter name to its primitive pipeline.
//!
//! The engine is stateless. Every call borrows the input and returns a new
//! image, so concurrent calls on shared inputs are safe.

use std::fmt;
use std::str::FromStr;

use log::debug;
use ndarray::{Array3, ArrayView3};

use crate::error::{validate_image, FilterError, Result};
use crate::filters::{blur, edge, hough, morphology, noise, threshold};
use crate::filters::morphology::StructuringElement;

/// Identifier of one of the supported filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterId {
    /// Gaussian blur, 15x15, sigma derived from the size.
    LowPass,
    /// Input minus its low-pass, saturated at 0.
    HighPass,
    /// 5x5 box mean.
    Mean,
    /// 5x5 median.
    Median,
    Roberts,
    Prewitt,
    Sobel,
    Erosion,
    Dilation,
    Open,
    Close,
    /// Circle detection drawn as green rings.
    HoughCircles,
    /// Grayscale binary threshold at 128.
    SegmentationThresholding,
}

impl FilterId {
    /// Every filter, in menu order.
    pub const ALL: [FilterId; 13] = [
        FilterId::LowPass,
        FilterId::HighPass,
        FilterId::Mean,
        FilterId::Median,
        FilterId::Roberts,
        FilterId::Prewitt,
        FilterId::Sobel,
        FilterId::Erosion,
        FilterId::Dilation,
        FilterId::Open,
        FilterId::Close,
        FilterId::HoughCircles,
        FilterId::SegmentationThresholding,
    ];

    /// Exact, case-sensitive name accepted by [`FilterId::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            FilterId::LowPass => "LPF",
            FilterId::HighPass => "HPF",
            FilterId::Mean => "MEAN",
            FilterId::Median => "MEDIAN",
            FilterId::Roberts => "Roberts",
            FilterId::Prewitt => "Prewitt",
            FilterId::Sobel => "Sobel",
            FilterId::Erosion => "Erosion",
            FilterId::Dilation => "Dilation",
            FilterId::Open => "Open",
            FilterId::Close => "Close",
            FilterId::HoughCircles => "Hough Circles",
            FilterId::SegmentationThresholding => "Segmentation Thresholding",
        }
    }

    /// Names of all filters, in menu order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        FilterId::ALL.into_iter().map(FilterId::name)
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterId {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        FilterId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}

/// Apply a filter to a working-layout image.
///
/// # Arguments
/// * `image` - BGR image (height, width, 3) or grayscale (height, width, 1)
/// * `filter` - Filter to run
///
/// # Returns
/// New image of the same height and width. Channel count follows the
/// input, except Hough and segmentation which always return 3 channels.
///
/// # Errors
/// `InvalidImage` when the image is empty or has another channel count.
pub fn apply_filter(image: ArrayView3<u8>, filter: FilterId) -> Result<Array3<u8>> {
    validate_image(&image, &[1, 3])?;
    let (height, width, channels) = image.dim();
    debug!("applying {filter} to {width}x{height}x{channels}");

    let element = StructuringElement::default();
    let output = match filter {
        FilterId::LowPass => blur::low_pass_u8(image),
        FilterId::HighPass => blur::high_pass_u8(image),
        FilterId::Mean => blur::mean_u8(image),
        FilterId::Median => noise::median_u8(image, noise::MEDIAN_WINDOW),
        FilterId::Roberts => edge::roberts_u8(image),
        FilterId::Prewitt => edge::prewitt_u8(image),
        FilterId::Sobel => edge::sobel_u8(image),
        FilterId::Erosion => morphology::erode_u8(image, &element),
        FilterId::Dilation => morphology::dilate_u8(image, &element),
        FilterId::Open => morphology::open_u8(image, &element),
        FilterId::Close => morphology::close_u8(image, &element),
        FilterId::HoughCircles => hough::hough_circles_u8(image),
        FilterId::SegmentationThresholding => threshold::segmentation_u8(image),
    };
    Ok(output)
}

/// Apply a filter selected by name.
///
/// # Errors
/// `UnknownFilter` for names outside [`FilterId::ALL`], otherwise as
/// [`apply_filter`].
pub fn apply(image: ArrayView3<u8>, name: &str) -> Result<Array3<u8>> {
    let filter = name.parse::<FilterId>()?;
    apply_filter(image, filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(height: usize, width: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 3));
        for y in 0..height {
            for x in 0..width {
                img[[y, x, 0]] = (x * 13 % 256) as u8;
                img[[y, x, 1]] = (y * 29 % 256) as u8;
                img[[y, x, 2]] = ((x + y) * 7 % 256) as u8;
            }
        }
        img
    }

    #[test]
    fn test_names_roundtrip() {
        for id in FilterId::ALL {
            assert_eq!(id.name().parse::<FilterId>(), Ok(id));
            assert_eq!(id.to_string(), id.name());
        }
        assert_eq!(FilterId::names().count(), 13);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(
            "lpf".parse::<FilterId>(),
            Err(FilterError::UnknownFilter("lpf".into()))
        );
        assert!("Hough circles".parse::<FilterId>().is_err());
        assert!("".parse::<FilterId>().is_err());
    }

    #[test]
    fn test_apply_unknown_name() {
        let img = gradient_image(4, 4);
        assert_eq!(
            apply(img.view(), "Blur"),
            Err(FilterError::UnknownFilter("Blur".into()))
        );
    }

    #[test]
    fn test_apply_rejects_empty_and_alpha() {
        let empty = Array3::<u8>::zeros((0, 0, 3));
        assert!(matches!(
            apply_filter(empty.view(), FilterId::Mean),
            Err(FilterError::InvalidImage { .. })
        ));
        let rgba = Array3::<u8>::zeros((4, 4, 4));
        assert!(apply_filter(rgba.view(), FilterId::Sobel).is_err());
    }

    #[test]
    fn test_every_filter_preserves_size() {
        let img = gradient_image(17, 23);
        for id in FilterId::ALL {
            let out = apply_filter(img.view(), id).unwrap();
            assert_eq!(out.dim(), (17, 23, 3), "{id}");
        }
    }

    #[test]
    fn test_grayscale_input_channel_counts() {
        let img = Array3::<u8>::from_elem((12, 10, 1), 80);
        for id in FilterId::ALL {
            let out = apply_filter(img.view(), id).unwrap();
            let expected = match id {
                FilterId::HoughCircles | FilterId::SegmentationThresholding => 3,
                _ => 1,
            };
            assert_eq!(out.dim(), (12, 10, expected), "{id}");
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let img = gradient_image(9, 9);
        let copy = img.clone();
        for id in FilterId::ALL {
            let _ = apply_filter(img.view(), id).unwrap();
        }
        assert_eq!(img, copy);
    }

    #[test]
    fn test_single_pixel_image() {
        let img = Array3::<u8>::from_elem((1, 1, 3), 42);
        for id in FilterId::ALL {
            let out = apply_filter(img.view(), id).unwrap();
            assert_eq!(out.dim(), (1, 1, 3), "{id}");
        }
    }
}
