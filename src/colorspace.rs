//! Conversion between decoded images (RGB order) and the BGR working layout
//! the filters are defined over.
//!
//! Only the order of the colour channels changes; sample values never do.

use ndarray::{s, Array3, ArrayView3, Axis};

use crate::error::{validate_image, FilterError, Result};
use crate::filters::grayscale::gray_to_bgr;

/// Normalize a decoded image into the working layout.
///
/// - RGB (3 channels) is reordered to BGR
/// - RGBA (4 channels) drops alpha, then reorders
/// - Grayscale (1 channel) is replicated into 3 channels
///
/// # Errors
/// `InvalidImage` for empty images or other channel counts.
pub fn to_working(decoded: ArrayView3<u8>) -> Result<Array3<u8>> {
    validate_image(&decoded, &[1, 3, 4])?;
    match decoded.dim().2 {
        1 => Ok(gray_to_bgr(decoded)),
        _ => Ok(swap_red_blue(decoded.slice(s![.., .., 0..3]))),
    }
}

/// Convert a working-layout image back to RGB for display.
///
/// Single-channel results are widened by replication.
///
/// # Errors
/// `InvalidImage` for empty images or channel counts other than 1 and 3.
pub fn to_display(image: ArrayView3<u8>) -> Result<Array3<u8>> {
    validate_image(&image, &[1, 3])?;
    match image.dim().2 {
        1 => Ok(gray_to_bgr(image)),
        _ => Ok(swap_red_blue(image)),
    }
}

/// Build an image from a flat interleaved buffer of `width * height *
/// channels` bytes.
pub fn from_raw(data: &[u8], width: usize, height: usize, channels: usize) -> Result<Array3<u8>> {
    let expected = width * height * channels;
    if data.len() != expected {
        return Err(FilterError::BufferLength {
            expected,
            actual: data.len(),
        });
    }
    Array3::from_shape_vec((height, width, channels), data.to_vec()).map_err(|_| {
        FilterError::InvalidImage {
            width,
            height,
            channels,
        }
    })
}

/// Decode an image file into the working layout.
///
/// Any format the `image` crate was built with is accepted; palette,
/// grayscale and alpha variants are normalized to 8-bit RGB first.
#[cfg(feature = "image-io")]
pub fn load_working(path: &std::path::Path) -> Result<Array3<u8>> {
    let img = image::open(path)
        .map_err(|e| FilterError::Decode(format!("{}: {e}", path.display())))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let rgb = from_raw(&img.into_raw(), width, height, 3)?;
    to_working(rgb.view())
}

/// Convert a working-layout image into an `RgbImage` for display.
#[cfg(feature = "image-io")]
pub fn to_rgb_image(image: ArrayView3<u8>) -> Result<image::RgbImage> {
    let rgb = to_display(image)?;
    let (height, width, _) = rgb.dim();
    let (data, _) = rgb.into_raw_vec_and_offset();
    image::RgbImage::from_raw(width as u32, height as u32, data).ok_or(
        FilterError::InvalidImage {
            width,
            height,
            channels: 3,
        },
    )
}

fn swap_red_blue(input: ArrayView3<u8>) -> Array3<u8> {
    let mut output = input.to_owned();
    output.invert_axis(Axis(2));
    // invert_axis only flips strides; force a standard-layout copy
    output.as_standard_layout().into_owned()
}
