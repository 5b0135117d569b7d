//! Error type shared by the engine, the colour-space adapter and the bindings.

use ndarray::ArrayView3;

pub type Result<T> = std::result::Result<T, FilterError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// Image is empty or carries a channel count the caller cannot accept.
    #[error("invalid image: {width}x{height} with {channels} channel(s)")]
    InvalidImage {
        width: usize,
        height: usize,
        channels: usize,
    },

    /// Flat pixel buffer does not match the stated dimensions.
    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Filter name outside the enumerated set.
    #[error("unknown filter: {0:?}")]
    UnknownFilter(String),

    /// Decoder failure while loading a file.
    #[cfg(feature = "image-io")]
    #[error("failed to decode image: {0}")]
    Decode(String),
}

impl FilterError {
    pub(crate) fn invalid(image: &ArrayView3<u8>) -> Self {
        let (height, width, channels) = image.dim();
        FilterError::InvalidImage {
            width,
            height,
            channels,
        }
    }
}

/// Reject empty images and channel counts outside `allowed`.
pub fn validate_image(image: &ArrayView3<u8>, allowed: &[usize]) -> Result<()> {
    let (height, width, channels) = image.dim();
    if height == 0 || width == 0 || !allowed.contains(&channels) {
        return Err(FilterError::invalid(image));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_validate_rejects_empty() {
        let img = Array3::<u8>::zeros((0, 4, 3));
        let err = validate_image(&img.view(), &[3]).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidImage {
                width: 4,
                height: 0,
                channels: 3
            }
        );
    }

    #[test]
    fn test_validate_rejects_alpha() {
        let img = Array3::<u8>::zeros((2, 2, 4));
        assert!(validate_image(&img.view(), &[1, 3]).is_err());
        assert!(validate_image(&img.view(), &[1, 3, 4]).is_ok());
    }

    #[test]
    fn test_unknown_filter_message() {
        let err = FilterError::UnknownFilter("Blur".into());
        assert_eq!(err.to_string(), "unknown filter: \"Blur\"");
    }
}
