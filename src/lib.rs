//! Filter Engine
//!
//! Classical image filters over 8-bit images, with Python bindings via PyO3
//! and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Filters operate on the working layout:
//! - **BGR**: (height, width, 3) - blue, green, red
//! - **Grayscale**: (height, width, 1) - single channel
//!
//! Decoded images (RGB, RGBA, grayscale) are brought into the working layout
//! with [`colorspace::to_working`] and back with [`colorspace::to_display`].
//!
//! ## Filters
//! LPF, HPF, MEAN, MEDIAN, Roberts, Prewitt, Sobel, Erosion, Dilation,
//! Open, Close, Hough Circles and Segmentation Thresholding, selected by
//! [`FilterId`] or by exact name through [`apply`].
//!
//! ```ignore
//! let working = filter_engine::colorspace::to_working(decoded.view())?;
//! let edges = filter_engine::apply(working.view(), "Sobel")?;
//! ```

pub mod colorspace;
pub mod engine;
pub mod error;
pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use engine::{apply, apply_filter, FilterId};
pub use error::{FilterError, Result};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::colorspace;
    use crate::engine::{self, FilterId};
    use crate::error::FilterError;

    fn to_py_err(err: FilterError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // Engine
    // ========================================================================

    /// Apply a filter by name to a BGR (H, W, 3) or grayscale (H, W, 1) u8
    /// image.
    ///
    /// Raises ValueError for unknown names or unsupported shapes.
    #[pyfunction]
    pub fn apply_filter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        name: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        let result = engine::apply(input, name).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Names of all filters, in menu order.
    #[pyfunction]
    pub fn filter_names() -> Vec<&'static str> {
        FilterId::names().collect()
    }

    // ========================================================================
    // Colour space
    // ========================================================================

    /// Convert a decoded RGB, RGBA or grayscale image to the BGR working
    /// layout.
    #[pyfunction]
    pub fn to_working<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = colorspace::to_working(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Convert a working-layout image back to RGB.
    #[pyfunction]
    pub fn to_display<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = colorspace::to_display(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    #[pymodule]
    pub fn filter_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(apply_filter, m)?)?;
        m.add_function(wrap_pyfunction!(filter_names, m)?)?;
        m.add_function(wrap_pyfunction!(to_working, m)?)?;
        m.add_function(wrap_pyfunction!(to_display, m)?)?;
        Ok(())
    }
}
