//! WebAssembly exports for the filter engine.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Buffers
//! cross the boundary as flat interleaved RGB bytes; the colour-space
//! adapter is applied on both sides of the filter.

use wasm_bindgen::prelude::*;

use crate::colorspace::{from_raw, to_display, to_working};
use crate::engine::{self, FilterId};
use crate::error::FilterError;

fn to_js_err(err: FilterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// Engine
// ============================================================================

/// Apply a filter by name to an RGB image.
///
/// # Arguments
/// * `data` - Flat array of RGB bytes (length = width * height * 3)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `name` - Exact filter name, e.g. "Sobel"
///
/// # Returns
/// Flat array of RGB bytes of the same dimensions
#[wasm_bindgen]
pub fn apply_filter_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    name: &str,
) -> Result<Vec<u8>, JsValue> {
    let rgb = from_raw(data, width, height, 3).map_err(to_js_err)?;
    let working = to_working(rgb.view()).map_err(to_js_err)?;
    let filtered = engine::apply(working.view(), name).map_err(to_js_err)?;
    let display = to_display(filtered.view()).map_err(to_js_err)?;
    Ok(display.into_raw_vec_and_offset().0)
}

/// Names of all filters, in menu order.
#[wasm_bindgen]
pub fn filter_names_wasm() -> Vec<String> {
    FilterId::names().map(String::from).collect()
}
