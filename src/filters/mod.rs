//! Filter primitives composed by the engine.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | BGR8 | (H, W, 3) | u8 | Working layout: blue, green, red, 0-255 |
//!
//! Channel count is inferred from the array shape. Per-channel filters
//! (smoothing, gradients, morphology, median) accept any count; the
//! grayscale-based ones (Hough, segmentation) expect BGR or grayscale.
//!
//! ## Architecture
//!
//! - **Pure** - inputs are borrowed views, outputs are freshly allocated
//! - **Fixed kernels** - sizes are constants of each module
//! - **Overflow-free** - gradients are computed in 16-bit signed samples
//! - **Thread-safe** - row passes run on Rayon without shared state
//!
//! ## Filter Categories
//!
//! - **Smoothing**: Gaussian low-pass, high-pass residual, box mean
//! - **Noise**: median
//! - **Edge detection**: Roberts, Prewitt, Sobel, Canny
//! - **Morphology**: erode, dilate, open, close
//! - **Detection**: Hough circles
//! - **Segmentation**: binary threshold

pub mod core;
pub mod grayscale;
pub mod blur;
pub mod noise;
pub mod edge;
pub mod morphology;
pub mod hough;
pub mod threshold;
