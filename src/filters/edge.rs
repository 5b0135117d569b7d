//! Edge detection filters: Roberts, Prewitt, Sobel and the Canny edge map.
//!
//! The three gradient operators share one recipe: correlate the image with a
//! fixed x/y kernel pair into 16-bit signed samples, then blend the absolute
//! responses with [`combine_gradients`]. Every channel is processed on its
//! own, so a colour input yields a colour edge map.
//!
//! The Canny detector works on a single-channel image and backs the circle
//! search in [`super::hough`].

use std::collections::VecDeque;

use ndarray::{Array2, Array3, ArrayView3, Axis};

use super::core::{combine_gradients, correlate_i16};

// ============================================================================
// Gradient operators
// ============================================================================

/// Roberts cross kernels (2×2, anchored at the lower-right tap).
pub const ROBERTS_X: [[i32; 2]; 2] = [[1, 0], [0, -1]];
pub const ROBERTS_Y: [[i32; 2]; 2] = [[0, 1], [-1, 0]];

/// Prewitt kernels.
pub const PREWITT_X: [[i32; 3]; 3] = [[1, 1, 1], [0, 0, 0], [-1, -1, -1]];
pub const PREWITT_Y: [[i32; 3]; 3] = [[-1, 0, 1], [-1, 0, 1], [-1, 0, 1]];

/// Build the 3×3 Sobel pair `(d/dx, d/dy)`.
///
/// The smoothing taps come from repeated convolution of `[1, 1]`
/// (giving `[1, 2, 1]`), the derivative taps are `[-1, 0, 1]`. Each kernel is
/// the outer product of one with the other.
pub fn sobel_kernels() -> ([[i32; 3]; 3], [[i32; 3]; 3]) {
    let mut smooth = vec![1i32];
    for _ in 0..2 {
        let mut next = vec![0i32; smooth.len() + 1];
        for (i, &s) in smooth.iter().enumerate() {
            next[i] += s;
            next[i + 1] += s;
        }
        smooth = next;
    }
    let deriv = [-1i32, 0, 1];

    let mut kernel_x = [[0i32; 3]; 3];
    let mut kernel_y = [[0i32; 3]; 3];
    for row in 0..3 {
        for col in 0..3 {
            kernel_x[row][col] = smooth[row] * deriv[col];
            kernel_y[row][col] = deriv[row] * smooth[col];
        }
    }
    (kernel_x, kernel_y)
}

/// Roberts cross edge detector.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
///
/// # Returns
/// Edge map with same shape
pub fn roberts_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let gx = correlate_i16(input, &ROBERTS_X);
    let gy = correlate_i16(input, &ROBERTS_Y);
    combine_gradients(&gx, &gy)
}

/// Prewitt edge detector.
pub fn prewitt_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let gx = correlate_i16(input, &PREWITT_X);
    let gy = correlate_i16(input, &PREWITT_Y);
    combine_gradients(&gx, &gy)
}

/// Sobel edge detector (3×3).
pub fn sobel_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (kernel_x, kernel_y) = sobel_kernels();
    let gx = correlate_i16(input, &kernel_x);
    let gy = correlate_i16(input, &kernel_y);
    combine_gradients(&gx, &gy)
}

// ============================================================================
// Canny
// ============================================================================

/// Output of [`canny_u8`]: the binary edge mask plus the Sobel gradients it
/// was derived from.
#[derive(Debug, Clone)]
pub struct EdgeMap {
    pub edges: Array2<bool>,
    pub grad_x: Array2<i16>,
    pub grad_y: Array2<i16>,
}

impl EdgeMap {
    /// Number of edge pixels.
    pub fn count(&self) -> usize {
        self.edges.iter().filter(|&&e| e).count()
    }
}

/// tan(22.5°) and tan(67.5°), bounds of the gradient direction sectors.
const TAN_22_5: f32 = 0.414_213_56;
const TAN_67_5: f32 = 2.414_213_6;

/// Canny edge detection on a single-channel image.
///
/// Algorithm:
/// - 3×3 Sobel gradients, L1 magnitude `|dx| + |dy|`
/// - Non-maximum suppression along the quantized gradient direction
/// - Hysteresis: pixels above `high` seed edges, 8-connected pixels above
///   `low` extend them
///
/// The outermost pixel ring is never marked.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 1)
/// * `low` - Lower hysteresis threshold
/// * `high` - Upper hysteresis threshold
pub fn canny_u8(input: ArrayView3<u8>, low: i32, high: i32) -> EdgeMap {
    let (height, width, _) = input.dim();
    let (kernel_x, kernel_y) = sobel_kernels();
    let plane = input.slice(ndarray::s![.., .., 0..1]);
    let grad_x = correlate_i16(plane, &kernel_x).remove_axis(Axis(2));
    let grad_y = correlate_i16(plane, &kernel_y).remove_axis(Axis(2));

    let mut edges = Array2::<bool>::from_elem((height, width), false);
    if height < 3 || width < 3 {
        return EdgeMap { edges, grad_x, grad_y };
    }

    let magnitude = ndarray::Zip::from(&grad_x)
        .and(&grad_y)
        .map_collect(|&dx, &dy| (dx as i32).abs() + (dy as i32).abs());

    // Non-maximum suppression
    let mut candidate = Array2::<bool>::from_elem((height, width), false);
    let mut queue = VecDeque::new();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let m = magnitude[[y, x]];
            if m <= low {
                continue;
            }

            let dx = grad_x[[y, x]] as i32;
            let dy = grad_y[[y, x]] as i32;
            let ax = dx.abs() as f32;
            let ay = dy.abs() as f32;

            let is_max = if ay < ax * TAN_22_5 {
                m > magnitude[[y, x - 1]] && m >= magnitude[[y, x + 1]]
            } else if ay > ax * TAN_67_5 {
                m > magnitude[[y - 1, x]] && m >= magnitude[[y + 1, x]]
            } else {
                let s: isize = if (dx ^ dy) < 0 { -1 } else { 1 };
                let prev = magnitude[[y - 1, (x as isize - s) as usize]];
                let next = magnitude[[y + 1, (x as isize + s) as usize]];
                m > prev && m > next
            };

            if !is_max {
                continue;
            }
            if m > high {
                edges[[y, x]] = true;
                queue.push_back((y, x));
            } else {
                candidate[[y, x]] = true;
            }
        }
    }

    // Hysteresis
    while let Some((y, x)) = queue.pop_front() {
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                if candidate[[ny, nx]] && !edges[[ny, nx]] {
                    edges[[ny, nx]] = true;
                    queue.push_back((ny, nx));
                }
            }
        }
    }

    EdgeMap { edges, grad_x, grad_y }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step(height: usize, width: usize, split: usize, channels: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, channels));
        for y in 0..height {
            for x in split..width {
                for c in 0..channels {
                    img[[y, x, c]] = 200;
                }
            }
        }
        img
    }

    #[test]
    fn test_sobel_kernels_are_standard() {
        let (kx, ky) = sobel_kernels();
        assert_eq!(kx, [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]]);
        assert_eq!(ky, [[-1, -2, -1], [0, 0, 0], [1, 2, 1]]);
    }

    #[test]
    fn test_gradient_filters_flat_is_zero() {
        let img = Array3::<u8>::from_elem((6, 7, 3), 140);
        assert!(roberts_u8(img.view()).iter().all(|&v| v == 0));
        assert!(prewitt_u8(img.view()).iter().all(|&v| v == 0));
        assert!(sobel_u8(img.view()).iter().all(|&v| v == 0));
    }

    #[test]
    fn test_sobel_u8_detects_vertical_edge() {
        let img = vertical_step(5, 6, 3, 3);
        let result = sobel_u8(img.view());

        // |gx| = 4 * 200 saturates to 255, gy = 0 -> round(127.5) = 128
        assert_eq!(result[[2, 2, 0]], 128);
        assert_eq!(result[[2, 3, 1]], 128);
        assert_eq!(result[[2, 0, 2]], 0);
    }

    #[test]
    fn test_prewitt_u8_negative_side_does_not_wrap() {
        // Bright-to-dark edge produces negative gx; must still be bright
        let mut img = Array3::<u8>::from_elem((5, 6, 1), 200);
        for y in 0..5 {
            for x in 3..6 {
                img[[y, x, 0]] = 0;
            }
        }
        let result = prewitt_u8(img.view());
        // |gy| = 600 saturates to 255, gx = 0
        assert_eq!(result[[2, 2, 0]], 128);
    }

    #[test]
    fn test_roberts_u8_diagonal_response() {
        let mut img = Array3::<u8>::zeros((4, 4, 1));
        img[[1, 1, 0]] = 100;
        let result = roberts_u8(img.view());
        // gx = -100, gy = 0 -> 50
        assert_eq!(result[[1, 1, 0]], 50);
        // Right neighbour: gx = 0, gy = I(0,2) - I(1,1) = -100
        assert_eq!(result[[1, 2, 0]], 50);
        assert_eq!(result[[3, 3, 0]], 0);
    }

    #[test]
    fn test_canny_marks_single_line_on_step() {
        let img = vertical_step(9, 10, 5, 1);
        let map = canny_u8(img.view(), 25, 50);
        for y in 1..8 {
            let row: Vec<usize> = (0..10).filter(|&x| map.edges[[y, x]]).collect();
            assert_eq!(row.len(), 1, "row {y} should carry one edge pixel, got {row:?}");
            assert!(row[0] == 4 || row[0] == 5);
        }
        assert!(!map.edges[[0, 4]]);
    }

    #[test]
    fn test_canny_flat_has_no_edges() {
        let img = Array3::<u8>::from_elem((8, 8, 1), 77);
        let map = canny_u8(img.view(), 25, 50);
        assert_eq!(map.count(), 0);
    }

    #[test]
    fn test_canny_tiny_image() {
        let img = Array3::<u8>::from_elem((2, 2, 1), 77);
        let map = canny_u8(img.view(), 25, 50);
        assert_eq!(map.edges.dim(), (2, 2));
        assert_eq!(map.count(), 0);
    }
}
