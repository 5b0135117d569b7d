//! Circle detection with the Hough gradient method, plus the ring overlay
//! used to visualise detections.
//!
//! ## Algorithm
//!
//! 1. Canny edge map (`high = canny_threshold`, `low = high / 2`) with the
//!    Sobel gradients of the same pass.
//! 2. Every edge pixel votes along its gradient line, in both directions,
//!    for each radius in `[min_radius, max_radius]`. The accumulator has
//!    `1 / dp` of the image resolution.
//! 3. Accumulator cells above `accumulator_threshold` that are local maxima
//!    over their 4-neighbourhood become center candidates, strongest first.
//! 4. A candidate closer than `min_dist` to an accepted circle is dropped.
//!    Otherwise its radius is the one with the most edge pixels at that
//!    distance (±1 px).

use std::cmp::Reverse;

use log::{debug, trace};
use ndarray::{Array2, Array3, ArrayView3};

use super::edge::canny_u8;
use super::grayscale::{bgr_to_gray, gray_to_bgr};
use super::noise::{median_u8, MEDIAN_WINDOW};

/// Overlay colour in BGR order (green).
pub const CIRCLE_COLOR: [u8; 3] = [0, 255, 0];
/// Overlay stroke width in pixels.
pub const CIRCLE_THICKNESS: u32 = 4;

/// Detected circle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub center_x: i32,
    pub center_y: i32,
    pub radius: i32,
}

/// Parameters of the Hough gradient search.
///
/// `Default` is the fixed configuration used by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct HoughCircleParams {
    /// Inverse accumulator resolution (1.2 → accumulator is 1/1.2 the size).
    pub dp: f64,
    /// Minimum distance between accepted centers.
    pub min_dist: f64,
    /// Upper Canny threshold; the lower one is half of it.
    pub canny_threshold: i32,
    /// Votes a center must exceed.
    pub accumulator_threshold: u32,
    pub min_radius: usize,
    pub max_radius: usize,
}

impl Default for HoughCircleParams {
    fn default() -> Self {
        HoughCircleParams {
            dp: 1.2,
            min_dist: 30.0,
            canny_threshold: 50,
            accumulator_threshold: 30,
            min_radius: 15,
            max_radius: 40,
        }
    }
}

/// Find circles in a single-channel image.
///
/// # Arguments
/// * `gray` - Image of shape (height, width, 1), typically denoised
/// * `params` - Search parameters
///
/// # Returns
/// Accepted circles, strongest center first
pub fn detect_circles(gray: ArrayView3<u8>, params: &HoughCircleParams) -> Vec<Circle> {
    let (height, width, _) = gray.dim();
    let low = (params.canny_threshold / 2).max(1);
    let map = canny_u8(gray, low, params.canny_threshold);

    let idp = 1.0 / params.dp;
    let acc_h = (height as f64 * idp).ceil() as usize;
    let acc_w = (width as f64 * idp).ceil() as usize;
    let mut accumulator = Array2::<u32>::zeros((acc_h, acc_w));
    let mut points: Vec<(f64, f64)> = Vec::new();

    // Vote along the gradient line
    for ((y, x), &is_edge) in map.edges.indexed_iter() {
        if !is_edge {
            continue;
        }
        let vx = map.grad_x[[y, x]] as f64;
        let vy = map.grad_y[[y, x]] as f64;
        let mag = (vx * vx + vy * vy).sqrt();
        if mag < 1.0 {
            continue;
        }
        points.push((x as f64, y as f64));

        let (ux, uy) = (vx / mag, vy / mag);
        for sign in [1.0f64, -1.0] {
            for r in params.min_radius..=params.max_radius {
                let cx = (x as f64 + sign * ux * r as f64) * idp;
                let cy = (y as f64 + sign * uy * r as f64) * idp;
                // The ray leaves the accumulator for good once it exits
                if cx < 0.0 || cy < 0.0 || cx >= acc_w as f64 || cy >= acc_h as f64 {
                    break;
                }
                accumulator[[cy as usize, cx as usize]] += 1;
            }
        }
    }

    let mut centers = find_centers(&accumulator, params.accumulator_threshold);
    centers.sort_by_key(|&(votes, ay, ax)| (Reverse(votes), ay, ax));
    debug!(
        "hough: {} edge points, {} center candidates",
        points.len(),
        centers.len()
    );

    let min_dist_sq = params.min_dist * params.min_dist;
    let mut accepted: Vec<(f64, f64, usize)> = Vec::new();
    for (votes, ay, ax) in centers {
        let cx = (ax as f64 + 0.5) * params.dp;
        let cy = (ay as f64 + 0.5) * params.dp;

        let too_close = accepted.iter().any(|&(px, py, _)| {
            let (dx, dy) = (px - cx, py - cy);
            dx * dx + dy * dy < min_dist_sq
        });
        if too_close {
            continue;
        }

        if let Some((radius, support)) = estimate_radius(&points, cx, cy, params) {
            if support > params.accumulator_threshold as usize {
                trace!("hough: center ({cx:.1}, {cy:.1}) votes={votes} radius={radius} support={support}");
                accepted.push((cx, cy, radius));
            }
        }
    }

    debug!("hough: {} circles accepted", accepted.len());
    accepted
        .into_iter()
        .map(|(cx, cy, r)| Circle {
            center_x: cx.round() as i32,
            center_y: cy.round() as i32,
            radius: r as i32,
        })
        .collect()
}

/// Local maxima of the accumulator above `threshold` as `(votes, ay, ax)`.
fn find_centers(accumulator: &Array2<u32>, threshold: u32) -> Vec<(u32, usize, usize)> {
    let (acc_h, acc_w) = accumulator.dim();
    let mut centers = Vec::new();
    if acc_h < 3 || acc_w < 3 {
        return centers;
    }
    for y in 1..acc_h - 1 {
        for x in 1..acc_w - 1 {
            let v = accumulator[[y, x]];
            if v > threshold
                && v > accumulator[[y, x - 1]]
                && v >= accumulator[[y, x + 1]]
                && v > accumulator[[y - 1, x]]
                && v >= accumulator[[y + 1, x]]
            {
                centers.push((v, y, x));
            }
        }
    }
    centers
}

/// Radius in `[min_radius, max_radius]` with the most edge points within
/// ±1 px, returned with that count.
fn estimate_radius(
    points: &[(f64, f64)],
    cx: f64,
    cy: f64,
    params: &HoughCircleParams,
) -> Option<(usize, usize)> {
    let mut hist = vec![0usize; params.max_radius + 2];
    for &(px, py) in points {
        let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt().round() as usize;
        if d + 1 >= params.min_radius && d <= params.max_radius + 1 {
            hist[d] += 1;
        }
    }

    (params.min_radius..=params.max_radius)
        .map(|r| {
            let support = hist[r.saturating_sub(1)] + hist[r] + hist[r + 1];
            (r, support)
        })
        .fold(None, |best: Option<(usize, usize)>, cand| match best {
            Some(b) if b.1 >= cand.1 => Some(b),
            _ => Some(cand),
        })
}

/// Draw a circle outline onto a 3-channel image.
///
/// Pixels whose distance to the center is within `thickness / 2` of the
/// radius are painted. Parts outside the image are clipped.
pub fn draw_circle(image: &mut Array3<u8>, circle: &Circle, color: [u8; 3], thickness: u32) {
    let (height, width, _) = image.dim();
    let half = thickness as f64 / 2.0;
    let outer = circle.radius as f64 + half;
    let inner = (circle.radius as f64 - half).max(0.0);
    let reach = outer.ceil() as i64;

    let (cx, cy) = (circle.center_x as i64, circle.center_y as i64);
    for y in (cy - reach).max(0)..=(cy + reach).min(height as i64 - 1) {
        for x in (cx - reach).max(0)..=(cx + reach).min(width as i64 - 1) {
            let d = (((x - cx).pow(2) + (y - cy).pow(2)) as f64).sqrt();
            if d >= inner && d <= outer {
                for (c, &v) in color.iter().enumerate() {
                    image[[y as usize, x as usize, c]] = v;
                }
            }
        }
    }
}

/// Hough circle filter: detect circles on a denoised grayscale copy and draw
/// them as green rings on a copy of the colour input.
///
/// # Arguments
/// * `input` - BGR image (height, width, 3) or grayscale (height, width, 1)
///
/// # Returns
/// 3-channel image with the overlay
pub fn hough_circles_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let gray = bgr_to_gray(input);
    let denoised = median_u8(gray.view(), MEDIAN_WINDOW);
    let circles = detect_circles(denoised.view(), &HoughCircleParams::default());

    let mut output = if input.dim().2 == 3 {
        input.to_owned()
    } else {
        gray_to_bgr(input)
    };
    for circle in &circles {
        draw_circle(&mut output, circle, CIRCLE_COLOR, CIRCLE_THICKNESS);
    }
    output
}
