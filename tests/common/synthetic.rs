use ndarray::Array3;

/// Uniform BGR image.
pub fn flat_bgr(height: usize, width: usize, value: u8) -> Array3<u8> {
    Array3::from_elem((height, width, 3), value)
}

/// Deterministic high-frequency texture, different per channel.
pub fn textured_bgr(height: usize, width: usize) -> Array3<u8> {
    let mut img = Array3::<u8>::zeros((height, width, 3));
    for y in 0..height {
        for x in 0..width {
            for c in 0..3 {
                let h = (x * 73 + y * 151 + c * 37) ^ (x * y + c);
                img[[y, x, c]] = (h % 256) as u8;
            }
        }
    }
    img
}

/// Black BGR image with a white axis-aligned square.
pub fn square_bgr(size: usize, top: usize, side: usize) -> Array3<u8> {
    let mut img = Array3::<u8>::zeros((size, size, 3));
    for y in top..top + side {
        for x in top..top + side {
            for c in 0..3 {
                img[[y, x, c]] = 255;
            }
        }
    }
    img
}

/// Filled disc of `color` (BGR) on a black background.
pub fn disc_bgr(
    height: usize,
    width: usize,
    center: (f64, f64),
    radius: f64,
    color: [u8; 3],
) -> Array3<u8> {
    let mut img = Array3::<u8>::zeros((height, width, 3));
    paint_disc(&mut img, center, radius, color);
    img
}

/// Paint a filled disc onto an existing BGR image.
pub fn paint_disc(img: &mut Array3<u8>, center: (f64, f64), radius: f64, color: [u8; 3]) {
    let (height, width, _) = img.dim();
    for y in 0..height {
        for x in 0..width {
            let d = ((x as f64 - center.0).powi(2) + (y as f64 - center.1).powi(2)).sqrt();
            if d <= radius {
                for (c, &v) in color.iter().enumerate() {
                    img[[y, x, c]] = v;
                }
            }
        }
    }
}

/// True when the pixel at `(y, x)` is pure green in BGR.
pub fn is_green(img: &Array3<u8>, y: usize, x: usize) -> bool {
    img[[y, x, 0]] == 0 && img[[y, x, 1]] == 255 && img[[y, x, 2]] == 0
}
