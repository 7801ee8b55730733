//! Separable gaussian blur over premultiplied RGBA8 pixels.
//!
//! Pixels outside the buffer count as transparent, so a shadow fades out at
//! the edges of its layer instead of smearing the border color.

/// Half-width of the kernel for `sigma`, in pixels.
pub fn reach(sigma: f64) -> usize {
    if sigma.is_finite() && sigma > 0.0 {
        (sigma * 3.0).ceil() as usize
    } else {
        0
    }
}

fn kernel(sigma: f64) -> Vec<f32> {
    let radius = reach(sigma) as i64;
    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|i| (-(i * i) as f64 / denom).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.iter().map(|w| (w / sum) as f32).collect()
}

/// Blur `data` (`width * height` premultiplied RGBA8 pixels) in place.
/// A non-positive `sigma` leaves the pixels untouched.
pub fn blur_rgba8_premul(data: &mut [u8], width: usize, height: usize, sigma: f64) {
    let radius = reach(sigma);
    if radius == 0 || width == 0 || height == 0 || data.len() != width * height * 4 {
        return;
    }
    let kernel = kernel(sigma);

    let mut rows = vec![[0.0f32; 4]; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 4];
            for (k, weight) in kernel.iter().enumerate() {
                let Some(sx) = (x + k).checked_sub(radius).filter(|sx| *sx < width) else {
                    continue;
                };
                let idx = (y * width + sx) * 4;
                for (c, channel) in acc.iter_mut().enumerate() {
                    *channel += weight * f32::from(data[idx + c]);
                }
            }
            rows[y * width + x] = acc;
        }
    }

    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 4];
            for (k, weight) in kernel.iter().enumerate() {
                let Some(sy) = (y + k).checked_sub(radius).filter(|sy| *sy < height) else {
                    continue;
                };
                let src = rows[sy * width + x];
                for (channel, value) in acc.iter_mut().zip(src) {
                    *channel += weight * value;
                }
            }
            let idx = (y * width + x) * 4;
            for (c, value) in acc.into_iter().enumerate() {
                data[idx + c] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}
