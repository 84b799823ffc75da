//! Image statistics extraction
//!
//! Derives the fixed [`ImageStatistics`] vector from a decoded pixel buffer:
//! channel means drive the color statistics, the global intensity spread
//! drives contrast, and a zero-padded Sobel pass over the grayscale image
//! drives sharpness and texture.
//!
//! Coefficients and the order of operations are part of the contract; the
//! evaluators' thresholds are tuned against them.

use contentguard_core::{AnalysisError, ImageStatistics, PixelBuffer, Result};

/// Horizontal Sobel kernel
const SOBEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// Vertical Sobel kernel
const SOBEL_Y: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Clamp to [0, 1]
pub fn clamp01(x: f64) -> f64 {
    x.max(0.0).min(1.0)
}

/// Compute the statistics vector for `buffer`
pub fn extract_statistics(buffer: &PixelBuffer) -> Result<ImageStatistics> {
    if buffer.pixel_count() == 0 {
        return Err(AnalysisError::InvalidInput(
            "cannot extract statistics from an empty buffer".to_string(),
        ));
    }

    let [red, green, blue] = channel_means(buffer);
    let total = (red + green + blue) / 3.0;

    let dominance = |channel: f64| {
        if total > 0.0 {
            clamp01((channel / total - 0.15) * 2.0)
        } else {
            0.0
        }
    };

    let color_variance =
        ((red - total).powi(2) + (green - total).powi(2) + (blue - total).powi(2)) / 3.0;

    let contrast_raw = intensity_std_dev(buffer);

    let gray = grayscale(buffer);
    let magnitude = sobel_magnitude(&gray, buffer.width(), buffer.height());
    let (sharpness_raw, gradient_variance) = mean_and_variance(&magnitude);

    Ok(ImageStatistics {
        red_dominance: dominance(red),
        green_dominance: dominance(green),
        white_dominance: clamp01(red.min(green).min(blue) * 1.5),
        contrast: clamp01(contrast_raw * 3.0),
        sharpness: clamp01(sharpness_raw * 20.0),
        // Derived from the unclamped values
        small_object_density: clamp01(sharpness_raw * 2.5),
        linear_shapes: clamp01(contrast_raw * 1.5),
        metallic: clamp01(((blue + red) / 2.0) * 1.5),
        texture: clamp01(gradient_variance.sqrt() * 25.0),
        color_variety: clamp01(color_variance.sqrt() * 4.0),
        saturation: clamp01(
            ((red - green).abs() + (green - blue).abs() + (blue - red).abs()) / 3.0 * 3.0,
        ),
    })
}

/// Per-channel means (R, G, B)
fn channel_means(buffer: &PixelBuffer) -> [f64; 3] {
    let mut sums = [0.0f64; 3];
    for pixel in buffer.pixels() {
        for (sum, &value) in sums.iter_mut().zip(pixel) {
            *sum += value as f64;
        }
    }

    let count = buffer.pixel_count() as f64;
    sums.map(|s| s / count)
}

/// Standard deviation of every channel value around the global mean
fn intensity_std_dev(buffer: &PixelBuffer) -> f64 {
    let values = buffer.as_slice();
    let n = values.len() as f64;

    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    variance.sqrt()
}

/// Per-pixel channel mean, row-major
fn grayscale(buffer: &PixelBuffer) -> Vec<f64> {
    buffer
        .pixels()
        .map(|p| (p[0] as f64 + p[1] as f64 + p[2] as f64) / 3.0)
        .collect()
}

/// Sobel gradient magnitude with zero padding, same size as the input
pub(crate) fn sobel_magnitude(gray: &[f64], width: usize, height: usize) -> Vec<f64> {
    let at = |x: isize, y: isize| -> f64 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0.0
        } else {
            gray[y as usize * width + x as usize]
        }
    };

    let mut magnitude = Vec::with_capacity(width * height);
    for y in 0..height as isize {
        for x in 0..width as isize {
            let mut gx = 0.0;
            let mut gy = 0.0;
            for (ky, (row_x, row_y)) in SOBEL_X.iter().zip(SOBEL_Y.iter()).enumerate() {
                for kx in 0..3 {
                    let v = at(x + kx as isize - 1, y + ky as isize - 1);
                    gx += row_x[kx] * v;
                    gy += row_y[kx] * v;
                }
            }
            magnitude.push((gx * gx + gy * gy).sqrt());
        }
    }
    magnitude
}

/// Population mean and variance
fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.3), 0.0);
        assert_eq!(clamp01(0.42), 0.42);
        assert_eq!(clamp01(1.7), 1.0);
    }

    #[test]
    fn test_black_image_is_all_zero() {
        let buffer = PixelBuffer::solid(8, 8, [0.0; 3]).unwrap();
        let stats = extract_statistics(&buffer).unwrap();

        assert_eq!(stats, ImageStatistics::default());
    }

    #[test]
    fn test_single_pixel_has_no_gradient() {
        let buffer = PixelBuffer::solid(1, 1, [0.4, 0.5, 0.6]).unwrap();
        let stats = extract_statistics(&buffer).unwrap();

        assert_eq!(stats.sharpness, 0.0);
        assert_eq!(stats.texture, 0.0);
        assert_eq!(stats.small_object_density, 0.0);
    }

    #[test]
    fn test_pure_red_color_statistics() {
        let buffer = PixelBuffer::solid(4, 4, [1.0, 0.0, 0.0]).unwrap();
        let stats = extract_statistics(&buffer).unwrap();

        assert_eq!(stats.red_dominance, 1.0);
        assert_eq!(stats.green_dominance, 0.0);
        assert_eq!(stats.white_dominance, 0.0);
        assert_eq!(stats.saturation, 1.0);
        assert_eq!(stats.color_variety, 1.0);
        assert!(approx(stats.metallic, 0.75));

        // One third of the channel values are 1: std dev = sqrt(2/9)
        let contrast_raw = (2.0f64 / 9.0).sqrt();
        assert_eq!(stats.contrast, 1.0);
        assert!(approx(stats.linear_shapes, contrast_raw * 1.5));
    }

    #[test]
    fn test_neutral_gray_dominance() {
        let buffer = PixelBuffer::solid(2, 2, [0.5, 0.5, 0.5]).unwrap();
        let stats = extract_statistics(&buffer).unwrap();

        // ratio 1.0 → (1.0 - 0.15) * 2 clamps to 1
        assert_eq!(stats.red_dominance, 1.0);
        assert_eq!(stats.green_dominance, 1.0);
        assert!(approx(stats.white_dominance, 0.75));
        assert_eq!(stats.saturation, 0.0);
        assert_eq!(stats.color_variety, 0.0);
        assert_eq!(stats.contrast, 0.0);
    }

    #[test]
    fn test_sobel_zero_padding() {
        let gray = vec![1.0; 9];
        let magnitude = sobel_magnitude(&gray, 3, 3);

        // Interior sees a flat neighbourhood
        assert!(approx(magnitude[4], 0.0));
        // Corners see two padded edges
        assert!(approx(magnitude[0], 18.0f64.sqrt()));
        assert!(approx(magnitude[8], 18.0f64.sqrt()));
        // Edge midpoints see one padded edge
        assert!(approx(magnitude[1], 4.0));
        assert!(approx(magnitude[3], 4.0));
    }

    #[test]
    fn test_small_object_density_uses_unclamped_sharpness() {
        let buffer = PixelBuffer::solid(3, 3, [0.05, 0.05, 0.05]).unwrap();
        let stats = extract_statistics(&buffer).unwrap();

        // Padded-border gradients of a flat 3x3 image: 4 corners of √18, 4 edges of 4
        let sharpness_raw = 0.05 * (4.0 * 18.0f64.sqrt() + 4.0 * 4.0) / 9.0;
        assert_eq!(stats.sharpness, 1.0);
        let expected = sharpness_raw * 2.5;
        assert!((stats.small_object_density - expected).abs() < 1e-6);
        assert!(stats.small_object_density < 1.0);
        assert!(stats.texture > 0.0);
    }

    #[test]
    fn test_vertical_edge_is_sharp() {
        let buffer =
            PixelBuffer::from_fn(16, 16, |x, _| if x < 8 { [0.0; 3] } else { [1.0; 3] }).unwrap();
        let flat = PixelBuffer::solid(16, 16, [0.5; 3]).unwrap();

        let edge = extract_statistics(&buffer).unwrap();
        let smooth = extract_statistics(&flat).unwrap();

        assert!(edge.contrast > smooth.contrast);
        assert!(edge.texture > 0.0);
    }

    #[test]
    fn test_all_statistics_in_unit_range() {
        let buffer = PixelBuffer::from_fn(9, 7, |x, y| {
            let v = ((x * 31 + y * 17) % 11) as f32 / 10.0;
            [v, 1.0 - v, (v * 0.5).fract()]
        })
        .unwrap();
        let stats = extract_statistics(&buffer).unwrap();

        for (name, value) in stats.fields() {
            assert!((0.0..=1.0).contains(&value), "{} = {}", name, value);
        }
    }
}
