//! Decoded pixel data
//!
//! The engine never decodes, resizes or re-encodes images. Callers hand it an
//! already-decoded RGB buffer with channel intensities normalized to [0, 1].

use crate::error::{AnalysisError, Result};

/// Number of channels per pixel (R, G, B)
pub const CHANNELS: usize = 3;

/// Immutable height × width × RGB buffer of normalized intensities
///
/// Stored row-major, interleaved: `data[(y * width + x) * 3 + c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl PixelBuffer {
    /// Create a buffer from interleaved normalized RGB data
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        let expected = Self::value_count(width, height)?;
        if data.len() != expected {
            return Err(AnalysisError::invalid(format!(
                "expected {} values for {}x{} RGB, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        if let Some(i) = data.iter().position(|v| !v.is_finite()) {
            let reason = format!("non-finite channel value at index {}", i);
            return Err(AnalysisError::invalid(reason));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a buffer from 8-bit interleaved RGB bytes, scaling each to [0, 1]
    pub fn from_rgb8(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        let data = bytes.iter().map(|&b| b as f32 / 255.0).collect();
        Self::new(width, height, data)
    }

    /// Create a buffer by evaluating `f(x, y)` for every pixel
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> [f32; 3],
    ) -> Result<Self> {
        let mut data = Vec::with_capacity(Self::value_count(width, height)?);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a buffer filled with a single color
    pub fn solid(width: usize, height: usize, rgb: [f32; 3]) -> Result<Self> {
        Self::from_fn(width, height, |_, _| rgb)
    }

    /// Number of interleaved values for a `width` × `height` buffer
    fn value_count(width: usize, height: usize) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(AnalysisError::invalid(format!(
                "pixel buffer has zero area ({}x{})",
                width, height
            )));
        }

        width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| {
                AnalysisError::invalid(format!("pixel buffer {}x{} is too large", width, height))
            })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// RGB value at (x, y), if in bounds
    pub fn pixel(&self, x: usize, y: usize) -> Option<[f32; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * CHANNELS;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Iterate over pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(CHANNELS)
    }

    /// Raw interleaved data
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_area_rejected() {
        assert!(matches!(
            PixelBuffer::new(0, 4, vec![]),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(matches!(
            PixelBuffer::solid(3, 0, [0.0; 3]),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_oversized_area_rejected() {
        assert!(matches!(
            PixelBuffer::new(usize::MAX / 2, 3, vec![]),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(matches!(
            PixelBuffer::from_fn(usize::MAX / 2, 3, |_, _| [0.0; 3]),
            Err(AnalysisError::InvalidInput(_))
        ));
        // Area fits but the channel count does not
        assert!(matches!(
            PixelBuffer::new(usize::MAX / 2, 1, vec![]),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut data = vec![0.5; 12];
        data[7] = f32::NAN;
        assert!(matches!(
            PixelBuffer::new(2, 2, data),
            Err(AnalysisError::InvalidInput(_))
        ));

        let mut data = vec![0.5; 12];
        data[0] = f32::INFINITY;
        assert!(PixelBuffer::new(2, 2, data).is_err());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = PixelBuffer::new(2, 2, vec![0.0; 11]);
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn test_from_rgb8_normalizes() {
        let buffer = PixelBuffer::from_rgb8(1, 1, &[255, 0, 51]).unwrap();
        let [r, g, b] = buffer.pixel(0, 0).unwrap();
        assert!((r - 1.0).abs() < 1e-6);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_pixel_layout() {
        let buffer = PixelBuffer::from_fn(3, 2, |x, y| [x as f32, y as f32, 0.5]).unwrap();

        assert_eq!(buffer.pixel_count(), 6);
        assert_eq!(buffer.pixel(2, 1), Some([2.0, 1.0, 0.5]));
        assert_eq!(buffer.pixel(3, 0), None);
        assert_eq!(buffer.pixels().count(), 6);
    }
}
