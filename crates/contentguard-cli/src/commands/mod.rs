//! CLI subcommands and shared input helpers

pub mod analyze;
pub mod stats;
pub mod thresholds;

use contentguard_core::{EngineConfig, PixelBuffer};
use std::fs;
use tracing::{debug, info};

/// Load the engine configuration, or the defaults when no file is given
pub fn load_config(path: Option<&str>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path);
            let json = fs::read_to_string(path)?;
            Ok(EngineConfig::from_json(&json)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Decode an image file into a normalized RGB buffer
pub fn load_image(path: &str) -> Result<PixelBuffer, Box<dyn std::error::Error>> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();

    debug!(path, width, height, "Decoded image");

    Ok(PixelBuffer::from_rgb8(width as usize, height as usize, rgb.as_raw())?)
}
