//! Heuristic image statistics

use serde::{Deserialize, Serialize};

/// Fixed feature vector derived from raw pixel data.
///
/// Every field is clamped to [0, 1]. Recomputed per analysis; never cached on
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStatistics {
    /// How strongly the red channel mean exceeds the overall mean
    pub red_dominance: f64,
    /// How strongly the green channel mean exceeds the overall mean
    pub green_dominance: f64,
    /// Brightness of the darkest channel mean
    pub white_dominance: f64,
    /// Global intensity spread
    pub contrast: f64,
    /// Mean Sobel gradient magnitude
    pub sharpness: f64,
    pub small_object_density: f64,
    pub linear_shapes: f64,
    /// Red/blue brightness, a cheap proxy for metallic surfaces
    pub metallic: f64,
    /// Spread of the Sobel gradient magnitude
    pub texture: f64,
    pub color_variety: f64,
    pub saturation: f64,
}

impl ImageStatistics {
    /// Value of a single statistic
    pub fn get(&self, kind: StatisticKind) -> f64 {
        match kind {
            StatisticKind::RedDominance => self.red_dominance,
            StatisticKind::GreenDominance => self.green_dominance,
            StatisticKind::WhiteDominance => self.white_dominance,
            StatisticKind::Contrast => self.contrast,
            StatisticKind::Sharpness => self.sharpness,
            StatisticKind::SmallObjectDensity => self.small_object_density,
            StatisticKind::LinearShapes => self.linear_shapes,
            StatisticKind::Metallic => self.metallic,
            StatisticKind::Texture => self.texture,
            StatisticKind::ColorVariety => self.color_variety,
            StatisticKind::Saturation => self.saturation,
        }
    }

    /// Named fields in declaration order, for display
    pub fn fields(&self) -> [(&'static str, f64); 11] {
        StatisticKind::ALL.map(|kind| (kind.name(), self.get(kind)))
    }
}

/// Identifies one field of [`ImageStatistics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatisticKind {
    RedDominance,
    GreenDominance,
    WhiteDominance,
    Contrast,
    Sharpness,
    SmallObjectDensity,
    LinearShapes,
    Metallic,
    Texture,
    ColorVariety,
    Saturation,
}

impl StatisticKind {
    pub const ALL: [StatisticKind; 11] = [
        StatisticKind::RedDominance,
        StatisticKind::GreenDominance,
        StatisticKind::WhiteDominance,
        StatisticKind::Contrast,
        StatisticKind::Sharpness,
        StatisticKind::SmallObjectDensity,
        StatisticKind::LinearShapes,
        StatisticKind::Metallic,
        StatisticKind::Texture,
        StatisticKind::ColorVariety,
        StatisticKind::Saturation,
    ];

    /// camelCase name, matching the serialized field
    pub fn name(&self) -> &'static str {
        match self {
            StatisticKind::RedDominance => "redDominance",
            StatisticKind::GreenDominance => "greenDominance",
            StatisticKind::WhiteDominance => "whiteDominance",
            StatisticKind::Contrast => "contrast",
            StatisticKind::Sharpness => "sharpness",
            StatisticKind::SmallObjectDensity => "smallObjectDensity",
            StatisticKind::LinearShapes => "linearShapes",
            StatisticKind::Metallic => "metallic",
            StatisticKind::Texture => "texture",
            StatisticKind::ColorVariety => "colorVariety",
            StatisticKind::Saturation => "saturation",
        }
    }
}
