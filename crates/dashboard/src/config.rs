use foundation::geo::{LonLat, MapView};
use serde::{Deserialize, Serialize};

use crate::selection::{FeatureRank, PredictionYear};

/// Named backend assets the dashboard composes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetTable {
    pub forest_cover: String,
    pub prediction_2024: String,
    pub prediction_2025: String,
    pub prediction_2026: String,
    pub importance_rank_1: String,
    pub importance_rank_2: String,
    pub importance_rank_3: String,
    pub mining: String,
    pub pasture: String,
    pub protected_areas: String,
    pub indigenous_areas: String,
    pub state_boundaries: String,
    pub biome_border: String,
    pub carbon_density: String,
}

impl AssetTable {
    pub fn prediction(&self, year: PredictionYear) -> &str {
        match year {
            PredictionYear::Y2024 => &self.prediction_2024,
            PredictionYear::Y2025 => &self.prediction_2025,
            PredictionYear::Y2026 => &self.prediction_2026,
        }
    }

    pub fn importance(&self, rank: FeatureRank) -> &str {
        match rank {
            FeatureRank::First => &self.importance_rank_1,
            FeatureRank::Second => &self.importance_rank_2,
            FeatureRank::Third => &self.importance_rank_3,
        }
    }
}

impl Default for AssetTable {
    fn default() -> Self {
        Self {
            forest_cover: "amazon/forest_cover".to_string(),
            prediction_2024: "amazon/prediction_2024".to_string(),
            prediction_2025: "amazon/prediction_2025_cumulative".to_string(),
            prediction_2026: "amazon/prediction_2026_cumulative".to_string(),
            importance_rank_1: "amazon/importance_rank_1".to_string(),
            importance_rank_2: "amazon/importance_rank_2".to_string(),
            importance_rank_3: "amazon/importance_rank_3".to_string(),
            mining: "amazon/mining".to_string(),
            pasture: "amazon/pasture".to_string(),
            protected_areas: "amazon/conservation_units".to_string(),
            indigenous_areas: "amazon/indigenous_areas".to_string(),
            state_boundaries: "amazon/state_boundaries".to_string(),
            biome_border: "amazon/biome_border".to_string(),
            carbon_density: "wcmc/biomass_carbon_density".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "dashboard config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Dashboard configuration with defaults matching the shipped Amazon app.
///
/// `class_mask_shows_inside` flips the mining/pasture mask polarity: the
/// shipped behavior renders pixels outside the class range [0, 1], and this
/// flag exists so the intended-looking "inside" rendering can be evaluated
/// without a code change (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub assets: AssetTable,
    pub center_lon: f64,
    pub center_lat: f64,
    pub zoom: u8,
    /// Sampling resolution in distance units; must match the prediction
    /// raster's native cell size.
    pub sample_scale: f64,
    pub class_mask_shows_inside: bool,
}

impl DashboardConfig {
    pub fn center(&self) -> LonLat {
        LonLat::new(self.center_lon, self.center_lat)
    }

    pub fn view(&self) -> MapView {
        MapView::new(self.center(), self.zoom)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            assets: AssetTable::default(),
            center_lon: -62.2159,
            center_lat: -3.4653,
            zoom: 5,
            sample_scale: 6000.0,
            class_mask_shows_inside: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardConfig;

    #[test]
    fn defaults_center_on_the_amazon() {
        let config = DashboardConfig::default();
        assert_eq!(config.view().zoom, 5);
        assert_eq!(config.center().lon, -62.2159);
        assert_eq!(config.sample_scale, 6000.0);
        assert!(!config.class_mask_shows_inside);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = DashboardConfig::from_json(r#"{ "zoom": 7 }"#).expect("parse");
        assert_eq!(config.zoom, 7);
        assert_eq!(config.assets.mining, "amazon/mining");
    }

    #[test]
    fn json_round_trip() {
        let config = DashboardConfig::default();
        let raw = config.to_json().expect("serialize");
        let back = DashboardConfig::from_json(&raw).expect("parse");
        assert_eq!(back, config);
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        assert!(DashboardConfig::from_json("{").is_err());
    }
}
