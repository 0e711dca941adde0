use serde::{Deserialize, Serialize};

/// Visual parameters for a raster layer: a color ramp and an optional value
/// range the ramp is stretched over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterStyle {
    pub palette: Vec<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RasterStyle {
    pub fn palette(colors: &[&str]) -> Self {
        Self {
            palette: colors.iter().map(|c| c.to_string()).collect(),
            min: None,
            max: None,
        }
    }

    pub fn ramp(colors: &[&str], min: f64, max: f64) -> Self {
        Self {
            palette: colors.iter().map(|c| c.to_string()).collect(),
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Visual parameters for a vector layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorStyle {
    pub color: String,
    pub fill_color: Option<String>,
    pub stroke_width: f64,
    pub fill_opacity: f64,
    pub opacity: f64,
}

impl VectorStyle {
    pub fn stroke(color: &str) -> Self {
        Self {
            color: color.to_string(),
            ..Self::default()
        }
    }

    pub fn outline(color: &str, stroke_width: f64) -> Self {
        Self {
            color: color.to_string(),
            fill_color: Some("00000000".to_string()),
            stroke_width,
            fill_opacity: 0.0,
            opacity: 1.0,
        }
    }
}

impl Default for VectorStyle {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            fill_color: None,
            stroke_width: 1.0,
            fill_opacity: 0.0,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayerStyle {
    Raster(RasterStyle),
    Vector(VectorStyle),
}

impl LayerStyle {
    /// The single color that stands in for this style in legend swatches:
    /// a vector's stroke color, or the top end of a raster ramp.
    pub fn swatch(&self) -> Option<&str> {
        match self {
            LayerStyle::Vector(v) => Some(v.color.as_str()),
            LayerStyle::Raster(r) => r.palette.last().map(|c| c.as_str()),
        }
    }
}
