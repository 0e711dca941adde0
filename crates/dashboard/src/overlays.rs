use std::collections::BTreeSet;

use backend::value::{MaskPolarity, ValueRange};
use catalog::{CatalogError, MaskSpec, OverlayCatalog, OverlayDefinition, SourceCitation, SourceKind};
use layers::style::{LayerStyle, RasterStyle, VectorStyle};

use crate::config::DashboardConfig;

/// Names of the overlays currently toggled on.
///
/// Iteration is in sorted name order; display order comes from the catalog,
/// not from here. The checked-overlay count that drives the aggregate
/// legend is this set's cardinality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveOverlaySet {
    names: BTreeSet<String>,
}

impl ActiveOverlaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the set changed.
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    /// Returns `true` if the set changed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_str())
    }
}

/// Class range for the mining/pasture rasters.
const CLASS_RANGE: ValueRange = ValueRange::inclusive(0.0, 1.0);

fn class_mask(config: &DashboardConfig) -> MaskSpec {
    let polarity = if config.class_mask_shows_inside {
        MaskPolarity::Inside
    } else {
        MaskPolarity::Outside
    };
    MaskSpec {
        range: CLASS_RANGE,
        polarity,
    }
}

fn terrabrasilis() -> SourceCitation {
    SourceCitation::new(
        "TerraBrasilis",
        "http://terrabrasilis.dpi.inpe.br/en/download-2/",
    )
}

fn mapbiomas() -> SourceCitation {
    SourceCitation::new("MapBiomas", "https://mapbiomas.org/en/download")
}

/// The shipped Amazon overlay table, in sidebar display order.
pub fn amazon_overlays(config: &DashboardConfig) -> Vec<OverlayDefinition> {
    let assets = &config.assets;
    vec![
        OverlayDefinition {
            label: "Indigenous areas".to_string(),
            name: "Indigenous areas".to_string(),
            source_asset: assets.indigenous_areas.clone(),
            kind: SourceKind::Vector,
            style: LayerStyle::Vector(VectorStyle::outline("#DFCCFB", 1.5)),
            mask: None,
            citation: terrabrasilis(),
        },
        OverlayDefinition {
            label: "Protected Areas".to_string(),
            name: "Protected Areas".to_string(),
            source_asset: assets.protected_areas.clone(),
            kind: SourceKind::Vector,
            style: LayerStyle::Vector(VectorStyle::stroke("#5C4B99")),
            mask: None,
            citation: terrabrasilis(),
        },
        OverlayDefinition {
            label: "Mining Areas".to_string(),
            name: "Mining (Masked)".to_string(),
            source_asset: assets.mining.clone(),
            kind: SourceKind::Raster,
            style: LayerStyle::Raster(RasterStyle::palette(&["#982176"])),
            mask: Some(class_mask(config)),
            citation: mapbiomas(),
        },
        OverlayDefinition {
            label: "Pasture".to_string(),
            name: "Pasture (Masked)".to_string(),
            source_asset: assets.pasture.clone(),
            kind: SourceKind::Raster,
            style: LayerStyle::Raster(RasterStyle::palette(&["#FF6969"])),
            mask: Some(class_mask(config)),
            citation: mapbiomas(),
        },
        OverlayDefinition {
            label: "State Boundaries".to_string(),
            name: "States".to_string(),
            source_asset: assets.state_boundaries.clone(),
            kind: SourceKind::Vector,
            style: LayerStyle::Vector(VectorStyle {
                color: "#000000".to_string(),
                fill_color: None,
                stroke_width: 1.5,
                fill_opacity: 0.0,
                opacity: 1.0,
            }),
            mask: None,
            citation: terrabrasilis(),
        },
        OverlayDefinition {
            label: "Carbon Density".to_string(),
            name: "Carbon Density".to_string(),
            source_asset: assets.carbon_density.clone(),
            kind: SourceKind::Raster,
            style: LayerStyle::Raster(RasterStyle::ramp(&["#F3FDE8", "#648040"], 0.0, 250.0)),
            mask: None,
            citation: SourceCitation::new(
                "UNEP-WCMC",
                "https://www.unep-wcmc.org/resources-and-data",
            ),
        },
    ]
}

/// Builds the shipped overlay catalog for a configuration.
pub fn amazon_catalog(config: &DashboardConfig) -> Result<OverlayCatalog, CatalogError> {
    OverlayCatalog::new(amazon_overlays(config))
}
