use backend::value::{MaskPolarity, ValueRange};
use layers::style::LayerStyle;
use serde::{Deserialize, Serialize};

/// Where an overlay's data comes from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Raster,
    Vector,
}

/// Attribution shown in the overlay's legend entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub name: String,
    pub link: String,
}

impl SourceCitation {
    pub fn new(name: &str, link: &str) -> Self {
        Self {
            name: name.to_string(),
            link: link.to_string(),
        }
    }
}

/// A value mask applied to a raster overlay before rendering.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskSpec {
    pub range: ValueRange,
    pub polarity: MaskPolarity,
}

/// One row of the overlay table.
///
/// Definitions are immutable after catalog construction; a single generic
/// routine builds the checkbox, legend entry and toggle handling for every
/// row, so adding an overlay means adding a row here and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayDefinition {
    pub label: String,
    /// Unique key; also the attached layer's name.
    pub name: String,
    pub source_asset: String,
    pub kind: SourceKind,
    pub style: LayerStyle,
    pub mask: Option<MaskSpec>,
    pub citation: SourceCitation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateName(String),
    Parse(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DuplicateName(name) => {
                write!(f, "duplicate overlay name: {name}")
            }
            CatalogError::Parse(msg) => write!(f, "overlay catalog parse error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// The declarative overlay table.
///
/// Iteration order is definition order, which fixes both the checkbox order
/// in the sidebar and the legend entry order. JSON round trips go through
/// the definition list itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayCatalog {
    defs: Vec<OverlayDefinition>,
}

impl OverlayCatalog {
    pub fn new(defs: Vec<OverlayDefinition>) -> Result<Self, CatalogError> {
        let mut seen: Vec<&str> = Vec::new();
        for def in &defs {
            if seen.contains(&def.name.as_str()) {
                return Err(CatalogError::DuplicateName(def.name.clone()));
            }
            seen.push(&def.name);
        }
        Ok(Self { defs })
    }

    pub fn get(&self, name: &str) -> Option<&OverlayDefinition> {
        self.defs.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverlayDefinition> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let defs: Vec<OverlayDefinition> =
            serde_json::from_str(raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(defs)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(&self.defs).map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CatalogError, MaskSpec, OverlayCatalog, OverlayDefinition, SourceCitation, SourceKind,
    };
    use backend::value::{MaskPolarity, ValueRange};
    use layers::style::{LayerStyle, RasterStyle, VectorStyle};
    use pretty_assertions::assert_eq;

    fn defs() -> Vec<OverlayDefinition> {
        vec![
            OverlayDefinition {
                label: "Protected Areas".to_string(),
                name: "Protected Areas".to_string(),
                source_asset: "amazon/protected_areas".to_string(),
                kind: SourceKind::Vector,
                style: LayerStyle::Vector(VectorStyle::stroke("#5C4B99")),
                mask: None,
                citation: SourceCitation::new("TerraBrasilis", "https://example.org/terra"),
            },
            OverlayDefinition {
                label: "Mining Areas".to_string(),
                name: "Mining (Masked)".to_string(),
                source_asset: "amazon/mining".to_string(),
                kind: SourceKind::Raster,
                style: LayerStyle::Raster(RasterStyle::palette(&["#982176"])),
                mask: Some(MaskSpec {
                    range: ValueRange::inclusive(0.0, 1.0),
                    polarity: MaskPolarity::Outside,
                }),
                citation: SourceCitation::new("MapBiomas", "https://example.org/mapbiomas"),
            },
        ]
    }

    #[test]
    fn lookup_by_name_and_stable_order() {
        let catalog = OverlayCatalog::new(defs()).expect("catalog");
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("Mining (Masked)").is_some());
        assert!(catalog.get("Mining").is_none());

        let labels: Vec<&str> = catalog.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Protected Areas", "Mining Areas"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut d = defs();
        d[1].name = d[0].name.clone();
        let err = OverlayCatalog::new(d).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateName("Protected Areas".to_string())
        );
    }

    #[test]
    fn json_round_trip_preserves_definitions() {
        let catalog = OverlayCatalog::new(defs()).expect("catalog");
        let raw = catalog.to_json().expect("serialize");
        let back = OverlayCatalog::from_json(&raw).expect("parse");
        assert_eq!(back, catalog);
    }
}
