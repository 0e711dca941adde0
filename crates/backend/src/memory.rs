use std::collections::BTreeMap;

use foundation::geo::LonLat;

use crate::api::{BackendError, RasterBackend};
use crate::handles::{RasterHandle, VectorHandle};
use crate::query::{QueryId, QueryOutcome};
use crate::value::{MaskPolarity, ValueRange};

/// Regular lon/lat grid of raster values, row-major with row 0 at the
/// origin (south-west) corner.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRaster {
    pub origin: LonLat,
    pub cell_deg: f64,
    pub width: usize,
    pub height: usize,
    pub values: Vec<f64>,
}

impl GridRaster {
    /// `values.len()` must equal `width * height`; cells outside the stored
    /// grid sample as missing.
    pub fn new(origin: LonLat, cell_deg: f64, width: usize, height: usize, values: Vec<f64>) -> Self {
        Self {
            origin,
            cell_deg,
            width,
            height,
            values,
        }
    }

    pub fn filled(origin: LonLat, cell_deg: f64, width: usize, height: usize, value: f64) -> Self {
        Self::new(origin, cell_deg, width, height, vec![value; width * height])
    }

    pub fn value_at(&self, point: LonLat) -> Option<f64> {
        if self.cell_deg <= 0.0 {
            return None;
        }
        let col = ((point.lon - self.origin.lon) / self.cell_deg).floor();
        let row = ((point.lat - self.origin.lat) / self.cell_deg).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        self.values.get(row * self.width + col).copied()
    }
}

/// Axis-aligned vector region; enough extent semantics for clipping.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VectorRegion {
    pub min: LonLat,
    pub max: LonLat,
}

impl VectorRegion {
    pub fn new(min: LonLat, max: LonLat) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, point: LonLat) -> bool {
        point.lon >= self.min.lon
            && point.lon <= self.max.lon
            && point.lat >= self.min.lat
            && point.lat <= self.max.lat
    }
}

#[derive(Debug, Clone)]
enum Node {
    Raster(String),
    Mask {
        base: usize,
        range: ValueRange,
        polarity: MaskPolarity,
    },
    Clip {
        base: usize,
        region: String,
    },
    Reproject {
        base: usize,
    },
}

/// A submitted, not yet completed point query.
#[derive(Debug, Clone)]
pub struct PendingQuery {
    pub id: QueryId,
    pub point: LonLat,
    pub scale: f64,
    node: usize,
}

/// In-memory [`RasterBackend`] over regular grids.
///
/// Queries resolve from stored cell values; completions are held until
/// polled, so tests and demos control delivery order explicitly
/// (including delivering a completion after a newer query superseded it).
#[derive(Debug, Default)]
pub struct GridBackend {
    rasters: BTreeMap<String, GridRaster>,
    vectors: BTreeMap<String, VectorRegion>,
    nodes: Vec<Node>,
    vector_names: Vec<String>,
    next_query: u64,
    pending: Vec<PendingQuery>,
}

impl GridBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raster(&mut self, asset: impl Into<String>, raster: GridRaster) {
        self.rasters.insert(asset.into(), raster);
    }

    pub fn insert_vector(&mut self, asset: impl Into<String>, region: VectorRegion) {
        self.vectors.insert(asset.into(), region);
    }

    pub fn pending(&self) -> &[PendingQuery] {
        &self.pending
    }

    /// Completes a single query out of submission order.
    pub fn resolve_one(&mut self, id: QueryId) -> Option<(QueryId, QueryOutcome)> {
        let idx = self.pending.iter().position(|p| p.id == id)?;
        let p = self.pending.remove(idx);
        let outcome = self.resolve(&p);
        Some((p.id, outcome))
    }

    fn resolve(&self, query: &PendingQuery) -> QueryOutcome {
        match self.sample(query.node, query.point) {
            Some(v) => QueryOutcome::Value(v),
            None => QueryOutcome::Missing,
        }
    }

    fn sample(&self, node: usize, point: LonLat) -> Option<f64> {
        match self.nodes.get(node)? {
            Node::Raster(name) => self.rasters.get(name)?.value_at(point),
            Node::Mask {
                base,
                range,
                polarity,
            } => {
                let v = self.sample(*base, point)?;
                polarity.keeps(range, v).then_some(v)
            }
            Node::Clip { base, region } => {
                let r = self.vectors.get(region)?;
                if !r.contains(point) {
                    return None;
                }
                self.sample(*base, point)
            }
            Node::Reproject { base } => self.sample(*base, point),
        }
    }

    fn push_node(&mut self, node: Node) -> RasterHandle {
        let idx = self.nodes.len();
        self.nodes.push(node);
        RasterHandle(idx as u64)
    }

    fn check_raster(&self, handle: RasterHandle) -> Result<usize, BackendError> {
        let idx = handle.0 as usize;
        if idx >= self.nodes.len() {
            return Err(BackendError::UnknownHandle);
        }
        Ok(idx)
    }
}

impl RasterBackend for GridBackend {
    fn raster(&mut self, asset: &str) -> Result<RasterHandle, BackendError> {
        if self.rasters.contains_key(asset) {
            return Ok(self.push_node(Node::Raster(asset.to_string())));
        }
        if self.vectors.contains_key(asset) {
            return Err(BackendError::WrongKind(asset.to_string()));
        }
        Err(BackendError::UnknownAsset(asset.to_string()))
    }

    fn vector(&mut self, asset: &str) -> Result<VectorHandle, BackendError> {
        if self.vectors.contains_key(asset) {
            let handle = VectorHandle(self.vector_names.len() as u64);
            self.vector_names.push(asset.to_string());
            return Ok(handle);
        }
        if self.rasters.contains_key(asset) {
            return Err(BackendError::WrongKind(asset.to_string()));
        }
        Err(BackendError::UnknownAsset(asset.to_string()))
    }

    fn mask_range(
        &mut self,
        source: RasterHandle,
        range: ValueRange,
        polarity: MaskPolarity,
    ) -> Result<RasterHandle, BackendError> {
        let base = self.check_raster(source)?;
        Ok(self.push_node(Node::Mask {
            base,
            range,
            polarity,
        }))
    }

    fn clip(
        &mut self,
        source: RasterHandle,
        region: VectorHandle,
    ) -> Result<RasterHandle, BackendError> {
        let base = self.check_raster(source)?;
        let Some(name) = self.vector_names.get(region.0 as usize) else {
            return Err(BackendError::UnknownHandle);
        };
        let region = name.clone();
        Ok(self.push_node(Node::Clip { base, region }))
    }

    fn reproject(&mut self, source: RasterHandle, _scale: f64) -> Result<RasterHandle, BackendError> {
        // Grids stay in their native cells; the derived handle only records
        // the resampling step in the chain.
        let base = self.check_raster(source)?;
        Ok(self.push_node(Node::Reproject { base }))
    }

    fn point_mean(&mut self, source: RasterHandle, point: LonLat, scale: f64) -> QueryId {
        let id = QueryId(self.next_query);
        self.next_query = self.next_query.wrapping_add(1);
        self.pending.push(PendingQuery {
            id,
            point,
            scale,
            node: source.0 as usize,
        });
        id
    }

    fn poll(&mut self) -> Vec<(QueryId, QueryOutcome)> {
        let pending = std::mem::take(&mut self.pending);
        pending
            .iter()
            .map(|p| (p.id, self.resolve(p)))
            .collect()
    }
}
