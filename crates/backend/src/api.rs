use foundation::geo::LonLat;

use crate::handles::{RasterHandle, VectorHandle};
use crate::query::{QueryId, QueryOutcome};
use crate::value::{MaskPolarity, ValueRange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    UnknownAsset(String),
    WrongKind(String),
    UnknownHandle,
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::UnknownAsset(id) => write!(f, "unknown asset: {id}"),
            BackendError::WrongKind(id) => write!(f, "asset has the wrong kind: {id}"),
            BackendError::UnknownHandle => write!(f, "handle does not name backend data"),
        }
    }
}

impl std::error::Error for BackendError {}

/// The external geospatial compute collaborator.
///
/// Everything the dashboard needs from the hosted raster engine, and nothing
/// more: named asset lookup, derived handles (mask / clip / reproject), and
/// asynchronous point-mean queries.
///
/// Completion contract:
/// - `point_mean` only submits; it never blocks.
/// - Completions are pulled with `poll` and may arrive in any order relative
///   to submission. Joining correlated queries and discarding superseded
///   ones is the caller's responsibility.
pub trait RasterBackend {
    /// Resolves a named raster asset to a handle.
    fn raster(&mut self, asset: &str) -> Result<RasterHandle, BackendError>;

    /// Resolves a named vector asset to a handle.
    fn vector(&mut self, asset: &str) -> Result<VectorHandle, BackendError>;

    /// Derives a handle with a range mask applied.
    ///
    /// With `MaskPolarity::Inside`, pixels inside `range` stay visible;
    /// with `Outside`, only pixels failing the range test stay visible.
    /// Masked pixels are transparent and absent from point queries.
    fn mask_range(
        &mut self,
        source: RasterHandle,
        range: ValueRange,
        polarity: MaskPolarity,
    ) -> Result<RasterHandle, BackendError>;

    /// Derives a handle clipped to a vector region.
    fn clip(
        &mut self,
        source: RasterHandle,
        region: VectorHandle,
    ) -> Result<RasterHandle, BackendError>;

    /// Derives a handle resampled and reprojected to `scale` distance units.
    fn reproject(&mut self, source: RasterHandle, scale: f64) -> Result<RasterHandle, BackendError>;

    /// Submits an asynchronous mean-value query at a point.
    ///
    /// `scale` is the sampling resolution in distance units and must match
    /// the source raster's native cell size; sampling coarser or finer
    /// changes the returned mean.
    fn point_mean(&mut self, source: RasterHandle, point: LonLat, scale: f64) -> QueryId;

    /// Pulls completed queries. Each query completes exactly once.
    fn poll(&mut self) -> Vec<(QueryId, QueryOutcome)>;
}
