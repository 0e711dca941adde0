/// Opaque handle to backend-resident raster data.
///
/// Handles are small, copyable and stable for the session, so they can be
/// carried through layer state and query bookkeeping without allocation.
/// Derived handles (masked, clipped, reprojected) are distinct from their
/// source handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RasterHandle(pub u64);

/// Opaque handle to backend-resident vector data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VectorHandle(pub u64);
