use backend::handles::{RasterHandle, VectorHandle};
use foundation::geo::MapView;

use crate::style::LayerStyle;

/// What a layer draws: an opaque handle into the rendering backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Renderable {
    Raster(RasterHandle),
    Vector(VectorHandle),
}

/// A layer as handed to the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedLayer {
    pub name: String,
    pub renderable: Renderable,
    pub style: LayerStyle,
}

impl AttachedLayer {
    pub fn new(name: impl Into<String>, renderable: Renderable, style: LayerStyle) -> Self {
        Self {
            name: name.into(),
            renderable,
            style,
        }
    }
}

/// The external map rendering collaborator.
///
/// Mutations take effect immediately; there is no batching. Index 0 is the
/// bottom of the draw stack.
pub trait MapSurface {
    /// Inserts a layer at a z position, shifting layers at or above it up.
    fn insert_layer(&mut self, index: usize, layer: AttachedLayer);

    /// Adds a layer on top of the draw stack.
    fn add_layer(&mut self, layer: AttachedLayer);

    /// Removes the layer with this name. Returns `false` when absent.
    fn remove_layer(&mut self, name: &str) -> bool;

    fn set_view(&mut self, view: MapView);
}

/// In-memory surface that records the draw stack, for tests and demos.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    layers: Vec<AttachedLayer>,
    view: Option<MapView>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Attached layer names, bottom first.
    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    pub fn layer(&self, name: &str) -> Option<&AttachedLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn view(&self) -> Option<MapView> {
        self.view
    }
}

impl MapSurface for RecordingSurface {
    fn insert_layer(&mut self, index: usize, layer: AttachedLayer) {
        let index = index.min(self.layers.len());
        self.layers.insert(index, layer);
    }

    fn add_layer(&mut self, layer: AttachedLayer) {
        self.layers.push(layer);
    }

    fn remove_layer(&mut self, name: &str) -> bool {
        let Some(idx) = self.layers.iter().position(|l| l.name == name) else {
            return false;
        };
        self.layers.remove(idx);
        true
    }

    fn set_view(&mut self, view: MapView) {
        self.view = Some(view);
    }
}
