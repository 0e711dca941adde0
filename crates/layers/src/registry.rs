use crate::style::LayerStyle;
use crate::surface::{AttachedLayer, MapSurface, Renderable};

/// A fixed semantic role in the draw stack that holds at most one layer.
///
/// Slot order is part of the contract: base sits below prediction, which
/// sits below interpretability; overlay layers always sit above all slots.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayerSlot {
    Base,
    Prediction,
    Interpretability,
}

impl LayerSlot {
    pub const ALL: [LayerSlot; 3] = [
        LayerSlot::Base,
        LayerSlot::Prediction,
        LayerSlot::Interpretability,
    ];

    fn order(self) -> usize {
        match self {
            LayerSlot::Base => 0,
            LayerSlot::Prediction => 1,
            LayerSlot::Interpretability => 2,
        }
    }
}

/// Tracks which named layers are attached and where, and applies every
/// mutation to the rendering surface immediately.
///
/// Invariants:
/// - At most one layer per slot, and at most one layer per name.
/// - Slot layers keep their relative order no matter the order they were
///   set in; overlay layers stack above all slot layers in toggle order.
#[derive(Debug, Default)]
pub struct LayerRegistry {
    slots: [Option<String>; 3],
    overlays: Vec<String>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the slot's layer: the current occupant (if any) is removed
    /// first, then the new layer is inserted at the slot's z position.
    pub fn set_slot<S: MapSurface>(
        &mut self,
        surface: &mut S,
        slot: LayerSlot,
        renderable: Renderable,
        style: LayerStyle,
        name: impl Into<String>,
    ) {
        let name = name.into();
        if let Some(old) = self.slots[slot.order()].take() {
            surface.remove_layer(&old);
        }
        let index = self
            .slots
            .iter()
            .enumerate()
            .filter(|(order, occupant)| *order < slot.order() && occupant.is_some())
            .count();
        surface.insert_layer(index, AttachedLayer::new(name.clone(), renderable, style));
        self.slots[slot.order()] = Some(name);
    }

    /// Empties the slot. Returns `false` when it was already empty.
    pub fn clear_slot<S: MapSurface>(&mut self, surface: &mut S, slot: LayerSlot) -> bool {
        let Some(name) = self.slots[slot.order()].take() else {
            return false;
        };
        surface.remove_layer(&name);
        true
    }

    pub fn slot_name(&self, slot: LayerSlot) -> Option<&str> {
        self.slots[slot.order()].as_deref()
    }

    /// Adds an overlay layer above all slot layers.
    ///
    /// An overlay already attached under this name is replaced.
    pub fn add_overlay<S: MapSurface>(&mut self, surface: &mut S, layer: AttachedLayer) {
        if self.overlays.iter().any(|n| *n == layer.name) {
            self.remove_by_name(surface, &layer.name);
        }
        self.overlays.push(layer.name.clone());
        surface.add_layer(layer);
    }

    /// Removes the layer with this name, wherever it is attached.
    /// Removing a name that was never added is a no-op.
    pub fn remove_by_name<S: MapSurface>(&mut self, surface: &mut S, name: &str) -> bool {
        if let Some(idx) = self.overlays.iter().position(|n| n == name) {
            self.overlays.remove(idx);
            return surface.remove_layer(name);
        }
        for occupant in self.slots.iter_mut() {
            if occupant.as_deref() == Some(name) {
                *occupant = None;
                return surface.remove_layer(name);
            }
        }
        false
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.overlays.iter().any(|n| n == name)
            || self.slots.iter().any(|s| s.as_deref() == Some(name))
    }
}
