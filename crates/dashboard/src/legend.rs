/// The three floating legend panels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LegendPanelKind {
    Deforestation,
    Overlays,
    Interpretability,
}

/// Visibility state of one legend panel along two independent axes:
/// whether the current data makes it relevant, and whether the user has
/// collapsed it from its header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LegendPanel {
    pub relevant: bool,
    pub expanded: bool,
}

impl LegendPanel {
    /// The panel (header included) renders iff relevant.
    pub fn shown(&self) -> bool {
        self.relevant
    }

    /// The panel body renders iff relevant and not user-collapsed.
    pub fn content_shown(&self) -> bool {
        self.relevant && self.expanded
    }
}

/// One color box + label row in a legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendItem {
    pub color: &'static str,
    pub label: &'static str,
}

/// Data-driven visibility for the legend panels.
///
/// Relevance is a pure function of dashboard state: the deforestation
/// legend is always relevant, the interpretability legend follows its
/// checkbox, and the overlay container follows the checked-overlay count.
/// Expansion belongs to the user and survives relevance changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legends {
    deforestation: LegendPanel,
    overlays: LegendPanel,
    interpretability: LegendPanel,
    container_collapsed: bool,
}

impl Legends {
    pub fn new() -> Self {
        Self {
            deforestation: LegendPanel {
                relevant: true,
                expanded: true,
            },
            overlays: LegendPanel {
                relevant: false,
                expanded: true,
            },
            interpretability: LegendPanel {
                relevant: false,
                expanded: true,
            },
            container_collapsed: false,
        }
    }

    pub fn panel(&self, kind: LegendPanelKind) -> LegendPanel {
        match kind {
            LegendPanelKind::Deforestation => self.deforestation,
            LegendPanelKind::Overlays => self.overlays,
            LegendPanelKind::Interpretability => self.interpretability,
        }
    }

    pub fn set_interpretability(&mut self, checked: bool) {
        self.interpretability.relevant = checked;
    }

    pub fn set_overlay_count(&mut self, count: usize) {
        self.overlays.relevant = count > 0;
    }

    /// Header click: flips the user-collapse axis only.
    pub fn toggle_expanded(&mut self, kind: LegendPanelKind) {
        let panel = match kind {
            LegendPanelKind::Deforestation => &mut self.deforestation,
            LegendPanelKind::Overlays => &mut self.overlays,
            LegendPanelKind::Interpretability => &mut self.interpretability,
        };
        panel.expanded = !panel.expanded;
    }

    pub fn toggle_container(&mut self) {
        self.container_collapsed = !self.container_collapsed;
    }

    pub fn container_collapsed(&self) -> bool {
        self.container_collapsed
    }
}

impl Default for Legends {
    fn default() -> Self {
        Self::new()
    }
}

/// Deforestation legend rows, in display order.
pub fn deforestation_items() -> Vec<LegendItem> {
    vec![
        LegendItem {
            color: "#D0F5BE",
            label: "No Deforestation",
        },
        LegendItem {
            color: "#F0B86E",
            label: "0 - 350 hectares",
        },
        LegendItem {
            color: "#F94C10",
            label: "351 - 700 hectares",
        },
        LegendItem {
            color: "#C70039",
            label: "701 - 1050 hectares",
        },
        LegendItem {
            color: "#808080",
            label: "Non-forest formations",
        },
    ]
}

/// Feature-importance legend rows, one per driver class.
pub fn feature_importance_items() -> Vec<LegendItem> {
    vec![
        LegendItem {
            color: "#1f78b4",
            label: "proximity to recent deforestation",
        },
        LegendItem {
            color: "#33a02c",
            label: "forest edge density",
        },
        LegendItem {
            color: "#e31a1c",
            label: "mining",
        },
        LegendItem {
            color: "#ff7f00",
            label: "pasture",
        },
        LegendItem {
            color: "#6a3d9a",
            label: "indigenous areas",
        },
        LegendItem {
            color: "#b15928",
            label: "protected areas",
        },
        LegendItem {
            color: "#FFB6C1",
            label: "distance to roads",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{LegendPanelKind, Legends, deforestation_items, feature_importance_items};

    #[test]
    fn deforestation_is_always_relevant() {
        let legends = Legends::new();
        assert!(legends.panel(LegendPanelKind::Deforestation).shown());
        assert!(!legends.panel(LegendPanelKind::Overlays).shown());
        assert!(!legends.panel(LegendPanelKind::Interpretability).shown());
    }

    #[test]
    fn relevance_and_expansion_are_independent() {
        let mut legends = Legends::new();
        legends.toggle_expanded(LegendPanelKind::Interpretability);
        legends.set_interpretability(true);

        let panel = legends.panel(LegendPanelKind::Interpretability);
        assert!(panel.shown());
        assert!(!panel.content_shown());

        // Un-collapsing while relevant shows the body again.
        legends.toggle_expanded(LegendPanelKind::Interpretability);
        assert!(
            legends
                .panel(LegendPanelKind::Interpretability)
                .content_shown()
        );
    }

    #[test]
    fn overlay_relevance_follows_count() {
        let mut legends = Legends::new();
        legends.set_overlay_count(2);
        assert!(legends.panel(LegendPanelKind::Overlays).shown());
        legends.set_overlay_count(0);
        assert!(!legends.panel(LegendPanelKind::Overlays).shown());
    }

    #[test]
    fn item_tables_match_their_palettes() {
        assert_eq!(deforestation_items().len(), 5);
        assert_eq!(feature_importance_items().len(), 7);
    }
}
