use foundation::geo::LonLat;

use crate::legend::LegendPanelKind;
use crate::panels::SidebarSection;

/// UI events delivered by the host toolkit.
///
/// Slider events carry the raw widget value; values outside the valid
/// range are recorded and ignored rather than treated as errors, since no
/// shipped control can produce them.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    YearSelected(i32),
    RankSelected(i32),
    InterpretabilityToggled(bool),
    OverlayToggled { name: String, checked: bool },
    LegendHeaderClicked(LegendPanelKind),
    LegendContainerCollapseClicked,
    SectionHeaderClicked(SidebarSection),
    SidebarCollapseClicked,
    MapClicked(LonLat),
}
