/// Sidebar accordion sections, in display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SidebarSection {
    DataView,
    Overlays,
    Analysis,
    Help,
}

impl SidebarSection {
    pub const ALL: [SidebarSection; 4] = [
        SidebarSection::DataView,
        SidebarSection::Overlays,
        SidebarSection::Analysis,
        SidebarSection::Help,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SidebarSection::DataView => "Data View",
            SidebarSection::Overlays => "Overlays",
            SidebarSection::Analysis => "Analysis (selected pixel)",
            SidebarSection::Help => "Help",
        }
    }

    fn index(self) -> usize {
        match self {
            SidebarSection::DataView => 0,
            SidebarSection::Overlays => 1,
            SidebarSection::Analysis => 2,
            SidebarSection::Help => 3,
        }
    }
}

/// Presentation state for the sidebar: which accordion sections are open
/// and whether the sidebar as a whole is collapsed. Rendering is the host
/// toolkit's job; this only answers visibility questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    title: String,
    expanded: [bool; 4],
    collapsed: bool,
}

impl Sidebar {
    /// Sections start closed; the sidebar starts visible.
    pub fn new() -> Self {
        Self {
            title: "UN-REDD Deforestation Prediction App".to_string(),
            expanded: [false; 4],
            collapsed: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Accordion header click. Returns the section's new state.
    pub fn toggle_section(&mut self, section: SidebarSection) -> bool {
        let state = &mut self.expanded[section.index()];
        *state = !*state;
        *state
    }

    pub fn is_expanded(&self, section: SidebarSection) -> bool {
        self.expanded[section.index()]
    }

    /// Collapse button click. Returns `true` when now collapsed.
    pub fn toggle_collapsed(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        self.collapsed
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new()
    }
}

/// Usage text rendered in the Help section.
pub fn help_lines() -> &'static [&'static str] {
    &[
        "How to use this app:",
        "- Data View: picks the base maps. The predictions slider selects \
         a horizon from 2024 to 2026; the feature importance slider picks \
         the 1st, 2nd or 3rd most important driver per pixel.",
        "- Overlays: draws contextual layers on top of the base maps for \
         further interpretation.",
        "- Analysis: click anywhere on the map and this section shows the \
         predicted deforestation, carbon stock and potential carbon loss \
         for that location.",
        "- Legends: the panels on the right give color coding and data \
         sources for the visible layers.",
        "- Navigation: the side panel and the legends both collapse to \
         free up map space.",
    ]
}
