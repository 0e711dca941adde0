use std::collections::BTreeMap;

use backend::api::{BackendError, RasterBackend};
use backend::handles::RasterHandle;
use backend::query::{QueryId, QueryOutcome};
use backend::value::{MaskPolarity, ValueRange};
use catalog::{CatalogError, OverlayCatalog, SourceCitation, SourceKind};
use foundation::geo::LonLat;
use foundation::round::display_round;
use layers::registry::{LayerRegistry, LayerSlot};
use layers::style::{LayerStyle, RasterStyle};
use layers::surface::{AttachedLayer, MapSurface, Renderable};
use runtime::event_bus::{Event, EventBus};
use runtime::metrics::Metrics;

use crate::config::DashboardConfig;
use crate::events::UiEvent;
use crate::legend::Legends;
use crate::overlays::ActiveOverlaySet;
use crate::panels::Sidebar;
use crate::sampler::{PixelSampler, SampleProgress};
use crate::selection::{FeatureRank, PredictionYear, Selection};

/// Mask applied to every prediction year. 0 encodes no-data and must stay
/// transparent rather than read as "zero deforestation".
pub const PREDICTION_RANGE: ValueRange = ValueRange::above(0.0, 10_500_300.0);

/// Mask applied to the feature-importance rasters.
pub const IMPORTANCE_RANGE: ValueRange = ValueRange::inclusive(1.0, 7.0);

/// Forest-cover classes kept visible in the base layer.
pub const FOREST_COVER_RANGE: ValueRange = ValueRange::inclusive(-1.0, 0.0);

pub const FOREST_COVER_LAYER: &str = "Forest Cover";
pub const PREDICTION_LAYER: &str = "Predicted Deforestation";
pub const IMPORTANCE_LAYER: &str = "Feature Importance";

fn forest_cover_style() -> LayerStyle {
    LayerStyle::Raster(RasterStyle::ramp(&["#808080", "#A8DF8E"], -1.0, 0.0))
}

fn prediction_style() -> LayerStyle {
    LayerStyle::Raster(RasterStyle::ramp(
        &["#D0F5BE00", "#F0B86E", "#F94C10", "#C70039"],
        0.0,
        10_500_300.0,
    ))
}

fn importance_style() -> LayerStyle {
    LayerStyle::Raster(RasterStyle::ramp(
        &[
            "#1f78b4", "#33a02c", "#e31a1c", "#ff7f00", "#6a3d9a", "#b15928", "#FFB6C1",
        ],
        1.0,
        7.0,
    ))
}

/// The three analysis label texts, exactly as a host toolkit renders them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisLabels {
    pub deforestation: String,
    pub carbon_stock: String,
    pub carbon_lost: String,
}

impl Default for AnalysisLabels {
    fn default() -> Self {
        Self {
            deforestation: "Deforestation:".to_string(),
            carbon_stock: "Carbon Stock:".to_string(),
            carbon_lost: "Potential Carbon Loss:".to_string(),
        }
    }
}

/// One overlay checkbox as the sidebar renders it, derived from the catalog
/// row and the active set.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxRow<'a> {
    pub label: &'a str,
    pub name: &'a str,
    pub checked: bool,
    pub swatch: Option<&'a str>,
    pub citation: &'a SourceCitation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardError {
    Backend(BackendError),
    Catalog(CatalogError),
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardError::Backend(e) => write!(f, "backend error: {e}"),
            DashboardError::Catalog(e) => write!(f, "catalog error: {e}"),
        }
    }
}

impl std::error::Error for DashboardError {}

impl From<BackendError> for DashboardError {
    fn from(e: BackendError) -> Self {
        DashboardError::Backend(e)
    }
}

impl From<CatalogError> for DashboardError {
    fn from(e: CatalogError) -> Self {
        DashboardError::Catalog(e)
    }
}

/// The dashboard controller.
///
/// Owns the backend and surface collaborators plus all observable state,
/// and routes every UI event into the matching mutation. All asset handles
/// are resolved once at construction, so event handling never fails: events
/// referencing invalid state are recorded no-ops.
pub struct Dashboard<B: RasterBackend, S: MapSurface> {
    config: DashboardConfig,
    catalog: OverlayCatalog,
    backend: B,
    surface: S,
    registry: LayerRegistry,
    selection: Selection,
    sampler: PixelSampler,
    legends: Legends,
    sidebar: Sidebar,
    active: ActiveOverlaySet,
    labels: AnalysisLabels,
    bus: EventBus,
    metrics: Metrics,
    predictions: BTreeMap<i32, RasterHandle>,
    importance: BTreeMap<i32, RasterHandle>,
    overlay_renderables: BTreeMap<String, Renderable>,
    carbon: RasterHandle,
    current_prediction: Option<RasterHandle>,
}

impl<B: RasterBackend, S: MapSurface> Dashboard<B, S> {
    /// Resolves every configured asset, attaches the startup layers
    /// (forest cover below the 2024 prediction) and centers the view.
    pub fn new(
        config: DashboardConfig,
        catalog: OverlayCatalog,
        mut backend: B,
        mut surface: S,
    ) -> Result<Self, DashboardError> {
        surface.set_view(config.view());

        let mut registry = LayerRegistry::new();
        let forest = backend.raster(&config.assets.forest_cover)?;
        let forest = backend.mask_range(forest, FOREST_COVER_RANGE, MaskPolarity::Inside)?;
        registry.set_slot(
            &mut surface,
            LayerSlot::Base,
            Renderable::Raster(forest),
            forest_cover_style(),
            FOREST_COVER_LAYER,
        );

        // Carbon density is clipped to the biome and resampled onto the
        // prediction grid before any query or overlay sees it.
        let biome = backend.vector(&config.assets.biome_border)?;
        let carbon = backend.raster(&config.assets.carbon_density)?;
        let carbon = backend.clip(carbon, biome)?;
        let carbon = backend.reproject(carbon, config.sample_scale)?;

        let mut predictions = BTreeMap::new();
        for year in PredictionYear::ALL {
            let raw = backend.raster(config.assets.prediction(year))?;
            let masked = backend.mask_range(raw, PREDICTION_RANGE, MaskPolarity::Inside)?;
            predictions.insert(year.year(), masked);
        }

        let mut importance = BTreeMap::new();
        for rank in FeatureRank::ALL {
            let raw = backend.raster(config.assets.importance(rank))?;
            let masked = backend.mask_range(raw, IMPORTANCE_RANGE, MaskPolarity::Inside)?;
            importance.insert(rank.rank(), masked);
        }

        let mut overlay_renderables = BTreeMap::new();
        for def in catalog.iter() {
            let renderable = match def.kind {
                SourceKind::Vector => Renderable::Vector(backend.vector(&def.source_asset)?),
                SourceKind::Raster => {
                    // The carbon overlay renders the same prepared grid the
                    // sampler queries.
                    let mut handle = if def.source_asset == config.assets.carbon_density {
                        carbon
                    } else {
                        backend.raster(&def.source_asset)?
                    };
                    if let Some(mask) = def.mask {
                        handle = backend.mask_range(handle, mask.range, mask.polarity)?;
                    }
                    Renderable::Raster(handle)
                }
            };
            overlay_renderables.insert(def.name.clone(), renderable);
        }

        let mut dashboard = Self {
            config,
            catalog,
            backend,
            surface,
            registry,
            selection: Selection::new(),
            sampler: PixelSampler::new(),
            legends: Legends::new(),
            sidebar: Sidebar::new(),
            active: ActiveOverlaySet::new(),
            labels: AnalysisLabels::default(),
            bus: EventBus::new(),
            metrics: Metrics::new(),
            predictions,
            importance,
            overlay_renderables,
            carbon,
            current_prediction: None,
        };
        dashboard.apply_year(dashboard.selection.year);
        Ok(dashboard)
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::YearSelected(value) => self.year_selected(value),
            UiEvent::RankSelected(value) => self.rank_selected(value),
            UiEvent::InterpretabilityToggled(checked) => self.interpretability_toggled(checked),
            UiEvent::OverlayToggled { name, checked } => self.overlay_toggled(&name, checked),
            UiEvent::LegendHeaderClicked(kind) => self.legends.toggle_expanded(kind),
            UiEvent::LegendContainerCollapseClicked => self.legends.toggle_container(),
            UiEvent::SectionHeaderClicked(section) => {
                self.sidebar.toggle_section(section);
            }
            UiEvent::SidebarCollapseClicked => {
                self.sidebar.toggle_collapsed();
            }
            UiEvent::MapClicked(point) => self.map_clicked(point),
        }
    }

    /// Routes all completed backend queries into the sampler.
    pub fn pump(&mut self) {
        for (id, outcome) in self.backend.poll() {
            self.resolve_query(id, outcome);
        }
    }

    /// Feeds one backend completion through the sampling pipeline.
    pub fn resolve_query(&mut self, id: QueryId, outcome: QueryOutcome) {
        match self.sampler.resolve(id, outcome) {
            SampleProgress::Complete(readout) => {
                self.labels.deforestation = format!(
                    "Deforestation: {} ha of 3600 ha",
                    display_round(readout.deforested_ha())
                );
                self.labels.carbon_stock = format!(
                    "Carbon Stock: {} tonnes/ha",
                    display_round(readout.carbon_stock_t_ha())
                );
                self.labels.carbon_lost = format!(
                    "Potential Carbon Loss: {} tonnes in 3600 ha pixel",
                    display_round(readout.carbon_lost_t())
                );
                self.metrics.inc_counter("sample.complete", 1);
                self.bus.emit("sample", "analysis labels updated");
            }
            SampleProgress::Missing => {
                self.metrics.inc_counter("sample.missing", 1);
                self.bus.emit("sample", "no data at clicked location");
            }
            SampleProgress::Stale => {
                self.metrics.inc_counter("sample.stale", 1);
            }
            SampleProgress::Partial | SampleProgress::Unknown => {}
        }
    }

    fn year_selected(&mut self, value: i32) {
        let Some(year) = PredictionYear::from_year(value) else {
            self.bus.emit("selection", format!("ignored year {value}"));
            return;
        };
        self.selection.set_year(year);
        self.apply_year(year);
    }

    fn apply_year(&mut self, year: PredictionYear) {
        let Some(&handle) = self.predictions.get(&year.year()) else {
            return;
        };
        self.registry.set_slot(
            &mut self.surface,
            LayerSlot::Prediction,
            Renderable::Raster(handle),
            prediction_style(),
            PREDICTION_LAYER,
        );
        self.current_prediction = Some(handle);
        self.bus
            .emit("layer", format!("prediction year {}", year.year()));
    }

    fn rank_selected(&mut self, value: i32) {
        let Some(rank) = FeatureRank::from_rank(value) else {
            self.bus.emit("selection", format!("ignored rank {value}"));
            return;
        };
        self.selection.set_rank(rank);
        if self.selection.interpretability_enabled {
            self.apply_importance();
        }
    }

    fn interpretability_toggled(&mut self, checked: bool) {
        self.selection.set_interpretability(checked);
        if checked {
            self.apply_importance();
        } else if self
            .registry
            .clear_slot(&mut self.surface, LayerSlot::Interpretability)
        {
            self.bus.emit("layer", "feature importance cleared");
        }
        self.legends.set_interpretability(checked);
    }

    fn apply_importance(&mut self) {
        let rank = self.selection.rank;
        let Some(&handle) = self.importance.get(&rank.rank()) else {
            return;
        };
        self.registry.set_slot(
            &mut self.surface,
            LayerSlot::Interpretability,
            Renderable::Raster(handle),
            importance_style(),
            IMPORTANCE_LAYER,
        );
        self.bus
            .emit("layer", format!("feature importance rank {}", rank.rank()));
    }

    fn overlay_toggled(&mut self, name: &str, checked: bool) {
        let Some(def) = self.catalog.get(name) else {
            self.bus.emit("overlay", format!("unknown overlay {name}"));
            return;
        };
        if checked {
            if !self.active.insert(name) {
                return;
            }
            let Some(&renderable) = self.overlay_renderables.get(name) else {
                return;
            };
            self.registry.add_overlay(
                &mut self.surface,
                AttachedLayer::new(def.name.clone(), renderable, def.style.clone()),
            );
            self.bus.emit("overlay", format!("{name} on"));
        } else {
            if !self.active.remove(name) {
                return;
            }
            self.registry.remove_by_name(&mut self.surface, name);
            self.bus.emit("overlay", format!("{name} off"));
        }
        self.legends.set_overlay_count(self.active.len());
        self.metrics
            .set_gauge("overlay.active", self.active.len() as i64);
    }

    fn map_clicked(&mut self, point: LonLat) {
        let Some(prediction) = self.current_prediction else {
            self.bus.emit("click", "no prediction layer selected");
            return;
        };
        let seq = self.sampler.begin(
            &mut self.backend,
            prediction,
            self.carbon,
            point,
            self.config.sample_scale,
        );
        self.metrics.inc_counter("click.count", 1);
        self.bus.emit(
            "click",
            format!("sample {} at ({:.4}, {:.4})", seq.0, point.lon, point.lat),
        );
    }

    /// Checkbox rows in catalog order, reflecting the active set.
    pub fn checkbox_rows(&self) -> Vec<CheckboxRow<'_>> {
        self.catalog
            .iter()
            .map(|def| CheckboxRow {
                label: &def.label,
                name: &def.name,
                checked: self.active.contains(&def.name),
                swatch: def.style.swatch(),
                citation: &def.citation,
            })
            .collect()
    }

    pub fn labels(&self) -> &AnalysisLabels {
        &self.labels
    }

    pub fn legends(&self) -> &Legends {
        &self.legends
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn active_overlays(&self) -> &ActiveOverlaySet {
        &self.active
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.bus.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::{Dashboard, FOREST_COVER_LAYER, IMPORTANCE_LAYER, PREDICTION_LAYER};
    use crate::config::DashboardConfig;
    use crate::events::UiEvent;
    use crate::legend::LegendPanelKind;
    use crate::overlays::amazon_catalog;
    use crate::panels::SidebarSection;
    use backend::api::RasterBackend;
    use backend::memory::{GridBackend, GridRaster, VectorRegion};
    use backend::query::QueryId;
    use foundation::geo::LonLat;
    use layers::registry::LayerSlot;
    use layers::surface::{RecordingSurface, Renderable};

    const ORIGIN: LonLat = LonLat::new(-70.0, -10.0);
    const EXTENT: LonLat = LonLat::new(-50.0, 10.0);
    const SIDE: usize = 20;

    /// Cell (2, 0): the ordinary prediction value.
    const P_MAIN: LonLat = LonLat::new(-67.5, -9.5);
    /// Cell (1, 0): a larger prediction value for second-click tests.
    const P_OTHER: LonLat = LonLat::new(-68.5, -9.5);
    /// Cell (0, 0): prediction 0, i.e. no-data under the mask.
    const P_NODATA: LonLat = LonLat::new(-69.5, -9.5);

    fn grid(default: f64, overrides: &[(usize, f64)]) -> GridRaster {
        let mut values = vec![default; SIDE * SIDE];
        for &(idx, v) in overrides {
            values[idx] = v;
        }
        GridRaster::new(ORIGIN, 1.0, SIDE, SIDE, values)
    }

    fn seeded_backend() -> GridBackend {
        let mut b = GridBackend::new();
        b.insert_raster("amazon/forest_cover", grid(0.0, &[]));
        b.insert_raster(
            "amazon/prediction_2024",
            grid(7452.1, &[(0, 0.0), (1, 20_000.0)]),
        );
        b.insert_raster("amazon/prediction_2025_cumulative", grid(8000.0, &[]));
        b.insert_raster("amazon/prediction_2026_cumulative", grid(9000.0, &[]));
        b.insert_raster("amazon/importance_rank_1", grid(1.0, &[]));
        b.insert_raster("amazon/importance_rank_2", grid(2.0, &[]));
        b.insert_raster("amazon/importance_rank_3", grid(3.0, &[]));
        b.insert_raster("amazon/mining", grid(2.0, &[(0, 0.5)]));
        b.insert_raster("amazon/pasture", grid(2.0, &[]));
        b.insert_raster("wcmc/biomass_carbon_density", grid(182.7, &[]));
        for vector in [
            "amazon/conservation_units",
            "amazon/indigenous_areas",
            "amazon/state_boundaries",
            "amazon/biome_border",
        ] {
            b.insert_vector(vector, VectorRegion::new(ORIGIN, EXTENT));
        }
        b
    }

    fn fixture_with(config: DashboardConfig) -> Dashboard<GridBackend, RecordingSurface> {
        let catalog = amazon_catalog(&config).expect("catalog");
        Dashboard::new(config, catalog, seeded_backend(), RecordingSurface::new())
            .expect("dashboard")
    }

    fn fixture() -> Dashboard<GridBackend, RecordingSurface> {
        fixture_with(DashboardConfig::default())
    }

    #[test]
    fn startup_attaches_base_below_prediction() {
        let dash = fixture();
        assert_eq!(
            dash.surface().names(),
            vec![FOREST_COVER_LAYER, PREDICTION_LAYER]
        );
        assert_eq!(dash.surface().view(), Some(dash.config.view()));
        assert_eq!(dash.selection().year.year(), 2024);
    }

    #[test]
    fn every_year_attaches_exactly_one_prediction_layer() {
        let mut dash = fixture();
        for year in [2025, 2026, 2024, 2026] {
            dash.handle_event(UiEvent::YearSelected(year));
            let names = dash.surface().names();
            let count = names.iter().filter(|n| **n == PREDICTION_LAYER).count();
            assert_eq!(count, 1, "year {year}");
            assert_eq!(dash.selection().year.year(), year);
        }
    }

    #[test]
    fn out_of_range_year_is_ignored() {
        let mut dash = fixture();
        dash.handle_event(UiEvent::YearSelected(2030));
        assert_eq!(dash.selection().year.year(), 2024);
        assert_eq!(
            dash.surface().names(),
            vec![FOREST_COVER_LAYER, PREDICTION_LAYER]
        );
    }

    #[test]
    fn prediction_mask_treats_zero_as_no_data() {
        let mut dash = fixture();
        dash.handle_event(UiEvent::MapClicked(P_NODATA));
        dash.pump();
        // Labels keep their startup values; the miss is only counted.
        assert_eq!(dash.labels().deforestation, "Deforestation:");
        assert_eq!(dash.metrics().counter("sample.missing"), 1);
        assert_eq!(dash.metrics().counter("sample.complete"), 0);
    }

    #[test]
    fn interpretability_removes_and_restores_the_layer() {
        let mut dash = fixture();
        dash.handle_event(UiEvent::InterpretabilityToggled(true));
        assert_eq!(
            dash.surface().names(),
            vec![FOREST_COVER_LAYER, PREDICTION_LAYER, IMPORTANCE_LAYER]
        );
        assert!(dash.legends().panel(LegendPanelKind::Interpretability).shown());

        dash.handle_event(UiEvent::RankSelected(3));
        assert_eq!(
            dash.registry.slot_name(LayerSlot::Interpretability),
            Some(IMPORTANCE_LAYER)
        );

        dash.handle_event(UiEvent::InterpretabilityToggled(false));
        assert_eq!(
            dash.surface().names(),
            vec![FOREST_COVER_LAYER, PREDICTION_LAYER]
        );
        assert!(!dash.legends().panel(LegendPanelKind::Interpretability).shown());

        // Disabling again stays a no-op; rank changes while disabled attach
        // nothing.
        dash.handle_event(UiEvent::InterpretabilityToggled(false));
        dash.handle_event(UiEvent::RankSelected(2));
        assert_eq!(dash.registry.slot_name(LayerSlot::Interpretability), None);

        // Re-enabling restores the last-selected rank.
        dash.handle_event(UiEvent::InterpretabilityToggled(true));
        let attached = dash.surface().layer(IMPORTANCE_LAYER).expect("importance");
        assert_eq!(
            attached.renderable,
            Renderable::Raster(dash.importance[&2])
        );
    }

    #[test]
    fn overlay_round_trip_restores_state() {
        let mut dash = fixture();
        let baseline = dash
            .surface()
            .names()
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>();

        dash.handle_event(UiEvent::OverlayToggled {
            name: "Mining (Masked)".to_string(),
            checked: true,
        });
        assert!(dash.active_overlays().contains("Mining (Masked)"));
        assert!(dash.legends().panel(LegendPanelKind::Overlays).shown());
        assert_eq!(dash.metrics().gauge("overlay.active"), 1);
        assert_eq!(dash.surface().names().last().copied(), Some("Mining (Masked)"));

        dash.handle_event(UiEvent::OverlayToggled {
            name: "Mining (Masked)".to_string(),
            checked: false,
        });
        assert!(dash.active_overlays().is_empty());
        assert!(!dash.legends().panel(LegendPanelKind::Overlays).shown());
        assert_eq!(dash.metrics().gauge("overlay.active"), 0);
        assert_eq!(dash.surface().names(), baseline);
    }

    #[test]
    fn unknown_overlay_is_a_recorded_noop() {
        let mut dash = fixture();
        dash.handle_event(UiEvent::OverlayToggled {
            name: "Roads".to_string(),
            checked: true,
        });
        assert!(dash.active_overlays().is_empty());
        assert_eq!(dash.surface().len(), 2);
    }

    #[test]
    fn click_updates_all_labels_atomically() {
        let mut dash = fixture();
        dash.handle_event(UiEvent::MapClicked(P_MAIN));

        let pending: Vec<QueryId> = dash.backend.pending().iter().map(|q| q.id).collect();
        assert_eq!(pending.len(), 2);
        for q in dash.backend.pending() {
            assert_eq!(q.scale, 6000.0);
        }

        // One half resolved: nothing changes yet.
        let (id, outcome) = dash.backend.resolve_one(pending[0]).expect("pending");
        dash.resolve_query(id, outcome);
        assert_eq!(dash.labels().deforestation, "Deforestation:");

        let (id, outcome) = dash.backend.resolve_one(pending[1]).expect("pending");
        dash.resolve_query(id, outcome);
        assert_eq!(dash.labels().deforestation, "Deforestation: 1 ha of 3600 ha");
        assert_eq!(dash.labels().carbon_stock, "Carbon Stock: 183 tonnes/ha");
        assert_eq!(
            dash.labels().carbon_lost,
            "Potential Carbon Loss: 136 tonnes in 3600 ha pixel"
        );
        assert_eq!(dash.metrics().counter("sample.complete"), 1);
    }

    #[test]
    fn later_click_wins_even_when_completions_cross() {
        let mut dash = fixture();
        dash.handle_event(UiEvent::MapClicked(P_MAIN));
        let first: Vec<QueryId> = dash.backend.pending().iter().map(|q| q.id).collect();

        dash.handle_event(UiEvent::MapClicked(P_OTHER));
        let second: Vec<QueryId> = dash
            .backend
            .pending()
            .iter()
            .map(|q| q.id)
            .filter(|id| !first.contains(id))
            .collect();

        // The newer click's completions arrive first and win.
        for id in second {
            let (id, outcome) = dash.backend.resolve_one(id).expect("pending");
            dash.resolve_query(id, outcome);
        }
        assert_eq!(dash.labels().deforestation, "Deforestation: 2 ha of 3600 ha");
        assert_eq!(
            dash.labels().carbon_lost,
            "Potential Carbon Loss: 365 tonnes in 3600 ha pixel"
        );

        // The older click's completions straggle in and are discarded.
        for id in first {
            let (id, outcome) = dash.backend.resolve_one(id).expect("pending");
            dash.resolve_query(id, outcome);
        }
        assert_eq!(dash.labels().deforestation, "Deforestation: 2 ha of 3600 ha");
        assert_eq!(dash.metrics().counter("sample.stale"), 2);
        assert_eq!(dash.metrics().counter("sample.complete"), 1);
    }

    #[test]
    fn click_without_a_prediction_layer_is_a_noop() {
        let mut dash = fixture();
        dash.current_prediction = None;
        dash.handle_event(UiEvent::MapClicked(P_MAIN));
        assert!(dash.backend.pending().is_empty());
        assert_eq!(dash.metrics().counter("click.count"), 0);
    }

    #[test]
    fn class_mask_polarity_is_preserved_and_flippable() {
        // Shipped behavior: the mining overlay shows pixels OUTSIDE [0, 1].
        let mut dash = fixture();
        dash.handle_event(UiEvent::OverlayToggled {
            name: "Mining (Masked)".to_string(),
            checked: true,
        });
        let Renderable::Raster(handle) = dash
            .surface()
            .layer("Mining (Masked)")
            .expect("overlay")
            .renderable
        else {
            panic!("mining overlay must be raster");
        };
        // Cell (0, 0) holds 0.5 (inside the class range), the rest 2.0.
        dash.backend.point_mean(handle, P_NODATA, 6000.0);
        dash.backend.point_mean(handle, P_MAIN, 6000.0);
        let done = dash.backend.poll();
        assert_eq!(done[0].1.value(), None);
        assert_eq!(done[1].1.value(), Some(2.0));

        // The config flag flips the polarity to "inside".
        let mut dash = fixture_with(DashboardConfig {
            class_mask_shows_inside: true,
            ..DashboardConfig::default()
        });
        dash.handle_event(UiEvent::OverlayToggled {
            name: "Mining (Masked)".to_string(),
            checked: true,
        });
        let Renderable::Raster(handle) = dash
            .surface()
            .layer("Mining (Masked)")
            .expect("overlay")
            .renderable
        else {
            panic!("mining overlay must be raster");
        };
        dash.backend.point_mean(handle, P_NODATA, 6000.0);
        dash.backend.point_mean(handle, P_MAIN, 6000.0);
        let done = dash.backend.poll();
        assert_eq!(done[0].1.value(), Some(0.5));
        assert_eq!(done[1].1.value(), None);
    }

    #[test]
    fn checkbox_rows_follow_catalog_order() {
        let mut dash = fixture();
        dash.handle_event(UiEvent::OverlayToggled {
            name: "States".to_string(),
            checked: true,
        });
        let rows = dash.checkbox_rows();
        let labels: Vec<&str> = rows.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![
                "Indigenous areas",
                "Protected Areas",
                "Mining Areas",
                "Pasture",
                "State Boundaries",
                "Carbon Density"
            ]
        );
        assert!(rows[4].checked);
        assert!(!rows[0].checked);
        assert_eq!(rows[2].swatch, Some("#982176"));
    }

    #[test]
    fn panel_events_route_to_presentation_state() {
        let mut dash = fixture();
        dash.handle_event(UiEvent::SectionHeaderClicked(SidebarSection::Help));
        assert!(dash.sidebar().is_expanded(SidebarSection::Help));

        dash.handle_event(UiEvent::LegendHeaderClicked(LegendPanelKind::Deforestation));
        assert!(
            !dash
                .legends()
                .panel(LegendPanelKind::Deforestation)
                .content_shown()
        );

        dash.handle_event(UiEvent::SidebarCollapseClicked);
        assert!(dash.sidebar().is_collapsed());

        dash.handle_event(UiEvent::LegendContainerCollapseClicked);
        assert!(dash.legends().container_collapsed());
    }
}
