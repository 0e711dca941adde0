use std::env;
use std::error::Error;
use std::fs;

use backend::memory::{GridBackend, GridRaster, VectorRegion};
use dashboard::{Dashboard, DashboardConfig, UiEvent, amazon_catalog};
use foundation::geo::LonLat;
use layers::surface::RecordingSurface;
use tracing::info;
use tracing_subscriber::EnvFilter;

const ORIGIN: LonLat = LonLat::new(-72.0, -12.0);
const EXTENT: LonLat = LonLat::new(-52.0, 8.0);
const SIDE: usize = 40;
const CELL_DEG: f64 = 0.5;

fn grid_from(f: impl Fn(usize, usize) -> f64) -> GridRaster {
    let mut values = Vec::with_capacity(SIDE * SIDE);
    for row in 0..SIDE {
        for col in 0..SIDE {
            values.push(f(col, row));
        }
    }
    GridRaster::new(ORIGIN, CELL_DEG, SIDE, SIDE, values)
}

/// Synthetic stand-in for the hosted asset store: deterministic grids with
/// enough variety to exercise masks, overlays and point sampling.
fn synthetic_backend(config: &DashboardConfig) -> GridBackend {
    let mut b = GridBackend::new();
    let assets = &config.assets;

    // Forest cover classes: -1 and 0 are kept by the base mask, 1 is not.
    b.insert_raster(
        &assets.forest_cover,
        grid_from(|col, row| ((col + row) % 3) as f64 - 1.0),
    );

    // Predictions in m² per pixel, with periodic no-data zeros.
    let deforestation = |col: usize, row: usize| ((row * SIDE + col) % 300) as f64 * 35.0;
    b.insert_raster(&assets.prediction_2024, grid_from(deforestation));
    b.insert_raster(
        &assets.prediction_2025,
        grid_from(|col, row| deforestation(col, row) * 1.8),
    );
    b.insert_raster(
        &assets.prediction_2026,
        grid_from(|col, row| deforestation(col, row) * 2.5),
    );

    for (asset, offset) in [
        (&assets.importance_rank_1, 0),
        (&assets.importance_rank_2, 2),
        (&assets.importance_rank_3, 4),
    ] {
        b.insert_raster(
            asset,
            grid_from(move |col, row| ((col + row + offset) % 7 + 1) as f64),
        );
    }

    // Class rasters: values in [0, 1] are the class, 2.0 is everything else.
    let classes = |col: usize, row: usize| {
        if (col + row) % 3 == 0 {
            2.0
        } else {
            ((col + row) % 5) as f64 * 0.25
        }
    };
    b.insert_raster(&assets.mining, grid_from(classes));
    b.insert_raster(&assets.pasture, grid_from(|col, row| classes(row, col)));

    b.insert_raster(
        &assets.carbon_density,
        grid_from(|_, row| 50.0 + row as f64 * 5.0),
    );

    for vector in [
        &assets.biome_border,
        &assets.protected_areas,
        &assets.indigenous_areas,
        &assets.state_boundaries,
    ] {
        b.insert_vector(vector, VectorRegion::new(ORIGIN, EXTENT));
    }
    b
}

fn load_config() -> Result<DashboardConfig, Box<dyn Error>> {
    match env::var("DASHBOARD_CONFIG") {
        Ok(path) => {
            let raw = fs::read_to_string(&path)?;
            Ok(DashboardConfig::from_json(&raw)?)
        }
        Err(_) => Ok(DashboardConfig::default()),
    }
}

fn report(dash: &Dashboard<GridBackend, RecordingSurface>) {
    let labels = dash.labels();
    info!(layers = ?dash.surface().names(), "layer stack");
    info!(
        deforestation = %labels.deforestation,
        carbon_stock = %labels.carbon_stock,
        carbon_lost = %labels.carbon_lost,
        "analysis"
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = load_config()?;
    let backend = synthetic_backend(&config);
    let catalog = amazon_catalog(&config)?;
    let mut dash = Dashboard::new(config, catalog, backend, RecordingSurface::new())?;

    info!("dashboard ready");
    report(&dash);

    dash.handle_event(UiEvent::YearSelected(2025));
    dash.handle_event(UiEvent::InterpretabilityToggled(true));
    dash.handle_event(UiEvent::RankSelected(2));
    dash.handle_event(UiEvent::OverlayToggled {
        name: "Mining (Masked)".to_string(),
        checked: true,
    });
    dash.handle_event(UiEvent::OverlayToggled {
        name: "Protected Areas".to_string(),
        checked: true,
    });
    report(&dash);

    for point in [
        LonLat::new(-62.2, -3.4),
        LonLat::new(-58.7, -1.1),
        LonLat::new(-71.9, -11.9),
    ] {
        dash.handle_event(UiEvent::MapClicked(point));
        dash.pump();
        info!(lon = point.lon, lat = point.lat, "clicked");
        report(&dash);
    }

    dash.handle_event(UiEvent::OverlayToggled {
        name: "Mining (Masked)".to_string(),
        checked: false,
    });
    dash.handle_event(UiEvent::InterpretabilityToggled(false));
    report(&dash);

    for event in dash.drain_events() {
        info!(index = event.index, kind = event.kind, "{}", event.message);
    }
    for (name, value) in dash.metrics().snapshot().counters {
        info!(counter = %name, value, "metric");
    }
    Ok(())
}
