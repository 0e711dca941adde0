/// Geographic primitives
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Map viewpoint: a center coordinate plus a discrete zoom level.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MapView {
    pub center: LonLat,
    pub zoom: u8,
}

impl MapView {
    pub const fn new(center: LonLat, zoom: u8) -> Self {
        Self { center, zoom }
    }
}

#[cfg(test)]
mod tests {
    use super::{LonLat, MapView};

    #[test]
    fn view_holds_center_and_zoom() {
        let v = MapView::new(LonLat::new(-62.2159, -3.4653), 5);
        assert_eq!(v.center.lon, -62.2159);
        assert_eq!(v.zoom, 5);
    }
}
