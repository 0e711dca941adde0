use std::collections::BTreeMap;

use backend::api::RasterBackend;
use backend::handles::RasterHandle;
use backend::query::{QueryId, QueryOutcome};
use foundation::geo::LonLat;

/// Monotonically increasing click sequence number.
///
/// Every click gets a fresh sequence; completions carrying a sequence other
/// than the newest pending one are discarded, so only the most recent click
/// can ever mutate the analysis labels (last-click-wins).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClickSeq(pub u64);

/// Joined result of one click's two point queries.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SampleReadout {
    pub prediction_mean: f64,
    pub carbon_density_mean: f64,
}

impl SampleReadout {
    /// Predicted deforested area in hectares (source values are m²).
    pub fn deforested_ha(&self) -> f64 {
        self.prediction_mean / 10_000.0
    }

    /// Carbon stock in tonnes per hectare.
    pub fn carbon_stock_t_ha(&self) -> f64 {
        self.carbon_density_mean
    }

    /// Potential carbon loss in tonnes over the pixel.
    pub fn carbon_lost_t(&self) -> f64 {
        self.deforested_ha() * self.carbon_stock_t_ha()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum SampleKind {
    Prediction,
    CarbonDensity,
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Part {
    Outstanding,
    Resolved(f64),
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct PendingClick {
    seq: ClickSeq,
    prediction: Part,
    carbon: Part,
}

/// What a completion did to the join.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SampleProgress {
    /// The query was never issued by this sampler.
    Unknown,
    /// The query belongs to a superseded or abandoned click.
    Stale,
    /// First half of the join arrived; waiting for the other.
    Partial,
    /// Both halves arrived for the newest click.
    Complete(SampleReadout),
    /// A half came back empty; the click is abandoned and labels keep
    /// their previous values.
    Missing,
}

/// Joins the two per-click point queries and enforces last-click-wins.
///
/// The labels derived from a readout must update atomically: never from one
/// click's prediction paired with another click's carbon value. That holds
/// because a readout is only produced when both halves carry the newest
/// sequence number.
///
/// Routes for superseded clicks stay in the table until their completion
/// arrives; the backend completes every query exactly once, so the table
/// stays bounded by the number of genuinely outstanding queries.
#[derive(Debug, Default)]
pub struct PixelSampler {
    next_seq: u64,
    current: Option<PendingClick>,
    routes: BTreeMap<QueryId, (ClickSeq, SampleKind)>,
}

impl PixelSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues both point queries for a click and makes it the click that
    /// completions are judged against. Any previously pending click is
    /// superseded immediately.
    pub fn begin<B: RasterBackend>(
        &mut self,
        backend: &mut B,
        prediction: RasterHandle,
        carbon: RasterHandle,
        point: LonLat,
        scale: f64,
    ) -> ClickSeq {
        let seq = ClickSeq(self.next_seq);
        self.next_seq = self.next_seq.wrapping_add(1);

        let prediction_query = backend.point_mean(prediction, point, scale);
        let carbon_query = backend.point_mean(carbon, point, scale);
        self.routes
            .insert(prediction_query, (seq, SampleKind::Prediction));
        self.routes
            .insert(carbon_query, (seq, SampleKind::CarbonDensity));

        self.current = Some(PendingClick {
            seq,
            prediction: Part::Outstanding,
            carbon: Part::Outstanding,
        });
        seq
    }

    pub fn has_pending(&self) -> bool {
        self.current.is_some()
    }

    /// Feeds one backend completion into the join.
    pub fn resolve(&mut self, id: QueryId, outcome: QueryOutcome) -> SampleProgress {
        let Some((seq, kind)) = self.routes.remove(&id) else {
            return SampleProgress::Unknown;
        };
        let Some(current) = self.current.as_mut() else {
            return SampleProgress::Stale;
        };
        if current.seq != seq {
            return SampleProgress::Stale;
        }

        let Some(value) = outcome.value() else {
            self.current = None;
            return SampleProgress::Missing;
        };

        match kind {
            SampleKind::Prediction => current.prediction = Part::Resolved(value),
            SampleKind::CarbonDensity => current.carbon = Part::Resolved(value),
        }

        if let (Part::Resolved(p), Part::Resolved(c)) = (current.prediction, current.carbon) {
            self.current = None;
            return SampleProgress::Complete(SampleReadout {
                prediction_mean: p,
                carbon_density_mean: c,
            });
        }
        SampleProgress::Partial
    }
}
