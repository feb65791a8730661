//! Year-by-year series of a sector next to the national baseline

use serde::{Deserialize, Serialize};

use crate::domain::sector::record::keys;
use crate::domain::sector::{Dataset, SectorRecord, Stats};
use crate::enums::ViewId;
use crate::shared::view_config::ViewConfig;

/// One year of the series. A year missing from a history is a gap, not a zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    pub year: String,
    pub events: Option<f64>,
    pub indice_frequence: Option<f64>,
    pub taux_gravite: Option<f64>,
    pub national_indice_frequence: Option<f64>,
    pub national_taux_gravite: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionSeries {
    pub event_label: String,
    /// Aligned on `meta.years`, ascending
    pub points: Vec<EvolutionPoint>,
}

impl EvolutionSeries {
    pub fn years(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.year.as_str()).collect()
    }

    /// First-to-last change of the event count, in percent
    pub fn events_change(&self) -> Option<f64> {
        self.change(|p| p.events)
    }

    pub fn indice_frequence_change(&self) -> Option<f64> {
        self.change(|p| p.indice_frequence)
    }

    /// `None` when either end is a gap or the first value is zero
    fn change(&self, value: impl Fn(&EvolutionPoint) -> Option<f64>) -> Option<f64> {
        let first = value(self.points.first()?)?;
        let last = value(self.points.last()?)?;
        if first == 0.0 {
            return None;
        }
        Some((last - first) / first * 100.0)
    }
}

/// Yearly snapshots name the event count `events`; fall back to the view's key
fn snapshot_events(stats: &Stats, config: &ViewConfig) -> Option<f64> {
    stats
        .get(keys::EVENTS)
        .or_else(|| stats.get(config.event_key))
}

/// Series for the evolution charts, `None` when the dataset covers fewer than
/// two years or the record has no history.
pub fn evolution_series(
    dataset: &Dataset,
    record: &SectorRecord,
    view: ViewId,
) -> Option<EvolutionSeries> {
    let yearly = record.yearly.as_ref()?;
    let years = &dataset.meta.years;
    if years.len() < 2 {
        return None;
    }

    let config = ViewConfig::for_view(view);
    let national = &dataset.national().yearly;
    let points = years
        .iter()
        .map(|year| {
            let sector = yearly.get(year);
            let nat = national.get(year);
            EvolutionPoint {
                year: year.clone(),
                events: sector.and_then(|s| snapshot_events(s, config)),
                indice_frequence: sector.and_then(|s| s.get(keys::INDICE_FREQUENCE)),
                taux_gravite: sector.and_then(|s| s.get(keys::TAUX_GRAVITE)),
                national_indice_frequence: nat.and_then(|n| n.get(keys::INDICE_FREQUENCE)),
                national_taux_gravite: nat.and_then(|n| n.get(keys::TAUX_GRAVITE)),
            }
        })
        .collect();

    Some(EvolutionSeries {
        event_label: config.event_label.to_string(),
        points,
    })
}
