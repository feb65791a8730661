use serde::{Deserialize, Serialize};

use crate::domain::sector::{Dataset, SectorRecord};
use crate::enums::{NafLevel, ViewId};
use crate::shared::view_config::ViewConfig;

/// Number of sectors listed on the national overview
pub const TOP_SECTORS: usize = 10;

/// Position of a code when its level is sorted by event count, largest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    /// 1-based
    pub position: usize,
    pub total: usize,
}

pub fn event_rank(dataset: &Dataset, view: ViewId, level: NafLevel, code: &str) -> Option<Rank> {
    let config = ViewConfig::for_view(view);
    let mut counts: Vec<(&str, f64)> = dataset
        .table(level)
        .iter()
        .map(|(c, record)| (c.as_str(), config.events(&record.stats)))
        .collect();
    counts.sort_by(|a, b| b.1.total_cmp(&a.1));

    let position = counts.iter().position(|(c, _)| *c == code)?;
    Some(Rank {
        position: position + 1,
        total: counts.len(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// Sector value relative to the national one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NationalDelta {
    pub percent: f64,
    pub trend: Trend,
}

impl NationalDelta {
    /// Badge text, e.g. "+42% vs national"
    pub fn label(&self) -> String {
        let sign = if self.percent >= 0.0 { "+" } else { "" };
        format!("{}{:.0}% vs national", sign, self.percent)
    }
}

/// Deviation from the national value; within ±5% is neutral.
///
/// `invert` flips up/down for indicators where higher is better.
/// `None` when the national value is zero.
pub fn national_delta(sector: f64, national: f64, invert: bool) -> Option<NationalDelta> {
    if national == 0.0 {
        return None;
    }
    let percent = (sector - national) / national * 100.0;
    let trend = match (percent, invert) {
        (p, false) if p > 5.0 => Trend::Up,
        (p, false) if p < -5.0 => Trend::Down,
        (p, true) if p > 5.0 => Trend::Down,
        (p, true) if p < -5.0 => Trend::Up,
        _ => Trend::Neutral,
    };
    Some(NationalDelta { percent, trend })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSector {
    pub code: String,
    pub libelle: String,
    pub indice_frequence: f64,
    pub events: f64,
}

/// Detailed codes with the highest frequency index
pub fn top_by_frequency(dataset: &Dataset, view: ViewId, limit: usize) -> Vec<TopSector> {
    let config = ViewConfig::for_view(view);
    let mut sectors: Vec<TopSector> = dataset
        .table(NafLevel::Naf5)
        .iter()
        .map(|(code, record)| TopSector {
            code: code.clone(),
            libelle: record.libelle.clone(),
            indice_frequence: record.stats.indice_frequence(),
            events: config.events(&record.stats),
        })
        .collect();
    sectors.sort_by(|a, b| b.indice_frequence.total_cmp(&a.indice_frequence));
    sectors.truncate(limit);
    sectors
}

/// Level name under the sector title, plus the number of detailed codes an
/// aggregate covers, e.g. "Division NAF // 12 codes NAF agrégés"
pub fn sector_subtitle(level: NafLevel, record: &SectorRecord) -> String {
    match record.codes_naf5 {
        Some(_) => format!(
            "{} // {} codes NAF agrégés",
            level.display_name(),
            record.aggregated_codes()
        ),
        None => level.display_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sector::fixtures;

    #[test]
    fn test_event_rank() {
        let dataset = fixtures::at_dataset();
        assert_eq!(
            event_rank(&dataset, ViewId::At, NafLevel::Naf2, "47"),
            Some(Rank { position: 1, total: 4 })
        );
        assert_eq!(
            event_rank(&dataset, ViewId::At, NafLevel::Naf2, "35"),
            Some(Rank { position: 4, total: 4 })
        );
        assert_eq!(event_rank(&dataset, ViewId::At, NafLevel::Naf2, "99"), None);
    }

    #[test]
    fn test_national_delta() {
        let up = national_delta(45.0, 30.0, false).unwrap();
        assert_eq!(up.trend, Trend::Up);
        assert_eq!(up.label(), "+50% vs national");

        let down = national_delta(15.0, 30.0, false).unwrap();
        assert_eq!(down.trend, Trend::Down);
        assert_eq!(down.label(), "-50% vs national");

        assert_eq!(national_delta(31.0, 30.0, false).unwrap().trend, Trend::Neutral);
        assert_eq!(national_delta(45.0, 30.0, true).unwrap().trend, Trend::Down);
        assert_eq!(national_delta(10.0, 0.0, false), None);
    }

    #[test]
    fn test_top_by_frequency() {
        let dataset = fixtures::at_dataset();
        let top = top_by_frequency(&dataset, ViewId::At, 3);
        let codes: Vec<&str> = top.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, vec!["1011Z", "4711D", "4711A"]);
        assert_eq!(top[0].events, 4000.0);
        assert_eq!(top_by_frequency(&dataset, ViewId::At, TOP_SECTORS).len(), 7);
    }

    #[test]
    fn test_sector_subtitle() {
        let dataset = fixtures::at_dataset();
        let detailed = dataset.record(NafLevel::Naf5, "4711D").unwrap();
        assert_eq!(sector_subtitle(NafLevel::Naf5, detailed), "Code NAF");

        let division = SectorRecord {
            codes_naf5: Some(vec!["4711A".to_string(), "4711D".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            sector_subtitle(NafLevel::Naf2, &division),
            "Division NAF // 2 codes NAF agrégés"
        );
    }
}
