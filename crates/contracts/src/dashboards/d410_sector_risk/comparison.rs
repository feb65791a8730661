use serde::{Deserialize, Serialize};

use crate::domain::sector::resolver::{ancestors, descendants, division_of};
use crate::domain::sector::Dataset;
use crate::enums::NafLevel;

/// Breadcrumb element; the last one is the current code and is not clickable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub code: String,
    pub label: String,
    pub level: NafLevel,
    pub current: bool,
}

pub fn breadcrumb(dataset: &Dataset, code: &str, level: NafLevel) -> Vec<Crumb> {
    let mut crumbs: Vec<Crumb> = ancestors(dataset, code, level)
        .into_iter()
        .map(|entry| Crumb {
            label: format!("{} {}", entry.code, entry.libelle),
            code: entry.code,
            level: entry.level,
            current: false,
        })
        .collect();
    crumbs.push(Crumb {
        code: code.to_string(),
        label: code.to_string(),
        level,
        current: true,
    });
    crumbs
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonItem {
    pub code: String,
    pub libelle: String,
    pub indice_frequence: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonScope {
    /// Every detailed code of the division
    Division(String),
    /// Detailed codes of one sub-class
    Subclass(String),
    AllDivisions,
}

/// Peers of the selected code, highest frequency index first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSet {
    pub scope: ComparisonScope,
    /// Level to select when one of the items is clicked
    pub click_level: NafLevel,
    pub items: Vec<ComparisonItem>,
}

impl ComparisonSet {
    pub fn title(&self) -> String {
        match &self.scope {
            ComparisonScope::Division(code) => format!("Comparaison // division {}", code),
            ComparisonScope::Subclass(code) => format!("Comparaison // sous-classes {}", code),
            ComparisonScope::AllDivisions => "Comparaison // toutes divisions".to_string(),
        }
    }
}

pub fn comparison_set(dataset: &Dataset, code: &str, level: NafLevel) -> ComparisonSet {
    let (scope, source, parent) = match level {
        NafLevel::Naf5 => {
            let division = division_of(code);
            (ComparisonScope::Division(division.to_string()), NafLevel::Naf5, division)
        }
        NafLevel::Naf4 => (ComparisonScope::Subclass(code.to_string()), NafLevel::Naf5, code),
        // every division descends from the empty prefix
        NafLevel::Naf2 => (ComparisonScope::AllDivisions, NafLevel::Naf2, ""),
    };

    let mut items: Vec<ComparisonItem> = descendants(dataset, parent, source)
        .filter_map(|peer| {
            dataset.record(source, peer).map(|record| ComparisonItem {
                code: peer.to_string(),
                libelle: record.libelle.clone(),
                indice_frequence: record.stats.indice_frequence(),
            })
        })
        .collect();
    items.sort_by(|a, b| b.indice_frequence.total_cmp(&a.indice_frequence));

    ComparisonSet {
        scope,
        click_level: source,
        items,
    }
}

/// Every code of a level placed on a frequency-index axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionStrip {
    /// Ascending by frequency index, zero values left out
    pub points: Vec<ComparisonItem>,
    pub min: f64,
    pub max: f64,
    pub national: f64,
}

impl PositionStrip {
    /// Horizontal position in percent of the strip width (2..98)
    pub fn offset(&self, value: f64) -> f64 {
        if self.max <= 0.0 {
            return 2.0;
        }
        value / self.max * 96.0 + 2.0
    }
}

pub fn position_strip(dataset: &Dataset, level: NafLevel) -> Option<PositionStrip> {
    let mut points: Vec<ComparisonItem> = dataset
        .table(level)
        .iter()
        .filter(|(_, record)| record.stats.indice_frequence() > 0.0)
        .map(|(code, record)| ComparisonItem {
            code: code.clone(),
            libelle: record.libelle.clone(),
            indice_frequence: record.stats.indice_frequence(),
        })
        .collect();
    points.sort_by(|a, b| a.indice_frequence.total_cmp(&b.indice_frequence));

    let min = points.first()?.indice_frequence;
    let max = points.last()?.indice_frequence;
    Some(PositionStrip {
        points,
        min,
        max,
        national: dataset.national().stats.indice_frequence(),
    })
}
