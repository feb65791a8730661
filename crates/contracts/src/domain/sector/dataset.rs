use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::record::{Demographics, SectorRecord, Stats};
use crate::enums::{NafLevel, ViewId};
use crate::shared::errors::{DataError, DataResult};

/// Code -> record for one level. Keys iterate in ascending order.
pub type SectorTable = BTreeMap<String, SectorRecord>;

/// One row of the flat search index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NafIndexEntry {
    pub code: String,
    pub libelle: String,
    pub level: NafLevel,
}

/// Whole-economy baseline: current stats plus history and demographics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NationalBaseline {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub yearly: BTreeMap<String, Stats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographics: Option<Demographics>,
    #[serde(flatten)]
    pub stats: Stats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub national: NationalBaseline,
    /// Years with historical data, ascending
    #[serde(default, deserialize_with = "deserialize_years")]
    pub years: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Years are written as strings by the pipeline but older files carry numbers
fn deserialize_years<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Num(i64),
        Text(String),
    }

    let raw = Vec::<Year>::deserialize(deserializer)?;
    let mut years: Vec<String> = raw
        .into_iter()
        .map(|y| match y {
            Year::Num(n) => n.to_string(),
            Year::Text(s) => s,
        })
        .collect();
    years.sort();
    Ok(years)
}

/// Pre-computed statistics for one view, as served in `<view>-data.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub by_naf2: SectorTable,
    pub by_naf4: SectorTable,
    pub by_naf5: SectorTable,
    #[serde(default)]
    pub naf_index: Vec<NafIndexEntry>,
    pub meta: DatasetMeta,
}

impl Dataset {
    /// Parses a dataset file, builds the search index when the file has none
    /// and checks the structural invariants.
    pub fn from_json(view: ViewId, text: &str) -> DataResult<Self> {
        let mut dataset: Dataset = serde_json::from_str(text).map_err(|e| DataError::Parse {
            view,
            message: e.to_string(),
        })?;
        if dataset.naf_index.is_empty() {
            dataset.naf_index = dataset.build_index();
        }
        dataset
            .validate()
            .map_err(|reason| DataError::Invalid { view, reason })?;
        Ok(dataset)
    }

    pub fn table(&self, level: NafLevel) -> &SectorTable {
        match level {
            NafLevel::Naf2 => &self.by_naf2,
            NafLevel::Naf4 => &self.by_naf4,
            NafLevel::Naf5 => &self.by_naf5,
        }
    }

    pub fn record(&self, level: NafLevel, code: &str) -> Option<&SectorRecord> {
        self.table(level).get(code)
    }

    pub fn contains(&self, level: NafLevel, code: &str) -> bool {
        self.table(level).contains_key(code)
    }

    pub fn national(&self) -> &NationalBaseline {
        &self.meta.national
    }

    /// First and last year of the historical series, when there is one
    pub fn year_span(&self) -> Option<(&str, &str)> {
        let first = self.meta.years.first()?;
        let last = self.meta.years.last()?;
        Some((first.as_str(), last.as_str()))
    }

    /// Flat index over the three tables, grouped by level (coarse first) then code
    pub fn build_index(&self) -> Vec<NafIndexEntry> {
        let mut index: Vec<NafIndexEntry> = NafLevel::all()
            .into_iter()
            .flat_map(|level| {
                self.table(level).iter().map(move |(code, record)| NafIndexEntry {
                    code: code.clone(),
                    libelle: record.libelle.clone(),
                    level,
                })
            })
            .collect();
        index.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.code.cmp(&b.code)));
        index
    }

    /// Structural checks every downstream lookup relies on
    pub fn validate(&self) -> Result<(), String> {
        for level in NafLevel::all() {
            if self.table(level).is_empty() {
                return Err(format!("table by_{} is empty", level));
            }
        }
        if self.meta.national.stats.is_empty() {
            return Err("meta.national baseline is missing".to_string());
        }
        if let Some(entry) = self
            .naf_index
            .iter()
            .find(|entry| !self.contains(entry.level, &entry.code))
        {
            return Err(format!(
                "naf_index entry {} is not in by_{}",
                entry.code, entry.level
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sector::fixtures;

    #[test]
    fn test_parse_fixture() {
        let dataset = fixtures::at_dataset();
        assert_eq!(dataset.by_naf2.len(), 4);
        assert!(dataset.contains(NafLevel::Naf5, "6201Z"));
        assert!(!dataset.contains(NafLevel::Naf4, "6201Z"));
        assert_eq!(dataset.national().stats.indice_frequence(), 30.0);
        assert_eq!(dataset.year_span(), Some(("2021", "2023")));
    }

    #[test]
    fn test_index_built_when_missing() {
        let dataset = fixtures::at_dataset();
        assert_eq!(
            dataset.naf_index.len(),
            dataset.by_naf2.len() + dataset.by_naf4.len() + dataset.by_naf5.len()
        );
        assert_eq!(dataset.naf_index[0].level, NafLevel::Naf2);
        assert_eq!(dataset.naf_index.last().unwrap().level, NafLevel::Naf5);
    }

    #[test]
    fn test_national_keeps_history_apart_from_stats() {
        let dataset = fixtures::at_dataset();
        let national = dataset.national();
        assert_eq!(national.yearly.len(), 2);
        assert_eq!(national.stats.get("yearly"), None);
    }

    #[test]
    fn test_numeric_years_accepted() {
        let json = r#"{
            "by_naf2": {"62": {"libelle": "Programmation", "stats": {"deces": 0}}},
            "by_naf4": {"6201": {"libelle": "Programmation", "stats": {"deces": 0}}},
            "by_naf5": {"6201Z": {"libelle": "Programmation", "stats": {"deces": 0}}},
            "meta": {"national": {"indice_frequence": 10}, "years": [2023, 2021]}
        }"#;
        let dataset = Dataset::from_json(ViewId::Mp, json).unwrap();
        assert_eq!(dataset.meta.years, vec!["2021", "2023"]);
    }

    #[test]
    fn test_empty_table_rejected() {
        let json = r#"{
            "by_naf2": {"62": {"libelle": "Programmation"}},
            "by_naf4": {},
            "by_naf5": {"6201Z": {"libelle": "Programmation"}},
            "meta": {"national": {"indice_frequence": 10}}
        }"#;
        let err = Dataset::from_json(ViewId::At, json).unwrap_err();
        assert_eq!(
            err,
            DataError::Invalid {
                view: ViewId::At,
                reason: "table by_naf4 is empty".to_string()
            }
        );
    }

    #[test]
    fn test_missing_national_rejected() {
        let json = r#"{
            "by_naf2": {"62": {"libelle": "Programmation"}},
            "by_naf4": {"6201": {"libelle": "Programmation"}},
            "by_naf5": {"6201Z": {"libelle": "Programmation"}},
            "meta": {"national": {}}
        }"#;
        let err = Dataset::from_json(ViewId::Trajet, json).unwrap_err();
        assert!(matches!(err, DataError::Invalid { view: ViewId::Trajet, .. }));
    }

    #[test]
    fn test_dangling_index_entry_rejected() {
        let json = r#"{
            "by_naf2": {"62": {"libelle": "Programmation"}},
            "by_naf4": {"6201": {"libelle": "Programmation"}},
            "by_naf5": {"6201Z": {"libelle": "Programmation"}},
            "naf_index": [{"code": "9999X", "libelle": "?", "level": "naf5"}],
            "meta": {"national": {"indice_frequence": 10}}
        }"#;
        let err = Dataset::from_json(ViewId::At, json).unwrap_err();
        assert_eq!(
            err,
            DataError::Invalid {
                view: ViewId::At,
                reason: "naf_index entry 9999X is not in by_naf5".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = Dataset::from_json(ViewId::At, "{not json").unwrap_err();
        assert!(matches!(err, DataError::Parse { view: ViewId::At, .. }));
    }
}
