use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Indicator keys shared by all views
pub mod keys {
    pub const INDICE_FREQUENCE: &str = "indice_frequence";
    pub const TAUX_GRAVITE: &str = "taux_gravite";
    pub const NOUVELLES_IP: &str = "nouvelles_ip";
    pub const DECES: &str = "deces";
    pub const JOURNEES_IT: &str = "journees_it";
    pub const NB_SALARIES: &str = "nb_salaries";
    pub const NB_HEURES: &str = "nb_heures";
    pub const NB_SIRET: &str = "nb_siret";
    pub const AT_1ER_REGLEMENT: &str = "at_1er_reglement";
    pub const AT_4J_ARRET: &str = "at_4j_arret";
    pub const MP_1ER_REGLEMENT: &str = "mp_1er_reglement";
    pub const IP_TAUX_SUP_10: &str = "ip_taux_sup_10";
    pub const TRAJET_COUNT: &str = "trajet_count";
    /// Event count inside yearly snapshots
    pub const EVENTS: &str = "events";
}

/// The 9 age bands used by the demographic breakdown, youngest first
pub const AGE_BANDS: [&str; 9] = [
    "<20", "20-24", "25-29", "30-34", "35-39", "40-49", "50-59", "60-64", "65+",
];

/// Indicator name -> value.
///
/// Non-numeric values found in the source JSON (nested objects, nulls) are dropped
/// on load, so every stored value is a plain number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct Stats(BTreeMap<String, f64>);

impl From<BTreeMap<String, Value>> for Stats {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        Stats(
            raw.into_iter()
                .filter_map(|(key, value)| value.as_f64().map(|v| (key, v)))
                .collect(),
        )
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Stats {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Stats(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Stats {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Value of an indicator, 0 when missing
    pub fn value(&self, key: &str) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn indice_frequence(&self) -> f64 {
        self.value(keys::INDICE_FREQUENCE)
    }

    pub fn taux_gravite(&self) -> f64 {
        self.value(keys::TAUX_GRAVITE)
    }

    pub fn nouvelles_ip(&self) -> f64 {
        self.value(keys::NOUVELLES_IP)
    }

    pub fn deces(&self) -> f64 {
        self.value(keys::DECES)
    }

    pub fn journees_it(&self) -> f64 {
        self.value(keys::JOURNEES_IT)
    }

    pub fn nb_salaries(&self) -> f64 {
        self.value(keys::NB_SALARIES)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SexSplit {
    #[serde(default)]
    pub masculin: u64,
    #[serde(default)]
    pub feminin: u64,
}

impl SexSplit {
    pub fn total(&self) -> u64 {
        self.masculin + self.feminin
    }

    /// Share of `count` in the total, in percent
    pub fn percent(&self, count: u64) -> f64 {
        match self.total() {
            0 => 0.0,
            total => count as f64 * 100.0 / total as f64,
        }
    }
}

/// Victim breakdown by sex and age band (accidents at work only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(default)]
    pub sex: SexSplit,
    #[serde(default)]
    pub age: BTreeMap<String, u64>,
}

impl Demographics {
    /// True when there is nothing to chart
    pub fn is_empty(&self) -> bool {
        self.sex.total() == 0
    }

    /// Counts for the fixed age bands, in band order; missing bands count as 0
    pub fn age_counts(&self) -> Vec<(&'static str, u64)> {
        AGE_BANDS
            .iter()
            .map(|band| (*band, self.age.get(*band).copied().unwrap_or(0)))
            .collect()
    }
}

/// Statistics of one NAF code at one level. The code itself is the table key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorRecord {
    pub libelle: String,
    #[serde(default)]
    pub stats: Stats,
    /// Cause category -> share in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_causes: Option<BTreeMap<String, f64>>,
    /// Year -> stats snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly: Option<BTreeMap<String, Stats>>,
    /// Finer codes aggregated into this record, display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codes_naf5: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographics: Option<Demographics>,
}

impl SectorRecord {
    /// Largest positive cause share, ties resolved by cause name
    pub fn top_cause(&self) -> Option<(&str, f64)> {
        self.risk_causes
            .as_ref()?
            .iter()
            .filter(|(_, share)| **share > 0.0)
            .fold(None, |best: Option<(&str, f64)>, (name, share)| match best {
                Some((_, best_share)) if best_share >= *share => best,
                _ => Some((name.as_str(), *share)),
            })
    }

    pub fn aggregated_codes(&self) -> usize {
        self.codes_naf5.as_ref().map_or(0, Vec::len)
    }
}
