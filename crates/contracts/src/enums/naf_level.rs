use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::DataError;

/// Granularity of a NAF code: division, sub-class or detailed code
///
/// Ordered from coarse to fine, which is also the order of `naf_index` groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NafLevel {
    Naf2,
    Naf4,
    Naf5,
}

impl NafLevel {
    pub fn code(&self) -> &'static str {
        match self {
            NafLevel::Naf2 => "naf2",
            NafLevel::Naf4 => "naf4",
            NafLevel::Naf5 => "naf5",
        }
    }

    /// Human readable label shown under the selected sector
    pub fn display_name(&self) -> &'static str {
        match self {
            NafLevel::Naf2 => "Division NAF",
            NafLevel::Naf4 => "Sous-classe NAF",
            NafLevel::Naf5 => "Code NAF",
        }
    }

    pub fn all() -> Vec<NafLevel> {
        vec![NafLevel::Naf2, NafLevel::Naf4, NafLevel::Naf5]
    }

    /// Order in which tables are probed when a bare code has to be located
    pub fn lookup_order() -> [NafLevel; 3] {
        [NafLevel::Naf5, NafLevel::Naf4, NafLevel::Naf2]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "naf2" => Some(NafLevel::Naf2),
            "naf4" => Some(NafLevel::Naf4),
            "naf5" => Some(NafLevel::Naf5),
            _ => None,
        }
    }
}

impl fmt::Display for NafLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for NafLevel {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NafLevel::from_code(s).ok_or_else(|| DataError::UnknownLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!("naf4".parse::<NafLevel>().unwrap(), NafLevel::Naf4);
        assert_eq!(
            "naf3".parse::<NafLevel>(),
            Err(DataError::UnknownLevel("naf3".to_string()))
        );
    }

    #[test]
    fn test_ordering_is_coarse_to_fine() {
        assert!(NafLevel::Naf2 < NafLevel::Naf4);
        assert!(NafLevel::Naf4 < NafLevel::Naf5);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&NafLevel::Naf5).unwrap();
        assert_eq!(json, "\"naf5\"");
        let level: NafLevel = serde_json::from_str("\"naf2\"").unwrap();
        assert_eq!(level, NafLevel::Naf2);
    }
}
