use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::DataError;

/// Statistical domain shown by the dashboard, each with its own dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewId {
    /// Accidents du travail
    At,
    /// Maladies professionnelles
    Mp,
    /// Accidents de trajet
    Trajet,
}

impl ViewId {
    /// Identifier used in URL fragments and data file names
    pub fn code(&self) -> &'static str {
        match self {
            ViewId::At => "at",
            ViewId::Mp => "mp",
            ViewId::Trajet => "trajet",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ViewId::At => "Accidents du travail",
            ViewId::Mp => "Maladies professionnelles",
            ViewId::Trajet => "Accidents de trajet",
        }
    }

    /// All views, in navigation order
    pub fn all() -> Vec<ViewId> {
        vec![ViewId::At, ViewId::Mp, ViewId::Trajet]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "at" => Some(ViewId::At),
            "mp" => Some(ViewId::Mp),
            "trajet" => Some(ViewId::Trajet),
            _ => None,
        }
    }

    /// Dataset file name, e.g. `at-data.json`
    pub fn data_file(&self) -> String {
        format!("{}-data.json", self.code())
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ViewId {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::from_code(s).ok_or_else(|| DataError::UnknownView(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for view in ViewId::all() {
            assert_eq!(ViewId::from_code(view.code()), Some(view));
            assert_eq!(view.to_string().parse::<ViewId>().unwrap(), view);
        }
    }

    #[test]
    fn test_unknown_view() {
        assert_eq!(ViewId::from_code("AT"), None);
        assert_eq!(
            "rp".parse::<ViewId>(),
            Err(DataError::UnknownView("rp".to_string()))
        );
    }

    #[test]
    fn test_data_file() {
        assert_eq!(ViewId::Trajet.data_file(), "trajet-data.json");
    }
}
