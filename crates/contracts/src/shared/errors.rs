use thiserror::Error;

use crate::enums::ViewId;

/// Errors raised while loading or reading datasets.
///
/// Lookups that simply find nothing (unknown code in a URL, empty search)
/// are not errors and are modelled as `Option` / empty results instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("Échec du chargement des données {view} ({status})")]
    Load { view: ViewId, status: u16 },

    #[error("Request for {view} dataset failed: {message}")]
    Fetch { view: ViewId, message: String },

    #[error("Failed to parse {view} dataset: {message}")]
    Parse { view: ViewId, message: String },

    #[error("Invalid {view} dataset: {reason}")]
    Invalid { view: ViewId, reason: String },

    #[error("Dataset {0} is not loaded")]
    NotLoaded(ViewId),

    #[error("Unknown NAF level: {0}")]
    UnknownLevel(String),

    #[error("Unknown view: {0}")]
    UnknownView(String),
}

impl DataError {
    pub fn view(&self) -> Option<ViewId> {
        match self {
            DataError::Load { view, .. }
            | DataError::Fetch { view, .. }
            | DataError::Parse { view, .. }
            | DataError::Invalid { view, .. } => Some(*view),
            DataError::NotLoaded(view) => Some(*view),
            DataError::UnknownLevel(_) | DataError::UnknownView(_) => None,
        }
    }
}

pub type DataResult<T> = Result<T, DataError>;
