//! Sector statistics by NAF code: data model, search index and code resolution

pub mod dataset;
pub mod index;
pub mod record;
pub mod resolver;

pub use dataset::{Dataset, DatasetMeta, NafIndexEntry, NationalBaseline, SectorTable};
pub use index::{search, QueryKind, SearchResults, MAX_SUGGESTIONS};
pub use record::{Demographics, SectorRecord, SexSplit, Stats, AGE_BANDS};
pub use resolver::resolve;

#[cfg(test)]
pub(crate) mod fixtures;
