pub mod executor;

pub use executor::{execute, reindex_value};
