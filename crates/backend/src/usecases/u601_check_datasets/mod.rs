pub mod executor;

pub use executor::{check_datasets, execute, ViewReport, SPOT_CODE};
