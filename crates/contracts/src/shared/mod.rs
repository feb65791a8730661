pub mod data_store;
pub mod errors;
pub mod text;
pub mod view_config;
