pub mod u601_check_datasets;
pub mod u602_reindex_datasets;

#[cfg(test)]
pub(crate) mod test_data;
