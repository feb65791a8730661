use contracts::domain::sector::Dataset;
use contracts::enums::{NafLevel, ViewId};
use contracts::shared::data_store::DatasetStore;
use contracts::shared::errors::DataResult;
use std::path::Path;

use crate::shared::config::{resolve_dir, Config};
use crate::shared::data::FsDatasetSource;

/// Code looked up in every dataset as a sanity probe
pub const SPOT_CODE: &str = "4711D";

/// Validation summary of one dataset file
#[derive(Debug, Clone, PartialEq)]
pub struct ViewReport {
    pub view: ViewId,
    pub naf2: usize,
    pub naf4: usize,
    pub naf5: usize,
    pub index: usize,
    pub national_if: f64,
    pub national_tg: f64,
    /// Label of [`SPOT_CODE`] when the dataset has it
    pub spot: Option<String>,
}

impl ViewReport {
    pub fn from_dataset(view: ViewId, dataset: &Dataset) -> Self {
        let national = &dataset.national().stats;
        Self {
            view,
            naf2: dataset.by_naf2.len(),
            naf4: dataset.by_naf4.len(),
            naf5: dataset.by_naf5.len(),
            index: dataset.naf_index.len(),
            national_if: national.indice_frequence(),
            national_tg: national.taux_gravite(),
            spot: dataset
                .record(NafLevel::Naf5, SPOT_CODE)
                .map(|record| record.libelle.clone()),
        }
    }
}

/// Loads every view from `data_dir` through the regular store, so the same
/// parsing and invariant checks as the browser apply.
pub async fn check_datasets(data_dir: &Path) -> Vec<(ViewId, DataResult<ViewReport>)> {
    let store = DatasetStore::new(FsDatasetSource::new(data_dir));
    store
        .load_all(&ViewId::all())
        .await
        .into_iter()
        .map(|(view, result)| (view, result.map(|d| ViewReport::from_dataset(view, &d))))
        .collect()
}

pub async fn execute(config: &Config) -> anyhow::Result<()> {
    let data_dir = resolve_dir(&config.server.data_dir);
    tracing::info!("Checking datasets in {}", data_dir.display());

    let reports = check_datasets(&data_dir).await;
    let mut failed = 0;
    for (view, report) in &reports {
        match report {
            Ok(r) => {
                tracing::info!(
                    "{}: {} naf2, {} naf4, {} naf5, {} index entries, national IF {:.1} TG {:.2}",
                    view,
                    r.naf2,
                    r.naf4,
                    r.naf5,
                    r.index,
                    r.national_if,
                    r.national_tg
                );
                match &r.spot {
                    Some(libelle) => tracing::info!("{}: {} = {}", view, SPOT_CODE, libelle),
                    None => tracing::warn!("{}: {} not found", view, SPOT_CODE),
                }
            }
            Err(e) => {
                failed += 1;
                tracing::error!("{}", e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} datasets failed validation", failed, reports.len());
    }
    tracing::info!("All {} datasets are valid", reports.len());
    Ok(())
}
