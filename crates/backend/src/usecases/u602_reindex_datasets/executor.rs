use anyhow::Context;
use contracts::domain::sector::Dataset;
use contracts::enums::ViewId;
use contracts::shared::errors::{DataError, DataResult};
use serde_json::Value;

use crate::shared::config::{resolve_dir, Config};
use crate::shared::data::FsDatasetSource;

/// Replaces `naf_index` with one rebuilt from the three tables.
///
/// Works on the raw JSON so fields the dataset model does not know survive.
/// Returns the number of index entries.
pub fn reindex_value(view: ViewId, value: &mut Value) -> DataResult<usize> {
    let parse_error = |e: serde_json::Error| DataError::Parse {
        view,
        message: e.to_string(),
    };

    let mut dataset: Dataset = serde_json::from_value(value.clone()).map_err(parse_error)?;
    dataset.naf_index = dataset.build_index();
    dataset
        .validate()
        .map_err(|reason| DataError::Invalid { view, reason })?;

    let index = serde_json::to_value(&dataset.naf_index).map_err(parse_error)?;
    let Some(object) = value.as_object_mut() else {
        return Err(DataError::Invalid {
            view,
            reason: "dataset is not a JSON object".to_string(),
        });
    };
    object.insert("naf_index".to_string(), index);
    Ok(dataset.naf_index.len())
}

async fn reindex_file(source: &FsDatasetSource, view: ViewId) -> anyhow::Result<usize> {
    let text = source.read_text(view).await?;
    let mut value: Value = serde_json::from_str(&text).map_err(|e| DataError::Parse {
        view,
        message: e.to_string(),
    })?;
    let entries = reindex_value(view, &mut value)?;

    let path = source.path(view);
    tokio::fs::write(&path, serde_json::to_string(&value)?)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(entries)
}

pub async fn execute(config: &Config) -> anyhow::Result<()> {
    let data_dir = resolve_dir(&config.server.data_dir);
    let source = FsDatasetSource::new(&data_dir);

    let mut failed = 0;
    for view in ViewId::all() {
        match reindex_file(&source, view).await {
            Ok(entries) => tracing::info!("{}: naf_index rebuilt ({} entries)", view, entries),
            Err(e) => {
                failed += 1;
                tracing::error!("{}: {:#}", view, e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} datasets could not be reindexed", failed);
    }
    Ok(())
}
