use async_trait::async_trait;
use contracts::domain::sector::Dataset;
use contracts::enums::ViewId;
use contracts::shared::data_store::DatasetSource;
use contracts::shared::errors::{DataError, DataResult};
use std::path::{Path, PathBuf};

/// Reads `<dir>/<view>-data.json` from disk
pub struct FsDatasetSource {
    dir: PathBuf,
}

impl FsDatasetSource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self, view: ViewId) -> PathBuf {
        self.dir.join(view.data_file())
    }

    pub async fn read_text(&self, view: ViewId) -> DataResult<String> {
        let path = self.path(view);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| DataError::Fetch {
                view,
                message: format!("{}: {}", path.display(), e),
            })
    }
}

#[async_trait(?Send)]
impl DatasetSource for FsDatasetSource {
    async fn fetch(&self, view: ViewId) -> DataResult<Dataset> {
        let text = self.read_text(view).await?;
        Dataset::from_json(view, &text)
    }
}
